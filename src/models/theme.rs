//! Theme customizations: a color scheme plus typography, spacing, radius,
//! animation, layout and breakpoint settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Color, ColorRole, ColorScheme};

/// Font families, sizes and weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyConfig {
    /// Font family for headings
    pub heading_font: String,
    /// Font family for body text
    pub body_font: String,
    /// Root font size in pixels
    pub base_size: f64,
    /// Unitless body line height
    pub line_height: f64,
    /// Heading font weight (100-900)
    pub heading_weight: u16,
    /// Body font weight (100-900)
    pub body_weight: u16,
    /// Letter spacing in em
    pub letter_spacing: f64,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            heading_font: "Inter".to_string(),
            body_font: "Inter".to_string(),
            base_size: 16.0,
            line_height: 1.6,
            heading_weight: 700,
            body_weight: 400,
            letter_spacing: 0.0,
        }
    }
}

/// Spacing scale and section padding, in rem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingConfig {
    /// Multiplier applied to the spacing ladder
    pub scale: f64,
    /// Horizontal padding of `.container`
    pub container_padding: f64,
    /// Vertical padding of `.section`
    pub section_spacing: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            container_padding: 1.5,
            section_spacing: 4.0,
        }
    }
}

/// Corner radii in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadiusConfig {
    /// Small radius (inputs, tags)
    pub small: f64,
    /// Medium radius (buttons)
    pub medium: f64,
    /// Large radius (cards)
    pub large: f64,
    /// Pill radius
    pub full: f64,
}

impl Default for BorderRadiusConfig {
    fn default() -> Self {
        Self {
            small: 4.0,
            medium: 8.0,
            large: 16.0,
            full: 9999.0,
        }
    }
}

/// Transition timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// When false, every duration compiles to `0ms`
    pub enabled: bool,
    /// Fast duration in milliseconds
    pub fast_ms: u32,
    /// Default duration in milliseconds
    pub normal_ms: u32,
    /// Slow duration in milliseconds
    pub slow_ms: u32,
    /// CSS easing function
    pub easing: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fast_ms: 150,
            normal_ms: 300,
            slow_ms: 500,
            easing: "ease-in-out".to_string(),
        }
    }
}

/// Page layout dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Container max width in pixels
    pub max_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Grid gap in rem
    pub grid_gap: f64,
    /// Number of grid columns
    pub grid_columns: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            header_height: 64,
            grid_gap: 1.5,
            grid_columns: 12,
        }
    }
}

/// Breakpoints in pixels and per-breakpoint font scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveConfig {
    /// Upper bound of the mobile range
    pub mobile_breakpoint: u32,
    /// Upper bound of the tablet range
    pub tablet_breakpoint: u32,
    /// Lower bound of the desktop range
    pub desktop_breakpoint: u32,
    /// Base font size multiplier on mobile
    pub mobile_font_scale: f64,
    /// Base font size multiplier on tablet
    pub tablet_font_scale: f64,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 640,
            tablet_breakpoint: 1024,
            desktop_breakpoint: 1280,
            mobile_font_scale: 0.875,
            tablet_font_scale: 0.9375,
        }
    }
}

/// A user's full set of theme customizations.
///
/// # Lifecycle
///
/// Created by the theme builder, persisted by
/// [`ThemeRepository`](crate::services::ThemeRepository), optionally marked
/// active, changed through [`ThemeUpdate`]s and deleted by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCustomizations {
    /// Identifier of the form `theme-<millis>-<suffix>`
    pub id: String,
    /// Display name
    pub name: String,
    /// Template this theme was derived from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Semantic colors
    pub colors: ColorScheme,
    /// Fonts and sizes
    #[serde(default)]
    pub typography: TypographyConfig,
    /// Spacing scale
    #[serde(default)]
    pub spacing: SpacingConfig,
    /// Corner radii
    #[serde(default)]
    pub border_radius: BorderRadiusConfig,
    /// Transition timing
    #[serde(default)]
    pub animations: AnimationConfig,
    /// Layout dimensions
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Breakpoints
    #[serde(default)]
    pub responsive: ResponsiveConfig,
    /// Raw CSS appended to the generated stylesheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl ThemeCustomizations {
    /// Creates a theme with default settings and a fresh id.
    pub fn new(name: impl Into<String>, colors: ColorScheme) -> Self {
        let now = Utc::now();
        Self {
            id: generate_theme_id(now),
            name: name.into(),
            template_id: None,
            colors,
            typography: TypographyConfig::default(),
            spacing: SpacingConfig::default(),
            border_radius: BorderRadiusConfig::default(),
            animations: AnimationConfig::default(),
            layout: LayoutConfig::default(),
            responsive: ResponsiveConfig::default(),
            custom_css: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies one update and bumps `updated_at`.
    pub fn apply(&mut self, update: ThemeUpdate) {
        match update {
            ThemeUpdate::Name(name) => self.name = name,
            ThemeUpdate::Color { role, value } => self.colors.set(role, value),
            ThemeUpdate::Colors(colors) => self.colors = colors,
            ThemeUpdate::Typography(typography) => self.typography = typography,
            ThemeUpdate::Spacing(spacing) => self.spacing = spacing,
            ThemeUpdate::BorderRadius(radius) => self.border_radius = radius,
            ThemeUpdate::Animations(animations) => self.animations = animations,
            ThemeUpdate::Layout(layout) => self.layout = layout,
            ThemeUpdate::Responsive(responsive) => self.responsive = responsive,
            ThemeUpdate::CustomCss(css) => self.custom_css = css.filter(|c| !c.trim().is_empty()),
        }
        self.updated_at = Utc::now();
    }

    /// Gives the theme a new id and fresh timestamps.
    pub fn reissue(&mut self) {
        let now = Utc::now();
        self.id = generate_theme_id(now);
        self.created_at = now;
        self.updated_at = now;
    }
}

/// A typed change to one section of a theme.
///
/// Section variants replace the whole section; `Color` changes one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "camelCase")]
pub enum ThemeUpdate {
    /// Rename the theme
    Name(String),
    /// Change a single color role
    Color {
        /// Role to change
        role: ColorRole,
        /// New color
        value: Color,
    },
    /// Replace the whole color scheme
    Colors(ColorScheme),
    /// Replace typography settings
    Typography(TypographyConfig),
    /// Replace spacing settings
    Spacing(SpacingConfig),
    /// Replace corner radii
    BorderRadius(BorderRadiusConfig),
    /// Replace animation timing
    Animations(AnimationConfig),
    /// Replace layout dimensions
    Layout(LayoutConfig),
    /// Replace breakpoints
    Responsive(ResponsiveConfig),
    /// Set or clear custom CSS
    CustomCss(Option<String>),
}

/// Builds an id of the form `theme-<unix-millis>-<9 lowercase alphanumerics>`.
pub fn generate_theme_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("theme-{}-{}", now.timestamp_millis(), suffix)
}
