//! Compiles a [`ThemeCustomizations`] into CSS custom properties and a
//! self-contained stylesheet.
//!
//! Everything here is pure string generation. Writing the result somewhere
//! and loading web fonts lives in [`StylesheetWriter`] and
//! [`google_fonts_url`], which are the only parts that touch the outside
//! world.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::models::{ColorRole, ThemeCustomizations, TypographyConfig};
use crate::services::accessibility::readable_foreground;

/// Font size ladder relative to the base size.
pub const FONT_SCALE: [(&str, f64); 8] = [
    ("xs", 0.75),
    ("sm", 0.875),
    ("base", 1.0),
    ("lg", 1.125),
    ("xl", 1.25),
    ("2xl", 1.5),
    ("3xl", 1.875),
    ("4xl", 2.25),
];

/// Spacing ladder, multiplied by the theme's spacing scale (rem).
pub const SPACING_SCALE: [(&str, f64); 7] = [
    ("xs", 0.25),
    ("sm", 0.5),
    ("md", 1.0),
    ("lg", 1.5),
    ("xl", 2.0),
    ("2xl", 3.0),
    ("3xl", 4.0),
];

/// Shadow geometry and the alpha suffix appended to the text color.
const SHADOWS: [(&str, &str, &str); 4] = [
    ("sm", "0 1px 2px 0", "0d"),
    ("md", "0 4px 6px -1px", "1a"),
    ("lg", "0 10px 15px -3px", "1a"),
    ("xl", "0 20px 25px -5px", "26"),
];

/// Roles that get a `--color-<role>-foreground` companion.
const FILLED_ROLES: [ColorRole; 4] = [
    ColorRole::Primary,
    ColorRole::Secondary,
    ColorRole::Accent,
    ColorRole::Surface,
];

/// Families that never need a web font request.
const SYSTEM_FONTS: [&str; 14] = [
    "system-ui",
    "-apple-system",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "arial",
    "helvetica",
    "georgia",
    "times new roman",
    "courier new",
    "verdana",
    "tahoma",
    "trebuchet ms",
];

/// Formats a number the way JavaScript's `String(n)` does for typical
/// values: integers without a decimal point, otherwise the shortest form
/// that round-trips.
///
/// ```
/// use sitecraft::services::theme_compiler::format_number;
///
/// assert_eq!(format_number(16.0), "16");
/// assert_eq!(format_number(0.875), "0.875");
/// assert_eq!(format_number(16.12345), "16.12345");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Maps a theme to its CSS custom properties, keyed by property name.
pub fn to_css_variables(theme: &ThemeCustomizations) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();
    let mut set = |name: String, value: String| {
        vars.insert(name, value);
    };

    // Colors
    for (role, color) in theme.colors.iter() {
        set(format!("--color-{}", role.css_name()), color.to_hex());
    }
    for role in FILLED_ROLES {
        set(
            format!("--color-{}-foreground", role.css_name()),
            readable_foreground(theme.colors.get(role)).to_hex(),
        );
    }

    // Typography
    let typography = &theme.typography;
    set("--font-heading".into(), font_stack(&typography.heading_font));
    set("--font-body".into(), font_stack(&typography.body_font));
    for (name, factor) in FONT_SCALE {
        set(
            format!("--font-size-{name}"),
            format!("{}px", format_number(typography.base_size * factor)),
        );
    }
    set("--line-height".into(), format_number(typography.line_height));
    set("--font-weight-heading".into(), typography.heading_weight.to_string());
    set("--font-weight-body".into(), typography.body_weight.to_string());
    set(
        "--letter-spacing".into(),
        format!("{}em", format_number(typography.letter_spacing)),
    );

    // Spacing
    let spacing = &theme.spacing;
    for (name, factor) in SPACING_SCALE {
        set(
            format!("--spacing-{name}"),
            format!("{}rem", format_number(spacing.scale * factor)),
        );
    }
    set(
        "--container-padding".into(),
        format!("{}rem", format_number(spacing.container_padding)),
    );
    set(
        "--section-spacing".into(),
        format!("{}rem", format_number(spacing.section_spacing)),
    );

    // Radii
    let radius = &theme.border_radius;
    for (name, value) in [
        ("sm", radius.small),
        ("md", radius.medium),
        ("lg", radius.large),
        ("full", radius.full),
    ] {
        set(format!("--radius-{name}"), format!("{}px", format_number(value)));
    }

    // Shadows
    let shadow_base = theme.colors.text.to_hex();
    for (name, geometry, alpha) in SHADOWS {
        set(
            format!("--shadow-{name}"),
            format!("{geometry} {shadow_base}{alpha}"),
        );
    }

    // Motion
    let animations = &theme.animations;
    for (name, ms) in [
        ("fast", animations.fast_ms),
        ("normal", animations.normal_ms),
        ("slow", animations.slow_ms),
    ] {
        let ms = if animations.enabled { ms } else { 0 };
        set(format!("--duration-{name}"), format!("{ms}ms"));
    }
    set("--easing".into(), animations.easing.clone());

    // Layout
    let layout = &theme.layout;
    set("--max-width".into(), format!("{}px", layout.max_width));
    set("--header-height".into(), format!("{}px", layout.header_height));
    set("--grid-gap".into(), format!("{}rem", format_number(layout.grid_gap)));
    set("--grid-columns".into(), layout.grid_columns.to_string());

    // Breakpoints
    let responsive = &theme.responsive;
    set(
        "--breakpoint-mobile".into(),
        format!("{}px", responsive.mobile_breakpoint),
    );
    set(
        "--breakpoint-tablet".into(),
        format!("{}px", responsive.tablet_breakpoint),
    );
    set(
        "--breakpoint-desktop".into(),
        format!("{}px", responsive.desktop_breakpoint),
    );

    vars
}

/// Generates the complete stylesheet for a theme.
///
/// Order: `:root` variables, resets, typography, layout utilities, button
/// and card components, responsive overrides, the reduced-motion override,
/// then any custom CSS verbatim.
pub fn to_stylesheet(theme: &ThemeCustomizations) -> String {
    let mut css = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(css, "/* Theme: {} */", theme.name.replace("*/", "* /"));
    css.push_str(":root {\n");
    for (name, value) in to_css_variables(theme) {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n\n");

    css.push_str(BASE_RULES);
    css.push_str(COMPONENT_RULES);

    let responsive = &theme.responsive;
    let base_size = theme.typography.base_size;
    for (breakpoint, scale) in [
        (responsive.tablet_breakpoint, responsive.tablet_font_scale),
        (responsive.mobile_breakpoint, responsive.mobile_font_scale),
    ] {
        let _ = write!(
            css,
            "\n@media (max-width: {breakpoint}px) {{\n  :root {{\n    --font-size-base: {}px;\n  }}\n}}\n",
            format_number(base_size * scale)
        );
    }

    css.push_str(REDUCED_MOTION_RULES);

    if let Some(custom) = theme.custom_css.as_deref().filter(|c| !c.trim().is_empty()) {
        css.push_str("\n/* Custom CSS */\n");
        css.push_str(custom);
        if !custom.ends_with('\n') {
            css.push('\n');
        }
    }

    css
}

/// Quotes a family name if needed and appends a generic fallback.
fn font_stack(family: &str) -> String {
    let family = family.trim();
    let quoted = if family.contains(' ') && !family.starts_with(['"', '\'']) {
        format!("\"{family}\"")
    } else {
        family.to_string()
    };
    format!("{quoted}, system-ui, sans-serif")
}

fn is_system_font(family: &str) -> bool {
    let normalized = family.trim().trim_matches(['"', '\'']).to_ascii_lowercase();
    normalized.is_empty() || SYSTEM_FONTS.contains(&normalized.as_str())
}

/// Google Fonts stylesheet URL for the theme's web fonts.
///
/// Returns `None` when both families are system fonts.
///
/// ```
/// use sitecraft::models::TypographyConfig;
/// use sitecraft::services::theme_compiler::google_fonts_url;
///
/// let typography = TypographyConfig {
///     heading_font: "Playfair Display".into(),
///     body_font: "Inter".into(),
///     ..TypographyConfig::default()
/// };
/// let url = google_fonts_url(&typography).unwrap();
/// assert!(url.contains("family=Playfair+Display:wght@700"));
/// assert!(url.contains("family=Inter:wght@400"));
/// ```
pub fn google_fonts_url(typography: &TypographyConfig) -> Option<String> {
    let mut families: Vec<(String, Vec<u16>)> = Vec::new();

    for (family, weight) in [
        (&typography.heading_font, typography.heading_weight),
        (&typography.body_font, typography.body_weight),
    ] {
        if is_system_font(family) {
            continue;
        }
        let name = family.trim().trim_matches(['"', '\'']).to_string();
        match families.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, weights)) => {
                if !weights.contains(&weight) {
                    weights.push(weight);
                }
            }
            None => families.push((name, vec![weight])),
        }
    }

    if families.is_empty() {
        return None;
    }

    let params: Vec<String> = families
        .into_iter()
        .map(|(name, mut weights)| {
            weights.sort_unstable();
            let weights: Vec<String> = weights.iter().map(u16::to_string).collect();
            format!("family={}:wght@{}", name.replace(' ', "+"), weights.join(";"))
        })
        .collect();

    Some(format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        params.join("&")
    ))
}

/// Writes compiled stylesheets to disk.
///
/// This is the environment-facing side of the compiler: it prepends the web
/// font import and performs an atomic write.
pub struct StylesheetWriter;

impl StylesheetWriter {
    /// Full file contents: optional font `@import` followed by the stylesheet.
    pub fn render(theme: &ThemeCustomizations) -> String {
        let stylesheet = to_stylesheet(theme);
        match google_fonts_url(&theme.typography) {
            Some(url) => format!("@import url(\"{url}\");\n\n{stylesheet}"),
            None => stylesheet,
        }
    }

    /// Writes the rendered stylesheet to `path` using a temp file + rename.
    pub fn write(theme: &ThemeCustomizations, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = path.with_extension("css.tmp");
        fs::write(&temp_path, Self::render(theme))
            .with_context(|| format!("Failed to write temp stylesheet: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to move stylesheet into place: {}", path.display()))?;

        info!("Wrote stylesheet for theme '{}' to {}", theme.name, path.display());
        Ok(())
    }
}

const BASE_RULES: &str = r"*,
*::before,
*::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: var(--font-size-base);
  -webkit-text-size-adjust: 100%;
}

body {
  font-family: var(--font-body);
  font-weight: var(--font-weight-body);
  line-height: var(--line-height);
  letter-spacing: var(--letter-spacing);
  color: var(--color-text);
  background-color: var(--color-background);
  -webkit-font-smoothing: antialiased;
}

h1, h2, h3, h4, h5, h6 {
  font-family: var(--font-heading);
  font-weight: var(--font-weight-heading);
  line-height: 1.2;
  color: var(--color-text);
}

h1 { font-size: var(--font-size-4xl); }
h2 { font-size: var(--font-size-3xl); }
h3 { font-size: var(--font-size-2xl); }
h4 { font-size: var(--font-size-xl); }
h5 { font-size: var(--font-size-lg); }
h6 { font-size: var(--font-size-base); }

p {
  margin-bottom: var(--spacing-md);
}

small, .text-muted {
  color: var(--color-text-secondary);
}

a {
  color: var(--color-primary);
  text-decoration: none;
  transition: color var(--duration-fast) var(--easing);
}

a:hover {
  color: var(--color-accent);
}

img {
  max-width: 100%;
  display: block;
}

.container {
  width: 100%;
  max-width: var(--max-width);
  margin: 0 auto;
  padding: 0 var(--container-padding);
}

.section {
  padding: var(--section-spacing) 0;
}

.grid {
  display: grid;
  grid-template-columns: repeat(var(--grid-columns), minmax(0, 1fr));
  gap: var(--grid-gap);
}

.header {
  height: var(--header-height);
  display: flex;
  align-items: center;
}
";

const COMPONENT_RULES: &str = r"
.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: var(--spacing-sm);
  padding: var(--spacing-sm) var(--spacing-lg);
  font-family: var(--font-body);
  font-size: var(--font-size-base);
  font-weight: 600;
  border: none;
  border-radius: var(--radius-md);
  cursor: pointer;
  transition: background-color var(--duration-normal) var(--easing),
    box-shadow var(--duration-normal) var(--easing),
    transform var(--duration-fast) var(--easing);
}

.btn:hover {
  box-shadow: var(--shadow-md);
  transform: translateY(-1px);
}

.btn-primary {
  background-color: var(--color-primary);
  color: var(--color-primary-foreground);
}

.btn-secondary {
  background-color: var(--color-secondary);
  color: var(--color-secondary-foreground);
}

.btn-accent {
  background-color: var(--color-accent);
  color: var(--color-accent-foreground);
}

.card {
  background-color: var(--color-surface);
  color: var(--color-surface-foreground);
  border-radius: var(--radius-lg);
  padding: var(--spacing-lg);
  box-shadow: var(--shadow-sm);
  transition: box-shadow var(--duration-normal) var(--easing);
}

.card:hover {
  box-shadow: var(--shadow-lg);
}
";

const REDUCED_MOTION_RULES: &str = r"
@media (prefers-reduced-motion: reduce) {
  :root {
    --duration-fast: 0.01ms;
    --duration-normal: 0.01ms;
    --duration-slow: 0.01ms;
  }

  *,
  *::before,
  *::after {
    animation-duration: 0.01ms !important;
    animation-iteration-count: 1 !important;
    transition-duration: 0.01ms !important;
    scroll-behavior: auto !important;
  }
}
";
