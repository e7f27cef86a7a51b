//! Semantic color schemes used by themes and templates.

use super::Color;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eleven semantic color roles of a theme.
///
/// Roles are not required to be distinct; `info` usually repeats `primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    /// Brand color
    pub primary: Color,
    /// Supporting brand color
    pub secondary: Color,
    /// Highlight color for calls to action
    pub accent: Color,
    /// Page background
    pub background: Color,
    /// Card and panel background
    pub surface: Color,
    /// Body text
    pub text: Color,
    /// De-emphasized text
    pub text_secondary: Color,
    /// Positive status
    pub success: Color,
    /// Cautionary status
    pub warning: Color,
    /// Error status
    pub error: Color,
    /// Informational status
    pub info: Color,
}

impl Default for ColorScheme {
    /// Fallback scheme used when a base color cannot be parsed.
    fn default() -> Self {
        Self {
            primary: Color::new(0x3b, 0x82, 0xf6),
            secondary: Color::new(0x64, 0x74, 0x8b),
            accent: Color::new(0xf5, 0x9e, 0x0b),
            background: Color::WHITE,
            surface: Color::new(0xf8, 0xfa, 0xfc),
            text: Color::new(0x1e, 0x29, 0x3b),
            text_secondary: Color::new(0x64, 0x74, 0x8b),
            success: Color::new(0x10, 0xb9, 0x81),
            warning: Color::new(0xf5, 0x9e, 0x0b),
            error: Color::new(0xef, 0x44, 0x44),
            info: Color::new(0x3b, 0x82, 0xf6),
        }
    }
}

impl ColorScheme {
    /// Returns the color assigned to `role`.
    #[must_use]
    pub const fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Text => self.text,
            ColorRole::TextSecondary => self.text_secondary,
            ColorRole::Success => self.success,
            ColorRole::Warning => self.warning,
            ColorRole::Error => self.error,
            ColorRole::Info => self.info,
        }
    }

    /// Assigns `color` to `role`.
    pub fn set(&mut self, role: ColorRole, color: Color) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Background => &mut self.background,
            ColorRole::Surface => &mut self.surface,
            ColorRole::Text => &mut self.text,
            ColorRole::TextSecondary => &mut self.text_secondary,
            ColorRole::Success => &mut self.success,
            ColorRole::Warning => &mut self.warning,
            ColorRole::Error => &mut self.error,
            ColorRole::Info => &mut self.info,
        };
        *slot = color;
    }

    /// Iterates over every role with its color, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Color)> + '_ {
        ColorRole::ALL.iter().map(move |&role| (role, self.get(role)))
    }
}

/// A named role within a [`ColorScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    /// Brand color
    Primary,
    /// Supporting brand color
    Secondary,
    /// Highlight color
    Accent,
    /// Page background
    Background,
    /// Card background
    Surface,
    /// Body text
    Text,
    /// De-emphasized text
    TextSecondary,
    /// Positive status
    Success,
    /// Cautionary status
    Warning,
    /// Error status
    Error,
    /// Informational status
    Info,
}

impl ColorRole {
    /// All roles in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Background,
        Self::Surface,
        Self::Text,
        Self::TextSecondary,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Info,
    ];

    /// Kebab-case name used in CSS custom properties (e.g. `text-secondary`).
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::TextSecondary => "text-secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for ColorRole {
    type Err = anyhow::Error;

    /// Accepts the CSS name (`text-secondary`) or the camelCase JSON name (`textSecondary`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.css_name().replace('-', "") == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown color role '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_every_role() {
        let mut scheme = ColorScheme::default();
        let marker = Color::new(1, 2, 3);
        for role in ColorRole::ALL {
            scheme.set(role, marker);
            assert_eq!(scheme.get(role), marker, "role {role}");
        }
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("primary".parse::<ColorRole>().unwrap(), ColorRole::Primary);
        assert_eq!("text-secondary".parse::<ColorRole>().unwrap(), ColorRole::TextSecondary);
        assert_eq!("textSecondary".parse::<ColorRole>().unwrap(), ColorRole::TextSecondary);
        assert!("tertiary".parse::<ColorRole>().is_err());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(ColorScheme::default()).unwrap();
        assert_eq!(json["textSecondary"], "#64748b");
        assert_eq!(json["background"], "#ffffff");
        assert_eq!(json.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_iter_covers_all_roles() {
        assert_eq!(ColorScheme::default().iter().count(), ColorRole::ALL.len());
    }
}
