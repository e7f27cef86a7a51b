//! Derives a full semantic [`ColorScheme`] from a single base color.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Color, ColorScheme, Hsl};

/// Body text color for generated schemes.
pub const TEXT: Color = Color::new(0x1f, 0x29, 0x37);
/// Secondary text color for generated schemes.
pub const TEXT_SECONDARY: Color = Color::new(0x6b, 0x72, 0x80);
/// Success status color.
pub const SUCCESS: Color = Color::new(0x10, 0xb9, 0x81);
/// Warning status color.
pub const WARNING: Color = Color::new(0xf5, 0x9e, 0x0b);
/// Error status color.
pub const ERROR: Color = Color::new(0xef, 0x44, 0x44);

/// Share of the base color mixed into white for the surface role.
const SURFACE_TINT: f64 = 0.05;

/// A generated scheme together with the name it was requested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedScheme {
    /// Scheme name
    pub name: String,
    /// Derived colors
    pub colors: ColorScheme,
}

/// Builds a scheme from `base`.
///
/// Falls back to [`ColorScheme::default`] when `base` cannot be parsed.
///
/// ```
/// use sitecraft::services::scheme::build;
///
/// let scheme = build("#2563eb", "Ocean");
/// assert_eq!(scheme.colors.primary.to_hex(), "#2563eb");
/// assert_eq!(scheme.colors.info, scheme.colors.primary);
/// ```
pub fn build(base: &str, name: &str) -> NamedScheme {
    let colors = match Color::parse(base) {
        Ok(color) => from_color(color),
        Err(e) => {
            debug!("Scheme base color '{}' unparseable, using default scheme: {:#}", base, e);
            ColorScheme::default()
        }
    };

    NamedScheme {
        name: name.to_string(),
        colors,
    }
}

/// Typed core of [`build`].
#[must_use]
pub fn from_color(base: Color) -> ColorScheme {
    ColorScheme {
        primary: base,
        secondary: derive_secondary(base),
        accent: derive_accent(base),
        background: Color::WHITE,
        surface: Color::WHITE.mix(base, SURFACE_TINT),
        text: TEXT,
        text_secondary: TEXT_SECONDARY,
        success: SUCCESS,
        warning: WARNING,
        error: ERROR,
        info: base,
    }
}

/// Hue rotated 30°, saturation reduced to 80%.
#[must_use]
pub fn derive_secondary(primary: Color) -> Color {
    let hsl = primary.to_hsl();
    Color::from_hsl(Hsl {
        h: hsl.h + 30.0,
        s: hsl.s * 0.8,
        l: hsl.l,
    })
}

/// The complementary hue at the same saturation and lightness.
#[must_use]
pub fn derive_accent(primary: Color) -> Color {
    primary.rotate_hue(180.0)
}
