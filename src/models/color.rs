//! Color values with CSS parsing and hex/RGB/HSL conversion.

// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Allow float comparisons in HSL conversion (standard algorithms)
#![allow(clippy::float_cmp)]

use anyhow::{Context, Result};
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches `rgb(...)`, `rgba(...)`, `hsl(...)` and `hsla(...)` notation.
static FUNCTIONAL_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgba?|hsla?)\(\s*([^)]*?)\s*\)$").expect("functional notation regex is valid")
});

/// CSS named colors accepted by [`Color::parse`].
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("lime", "#00ff00"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("aqua", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("fuchsia", "#ff00ff"),
    ("silver", "#c0c0c0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("maroon", "#800000"),
    ("olive", "#808000"),
    ("purple", "#800080"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("gold", "#ffd700"),
    ("indigo", "#4b0082"),
    ("violet", "#ee82ee"),
    ("coral", "#ff7f50"),
    ("crimson", "#dc143c"),
    ("salmon", "#fa8072"),
    ("tomato", "#ff6347"),
    ("turquoise", "#40e0d0"),
    ("skyblue", "#87ceeb"),
    ("steelblue", "#4682b4"),
    ("royalblue", "#4169e1"),
    ("slategray", "#708090"),
    ("darkgray", "#a9a9a9"),
    ("lightgray", "#d3d3d3"),
    ("whitesmoke", "#f5f5f5"),
    ("beige", "#f5f5dc"),
    ("ivory", "#fffff0"),
    ("lavender", "#e6e6fa"),
    ("khaki", "#f0e68c"),
    ("plum", "#dda0dd"),
    ("orchid", "#da70d6"),
    ("chocolate", "#d2691e"),
    ("tan", "#d2b48c"),
    ("forestgreen", "#228b22"),
    ("seagreen", "#2e8b57"),
    ("midnightblue", "#191970"),
    ("rebeccapurple", "#663399"),
];

/// Hue/saturation/lightness triple.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees
    pub h: f64,
    /// Saturation (0.0-1.0)
    pub s: f64,
    /// Lightness (0.0-1.0)
    pub l: f64,
}

/// An sRGB color with 8-bit channels.
///
/// Serializes as a lowercase `#rrggbb` string and deserializes from any
/// notation [`Color::parse`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new `Color` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a CSS color string.
    ///
    /// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, with or without
    /// the `#`), `rgb()`/`rgba()`, `hsl()`/`hsla()` and named colors. Alpha
    /// components are accepted and discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitecraft::models::Color;
    ///
    /// assert_eq!(Color::parse("#2563eb").unwrap(), Color::new(37, 99, 235));
    /// assert_eq!(Color::parse("rgb(255, 0, 0)").unwrap(), Color::new(255, 0, 0));
    /// assert_eq!(Color::parse("hsl(120, 100%, 50%)").unwrap(), Color::new(0, 255, 0));
    /// assert_eq!(Color::parse("Navy").unwrap(), Color::new(0, 0, 128));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Color string is empty");
        }

        let lower = trimmed.to_ascii_lowercase();

        if let Some((_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Self::from_hex(hex);
        }

        if let Some(caps) = FUNCTIONAL_NOTATION.captures(&lower) {
            let args: Vec<&str> = caps[2]
                .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .collect();

            if args.len() < 3 {
                anyhow::bail!("Color '{trimmed}' needs three components");
            }

            return if caps[1].starts_with("rgb") {
                Ok(Self::new(
                    parse_rgb_channel(args[0]).context(format!("Invalid red channel in '{trimmed}'"))?,
                    parse_rgb_channel(args[1])
                        .context(format!("Invalid green channel in '{trimmed}'"))?,
                    parse_rgb_channel(args[2]).context(format!("Invalid blue channel in '{trimmed}'"))?,
                ))
            } else {
                let h = parse_hue(args[0]).context(format!("Invalid hue in '{trimmed}'"))?;
                let s = parse_percent(args[1]).context(format!("Invalid saturation in '{trimmed}'"))?;
                let l = parse_percent(args[2]).context(format!("Invalid lightness in '{trimmed}'"))?;
                Ok(Self::from_hsl(Hsl { h, s, l }))
            };
        }

        Self::from_hex(trimmed)
    }

    /// Parses a hex color string (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color '{hex}': non-hex characters");
        }

        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().take(3).flat_map(|c| [c, c]).collect(),
            6 | 8 => hex[0..6].to_string(),
            _ => anyhow::bail!("Invalid hex color format '{hex}'. Expected 3, 4, 6 or 8 hex digits"),
        };

        let r = u8::from_str_radix(&expanded[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&expanded[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&expanded[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a lowercase `#rrggbb` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitecraft::models::Color;
    ///
    /// assert_eq!(Color::new(255, 0, 0).to_hex(), "#ff0000");
    /// assert_eq!(Color::new(0, 128, 255).to_hex(), "#0080ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Formats the color as `rgb(r, g, b)`.
    #[must_use]
    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Formats the color as `hsl(h, s%, l%)` with whole-number components.
    #[must_use]
    pub fn to_hsl_string(&self) -> String {
        let hsl = self.to_hsl();
        format!(
            "hsl({}, {}%, {}%)",
            hsl.h.round() as u32 % 360,
            (hsl.s * 100.0).round() as u32,
            (hsl.l * 100.0).round() as u32
        )
    }

    /// Converts the color to HSL.
    ///
    /// Grayscale colors report a hue and saturation of zero.
    ///
    /// ```
    /// use sitecraft::models::Color;
    ///
    /// let hsl = Color::new(0, 0, 255).to_hsl();
    /// assert!((hsl.h - 240.0).abs() < 0.01);
    /// assert!((hsl.s - 1.0).abs() < 0.01);
    /// assert!((hsl.l - 0.5).abs() < 0.01);
    /// ```
    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = delta / (1.0 - 2.0f64.mul_add(l, -1.0).abs());

        let h = if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        Hsl {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l,
        }
    }

    /// Creates a color from HSL.
    ///
    /// Hue wraps around the color wheel; saturation and lightness are clamped
    /// to `[0, 1]`.
    ///
    /// ```
    /// use sitecraft::models::{Color, Hsl};
    ///
    /// assert_eq!(Color::from_hsl(Hsl { h: 0.0, s: 1.0, l: 0.5 }), Color::new(255, 0, 0));
    /// assert_eq!(Color::from_hsl(Hsl { h: 480.0, s: 1.0, l: 0.5 }), Color::new(0, 255, 0));
    /// ```
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0);
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);

        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let h_prime = h / 60.0;
        let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h_prime < 1.0 {
            (c, x, 0.0)
        } else if h_prime < 2.0 {
            (x, c, 0.0)
        } else if h_prime < 3.0 {
            (0.0, c, x)
        } else if h_prime < 4.0 {
            (0.0, x, c)
        } else if h_prime < 5.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self {
            r: to_channel(r + m),
            g: to_channel(g + m),
            b: to_channel(b + m),
        }
    }

    /// Returns the color with its hue rotated by `degrees`.
    #[must_use]
    pub fn rotate_hue(&self, degrees: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl {
            h: hsl.h + degrees,
            ..hsl
        })
    }

    /// Returns the color with the given lightness, keeping hue and saturation.
    #[must_use]
    pub fn with_lightness(&self, lightness: f64) -> Self {
        Self::from_hsl(Hsl {
            l: lightness,
            ..self.to_hsl()
        })
    }

    /// Mixes `other` into this color channel by channel.
    ///
    /// `weight` is the share of `other` (0.0 returns `self`, 1.0 returns `other`).
    ///
    /// ```
    /// use sitecraft::models::Color;
    ///
    /// let tint = Color::WHITE.mix(Color::BLACK, 0.5);
    /// assert_eq!(tint, Color::new(128, 128, 128));
    /// ```
    #[must_use]
    pub fn mix(&self, other: Self, weight: f64) -> Self {
        let w = weight.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| {
            f64::from(a)
                .mul_add(1.0 - w, f64::from(b) * w)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
        }
    }
}

/// Converts a `[0, 1]` fraction to an 8-bit channel.
fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Parses a plain number, rejecting `NaN` and infinities.
fn parse_finite(raw: &str, expected: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().with_context(|| format!("Expected {expected}"))?;
    if !value.is_finite() {
        anyhow::bail!("Expected {expected}, got '{raw}'");
    }
    Ok(value)
}

fn parse_rgb_channel(raw: &str) -> Result<u8> {
    if let Some(pct) = raw.strip_suffix('%') {
        let pct = parse_finite(pct, "a percentage")?;
        return Ok(to_channel(pct / 100.0));
    }
    let value = parse_finite(raw, "a number")?;
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_hue(raw: &str) -> Result<f64> {
    let raw = raw.strip_suffix("deg").unwrap_or(raw);
    parse_finite(raw, "a hue in degrees")
}

fn parse_percent(raw: &str) -> Result<f64> {
    let raw = raw.strip_suffix('%').unwrap_or(raw);
    let value = parse_finite(raw, "a percentage")?;
    Ok((value / 100.0).clamp(0.0, 1.0))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Default for Color {
    /// Default color is white (#ffffff).
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| de::Error::custom(format!("{e:#}")))
    }
}
