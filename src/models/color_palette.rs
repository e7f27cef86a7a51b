//! Color palettes and the harmony modes used to generate them.
//!
//! A palette is a named, categorized, ordered list of colors. Curated presets
//! ship as embedded JSON; generated palettes come from
//! [`crate::services::palette`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Color;

/// A read-only, ordered collection of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Stable identifier (kebab-case)
    pub id: String,
    /// Display name (e.g., "Ocean Breeze")
    pub name: String,
    /// Grouping used by the palette browser (e.g., "warm", "analogous")
    pub category: String,
    /// Colors in display order
    pub colors: Vec<Color>,
}

#[derive(Deserialize)]
struct PresetFile {
    palettes: Vec<ColorPalette>,
}

impl ColorPalette {
    /// Loads the curated preset palettes from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed.
    pub fn presets() -> Result<Vec<Self>> {
        let json_data = include_str!("../data/palettes.json");
        let file: PresetFile = serde_json::from_str(json_data)?;
        Ok(file.palettes)
    }

    /// Finds a preset by id.
    pub fn preset(id: &str) -> Result<Option<Self>> {
        Ok(Self::presets()?.into_iter().find(|p| p.id == id))
    }

    /// Number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors as lowercase hex strings.
    #[must_use]
    pub fn hex_values(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }
}

/// Strategy for deriving related colors from a base hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyMode {
    /// Neighbouring hues, 30° apart
    #[default]
    Analogous,
    /// Base and its opposite hue
    Complementary,
    /// Three hues 120° apart
    Triadic,
    /// One hue at varying lightness
    Monochromatic,
    /// Four hues 90° apart
    Tetradic,
}

impl HarmonyMode {
    /// All modes, in display order.
    pub const ALL: [Self; 5] = [
        Self::Analogous,
        Self::Complementary,
        Self::Triadic,
        Self::Monochromatic,
        Self::Tetradic,
    ];

    /// Lowercase identifier used in JSON, config and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Monochromatic => "monochromatic",
            Self::Tetradic => "tetradic",
        }
    }
}

impl fmt::Display for HarmonyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonyMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown harmony mode '{s}'. Expected one of: analogous, complementary, triadic, monochromatic, tetradic"
                )
            })
    }
}
