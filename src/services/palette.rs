//! Harmony-based palette generation.
//!
//! Every mode is deterministic: the same base color, mode and count always
//! produce the same colors.

// Palette sizes are small; usize -> f64 is exact here
#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Color, ColorPalette, HarmonyMode, Hsl};

/// Lightness range used by monochromatic palettes when no values are given.
const MONO_LIGHTNESS_MIN: f64 = 0.1;
const MONO_LIGHTNESS_MAX: f64 = 0.9;

/// Generates `count` colors from `base` as lowercase hex strings.
///
/// `lightness` only affects [`HarmonyMode::Monochromatic`]. If `base`
/// cannot be parsed the result is a single-element list holding `base`
/// unchanged, so callers must tolerate a shorter result.
///
/// # Examples
///
/// ```
/// use sitecraft::models::HarmonyMode;
/// use sitecraft::services::palette::generate;
///
/// let colors = generate("#2563eb", HarmonyMode::Analogous, 3, None);
/// assert_eq!(colors.len(), 3);
/// assert_eq!(colors[0], "#2563eb");
///
/// assert_eq!(generate("bogus", HarmonyMode::Triadic, 5, None), vec!["bogus"]);
/// ```
pub fn generate(
    base: &str,
    mode: HarmonyMode,
    count: usize,
    lightness: Option<&[f64]>,
) -> Vec<String> {
    match Color::parse(base) {
        Ok(color) => generate_colors(color, mode, count, lightness)
            .iter()
            .map(Color::to_hex)
            .collect(),
        Err(e) => {
            debug!("Palette base color '{}' unparseable: {:#}", base, e);
            vec![base.to_string()]
        }
    }
}

/// Typed core of [`generate`].
pub fn generate_colors(
    base: Color,
    mode: HarmonyMode,
    count: usize,
    lightness: Option<&[f64]>,
) -> Vec<Color> {
    if count == 0 {
        return Vec::new();
    }

    let hsl = base.to_hsl();

    match mode {
        HarmonyMode::Analogous => (0..count)
            .map(|i| {
                if i == 0 {
                    base
                } else {
                    shifted(hsl, 30.0 * i as f64, 1.0)
                }
            })
            .collect(),
        HarmonyMode::Complementary => complementary(base, hsl, count),
        HarmonyMode::Triadic => cycled(base, hsl, count, &[0.0, 120.0, 240.0], 0.6, 0.15, 0.95),
        HarmonyMode::Tetradic => cycled(base, hsl, count, &[0.0, 90.0, 180.0, 270.0], 0.7, 0.1, 0.9),
        HarmonyMode::Monochromatic => monochromatic(base, count, lightness.unwrap_or(&[])),
    }
}

/// Builds a named palette from `base`.
///
/// Unlike [`generate`], an unparseable base is an error.
pub fn palette(base: &str, mode: HarmonyMode, count: usize, name: &str) -> Result<ColorPalette> {
    let color = Color::parse(base).with_context(|| format!("Invalid base color '{base}'"))?;
    Ok(ColorPalette {
        id: slugify(name),
        name: name.to_string(),
        category: mode.to_string(),
        colors: generate_colors(color, mode, count, None),
    })
}

/// Same saturation as `hsl`, hue rotated by `offset`, lightness scaled by `multiplier`.
fn shifted(hsl: Hsl, offset: f64, multiplier: f64) -> Color {
    Color::from_hsl(Hsl {
        h: hsl.h + offset,
        s: hsl.s,
        l: (hsl.l * multiplier).clamp(0.0, 1.0),
    })
}

fn complementary(base: Color, hsl: Hsl, count: usize) -> Vec<Color> {
    let mut colors = vec![base];
    if count > 1 {
        colors.push(shifted(hsl, 180.0, 1.0));
    }

    for i in 2..count {
        let pair = (i - 2) / 2;
        let multiplier = 0.1f64.mul_add((pair + 1) as f64, 0.5).min(0.9);
        let offset = if (i - 2) % 2 == 0 { 0.0 } else { 180.0 };
        colors.push(shifted(hsl, offset, multiplier));
    }

    colors
}

/// Base hues first, then lightness-scaled variants cycling through them.
fn cycled(
    base: Color,
    hsl: Hsl,
    count: usize,
    offsets: &[f64],
    start: f64,
    step: f64,
    cap: f64,
) -> Vec<Color> {
    (0..count)
        .map(|i| {
            if i == 0 {
                base
            } else if i < offsets.len() {
                shifted(hsl, offsets[i], 1.0)
            } else {
                let j = i - offsets.len();
                let multiplier = step.mul_add(j as f64, start).min(cap);
                shifted(hsl, offsets[j % offsets.len()], multiplier)
            }
        })
        .collect()
}

/// Uses `supplied[i]` where present, otherwise an even step across [0.1, 0.9].
fn monochromatic(base: Color, count: usize, supplied: &[f64]) -> Vec<Color> {
    (0..count)
        .map(|i| {
            let l = supplied.get(i).copied().unwrap_or_else(|| {
                if count == 1 {
                    0.5
                } else {
                    (MONO_LIGHTNESS_MAX - MONO_LIGHTNESS_MIN)
                        .mul_add(i as f64 / (count - 1) as f64, MONO_LIGHTNESS_MIN)
                }
            });
            base.with_lightness(l.clamp(0.0, 1.0))
        })
        .collect()
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    slug.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
