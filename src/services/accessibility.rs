//! WCAG 2.1 contrast analysis.
//!
//! Every "is this readable" decision in the crate goes through
//! [`contrast_ratio`], including the foreground colors the theme compiler
//! picks for filled buttons and surfaces.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Color, ColorRole, ColorScheme};

/// Minimum ratio for WCAG AA, normal-size text.
pub const AA_NORMAL: f64 = 4.5;
/// Minimum ratio for WCAG AAA, normal-size text.
pub const AAA_NORMAL: f64 = 7.0;

/// Result of comparing a foreground against a background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    /// Ratio in `[1, 21]`
    pub contrast_ratio: f64,
    /// Ratio >= 4.5
    pub passes_aa: bool,
    /// Ratio >= 7.0
    pub passes_aaa: bool,
}

impl ContrastReport {
    /// Builds a report from a computed ratio.
    #[must_use]
    pub fn from_ratio(contrast_ratio: f64) -> Self {
        Self {
            contrast_ratio,
            passes_aa: contrast_ratio >= AA_NORMAL,
            passes_aaa: contrast_ratio >= AAA_NORMAL,
        }
    }

    /// The "no contrast" report returned when a color cannot be parsed.
    #[must_use]
    pub const fn minimum() -> Self {
        Self {
            contrast_ratio: 1.0,
            passes_aa: false,
            passes_aaa: false,
        }
    }
}

/// One foreground/background pair checked by [`audit_scheme`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastCheck {
    /// Human-readable pair label (e.g., "text on background")
    pub label: String,
    /// Foreground color
    pub foreground: Color,
    /// Background color
    pub background: Color,
    /// Contrast result
    pub report: ContrastReport,
}

/// Compares two CSS color strings.
///
/// If either color cannot be parsed the result is ratio 1 with both checks
/// failing.
///
/// ```
/// use sitecraft::services::accessibility::analyze;
///
/// let report = analyze("#000000", "#ffffff");
/// assert!((report.contrast_ratio - 21.0).abs() < 0.01);
/// assert!(report.passes_aaa);
/// ```
pub fn analyze(foreground: &str, background: &str) -> ContrastReport {
    match (Color::parse(foreground), Color::parse(background)) {
        (Ok(fg), Ok(bg)) => ContrastReport::from_ratio(contrast_ratio(fg, bg)),
        _ => {
            debug!(
                "Contrast check on unparseable colors '{}' / '{}'",
                foreground, background
            );
            ContrastReport::minimum()
        }
    }
}

/// Relative luminance per WCAG 2.1, in `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let linear = |channel: u8| {
        let c = f64::from(channel) / 255.0;
        if c <= 0.039_28 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126f64.mul_add(
        linear(color.r),
        0.7152f64.mul_add(linear(color.g), 0.0722 * linear(color.b)),
    )
}

/// WCAG contrast ratio; symmetric in its arguments.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Black or white, whichever contrasts more with `background` (black on ties).
#[must_use]
pub fn readable_foreground(background: Color) -> Color {
    if contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Checks the text pairs a generated site actually renders.
pub fn audit_scheme(scheme: &ColorScheme) -> Vec<ContrastCheck> {
    let mut pairs = vec![
        ("text on background".to_string(), scheme.text, scheme.background),
        (
            "secondary text on background".to_string(),
            scheme.text_secondary,
            scheme.background,
        ),
        ("text on surface".to_string(), scheme.text, scheme.surface),
    ];

    for role in [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent] {
        let fill = scheme.get(role);
        pairs.push((format!("label on {role}"), readable_foreground(fill), fill));
    }

    pairs
        .into_iter()
        .map(|(label, foreground, background)| ContrastCheck {
            label,
            foreground,
            background,
            report: ContrastReport::from_ratio(contrast_ratio(foreground, background)),
        })
        .collect()
}
