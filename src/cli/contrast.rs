//! WCAG contrast check command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::scheme::grade;
use crate::services::accessibility::{analyze, ContrastReport};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Level a pair must reach for the command to succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    /// Ratio >= 4.5
    Aa,
    /// Ratio >= 7.0
    Aaa,
}

/// Check the contrast ratio between two colors
#[derive(Debug, Clone, Args)]
pub struct ContrastArgs {
    /// Foreground (text) color
    #[arg(value_name = "FOREGROUND")]
    pub foreground: String,

    /// Background color
    #[arg(value_name = "BACKGROUND")]
    pub background: String,

    /// Exit with a validation error unless this level is met
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub require: Option<Level>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Contrast response for JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResponse {
    /// Foreground as given
    pub foreground: String,
    /// Background as given
    pub background: String,
    /// Result
    #[serde(flatten)]
    pub report: ContrastReport,
}

impl ContrastArgs {
    /// Execute the contrast command
    pub fn execute(&self) -> CliResult<()> {
        let report = analyze(&self.foreground, &self.background);

        if self.json {
            print_json(&ContrastResponse {
                foreground: self.foreground.clone(),
                background: self.background.clone(),
                report,
            })?;
        } else {
            println!(
                "{} on {}: {:.2}:1 ({})",
                self.foreground,
                self.background,
                report.contrast_ratio,
                grade(report.passes_aa, report.passes_aaa)
            );
        }

        let passed = match self.require {
            None => true,
            Some(Level::Aa) => report.passes_aa,
            Some(Level::Aaa) => report.passes_aaa,
        };
        if !passed {
            return Err(CliError::validation(format!(
                "Contrast {:.2}:1 does not meet the required level",
                report.contrast_ratio
            )));
        }
        Ok(())
    }
}
