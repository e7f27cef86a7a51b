//! Color scheme derivation command.

use crate::cli::common::{load_config, print_json, CliResult};
use crate::models::ColorScheme;
use crate::services::accessibility::{audit_scheme, ContrastCheck};
use crate::services::scheme;
use clap::Args;
use serde::Serialize;

/// Derive a full color scheme from one base color
#[derive(Debug, Clone, Args)]
pub struct SchemeArgs {
    /// Base color; defaults to config
    #[arg(value_name = "COLOR")]
    pub base: Option<String>,

    /// Scheme name
    #[arg(short, long, value_name = "NAME", default_value = "Custom")]
    pub name: String,

    /// Also report WCAG contrast for the scheme's text pairs
    #[arg(long)]
    pub audit: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Scheme response for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct SchemeResponse {
    /// Scheme name
    pub name: String,
    /// Derived colors
    pub colors: ColorScheme,
    /// Contrast checks, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<Vec<ContrastCheck>>,
}

impl SchemeArgs {
    /// Execute the scheme command
    pub fn execute(&self) -> CliResult<()> {
        let base = self
            .base
            .clone()
            .unwrap_or_else(|| load_config().defaults.base_color);
        let built = scheme::build(&base, &self.name);
        let audit = self.audit.then(|| audit_scheme(&built.colors));

        if self.json {
            return print_json(&SchemeResponse {
                name: built.name,
                colors: built.colors,
                audit,
            });
        }

        println!("Scheme: {}\n", built.name);
        for (role, color) in built.colors.iter() {
            println!("  {:<16} {}", role.css_name(), color);
        }

        if let Some(checks) = audit {
            println!("\nContrast:");
            for check in checks {
                println!(
                    "  {:<30} {:>6.2}:1  {}",
                    check.label,
                    check.report.contrast_ratio,
                    grade(check.report.passes_aa, check.report.passes_aaa)
                );
            }
        }
        Ok(())
    }
}

/// Short WCAG grade label.
pub(crate) const fn grade(passes_aa: bool, passes_aaa: bool) -> &'static str {
    match (passes_aa, passes_aaa) {
        (_, true) => "AAA",
        (true, false) => "AA",
        _ => "fail",
    }
}
