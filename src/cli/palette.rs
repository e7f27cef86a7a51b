//! Palette generation commands.

use crate::cli::common::{load_config, print_json, split_list, CliError, CliResult};
use crate::models::{Color, ColorPalette, HarmonyMode};
use crate::services::palette;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

/// Generate color palettes
#[derive(Debug, Clone, Args)]
pub struct PaletteArgs {
    /// Palette subcommand
    #[command(subcommand)]
    pub command: PaletteCommand,
}

/// Palette subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum PaletteCommand {
    /// Generate a harmony palette from a base color
    Generate(GenerateArgs),
    /// List built-in palettes
    Presets(PresetsArgs),
}

/// Color notation for printed output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorFormat {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// `hsl(h, s%, l%)`
    Hsl,
}

impl ColorFormat {
    fn render(self, color: &str) -> String {
        // Degraded output (unparseable base) is echoed as given
        match (self, Color::parse(color)) {
            (Self::Hex, Ok(c)) => c.to_hex(),
            (Self::Rgb, Ok(c)) => c.to_rgb_string(),
            (Self::Hsl, Ok(c)) => c.to_hsl_string(),
            (_, Err(_)) => color.to_string(),
        }
    }
}

/// Generate a harmony palette
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Base color (hex, rgb(), hsl() or a CSS color name); defaults to config
    #[arg(value_name = "COLOR")]
    pub base: Option<String>,

    /// Harmony mode
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<HarmonyMode>,

    /// Number of colors
    #[arg(short, long, value_name = "N")]
    pub count: Option<usize>,

    /// Comma-separated lightness values in [0, 1] (monochromatic only)
    #[arg(long, value_name = "VALUES")]
    pub lightness: Option<String>,

    /// Output notation
    #[arg(long, value_enum, default_value_t = ColorFormat::Hex)]
    pub format: ColorFormat,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// List built-in palettes
#[derive(Debug, Clone, Args)]
pub struct PresetsArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Generated palette for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Base color as given
    pub base: String,
    /// Harmony mode used
    pub mode: HarmonyMode,
    /// Generated colors
    pub colors: Vec<String>,
}

impl PaletteArgs {
    /// Execute the palette command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            PaletteCommand::Generate(args) => args.execute(),
            PaletteCommand::Presets(args) => args.execute(),
        }
    }
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let defaults = load_config().defaults;
        let base = self.base.clone().unwrap_or(defaults.base_color);
        let mode = self.mode.unwrap_or(defaults.harmony);
        let count = self.count.unwrap_or(defaults.palette_size);

        if count == 0 {
            return Err(CliError::validation("--count must be at least 1"));
        }

        let lightness = self.lightness.as_deref().map(parse_lightness).transpose()?;

        let colors: Vec<String> = palette::generate(&base, mode, count, lightness.as_deref())
            .iter()
            .map(|c| self.format.render(c))
            .collect();

        if colors.len() < count {
            tracing::warn!("Base color '{}' could not be parsed", base);
        }

        if self.json {
            return print_json(&GenerateResponse { base, mode, colors });
        }

        for color in &colors {
            println!("{color}");
        }
        Ok(())
    }
}

fn parse_lightness(raw: &str) -> CliResult<Vec<f64>> {
    split_list(raw)
        .iter()
        .map(|part| {
            let value: f64 = part
                .parse()
                .map_err(|_| CliError::validation(format!("Invalid lightness value '{part}'")))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(CliError::validation(format!(
                    "Lightness must be between 0 and 1, got {value}"
                )));
            }
            Ok(value)
        })
        .collect()
}

impl PresetsArgs {
    /// Execute the presets command
    pub fn execute(&self) -> CliResult<()> {
        let presets = ColorPalette::presets()
            .map_err(|e| CliError::io(format!("Failed to load palettes: {e}")))?;

        if self.json {
            return print_json(&presets);
        }

        println!("Built-in palettes ({}):\n", presets.len());
        for preset in &presets {
            println!("  {} [{}] ({})", preset.name, preset.category, preset.id);
            println!("    {}", preset.hex_values().join(" "));
        }
        Ok(())
    }
}
