//! Sitecraft - design tooling for a no-code website builder
//!
//! Generates palettes and color schemes, checks contrast, compiles saved
//! themes to CSS and searches the template catalog from the command line.

use clap::{Parser, Subcommand};
use sitecraft::cli::{
    CliResult, ConfigArgs, ContrastArgs, ExitCode, PaletteArgs, SchemeArgs, TemplateArgs,
    ThemeArgs,
};
#[cfg(feature = "remote")]
use sitecraft::cli::DomainArgs;
use sitecraft::constants::APP_NAME;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sitecraft - palettes, schemes, themes and templates for website builders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Theme store directory (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate color palettes
    Palette(PaletteArgs),
    /// Derive a color scheme from a base color
    Scheme(SchemeArgs),
    /// Check WCAG contrast between two colors
    Contrast(ContrastArgs),
    /// Manage saved themes
    Theme(ThemeArgs),
    /// Browse the template catalog
    Template(TemplateArgs),
    /// View or change configuration
    Config(ConfigArgs),
    /// Manage custom domains and SSL
    #[cfg(feature = "remote")]
    Domain(DomainArgs),
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "sitecraft=debug" } else { "sitecraft=info" };
    // Logs go to stderr so --json output on stdout stays parseable
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Palette(args) => args.execute(),
        Command::Scheme(args) => args.execute(),
        Command::Contrast(args) => args.execute(),
        Command::Theme(args) => args.execute(cli.data_dir.as_deref()),
        Command::Template(args) => args.execute(),
        Command::Config(args) => args.execute(),
        #[cfg(feature = "remote")]
        Command::Domain(args) => args.execute(),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code().into()
        }
    }
}
