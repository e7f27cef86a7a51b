//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{ApiConfig, Config};
use crate::models::HarmonyMode;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Theme store directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Web server bind address
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Web server port
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Default base color
    #[arg(long, value_name = "COLOR")]
    base_color: Option<String>,

    /// Default harmony mode
    #[arg(long, value_name = "MODE")]
    harmony: Option<HarmonyMode>,

    /// Default palette size (1-12)
    #[arg(long, value_name = "N")]
    palette_size: Option<usize>,

    /// Domain API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    #[serde(flatten)]
    config: &'a Config,
    data_dir: Option<String>,
    api_token_set: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let data_dir = config
            .data_dir()
            .ok()
            .map(|p| p.to_string_lossy().to_string());

        if self.json {
            return print_json(&ConfigOutput {
                config: &config,
                data_dir,
                api_token_set: ApiConfig::token().is_some(),
            });
        }

        println!("Sitecraft Configuration");
        println!("=======================");
        println!();

        println!("Paths:");
        println!(
            "  Data Directory: {}",
            data_dir.as_deref().unwrap_or("(unavailable)")
        );
        println!();

        println!("Server:");
        println!("  Address: {}:{}", config.server.host, config.server.port);
        println!();

        println!("Defaults:");
        println!("  Base Color:   {}", config.defaults.base_color);
        println!("  Harmony:      {}", config.defaults.harmony);
        println!("  Palette Size: {}", config.defaults.palette_size);
        println!();

        println!("API:");
        println!(
            "  Base URL: {}",
            config.api.base_url.as_deref().unwrap_or("(not configured)")
        );
        println!(
            "  Token:    {}",
            if ApiConfig::token().is_some() {
                "set"
            } else {
                "not set"
            }
        );
        Ok(())
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.data_dir.is_none()
            && self.host.is_none()
            && self.port.is_none()
            && self.base_color.is_none()
            && self.harmony.is_none()
            && self.palette_size.is_none()
            && self.api_url.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data-dir, --host, --port, --base-color, --harmony, --palette-size, or --api-url",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(dir) = &self.data_dir {
            config.paths.data_dir = Some(dir.clone());
        }
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(color) = &self.base_color {
            config.defaults.base_color.clone_from(color);
        }
        if let Some(harmony) = self.harmony {
            config.defaults.harmony = harmony;
        }
        if let Some(size) = self.palette_size {
            config.defaults.palette_size = size;
        }
        if let Some(url) = &self.api_url {
            config.api.base_url = Some(url.trim_end_matches('/').to_string());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
