//! Shared CLI plumbing: error kinds, exit codes and output helpers.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::services::{FileStore, ThemeRepository};

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input or a failed check
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
    /// Requested item does not exist
    NotFound = 3,
    /// Remote API unreachable or returned an error
    Network = 4,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

/// A CLI failure with the exit code it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for this failure
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid arguments or a failed check.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Missing theme, template, or other lookup target.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::NotFound,
            message: message.into(),
        }
    }

    /// Remote API failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Network,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.kind
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type returned by every `execute` method.
pub type CliResult<T> = Result<T, CliError>;

/// Pretty-prints `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Loads the config file, falling back to defaults if it is missing or broken.
pub fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring unusable configuration: {:#}", e);
            Config::default()
        }
    }
}

/// Resolves the theme store directory: `--data-dir`, then config, then default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    load_config()
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to determine data directory: {e}")))
}

/// Opens the file-backed theme repository.
pub fn open_repository(override_dir: Option<&Path>) -> CliResult<ThemeRepository> {
    let dir = resolve_data_dir(override_dir)?;
    tracing::debug!("Using theme store in {}", dir.display());
    Ok(ThemeRepository::new(Arc::new(FileStore::new(dir))))
}

/// Splits a comma-separated flag value, dropping empty parts.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
