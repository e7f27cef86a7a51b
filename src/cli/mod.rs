//! CLI command handlers for Sitecraft.
//!
//! This module provides headless, scriptable access to palette generation,
//! scheme derivation, contrast checks, saved themes and the template catalog.

pub mod common;
pub mod config;
pub mod contrast;
#[cfg(feature = "remote")]
pub mod domain;
pub mod palette;
pub mod scheme;
pub mod template;
pub mod theme;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use contrast::ContrastArgs;
#[cfg(feature = "remote")]
pub use domain::DomainArgs;
pub use palette::PaletteArgs;
pub use scheme::SchemeArgs;
pub use template::TemplateArgs;
pub use theme::ThemeArgs;
