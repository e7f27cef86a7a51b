//! Shared test fixtures for E2E CLI and web tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use sitecraft::models::{Color, ColorScheme, ThemeCustomizations, ThemeUpdate, TypographyConfig};
use sitecraft::services::{FileStore, ThemeRepository};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;
use tempfile::TempDir;

/// Path to the sitecraft binary
pub fn sitecraft_bin() -> String {
    std::env::var("CARGO_BIN_EXE_sitecraft")
        .unwrap_or_else(|_| "target/release/sitecraft".to_string())
}

/// An isolated sandbox: its own config directory and theme store.
pub struct Sandbox {
    /// Keeps the directory alive for the test's duration
    pub dir: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Config directory passed via `SITECRAFT_CONFIG_DIR`.
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Theme store directory passed via `--data-dir`.
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// A command with config and data isolated to this sandbox.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(sitecraft_bin());
        cmd.env("SITECRAFT_CONFIG_DIR", self.config_dir());
        cmd.env_remove("SITECRAFT_API_TOKEN");
        cmd.env_remove("RUST_LOG");
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.args(args);
        cmd
    }

    /// Runs a command inside the sandbox.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs a command that must succeed and parses its stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args);
        assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
    }

    /// Repository over the sandbox's theme store, for seeding and inspecting.
    pub fn repository(&self) -> ThemeRepository {
        ThemeRepository::new(Arc::new(FileStore::new(self.data_dir())))
    }
}

/// Asserts exit code 0, showing stderr otherwise.
pub fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A deterministic-looking ocean scheme.
pub fn ocean_scheme() -> ColorScheme {
    ColorScheme {
        primary: Color::new(0x0e, 0xa5, 0xe9),
        secondary: Color::new(0x06, 0xb6, 0xd4),
        accent: Color::new(0xf9, 0x73, 0x16),
        background: Color::WHITE,
        surface: Color::new(0xf0, 0xf9, 0xff),
        text: Color::new(0x0c, 0x4a, 0x6e),
        text_secondary: Color::new(0x36, 0x41, 0x53),
        success: Color::new(0x22, 0xc5, 0x5e),
        warning: Color::new(0xea, 0xb3, 0x08),
        error: Color::new(0xdc, 0x26, 0x26),
        info: Color::new(0x0e, 0xa5, 0xe9),
    }
}

/// Creates a saved theme with custom typography in `repo`.
pub fn seed_theme(repo: &ThemeRepository, name: &str) -> ThemeCustomizations {
    let theme = repo
        .create(name, None, Some(ocean_scheme()))
        .expect("Failed to create theme");
    repo.update(
        &theme.id,
        ThemeUpdate::Typography(TypographyConfig {
            heading_font: "Playfair Display".to_string(),
            ..TypographyConfig::default()
        }),
    )
    .expect("Failed to update theme")
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_sandbox_paths_are_distinct() {
        let sandbox = Sandbox::new();
        assert_ne!(sandbox.config_dir(), sandbox.data_dir());
        assert!(sandbox.data_dir().starts_with(sandbox.dir.path()));
    }

    #[test]
    fn test_fixture_seed_theme() {
        let sandbox = Sandbox::new();
        let repo = sandbox.repository();
        let theme = seed_theme(&repo, "Ocean");
        assert_eq!(theme.typography.heading_font, "Playfair Display");
        assert_eq!(repo.list().len(), 1);
    }
}
