//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the theme store keys.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Sitecraft";

/// Store key holding the JSON array of saved themes.
pub const THEMES_KEY: &str = "sitecraft-themes";

/// Store key holding the id of the active theme.
pub const ACTIVE_THEME_KEY: &str = "sitecraft-active-theme";

/// File name used by the file-backed theme store.
pub const STORE_FILE_NAME: &str = "store.json";

/// Environment variable holding the domain API bearer token.
pub const API_TOKEN_ENV: &str = "SITECRAFT_API_TOKEN";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "SITECRAFT_CONFIG_DIR";
