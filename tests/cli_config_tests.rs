//! End-to-end tests for `sitecraft config` commands.

use std::fs;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "show"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sitecraft Configuration"));
    assert!(stdout.contains("127.0.0.1:3002"));
    assert!(stdout.contains("#2563eb"));
    assert!(stdout.contains("not configured"));
}

#[test]
fn test_config_show_json_schema() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["config", "show", "--json"]);

    assert!(json["paths"].is_object(), "Should have paths object");
    assert_eq!(json["server"]["port"], 3002);
    assert_eq!(json["defaults"]["harmony"], "analogous");
    assert_eq!(json["defaults"]["palette_size"], 5);
    assert_eq!(json["api_token_set"], false);

    let data_dir = json["data_dir"].as_str().unwrap();
    assert!(data_dir.starts_with(sandbox.config_dir().to_str().unwrap()));
}

#[test]
fn test_config_path_uses_override_dir() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "path"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = sandbox.config_dir().join("config.toml");
    assert_eq!(stdout.trim(), expected.to_str().unwrap());
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "config",
        "set",
        "--port",
        "8080",
        "--base-color",
        "#16a34a",
        "--harmony",
        "triadic",
        "--api-url",
        "https://api.example.com/",
    ]);
    assert_success(&output);
    assert!(sandbox.config_dir().join("config.toml").exists());

    let json = sandbox.run_json(&["config", "show", "--json"]);
    assert_eq!(json["server"]["port"], 8080);
    assert_eq!(json["defaults"]["base_color"], "#16a34a");
    assert_eq!(json["defaults"]["harmony"], "triadic");
    // Trailing slash is trimmed
    assert_eq!(json["api"]["base_url"], "https://api.example.com");
}

#[test]
fn test_config_defaults_feed_palette_generation() {
    let sandbox = Sandbox::new();
    assert_success(&sandbox.run(&[
        "config",
        "set",
        "--base-color",
        "#ff0000",
        "--palette-size",
        "2",
    ]));

    let json = sandbox.run_json(&["palette", "generate", "--json"]);
    assert_eq!(json["base"], "#ff0000");
    assert_eq!(json["colors"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_set_data_dir() {
    let sandbox = Sandbox::new();
    let custom = sandbox.dir.path().join("elsewhere");
    assert_success(&sandbox.run(&["config", "set", "--data-dir", custom.to_str().unwrap()]));

    let json = sandbox.run_json(&["config", "show", "--json"]);
    assert_eq!(json["data_dir"], custom.to_str().unwrap());
}

#[test]
fn test_config_set_requires_an_option() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "set"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one"));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let sandbox = Sandbox::new();

    let bad_color = sandbox.run(&["config", "set", "--base-color", "not-a-color"]);
    assert_eq!(bad_color.status.code(), Some(1));

    let bad_size = sandbox.run(&["config", "set", "--palette-size", "40"]);
    assert_eq!(bad_size.status.code(), Some(1));

    let bad_url = sandbox.run(&["config", "set", "--api-url", "ftp://example.com"]);
    assert_eq!(bad_url.status.code(), Some(1));

    // Nothing was saved
    assert!(!sandbox.config_dir().join("config.toml").exists());
}

#[test]
fn test_config_show_invalid_file() {
    let sandbox = Sandbox::new();
    write_file(&sandbox.config_dir(), "config.toml", "[server]\nhost = \"127.0.0.1\"\nport = 0\n");

    let output = sandbox.run(&["config", "show"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("port"));
}

#[test]
fn test_config_file_is_toml() {
    let sandbox = Sandbox::new();
    assert_success(&sandbox.run(&["config", "set", "--host", "0.0.0.0"]));

    let content = fs::read_to_string(sandbox.config_dir().join("config.toml")).unwrap();
    assert!(content.contains("[server]"));
    assert!(content.contains("host = \"0.0.0.0\""));
}
