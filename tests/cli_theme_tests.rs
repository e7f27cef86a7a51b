//! End-to-end tests for `sitecraft theme` commands.

use std::fs;

mod fixtures;
use fixtures::*;

// ============================================================================
// Create / List / Show
// ============================================================================

#[test]
fn test_theme_list_empty() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["theme", "list", "--json"]);
    assert!(json.as_array().unwrap().is_empty());

    let output = sandbox.run(&["theme", "list"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No saved themes"));
}

#[test]
fn test_theme_create_from_base_color() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "theme", "create", "--name", "Brand", "--base", "#2563eb", "--json",
    ]);

    assert_eq!(json["name"], "Brand");
    assert_eq!(json["colors"]["primary"], "#2563eb");
    assert!(json["id"].as_str().unwrap().starts_with("theme-"));

    let themes = sandbox.repository().list();
    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0].name, "Brand");
}

#[test]
fn test_theme_create_from_template() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "theme",
        "create",
        "--template",
        "tpl-minimal-blog",
        "--activate",
        "--json",
    ]);

    assert_eq!(json["name"], "Minimal Blog Theme");
    assert_eq!(json["templateId"], "tpl-minimal-blog");

    let active = sandbox.run_json(&["theme", "active", "--json"]);
    assert_eq!(active["id"], json["id"]);
}

#[test]
fn test_theme_create_requires_name_without_template() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["theme", "create"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_theme_create_unknown_template() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["theme", "create", "--template", "tpl-nope"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_theme_show_missing() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["theme", "show", "theme-0-missing"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_theme_update_sections() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    let json = sandbox.run_json(&[
        "theme",
        "update",
        &theme.id,
        "--name",
        "Deep Ocean",
        "--color",
        "text-secondary=#475569",
        "--body-font",
        "Lora",
        "--animations",
        "false",
        "--max-width",
        "960",
        "--json",
    ]);

    assert_eq!(json["name"], "Deep Ocean");
    assert_eq!(json["colors"]["textSecondary"], "#475569");
    assert_eq!(json["typography"]["bodyFont"], "Lora");
    // Untouched typography fields survive
    assert_eq!(json["typography"]["headingFont"], "Playfair Display");
    assert_eq!(json["animations"]["enabled"], false);
    assert_eq!(json["layout"]["maxWidth"], 960);
    assert_eq!(json["id"], theme.id.as_str());
}

#[test]
fn test_theme_update_custom_css_from_file() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");
    let css = write_file(sandbox.dir.path(), "extra.css", ".hero { padding: 0; }");

    sandbox.run_json(&[
        "theme",
        "update",
        &theme.id,
        "--custom-css",
        css.to_str().unwrap(),
        "--json",
    ]);
    let saved = sandbox.repository().get(&theme.id).unwrap();
    assert_eq!(saved.custom_css.as_deref(), Some(".hero { padding: 0; }"));

    sandbox.run_json(&["theme", "update", &theme.id, "--clear-custom-css", "--json"]);
    assert!(sandbox.repository().get(&theme.id).unwrap().custom_css.is_none());
}

#[test]
fn test_theme_update_rejects_bad_input() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    let nothing = sandbox.run(&["theme", "update", &theme.id]);
    assert_eq!(nothing.status.code(), Some(1));

    let bad_role = sandbox.run(&["theme", "update", &theme.id, "--color", "border=#000"]);
    assert_eq!(bad_role.status.code(), Some(1));

    let bad_size = sandbox.run(&["theme", "update", &theme.id, "--base-size", "0"]);
    assert_eq!(bad_size.status.code(), Some(1));

    // Nothing was written by the failed updates
    let saved = sandbox.repository().get(&theme.id).unwrap();
    assert_eq!(saved.name, "Ocean");
    assert_eq!(saved.updated_at, theme.updated_at);
}

// ============================================================================
// Delete / Activate / Duplicate
// ============================================================================

#[test]
fn test_theme_delete_clears_active() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    assert_success(&sandbox.run(&["theme", "activate", &theme.id]));
    assert_success(&sandbox.run(&["theme", "delete", &theme.id]));

    let active = sandbox.run_json(&["theme", "active", "--json"]);
    assert!(active.is_null());

    let again = sandbox.run(&["theme", "delete", &theme.id]);
    assert_eq!(again.status.code(), Some(3));
}

#[test]
fn test_theme_activate_unknown() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["theme", "activate", "theme-0-missing"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_theme_duplicate() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    let copy = sandbox.run_json(&[
        "theme", "duplicate", &theme.id, "--name", "Ocean Copy", "--json",
    ]);
    assert_ne!(copy["id"], theme.id.as_str());
    assert_eq!(copy["name"], "Ocean Copy");
    assert_eq!(copy["typography"]["headingFont"], "Playfair Display");
    assert_eq!(sandbox.repository().list().len(), 2);
}

// ============================================================================
// Export / Import
// ============================================================================

#[test]
fn test_theme_export_then_import() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");
    let export_path = sandbox.dir.path().join("ocean.json");

    assert_success(&sandbox.run(&[
        "theme",
        "export",
        &theme.id,
        "--out",
        export_path.to_str().unwrap(),
    ]));
    assert!(export_path.exists());

    let imported = sandbox.run_json(&[
        "theme",
        "import",
        export_path.to_str().unwrap(),
        "--json",
    ]);
    assert_ne!(imported["id"], theme.id.as_str());
    assert_eq!(imported["name"], "Ocean");
    assert_eq!(sandbox.repository().list().len(), 2);
}

#[test]
fn test_theme_import_rejects_non_object() {
    let sandbox = Sandbox::new();
    let path = write_file(sandbox.dir.path(), "list.json", "[1, 2, 3]");

    let output = sandbox.run(&["theme", "import", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(sandbox.repository().list().is_empty());
}

// ============================================================================
// CSS Output
// ============================================================================

#[test]
fn test_theme_css_to_stdout() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    let output = sandbox.run(&["theme", "css", &theme.id]);
    assert_success(&output);
    let css = String::from_utf8_lossy(&output.stdout);

    assert!(css.starts_with("@import url(\"https://fonts.googleapis.com/css2?"));
    assert!(css.contains(":root {"));
    assert!(css.contains("--color-primary: #0ea5e9;"));
    assert!(css.contains("--font-heading: \"Playfair Display\""));
    assert!(css.contains("prefers-reduced-motion"));
}

#[test]
fn test_theme_css_uses_active_theme_and_writes_file() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");
    assert_success(&sandbox.run(&["theme", "activate", &theme.id]));

    let out = sandbox.dir.path().join("site").join("theme.css");
    assert_success(&sandbox.run(&["theme", "css", "--out", out.to_str().unwrap()]));

    let css = fs::read_to_string(&out).expect("stylesheet written");
    assert!(css.contains("--color-primary: #0ea5e9;"));
}

#[test]
fn test_theme_css_without_active_theme() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["theme", "css"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_theme_variables_json() {
    let sandbox = Sandbox::new();
    let theme = seed_theme(&sandbox.repository(), "Ocean");

    let vars = sandbox.run_json(&["theme", "variables", &theme.id, "--json"]);
    assert_eq!(vars["--color-primary"], "#0ea5e9");
    assert_eq!(vars["--font-size-base"], "16px");
    assert_eq!(vars["--grid-columns"], "12");
    assert_eq!(vars["--duration-normal"], "300ms");
}
