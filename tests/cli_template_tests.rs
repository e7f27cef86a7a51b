//! End-to-end tests for `sitecraft template` commands.

mod fixtures;
use fixtures::*;

fn ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// List / Show
// ============================================================================

#[test]
fn test_template_list_json() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "list", "--json"]);
    let templates = json.as_array().unwrap();
    assert_eq!(templates.len(), 6);
    assert_eq!(templates[0]["id"], "tpl-business-pro");
}

#[test]
fn test_template_list_popular_order() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "list", "--popular", "--json"]);
    assert_eq!(
        &ids(&json)[..3],
        ["tpl-business-pro", "tpl-online-store", "tpl-creative-portfolio"]
    );
}

#[test]
fn test_template_list_human_readable() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["template", "list"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Templates (6)"));
    assert!(stdout.contains("tpl-minimal-blog"));
    assert!(stdout.contains("free"));
}

#[test]
fn test_template_show() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "show", "tpl-restaurant", "--json"]);
    assert_eq!(json["category"], "restaurant");
    assert!(json["pages"].is_array());

    let output = sandbox.run(&["template", "show", "tpl-restaurant"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages (3 sections):"), "{stdout}");
}

#[test]
fn test_template_show_missing_is_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["template", "show", "tpl-nope"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_template_search_query() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "search", "restaurant", "--json"]);
    assert_eq!(json["total"], 1);
    assert_eq!(ids(&json["templates"]), vec!["tpl-restaurant"]);
}

#[test]
fn test_template_search_filters_and_sort() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "template",
        "search",
        "--style",
        "modern",
        "--sort",
        "price",
        "--order",
        "asc",
        "--json",
    ]);
    assert_eq!(
        ids(&json["templates"]),
        vec!["tpl-saas-landing", "tpl-business-pro", "tpl-online-store"]
    );
    assert_eq!(json["facets"]["styles"]["modern"], 3);
}

#[test]
fn test_template_search_free_only() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "search", "--free", "--json"]);
    assert!(json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["isPremium"] == false));
    assert_eq!(json["total"], 3);
}

#[test]
fn test_template_search_pagination() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "search", "--limit", "4", "--page", "2", "--json"]);
    assert_eq!(json["total"], 6);
    assert_eq!(json["totalPages"], 2);
    assert_eq!(json["templates"].as_array().unwrap().len(), 2);
}

#[test]
fn test_template_search_inverted_price_range_rejected() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "template",
        "search",
        "--min-price",
        "50",
        "--max-price",
        "10",
    ]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_template_search_no_matches() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["template", "search", "zzzz"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No templates match"));
}

// ============================================================================
// Recommend / Related
// ============================================================================

#[test]
fn test_template_recommend() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "template",
        "recommend",
        "--category",
        "portfolio",
        "--style",
        "creative",
        "--features",
        "gallery",
        "--json",
    ]);
    let recs = json.as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["template"]["id"], "tpl-creative-portfolio");
    assert!((recs[0]["score"].as_f64().unwrap() - 12.36).abs() < 1e-9);
}

#[test]
fn test_template_related() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["template", "related", "tpl-online-store", "--json"]);
    assert_eq!(ids(&json), vec!["tpl-business-pro", "tpl-saas-landing"]);
}
