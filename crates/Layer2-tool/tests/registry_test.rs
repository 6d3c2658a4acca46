//! End-to-end tests driving the builtin tools through the registry

use scout_foundation::Error;
use scout_tool::{RuntimeContext, ToolRegistry};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn workspace() -> (TempDir, RuntimeContext) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("root/sub/nested")).unwrap();
    fs::write(root.join("root/a.txt"), "alpha\ntest line\n").unwrap();
    fs::write(root.join("root/sub/b.txt"), "beta\nanother test\n").unwrap();
    fs::write(
        root.join("root/sub/nested/c.txt"),
        "gamma\nuser: john, age: 30\n",
    )
    .unwrap();
    let ctx = RuntimeContext::new("it", root.to_path_buf());
    (dir, ctx)
}

async fn call(registry: &ToolRegistry, ctx: &RuntimeContext, tool: &str, params: Value) -> Value {
    registry
        .execute(tool, params, ctx)
        .await
        .unwrap()
        .payload()
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn glob_then_grep_same_expansion() {
    let registry = ToolRegistry::with_builtins();
    let (_dir, ctx) = workspace();

    let globbed = call(&registry, &ctx, "glob", json!({ "patterns": ["root/**/*.txt"] })).await;
    assert_eq!(globbed["count"], 3);

    let grepped = call(
        &registry,
        &ctx,
        "grep",
        json!({ "pattern": "test", "files": ["root/**/*.txt"], "line_numbers": true }),
    )
    .await;
    assert_eq!(grepped["statistics"]["files_searched"], 3);
    assert_eq!(grepped["statistics"]["files_matched"], 2);
    assert_eq!(grepped["total"], 2);
    assert_eq!(grepped["matches"][0]["line"], 2);
}

#[tokio::test]
async fn grep_captures_through_registry() {
    let registry = ToolRegistry::with_builtins();
    let (_dir, ctx) = workspace();

    let result = call(
        &registry,
        &ctx,
        "grep",
        json!({ "pattern": r"user: (\w+), age: (\d+)", "files": ["root/sub/nested/c.txt"] }),
    )
    .await;
    assert_eq!(result["matches"][0]["captures"], json!(["john", "30"]));
    assert_eq!(result["statistics"]["frequency"]["john"], 1);
}

#[tokio::test]
async fn search_recursive_with_context() {
    let registry = ToolRegistry::with_builtins();
    let (_dir, ctx) = workspace();

    let result = call(
        &registry,
        &ctx,
        "search",
        json!({ "pattern": "TEST", "path": "root", "recursive": true, "ignore_case": true, "context": 1 }),
    )
    .await;
    assert_eq!(result["total_matches"], 2);
    assert_eq!(result["files_scanned"], 3);
    assert_eq!(result["matches"][0]["context"], json!(["alpha", "test line"]));
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let registry = ToolRegistry::with_builtins();
    let (_dir, ctx) = workspace();
    let params = json!({ "pattern": "a", "path": "root", "recursive": true });

    let first = call(&registry, &ctx, "search", params.clone()).await;
    let second = call(&registry, &ctx, "search", params).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn error_tiers() {
    let registry = ToolRegistry::with_builtins();
    let (_dir, ctx) = workspace();

    let invalid = registry
        .execute("search", json!({ "pattern": "[", "path": "root" }), &ctx)
        .await
        .unwrap_err();
    assert!(invalid.is_validation());

    let missing = registry
        .execute("search", json!({ "pattern": "x", "path": "nowhere" }), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(missing, Error::NotFound(_)));
    assert!(!missing.is_validation());

    let unknown = registry
        .execute("fetch", json!({}), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(unknown, Error::ToolNotFound(_)));
}

#[test]
fn check_parameters_performs_no_io() {
    let registry = ToolRegistry::with_builtins();
    assert!(registry
        .validate("search", &json!({ "pattern": "x", "path": "/definitely/not/here" }))
        .is_ok());
    assert!(registry
        .validate("glob", &json!({ "patterns": ["a/**/b/**"] }))
        .unwrap_err()
        .is_validation());
}
