use crate::common::{FileAssert, TestHome};
use predicates::prelude::*;
use serde_json::json;
use std::fs;

#[test]
fn test_set_into_empty_document() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", "{}").unwrap();

    home.run(&["set", "mcpServers.supabase", r#"{"type": "stdio"}"#])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("Set mcpServers.supabase in")
        .assert_stdout_contains("Restart Claude Code");

    FileAssert::equals(
        &file,
        "{\n  \"mcpServers\": {\n    \"supabase\": {\n      \"type\": \"stdio\"\n    }\n  }\n}\n",
    );
}

#[test]
fn test_set_keeps_unrelated_content() {
    let home = TestHome::new().unwrap();
    let file = home
        .write_claude_json(&json!({
            "numStartups": 42,
            "mcpServers": {"other": {"x": 1}},
            "projects": {"/home/me/app": {"allowedTools": ["Bash"]}}
        }))
        .unwrap();

    home.run(&["set", "mcpServers.supabase", r#"{"type": "stdio"}"#]).unwrap().assert_success();

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "numStartups": 42,
            "mcpServers": {"other": {"x": 1}, "supabase": {"type": "stdio"}},
            "projects": {"/home/me/app": {"allowedTools": ["Bash"]}}
        })
    );
}

#[test]
fn test_set_twice_is_idempotent() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", r#"{"a": 1}"#).unwrap();
    let args = ["set", r#"["projects", "/home/me/app", "mcpServers", "db"]"#, r#"{"command": "uvx"}"#];

    home.run(&args).unwrap().assert_success();
    let first = fs::read_to_string(&file).unwrap();

    home.run(&args).unwrap().assert_success().assert_stdout_contains("already up to date");
    assert_eq!(fs::read_to_string(&file).unwrap(), first);
}

#[test]
fn test_set_string_value() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", "{}").unwrap();

    home.run(&["set", "theme", "dark", "--string"]).unwrap().assert_success();
    assert_eq!(home.read_json(&file).unwrap(), json!({"theme": "dark"}));

    home.run(&["set", "theme", "dark"]).unwrap().assert_failure().assert_stderr_contains("--string");
}

#[test]
fn test_malformed_json_fails_without_writing() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", "{\"mcpServers\": {,}").unwrap();

    home.command()
        .args(["set", "mcpServers.supabase", "{}", "--backup"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON"));

    FileAssert::equals(&file, "{\"mcpServers\": {,}");
    FileAssert::not_exists(home.path().join(".claude.json.bak"));
}

#[test]
fn test_missing_file_requires_create() {
    let home = TestHome::new().unwrap();

    home.command()
        .args(["set", "mcpServers.supabase", "{}"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found").and(predicate::str::contains("--create")));
    FileAssert::not_exists(home.claude_json());

    home.command().args(["--create", "set", "mcpServers.supabase", "{}"]).assert().success();
    assert_eq!(home.read_json(&home.claude_json()).unwrap(), json!({"mcpServers": {"supabase": {}}}));
}

#[test]
fn test_desktop_target_created_with_parent() {
    let home = TestHome::new().unwrap();

    home.command()
        .args(["--target", "desktop", "--create", "set", "mcpServers.supabase", r#"{"command": "npx"}"#])
        .assert()
        .success();

    assert_eq!(
        home.read_json(&home.desktop_json()).unwrap(),
        json!({"mcpServers": {"supabase": {"command": "npx"}}})
    );
}

#[test]
fn test_explicit_file_from_env() {
    let home = TestHome::new().unwrap();
    let custom = home.write("custom/config.json", "{}").unwrap();

    home.command()
        .env("MCP_PATCH_FILE", &custom)
        .args(["set", "enabled", "true"])
        .assert()
        .success();

    assert_eq!(home.read_json(&custom).unwrap(), json!({"enabled": true}));
    FileAssert::not_exists(home.claude_json());
}

#[test]
fn test_path_conflict_leaves_file_untouched() {
    let home = TestHome::new().unwrap();
    let original = r#"{"projects": {"/home/me/app": "oops"}}"#;
    let file = home.write(".claude.json", original).unwrap();

    home.run(&["set", r#"["projects", "/home/me/app", "mcpServers", "x"]"#, "{}"])
        .unwrap()
        .assert_failure()
        .assert_stderr_contains("Cannot descend into");

    FileAssert::equals(&file, original);
}

#[test]
fn test_remove_existing_and_absent() {
    let home = TestHome::new().unwrap();
    let file = home.write_claude_json(&json!({"mcpServers": {"a": {}, "supabase": {}}})).unwrap();

    home.run(&["remove", "mcpServers.supabase"]).unwrap().assert_success().assert_stdout_contains("Removed");
    assert_eq!(home.read_json(&file).unwrap(), json!({"mcpServers": {"a": {}}}));

    home.run(&["remove", "mcpServers.supabase"]).unwrap().assert_success();
    home.run(&["remove", "nothing.here.at.all"]).unwrap().assert_success();
    assert_eq!(home.read_json(&file).unwrap(), json!({"mcpServers": {"a": {}}}));
}

#[test]
fn test_dry_run_prints_without_writing() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", "{}").unwrap();

    home.command()
        .args(["--dry-run", "set", "mcpServers.supabase", r#"{"type": "stdio"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run").and(predicate::str::contains("\"supabase\"")));

    FileAssert::equals(&file, "{}");
}

#[test]
fn test_backup_keeps_previous_content() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", r#"{"before": true}"#).unwrap();

    home.run(&["--backup", "set", "after", "true"]).unwrap().assert_success().assert_stdout_contains("Backup saved");

    FileAssert::equals(home.path().join(".claude.json.bak"), r#"{"before": true}"#);
    assert_eq!(home.read_json(&file).unwrap(), json!({"before": true, "after": true}));
}

#[test]
fn test_show() {
    let home = TestHome::new().unwrap();
    home.write_claude_json(&json!({"mcpServers": {"supabase": {"type": "stdio"}}})).unwrap();

    home.command()
        .args(["show", "mcpServers.supabase.type"])
        .assert()
        .success()
        .stdout("\"stdio\"\n");

    home.command()
        .args(["show", "mcpServers.missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No entry at 'mcpServers.missing'"));
}

#[test]
fn test_quiet_suppresses_status() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();

    home.command().args(["--quiet", "set", "a", "1"]).assert().success().stdout(predicate::str::is_empty());
}
