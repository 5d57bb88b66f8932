use crate::common::{FileAssert, TestHome};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_mcp_add_global() {
    let home = TestHome::new().unwrap();
    let file = home.write_claude_json(&json!({"numStartups": 3, "mcpServers": {"github": {"type": "http"}}})).unwrap();

    home.run(&[
        "mcp",
        "add",
        "supabase",
        "-e",
        "SUPABASE_ACCESS_TOKEN=sbp_test",
        "--",
        "npx",
        "-y",
        "@supabase/mcp-server-supabase@latest",
    ])
    .unwrap()
    .assert_success()
    .assert_stdout_contains("Set mcpServers.supabase in")
    .assert_stdout_contains("Restart Claude Code for the changes to take effect");

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "numStartups": 3,
            "mcpServers": {
                "github": {"type": "http"},
                "supabase": {
                    "type": "stdio",
                    "command": "npx",
                    "args": ["-y", "@supabase/mcp-server-supabase@latest"],
                    "env": {"SUPABASE_ACCESS_TOKEN": "sbp_test"}
                }
            }
        })
    );
}

#[test]
fn test_mcp_add_warns_about_placeholder() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();

    home.run(&[
        "mcp",
        "add",
        "supabase",
        "--env",
        "SUPABASE_ACCESS_TOKEN=YOUR_SUPABASE_ACCESS_TOKEN_HERE",
        "--",
        "npx",
        "@supabase/mcp-server-supabase@latest",
    ])
    .unwrap()
    .assert_success()
    .assert_stdout_contains("SUPABASE_ACCESS_TOKEN for 'supabase' still holds a placeholder");
}

#[test]
fn test_mcp_add_with_empty_env() {
    let home = TestHome::new().unwrap();
    let file = home.write_claude_json(&json!({"numStartups": 3})).unwrap();

    home.run(&["mcp", "add", "supabase", "--empty-env", "--", "npx", "-y", "@supabase/mcp-server-supabase@latest"])
        .unwrap()
        .assert_success();

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "numStartups": 3,
            "mcpServers": {
                "supabase": {
                    "type": "stdio",
                    "command": "npx",
                    "args": ["-y", "@supabase/mcp-server-supabase@latest"],
                    "env": {}
                }
            }
        })
    );
}

#[test]
fn test_mcp_add_project_scope() {
    let home = TestHome::new().unwrap();
    let file = home.write_claude_json(&json!({"projects": {"/home/me/app": {"history": []}}})).unwrap();

    home.run(&["mcp", "add", "docs", "--project", "/home/me/app", "--url", "https://mcp.example.com/mcp"])
        .unwrap()
        .assert_success();

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "projects": {
                "/home/me/app": {
                    "history": [],
                    "mcpServers": {"docs": {"type": "http", "url": "https://mcp.example.com/mcp"}}
                }
            }
        })
    );
}

#[test]
fn test_mcp_add_unknown_project_fails() {
    let home = TestHome::new().unwrap();
    let original = r#"{"projects": {"/home/me/app": {}}}"#;
    home.write(".claude.json", original).unwrap();

    home.command()
        .args(["mcp", "add", "supabase", "--project", "/home/me/typo", "--", "npx"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Project '/home/me/typo' not found"));

    FileAssert::equals(home.claude_json(), original);
}

#[test]
fn test_mcp_add_without_command_or_url_fails() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();

    home.command()
        .args(["mcp", "add", "broken"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid MCP server entry"));

    FileAssert::equals(home.claude_json(), "{}");
}

#[test]
fn test_mcp_remove() {
    let home = TestHome::new().unwrap();
    let file = home
        .write_claude_json(&json!({
            "mcpServers": {"supabase": {}},
            "projects": {"/p": {"mcpServers": {"supabase": {}, "keep": {}}}}
        }))
        .unwrap();

    home.run(&["mcp", "remove", "supabase", "--project", "/p"]).unwrap().assert_success();

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "mcpServers": {"supabase": {}},
            "projects": {"/p": {"mcpServers": {"keep": {}}}}
        })
    );

    home.run(&["mcp", "remove", "missing"]).unwrap().assert_success();
}

#[test]
fn test_mcp_migrate_to_global() {
    let home = TestHome::new().unwrap();
    let file = home
        .write_claude_json(&json!({
            "projects": {
                "/home/me/app": {
                    "mcpServers": {"supabase": {"type": "stdio", "command": "npx", "args": ["-y", "pkg"]}}
                }
            }
        }))
        .unwrap();

    home.run(&["--backup", "mcp", "migrate", "supabase", "--project", "/home/me/app"])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("Moved supabase from project /home/me/app to mcpServers.supabase");

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "projects": {"/home/me/app": {"mcpServers": {}}},
            "mcpServers": {"supabase": {"type": "stdio", "command": "npx", "args": ["-y", "pkg"]}}
        })
    );
    assert!(home.path().join(".claude.json.bak").exists());
}

#[test]
fn test_mcp_migrate_with_replacement() {
    let home = TestHome::new().unwrap();
    let file = home
        .write_claude_json(&json!({"projects": {"/p": {"mcpServers": {"supabase": {"command": "old"}}}}}))
        .unwrap();

    home.run(&["mcp", "migrate", "supabase", "--project", "/p", "--", "npx", "new-server"])
        .unwrap()
        .assert_success();

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "projects": {"/p": {"mcpServers": {}}},
            "mcpServers": {"supabase": {"type": "stdio", "command": "npx", "args": ["new-server"]}}
        })
    );
}

#[test]
fn test_mcp_migrate_missing_entry_fails() {
    let home = TestHome::new().unwrap();
    let original = r#"{"projects": {"/p": {}}}"#;
    home.write(".claude.json", original).unwrap();

    home.command()
        .args(["mcp", "migrate", "supabase", "--project", "/p"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No entry at 'projects./p.mcpServers.supabase'"));

    FileAssert::equals(home.claude_json(), original);
}

#[test]
fn test_mcp_list() {
    let home = TestHome::new().unwrap();
    home.write_claude_json(&json!({
        "mcpServers": {"github": {"type": "http", "url": "https://api.example.com/mcp"}},
        "projects": {"/home/me/app": {"mcpServers": {"supabase": {"type": "stdio", "command": "npx"}}}}
    }))
    .unwrap();

    home.command()
        .args(["mcp", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("global")
                .and(predicate::str::contains("github [http] https://api.example.com/mcp"))
                .and(predicate::str::contains("project /home/me/app"))
                .and(predicate::str::contains("supabase [stdio] npx")),
        );

    let output = home.run(&["mcp", "list", "--json"]).unwrap();
    output.assert_success();
    let listed: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(listed[0]["name"], "github");
    assert_eq!(listed[0]["project"], serde_json::Value::Null);
    assert_eq!(listed[1]["project"], "/home/me/app");
}

#[test]
fn test_mcp_list_empty() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();

    home.run(&["mcp", "list"]).unwrap().assert_success().assert_stdout_contains("No MCP servers configured");
}
