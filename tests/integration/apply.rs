use crate::common::{FileAssert, TestHome};
use predicates::prelude::*;
use serde_json::json;

const SUPABASE_PLAN: &str = r#"
document_path = "~/.claude.json"
backup = true

[[operations]]
path = "mcpServers.supabase"
set = { type = "stdio", command = "npx", args = ["-y", "@supabase/mcp-server-supabase@latest"], env = { SUPABASE_ACCESS_TOKEN = "sbp_test" } }

[[operations]]
path = ["projects", "/home/me/app", "mcpServers", "supabase"]
remove = true
"#;

#[test]
fn test_apply_plan() {
    let home = TestHome::new().unwrap();
    let file = home
        .write_claude_json(&json!({
            "projects": {"/home/me/app": {"mcpServers": {"supabase": {"command": "old"}}}}
        }))
        .unwrap();
    let plan = home.write("plans/supabase.toml", SUPABASE_PLAN).unwrap();

    home.run(&["apply", plan.to_str().unwrap()])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("set mcpServers.supabase (inserted)")
        .assert_stdout_contains("remove projects./home/me/app.mcpServers.supabase (removed)")
        .assert_stdout_contains("Applied 2 operation(s)");

    assert_eq!(
        home.read_json(&file).unwrap(),
        json!({
            "projects": {"/home/me/app": {"mcpServers": {}}},
            "mcpServers": {
                "supabase": {
                    "type": "stdio",
                    "command": "npx",
                    "args": ["-y", "@supabase/mcp-server-supabase@latest"],
                    "env": {"SUPABASE_ACCESS_TOKEN": "sbp_test"}
                }
            }
        })
    );
    assert!(home.path().join(".claude.json.bak").exists());
}

#[test]
fn test_apply_plan_twice_is_stable() {
    let home = TestHome::new().unwrap();
    let file = home.write(".claude.json", "{}").unwrap();
    let plan = home.write("supabase.toml", SUPABASE_PLAN).unwrap();

    home.run(&["apply", plan.to_str().unwrap()]).unwrap().assert_success();
    let first = home.read_json(&file).unwrap();

    home.run(&["apply", plan.to_str().unwrap()])
        .unwrap()
        .assert_success()
        .assert_stdout_contains("(unchanged)")
        .assert_stdout_contains("already up to date");
    assert_eq!(home.read_json(&file).unwrap(), first);
}

#[test]
fn test_apply_relative_document_path() {
    let home = TestHome::new().unwrap();
    let plan = home
        .write(
            "work/plan.toml",
            "document_path = \"out/settings.json\"\ncreate = true\n\n[[operations]]\npath = \"a.b\"\nset = 1\n",
        )
        .unwrap();

    home.command().args(["apply"]).arg(&plan).assert().success();

    assert_eq!(home.read_json(&home.path().join("work/out/settings.json")).unwrap(), json!({"a": {"b": 1}}));
}

#[test]
fn test_apply_invalid_operation() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();
    let plan = home
        .write(
            "plan.toml",
            "document_path = \"~/.claude.json\"\n\n[[operations]]\npath = \"a\"\nset = 1\nremove = true\n",
        )
        .unwrap();

    home.command()
        .args(["apply"])
        .arg(&plan)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load patch plan"));
    FileAssert::equals(home.claude_json(), "{}");
}

#[test]
fn test_apply_failure_writes_nothing() {
    let home = TestHome::new().unwrap();
    let original = r#"{"mcpServers": ["not", "an", "object"]}"#;
    home.write(".claude.json", original).unwrap();
    let plan = home
        .write(
            "plan.toml",
            "document_path = \"~/.claude.json\"\n\n[[operations]]\npath = \"first\"\nset = true\n\n[[operations]]\npath = \"mcpServers.supabase\"\nset = {}\n",
        )
        .unwrap();

    home.command().args(["apply"]).arg(&plan).assert().code(1);

    FileAssert::equals(home.claude_json(), original);
}

#[test]
fn test_apply_dry_run() {
    let home = TestHome::new().unwrap();
    home.write(".claude.json", "{}").unwrap();
    let plan = home.write("supabase.toml", SUPABASE_PLAN).unwrap();

    home.command()
        .args(["--dry-run", "apply"])
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("@supabase/mcp-server-supabase@latest"));

    FileAssert::equals(home.claude_json(), "{}");
    FileAssert::not_exists(home.path().join(".claude.json.bak"));
}
