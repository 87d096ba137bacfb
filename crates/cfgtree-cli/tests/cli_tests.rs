//! Integration tests for the cfgtree CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use cfgtree_test_utils::TestTree;
use predicates::prelude::*;

/// Get a Command for the cfgtree binary
fn cfgtree_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cfgtree"));
    cmd.env_remove("RUST_LOG")
        .env_remove("CFGTREE_ROOT")
        .env_remove("CFGTREE_OPTIONS");
    cmd
}

fn sample_tree() -> TestTree {
    let tree = TestTree::new();
    tree.file("app/.ini", "debug = true\nname = demo\n")
        .file("app/db/main.json", r#"{"host": "local", "port": 5432, "password": null}"#)
        .file("app/hosts.yaml", "- alpha\n- beta\n");
    tree
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    cfgtree_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration trees"));
}

#[test]
fn test_version_output() {
    cfgtree_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cfgtree"));
}

#[test]
fn test_no_command_fails() {
    cfgtree_cmd().assert().failure();
}

// ============================================================================
// get
// ============================================================================

#[test]
fn test_get_scalar_values() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/debug"])
        .assert()
        .success()
        .stdout("true\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "APP/DB/MAIN/HOST"])
        .assert()
        .success()
        .stdout("local\n");
}

#[test]
fn test_get_key_of_leaf_child() {
    let tree = TestTree::new();
    tree.file("config/app/.ini", "debug = true\n")
        .file("config/app/db.json", r#"{"host": "local"}"#);

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.path("config"))
        .args(["get", "app/db/host"])
        .assert()
        .success()
        .stdout("local\n");
}

#[test]
fn test_get_json_quotes_strings() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/name", "--json"])
        .assert()
        .success()
        .stdout("\"demo\"\n");
}

#[test]
fn test_get_node_prints_json() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/db/main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"local\""))
        .stdout(predicate::str::contains("\"port\": 5432"));
}

#[test]
fn test_get_present_null() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/db/main/password"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn test_get_missing_path_fails() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/nonexistent/key"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No value at 'app/nonexistent/key'"));
}

#[test]
fn test_get_reports_parse_error_with_path() {
    let tree = sample_tree();
    tree.file("app/broken.json", "{\"a\": ");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["get", "app/broken/a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

// ============================================================================
// exists
// ============================================================================

#[test]
fn test_exists_reports_status() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["exists", "app/db/main/password"])
        .assert()
        .success()
        .stdout("true\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["exists", "app/db/main/user"])
        .assert()
        .code(1)
        .stdout("false\n")
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// keys and dump
// ============================================================================

#[test]
fn test_keys_of_root_and_node() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .arg("keys")
        .assert()
        .success()
        .stdout("app\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["keys", "app"])
        .assert()
        .success()
        .stdout("db\ndebug\nhosts\nname\n");
}

#[test]
fn test_keys_of_sequence_and_scalar() {
    let tree = sample_tree();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["keys", "app/hosts"])
        .assert()
        .success()
        .stdout("0\n1\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["keys", "app/debug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no keys"));
}

#[test]
fn test_dump_exports_subtree() {
    let tree = sample_tree();

    let output = cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .args(["dump", "app"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let exported: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        exported,
        serde_json::json!({
            "db": {"main": {"host": "local", "port": 5432, "password": null}},
            "debug": true,
            "hosts": {"0": "alpha", "1": "beta"},
            "name": "demo"
        })
    );
}

// ============================================================================
// formats and options
// ============================================================================

#[test]
fn test_formats_lists_builtins() {
    cfgtree_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("PHP table"))
        .stdout(predicate::str::contains("yml"));
}

#[test]
fn test_options_file_is_applied() {
    let tree = sample_tree();
    tree.file("app/mail.conf", "from = noreply@example.com\n")
        .file("cfgtree.toml", "disabled = [\"yaml\"]\n\n[aliases]\nconf = \"ini\"\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.path("app"))
        .arg("--options")
        .arg(tree.path("cfgtree.toml"))
        .args(["get", "mail/from"])
        .assert()
        .success()
        .stdout("noreply@example.com\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.path("app"))
        .arg("--options")
        .arg(tree.path("cfgtree.toml"))
        .args(["exists", "hosts/0"])
        .assert()
        .code(1);
}

#[test]
fn test_bad_options_file_fails() {
    let tree = sample_tree();
    tree.file("cfgtree.toml", "[aliases]\nconf = \"cfg\"\n");

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.root())
        .arg("--options")
        .arg(tree.path("cfgtree.toml"))
        .arg("formats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type tag 'cfg'"));
}

#[test]
fn test_missing_root_fails() {
    let tree = TestTree::new();

    cfgtree_cmd()
        .arg("--root")
        .arg(tree.path("missing"))
        .args(["get", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
