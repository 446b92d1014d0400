//! End-to-end runs of the `sqlpad` binary against small scripts.

use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

fn run(dir: &Path, script: &str, extra: &[&str]) -> Output {
    std::fs::write(dir.join("script.txt"), script).unwrap();
    Command::new(env!("CARGO_BIN_EXE_sqlpad"))
        .current_dir(dir)
        .args(extra)
        .arg("script.txt")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout.clone()).unwrap()
}

#[test]
fn prints_final_text() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        dir.path(),
        "# plain typing\ntype SELECT 1\nkey ctrl+shift+left\nkey backspace\ntype 2\n",
        &[],
    );
    assert_eq!(stdout(&out), "SELECT 2\n");
    assert!(dir.path().join("sqlpad.log").exists());
}

#[test]
fn paste_and_undo() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), "paste a\\nb\nkey ctrl+z\npaste x\n", &[]);
    assert_eq!(stdout(&out), "x\n");
}

#[test]
fn identifiers_flag_feeds_completion() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        dir.path(),
        "type cust\nkey enter\n",
        &["--identifiers", "customer_id,created_at"],
    );
    assert_eq!(stdout(&out), "customer_id\n");
}

#[test]
fn catalog_loads_land_before_navigation() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("catalog.toml"),
        "[shop.empty]\n\n[shop.sales]\ntables = [\"orders\"]\n",
    )
    .unwrap();
    let out = run(
        dir.path(),
        "type FROM shop.\nwait 200\nkey down\nkey enter\n",
        &["--catalog", "catalog.toml", "--load-latency-ms", "5"],
    );
    assert_eq!(stdout(&out), "FROM shop.sales\n");
}

#[test]
fn script_errors_name_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), "type a\nbogus\n", &[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
}
