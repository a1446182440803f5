//! CLI behavior through the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

use super::write_archive;

fn modlens() -> Command {
    Command::cargo_bin("modlens").expect("binary built")
}

#[test]
fn tree_renders_hierarchy() {
    let (_guard, path) = write_archive(
        "shield.zip",
        &[
            ("entry.lua", "include(\"guard.lua\")"),
            ("guard.lua", "return {}"),
        ],
    );

    modlens()
        .arg("tree")
        .arg(&path)
        .args(["--entry", "entry.lua"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry.lua"))
        .stdout(predicate::str::contains("└── guard.lua"));
}

#[test]
fn tree_json_output_is_machine_readable() {
    let (_guard, path) = write_archive(
        "shield.zip",
        &[("entry.lua", "include(\"gone.lua\")")],
    );

    let output = modlens()
        .arg("tree")
        .arg(&path)
        .args(["--entry", "entry.lua", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let tree: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(tree["path"], "entry.lua");
    assert_eq!(tree["children"][0]["missing"], true);
}

#[test]
fn missing_archive_fails_with_suggestion() {
    modlens()
        .arg("tree")
        .arg("/no/such/archive.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("archive not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn errors_command_reports_per_file_counts() {
    let dir = tempfile::TempDir::new().unwrap();
    let transcript_path = dir.path().join("transcript.txt");
    std::fs::write(
        &transcript_path,
        "[3:7] unexpected symbol\nerror evaluating shield/guard.lua\n",
    )
    .unwrap();

    modlens()
        .arg("errors")
        .arg(&transcript_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("shield/guard.lua"))
        .stdout(predicate::str::contains("[3:7]"));
}

#[test]
fn errors_json_includes_totals() {
    let dir = tempfile::TempDir::new().unwrap();
    let transcript_path = dir.path().join("transcript.txt");
    std::fs::write(&transcript_path, "[1:1] lonely\n").unwrap();

    let output = modlens()
        .arg("errors")
        .arg(&transcript_path)
        .args(["--format", "json", "--entry", "boot.lua"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let index: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(index["total"], 1);
    assert_eq!(index["files"]["boot.lua"][0]["line"], 1);
}

#[test]
fn graph_summary_lists_cycles() {
    let (_guard, path) = write_archive(
        "cyclic.zip",
        &[
            ("entry.lua", "include(\"a.lua\")"),
            ("a.lua", "include(\"b.lua\")"),
            ("b.lua", "include(\"a.lua\")"),
        ],
    );

    modlens()
        .arg("graph")
        .arg(&path)
        .args(["--entry", "entry.lua", "--format", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle:"));
}

#[test]
fn unknown_format_is_rejected() {
    let (_guard, path) = write_archive("mod.zip", &[("main.lua", "return {}")]);

    modlens()
        .arg("tree")
        .arg(&path)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
