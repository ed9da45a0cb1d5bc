//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("codebase-consolidator"));
    for var in [
        "CONSOLIDATOR_NUM_FILES",
        "CONSOLIDATOR_OUTPUT_DIR",
        "CONSOLIDATOR_MAX_SIZE",
        "CONSOLIDATOR_THEME",
        "CONSOLIDATOR_VERBOSE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn sample_project(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().join("proj");
    fs::create_dir_all(root.join("src")).expect("mkdir src");
    fs::create_dir_all(root.join("node_modules/pkg")).expect("mkdir node_modules");
    fs::write(root.join("src/main.py"), "print('hello')\n").expect("write main");
    fs::write(root.join("src/util.py"), "def f():\n    return 1\n").expect("write util");
    fs::write(root.join("README.md"), "# Demo\n").expect("write readme");
    fs::write(root.join("node_modules/pkg/index.js"), "module.exports = 1;\n").expect("write js");
    root
}

fn part_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read output dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("codebase_part_"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_cli_version() {
    let mut cmd = cli();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("codebase-consolidator"));
}

#[test]
fn test_cli_help() {
    let mut cmd = cli();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Consolidate a codebase"))
        .stdout(predicate::str::contains("consolidate"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_consolidate_writes_parts_and_index() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);
    let out = tmp.path().join("out");

    let mut cmd = cli();
    cmd.arg("consolidate")
        .arg(&root)
        .args(["-n", "2", "--folder-name", "result"])
        .arg("-o")
        .arg(&out);
    cmd.assert().success().stdout(predicate::str::contains("Consolidation complete"));

    let result = out.join("result");
    assert_eq!(part_files(&result), vec!["codebase_part_001.md", "codebase_part_002.md"]);

    let index = fs::read_to_string(result.join("README.md")).expect("index");
    assert!(index.contains("**Total Files Processed:** 3"));
    assert!(index.contains("[Part 2](./codebase_part_002.md)"));

    let all_parts: String = part_files(&result)
        .iter()
        .map(|n| fs::read_to_string(result.join(n)).expect("part"))
        .collect();
    assert!(all_parts.contains("## src/main.py {#src-main-py}"));
    assert!(!all_parts.contains("module.exports"));
}

#[test]
fn test_consolidate_json_manifest() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);

    let mut cmd = cli();
    cmd.arg("consolidate")
        .arg(&root)
        .args(["--json", "--folder-name", "json-run", "-n", "1"])
        .arg("--output-dir")
        .arg(tmp.path());
    let output = cmd.assert().success().get_output().stdout.clone();

    let manifest: serde_json::Value = serde_json::from_slice(&output).expect("json manifest");
    assert_eq!(manifest["files_processed"], serde_json::json!(3));
    assert_eq!(manifest["documents"].as_array().map(Vec::len), Some(1));
    assert_eq!(manifest["parts"][0]["file_name"], serde_json::json!("codebase_part_001.md"));
}

#[test]
fn test_consolidate_missing_root_fails_without_output() {
    let tmp = TempDir::new().expect("tmp");
    let out = tmp.path().join("out");

    let mut cmd = cli();
    cmd.arg("consolidate").arg(tmp.path().join("missing")).arg("-o").arg(&out);
    cmd.assert().failure().stderr(predicate::str::contains("does not exist"));
    assert!(!out.exists());
}

#[test]
fn test_consolidate_rejects_unknown_theme() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = cli();
    cmd.arg("consolidate").arg(tmp.path()).args(["--theme", "neon"]);
    cmd.assert().failure().stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_consolidate_rejects_zero_parts() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = cli();
    cmd.arg("consolidate").arg(tmp.path()).args(["-n", "0"]);
    cmd.assert().failure().stderr(predicate::str::contains("must be at least 1"));
}

#[test]
fn test_consolidate_honours_config_file() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);
    fs::write(
        root.join("consolidator.toml"),
        "[consolidator]\ntarget_parts = 1\nformat = \"xml\"\nfolder_name = \"from-config\"\n",
    )
    .expect("write config");

    let mut cmd = cli();
    cmd.arg("consolidate").arg(&root).arg("-o").arg(tmp.path());
    cmd.assert().success();

    let result = tmp.path().join("from-config");
    assert_eq!(part_files(&result), vec!["codebase_part_001.md"]);
    let part = fs::read_to_string(result.join("codebase_part_001.md")).expect("part");
    assert!(part.contains("<file path=\"src/main.py\" language=\"python\">"));
}

#[test]
fn test_preview_writes_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let root = sample_project(&tmp);

    let mut cmd = cli();
    cmd.arg("preview").arg(&root).args(["-n", "2"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Files included: 3"))
        .stdout(predicate::str::contains("Planned parts: 2 (target 2)"))
        .stdout(predicate::str::contains("codebase_part_002.md"))
        .stdout(predicate::str::contains("├── src/"));

    let entries: Vec<_> = fs::read_dir(tmp.path()).expect("read tmp").collect();
    assert_eq!(entries.len(), 1, "preview must not create output folders");
}

#[test]
fn test_completions_bash() {
    let mut cmd = cli();
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("codebase-consolidator"));
}
