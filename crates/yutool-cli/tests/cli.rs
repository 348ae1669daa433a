//! Runs the built `yutool` binary.

mod common;

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

use common::{minimal_release, template_dir};

fn yutool(args: &[&str], template_env: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_yutool"));
    command.args(args).env_remove("RUST_LOG");
    match template_env {
        Some(dirs) => command.env("YUTOOL_TEMPLATE_DIR", dirs),
        None => command.env_remove("YUTOOL_TEMPLATE_DIR"),
    };
    command.output().expect("run yutool")
}

#[test]
fn export_succeeds_with_pop_warning() {
    let dir = TempDir::new().unwrap();
    let archive = minimal_release(dir.path(), &[]);
    let templates = template_dir(dir.path());
    let out = dir.path().join("out");

    let output = yutool(
        &[
            "--color",
            "never",
            "export",
            archive.to_str().unwrap(),
            "--target",
            out.to_str().unwrap(),
            "--template-dir",
            templates.to_str().unwrap(),
        ],
        None,
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stderr.contains("pop words skipped"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("yustar_v1.json5"), "stdout: {stdout}");

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("yustar_v1.json5")).unwrap()).unwrap();
    assert_eq!(document["items"][0]["Ha"], serde_json::json!(["口"]));
}

#[test]
fn template_dir_from_environment() {
    let dir = TempDir::new().unwrap();
    let archive = minimal_release(dir.path(), &[]);
    let templates = template_dir(dir.path());
    let out = dir.path().join("out");

    let output = yutool(
        &[
            "export",
            archive.to_str().unwrap(),
            "--target",
            out.to_str().unwrap(),
        ],
        templates.to_str(),
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.join("yustar_v1.json5").is_file());
}

#[test]
fn missing_source_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope_v1.zip");

    let output = yutool(&["export", missing.to_str().unwrap(), "--no-template"], None);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: open release"), "stderr: {stderr}");
    assert!(stderr.contains("source not found"), "stderr: {stderr}");
}

#[test]
fn inspect_lists_dictionaries() {
    let dir = TempDir::new().unwrap();
    let archive = minimal_release(dir.path(), &[]);

    let output = yutool(&["--color", "never", "inspect", archive.to_str().unwrap()], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("yustar.quick.dict.yaml"), "stdout: {stdout}");
    assert!(stdout.contains("missing (optional)"), "stdout: {stdout}");
}

#[test]
fn export_without_template_exits_zero() {
    let dir = TempDir::new().unwrap();
    let archive = minimal_release(dir.path(), &[]);

    let output = Command::new(env!("CARGO_BIN_EXE_yutool"))
        .args(["--color", "never", "export", archive.to_str().unwrap()])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("YUTOOL_TEMPLATE_DIR")
        .output()
        .expect("run yutool");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stderr.contains("render skipped"), "stderr: {stderr}");
    assert!(dir.path().join("export/roots.txt").is_file());
}
