//! Integration tests for the emopak CLI

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn emopak() -> Command {
    let mut cmd = Command::cargo_bin("emopak").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_two_assets(dir: &Path) {
    fs::write(
        dir.join("index.json"),
        r#"{ "emoji_collection": [
            { "name": "a", "file": "a.png" },
            { "name": "b", "file": "b.png" }
        ] }"#,
    )
    .unwrap();
    fs::write(dir.join("a.png"), [0xA0u8; 10]).unwrap();
    fs::write(dir.join("b.png"), [0xB0u8; 10]).unwrap();
}

#[test]
fn test_help_command() {
    emopak()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pack"))
        .stdout(predicate::str::contains("unpack"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn test_version_command() {
    emopak()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("emopak"));
}

#[test]
fn test_no_arguments() {
    emopak()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_positional() {
    // Paths never fall back to the environment
    emopak()
        .env("EMOPAK_OUTPUT", "ignored.bin")
        .args(["pack", "only_one"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_command() {
    emopak()
        .args(["bogus", "a", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_pack_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("assets.bin");

    emopak()
        .arg("pack")
        .arg(dir.path())
        .arg(&out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("manifest not found"));
    assert!(!out.exists());
}

#[test]
fn test_unpack_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("tiny.bin");
    fs::write(&image, [0u8; 2]).unwrap();

    emopak()
        .arg("unpack")
        .arg(&image)
        .arg(dir.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_pack_then_unpack() {
    let src = tempfile::tempdir().unwrap();
    write_two_assets(src.path());
    let work = tempfile::tempdir().unwrap();
    let image = work.path().join("assets.bin");
    let extracted = work.path().join("extracted");

    emopak()
        .arg("pack")
        .arg(src.path())
        .arg(&image)
        .arg("--no-probe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Total size:     124 bytes"));
    assert_eq!(fs::metadata(&image).unwrap().len(), 124);

    emopak()
        .arg("unpack")
        .arg(&image)
        .arg(&extracted)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:        2"))
        .stdout(predicate::str::contains("ok"))
        .stdout(predicate::str::contains("Extracted 2 of 2 entries"));

    for name in ["a.png", "b.png"] {
        assert_eq!(
            fs::read(extracted.join(name)).unwrap(),
            fs::read(src.path().join(name)).unwrap()
        );
    }
}

#[test]
fn test_pack_reports_missing_files() {
    let src = tempfile::tempdir().unwrap();
    write_two_assets(src.path());
    fs::remove_file(src.path().join("b.png")).unwrap();
    let out = src.path().join("assets.bin");

    emopak()
        .arg("pack")
        .arg(src.path())
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 files"))
        .stderr(predicate::str::contains("Warning:").and(predicate::str::contains("b.png")));
}

#[test]
fn test_template_command() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("new_assets");

    emopak()
        .arg("template")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("neutral.png"))
        .stdout(predicate::str::contains("confused.png"))
        .stdout(predicate::str::contains("hide_subtitle"));
    assert!(target.join("index.json").is_file());
}
