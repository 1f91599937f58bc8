//! End-to-end tests of the jarscope binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_zip(path: &Path, files: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

fn nested_fixture(dir: &Path) -> std::path::PathBuf {
    let mut inner = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut inner));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("META-INF/MANIFEST.MF", options).unwrap();
        writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
        writer.start_file("com/u/Helper.class", options).unwrap();
        writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
        writer.finish().unwrap();
    }

    let ear = dir.join("app.ear");
    write_zip(
        &ear,
        &[
            ("META-INF/application.xml", b"<application/>"),
            ("lib/util.jar", &inner),
        ],
    );
    ear
}

#[test]
fn test_list_descends_into_nested_jar() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());

    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["list", ear.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("util.jar"))
        .stdout(predicate::str::contains("Helper"));
}

#[test]
fn test_list_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());

    let output = Command::cargo_bin("jarscope")
        .unwrap()
        .args(["list", "--json", ear.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["operation"], "list");
    assert_eq!(parsed["status"], "success");
    let nodes = parsed["data"].as_array().unwrap();
    assert!(
        nodes
            .iter()
            .any(|n| n["path"] == "com/u/Helper.class" && n["container_type"] == "jar")
    );
}

#[test]
fn test_list_rejects_non_archive() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, b"plain text").unwrap();

    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["list", notes.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a supported container"));
}

#[test]
fn test_locate_resolves_nested_address() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());
    let uri = format!(
        "jarscope://{}!lib/util.jar!com/u/Helper.class",
        ear.display()
    );

    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["locate", &uri])
        .assert()
        .success()
        .stdout(predicate::str::contains("com/u/Helper.class"));
}

#[test]
fn test_locate_missing_entry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());
    let uri = format!("jarscope://{}!lib/util.jar!com/u/Absent.class", ear.display());

    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["locate", &uri])
        .assert()
        .failure()
        .stderr(predicate::str::contains("location not found"));
}

#[test]
fn test_locate_malformed_address_fails() {
    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["locate", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed address"));
}

#[test]
fn test_export_whole_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());
    let out = dir.path().join("out");

    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["export", ear.to_str().unwrap(), out.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.join("META-INF/application.xml").exists());
    // Nested archives are exported as archive files, not expanded.
    assert!(out.join("lib/util.jar").exists());
}

#[test]
fn test_export_only_selection() {
    let dir = tempfile::tempdir().unwrap();
    let ear = nested_fixture(dir.path());
    let out = dir.path().join("out");

    Command::cargo_bin("jarscope")
        .unwrap()
        .args([
            "export",
            ear.to_str().unwrap(),
            out.to_str().unwrap(),
            "--only",
            "lib",
        ])
        .assert()
        .success();

    assert!(out.join("lib/util.jar").exists());
    assert!(!out.join("META-INF").exists());
}

#[test]
fn test_completion_generates() {
    Command::cargo_bin("jarscope")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jarscope"));
}
