//! Integration tests driving the docdex binary.
//!
//! The default index location lives under the app data directory, so every
//! run points `XDG_DATA_HOME` at a private temp directory.

#![cfg(target_os = "linux")]

mod common;

use common::{Fixture, seed_corpus};
use std::path::Path;
use std::process::Command;

/// Run docdex with given args, returning (stdout, stderr, success)
fn run_docdex(args: &[&str], data_home: &Path) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_docdex"))
        .args(args)
        .env("XDG_DATA_HOME", data_home)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run docdex");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn index_then_search() {
    let fixture = Fixture::new();
    seed_corpus(&fixture);
    let dir = fixture.dir().to_str().unwrap();
    let data_home = fixture.store.path();

    let (stdout, stderr, ok) = run_docdex(&["index", dir], data_home);
    assert!(ok, "index failed: {stderr}");
    assert!(stdout.contains("Indexed 4 documents"), "{stdout}");

    let (stdout, stderr, ok) = run_docdex(&["search", "OWNERSHIP", "-p", dir, "--no-color"], data_home);
    assert!(ok, "search failed: {stderr}");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("Rank 1: ünïcödé.txt"), "{stdout}");
    assert!(lines[1].starts_with("Rank 2: rust.txt"), "{stdout}");
}

#[test]
fn search_miss_prints_message() {
    let fixture = Fixture::new();
    seed_corpus(&fixture);
    let dir = fixture.dir().to_str().unwrap();

    let (stdout, _, ok) = run_docdex(&["search", "cobol", "-p", dir], fixture.store.path());
    assert!(ok);
    assert_eq!(stdout.trim(), "No results found for 'cobol'");
}

#[test]
fn remove_deletes_stored_index() {
    let fixture = Fixture::new();
    seed_corpus(&fixture);
    let dir = fixture.dir().to_str().unwrap();
    let data_home = fixture.store.path();

    let (_, stderr, ok) = run_docdex(&["index", dir], data_home);
    assert!(ok, "index failed: {stderr}");

    let (stdout, _, ok) = run_docdex(&["remove", dir], data_home);
    assert!(ok);
    assert!(stdout.starts_with("Removed index for:"), "{stdout}");

    let (stdout, _, ok) = run_docdex(&["remove", dir], data_home);
    assert!(ok);
    assert!(stdout.starts_with("No index found for:"), "{stdout}");
}

#[test]
fn missing_directory_fails() {
    let fixture = Fixture::new();
    let missing = fixture.dir().join("nope");
    let (_, _, ok) = run_docdex(&["index", missing.to_str().unwrap()], fixture.store.path());
    assert!(!ok);
}
