//! Shared fixtures for integration tests

#![allow(dead_code)]

use docdex::{Engine, IndexConfig};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// A document directory plus a separate directory for the artifact
pub struct Fixture {
    pub docs: TempDir,
    pub store: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            docs: tempfile::tempdir().expect("Failed to create docs dir"),
            store: tempfile::tempdir().expect("Failed to create store dir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.docs.path()
    }

    pub fn artifact(&self) -> PathBuf {
        self.store.path().join("index.txt")
    }

    pub fn config(&self, workers: usize) -> IndexConfig {
        IndexConfig {
            worker_count: workers,
            artifact_path: Some(self.artifact()),
            show_progress: false,
        }
    }

    pub fn open(&self) -> Engine {
        Engine::open_with_config(self.dir(), self.config(2)).expect("Failed to open engine")
    }

    /// Write `content` to `name` and pin its mtime to `stamp` seconds after the epoch
    pub fn write(&self, name: &str, content: &str, stamp: u64) {
        let path = self.dir().join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        set_mtime(&path, stamp);
    }

    pub fn delete(&self, name: &str) {
        fs::remove_file(self.dir().join(name)).expect("Failed to delete fixture file");
    }

    pub fn artifact_bytes(&self) -> Vec<u8> {
        fs::read(self.artifact()).expect("Failed to read artifact")
    }

    pub fn artifact_mtime(&self) -> SystemTime {
        fs::metadata(self.artifact())
            .and_then(|m| m.modified())
            .expect("Failed to stat artifact")
    }
}

pub fn set_mtime(path: &Path, stamp: u64) {
    let file = File::options()
        .write(true)
        .open(path)
        .expect("Failed to open fixture file");
    file.set_modified(UNIX_EPOCH + Duration::from_secs(stamp))
        .expect("Failed to set mtime");
}

/// A small corpus with overlapping vocabulary
pub fn seed_corpus(fixture: &Fixture) {
    fixture.write(
        "rust.txt",
        "Rust is a systems language.\nRust has ownership, borrowing and lifetimes.",
        1_000,
    );
    fixture.write(
        "go notes.txt",
        "Go has goroutines and channels.\nThe language is simple.",
        1_001,
    );
    fixture.write(
        "python.txt",
        "Python is a dynamic language with a large ecosystem.",
        1_002,
    );
    fixture.write("ünïcödé.txt", "Ownership -- «quoted» text, ownership!", 1_003);
}
