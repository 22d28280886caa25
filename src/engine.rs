//! The search engine: owns the index state and drives load, sync and build.

use crate::index::build::build_snapshot;
use crate::index::reader::load_snapshot;
use crate::index::snapshot::Snapshot;
use crate::index::sync::{SyncReport, sync_snapshot};
use crate::index::types::{Document, DocumentStore, IndexConfig, InvertedIndex, SourceFile};
use crate::index::writer::save_snapshot;
use crate::query::scorer::{Scorer, SearchHit};
use crate::utils::{get_artifact_path, list_documents};
use anyhow::{Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

/// A TF-IDF index over one directory, kept in step with it on disk.
///
/// Opening loads the stored artifact and syncs it, or builds from scratch when
/// there is none. Mutation needs `&mut self`, so one owner drives updates.
pub struct Engine {
    root: PathBuf,
    artifact_path: PathBuf,
    config: IndexConfig,
    snapshot: Snapshot,
}

impl Engine {
    /// Open `dir` with default settings. See [`Engine::open_with_config`].
    pub fn open(dir: &Path) -> Result<Self> {
        Self::open_with_config(dir, IndexConfig::default())
    }

    /// Load or build the index for `dir`.
    ///
    /// If an artifact exists it is loaded and synced against the directory
    /// (re-saved only when something changed). Otherwise all files are indexed
    /// in parallel and the first artifact is written. Fails only when `dir` is
    /// not a readable directory.
    pub fn open_with_config(dir: &Path, config: IndexConfig) -> Result<Self> {
        let root = dir
            .canonicalize()
            .with_context(|| format!("Directory not found: {}", dir.display()))?;
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let artifact_path = match &config.artifact_path {
            Some(path) => path.clone(),
            None => get_artifact_path(&root)?,
        };

        let mut engine = Self {
            root,
            artifact_path,
            config,
            snapshot: Snapshot::new(),
        };

        if engine.artifact_path.exists() {
            engine.snapshot = load_snapshot(&engine.artifact_path);
            engine.sync()?;
        } else {
            info!("No index at {}, building from scratch", engine.artifact_path.display());
            engine.rebuild()?;
        }

        Ok(engine)
    }

    fn live_files(&self) -> Result<Vec<SourceFile>> {
        list_documents(&self.root, Some(&self.artifact_path))
            .with_context(|| format!("Failed to enumerate {}", self.root.display()))
    }

    /// Reconcile the in-memory index with the directory, persisting if dirty
    pub fn sync(&mut self) -> Result<SyncReport> {
        let live = self.live_files()?;
        let report = sync_snapshot(&mut self.snapshot, &live);
        if report.is_dirty() {
            self.persist();
        }
        Ok(report)
    }

    /// Discard the in-memory index and rebuild it from every file, then persist
    pub fn rebuild(&mut self) -> Result<()> {
        let live = self.live_files()?;
        self.snapshot = build_snapshot(&live, &self.config)?;
        self.persist();
        Ok(())
    }

    /// Write the artifact, propagating failures
    pub fn save(&self) -> Result<()> {
        save_snapshot(&self.snapshot, &self.artifact_path)
    }

    /// Write the artifact; a failure only costs durability for this run
    fn persist(&self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save index to {}: {:#}", self.artifact_path.display(), e);
                false
            }
        }
    }

    /// Rank documents for a single query term, best first. Never fails.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        Scorer::new(self.snapshot.index(), self.snapshot.documents()).rank(query)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn index(&self) -> &InvertedIndex {
        self.snapshot.index()
    }

    pub fn documents(&self) -> &DocumentStore {
        self.snapshot.documents()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.snapshot.documents().get(id)
    }

    pub fn unique_terms(&self) -> usize {
        self.snapshot.index().len()
    }

    pub fn total_documents(&self) -> u64 {
        self.snapshot.total_documents()
    }

    pub fn total_words(&self) -> u64 {
        self.snapshot.total_words()
    }

    /// Mean word count per document (0 for an empty index)
    pub fn average_document_size(&self) -> f64 {
        match self.snapshot.total_documents() {
            0 => 0.0,
            n => self.snapshot.total_words() as f64 / n as f64,
        }
    }
}
