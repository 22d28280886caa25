//! In-memory engine state: inverted index, document store and running totals.
//!
//! All mutation goes through [`Snapshot::index_document`] and
//! [`Snapshot::remove_document`] (or the crate-internal merge/load hooks), so
//! the aggregates always agree with the document store.

use crate::index::build::scan_document;
use crate::index::types::{DocId, Document, DocumentStore, InvertedIndex};
use log::{debug, warn};
use std::path::Path;

/// Inverted index and document store, plus the word and document totals
/// derived from them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    index: InvertedIndex,
    documents: DocumentStore,
    total_documents: u64,
    total_words: u64,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Running document count (reporting only)
    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    /// Running word count across all documents (reporting only)
    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Stream the file at `path` into the index under `id`.
    ///
    /// Returns false if the file could not be read; the failure is logged and
    /// the snapshot is left untouched.
    pub fn index_document(&mut self, id: &str, path: &Path) -> bool {
        match scan_document(path) {
            Ok(scanned) => {
                debug!(
                    "Indexed {} ({} words, {} terms)",
                    id,
                    scanned.word_count,
                    scanned.term_counts.len()
                );
                for (term, count) in scanned.term_counts {
                    self.index.add_posting(term, id, count);
                }
                self.put_document(
                    id.to_string(),
                    Document {
                        word_count: scanned.word_count,
                        last_modified: scanned.last_modified,
                    },
                );
                true
            }
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Remove a document and every posting that references it.
    ///
    /// Returns false if `id` was not in the document store (stray postings are
    /// still scrubbed).
    pub fn remove_document(&mut self, id: &str) -> bool {
        let removed = match self.documents.get(id) {
            Some(doc) => {
                // Totals read the entry before it is deleted
                self.total_words = self.total_words.saturating_sub(doc.word_count);
                self.total_documents = self.total_documents.saturating_sub(1);
                self.documents.remove(id);
                true
            }
            None => false,
        };
        self.index.remove_document(id);
        removed
    }

    /// Drop postings whose document has no store entry. Returns how many
    /// documents were scrubbed.
    pub(crate) fn scrub_orphans(&mut self) -> usize {
        let orphans: Vec<DocId> = self
            .index
            .referenced_documents()
            .into_iter()
            .filter(|doc| !self.documents.contains(doc))
            .map(str::to_string)
            .collect();
        for doc in &orphans {
            warn!("Index references unknown document {}, removing its postings", doc);
            self.index.remove_document(doc);
        }
        orphans.len()
    }

    /// Insert or overwrite a document store entry, keeping totals consistent
    pub(crate) fn put_document(&mut self, id: DocId, doc: Document) {
        match self.documents.insert(id, doc) {
            Some(previous) => {
                self.total_words = self.total_words.saturating_sub(previous.word_count);
            }
            None => self.total_documents += 1,
        }
        self.total_words = self.total_words.saturating_add(doc.word_count);
    }

    pub(crate) fn index_mut(&mut self) -> &mut InvertedIndex {
        &mut self.index
    }

    pub(crate) fn documents_mut(&mut self) -> &mut DocumentStore {
        &mut self.documents
    }
}
