use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// Documents are identified by their file name within the indexed directory
pub type DocId = String;

/// A normalized index term
pub type Term = String;

/// Number of occurrences of a term in one document (always >= 1 when stored)
pub type Frequency = u32;

/// Per-document bookkeeping kept in the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Document {
    /// Count of non-empty normalized tokens in the document
    pub word_count: u64,
    /// Modification time in nanoseconds since the UNIX epoch
    pub last_modified: u64,
}

/// Term -> (document -> frequency)
///
/// A term entry never holds an empty posting map: removing the last posting
/// removes the term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    terms: FxHashMap<Term, FxHashMap<DocId, Frequency>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unique terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Postings for a term, if it is indexed
    pub fn postings(&self, term: &str) -> Option<&FxHashMap<DocId, Frequency>> {
        self.terms.get(term)
    }

    /// Frequency of `term` in `doc`, 0 when absent
    pub fn frequency(&self, term: &str, doc: &str) -> Frequency {
        self.terms
            .get(term)
            .and_then(|postings| postings.get(doc))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &FxHashMap<DocId, Frequency>)> {
        self.terms.iter()
    }

    /// Add `count` occurrences of `term` in `doc`, summing with any existing posting.
    /// A zero count is ignored.
    pub(crate) fn add_posting(&mut self, term: Term, doc: &str, count: Frequency) {
        if count == 0 {
            return;
        }
        let postings = self.terms.entry(term).or_default();
        match postings.get_mut(doc) {
            Some(freq) => *freq = freq.saturating_add(count),
            None => {
                postings.insert(doc.to_string(), count);
            }
        }
    }

    /// Fold another index into this one, summing frequencies per (term, doc)
    pub(crate) fn absorb(&mut self, other: InvertedIndex) {
        for (term, postings) in other.terms {
            match self.terms.get_mut(&term) {
                Some(existing) => {
                    for (doc, freq) in postings {
                        let slot = existing.entry(doc).or_insert(0);
                        *slot = slot.saturating_add(freq);
                    }
                }
                None => {
                    self.terms.insert(term, postings);
                }
            }
        }
    }

    /// Remove every posting for `doc`. Terms left without postings are deleted.
    /// Returns the number of terms that were deleted.
    pub(crate) fn remove_document(&mut self, doc: &str) -> usize {
        let before = self.terms.len();
        self.terms.retain(|_, postings| {
            postings.remove(doc);
            !postings.is_empty()
        });
        before - self.terms.len()
    }

    /// Whether any term still has a posting for `doc`
    pub fn references(&self, doc: &str) -> bool {
        self.terms.values().any(|postings| postings.contains_key(doc))
    }

    /// All documents referenced by at least one posting
    pub fn referenced_documents(&self) -> Vec<&str> {
        let mut docs: Vec<&str> = self
            .terms
            .values()
            .flat_map(|postings| postings.keys().map(String::as_str))
            .collect();
        docs.sort_unstable();
        docs.dedup();
        docs
    }
}

/// Document id -> word count and last-known modification time.
///
/// The `last_modified` column doubles as the timestamp table the sync engine
/// diffs against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    docs: FxHashMap<DocId, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.docs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &Document)> {
        self.docs.iter()
    }

    /// Timestamp table view: document id -> last modification time
    pub fn timestamps(&self) -> impl Iterator<Item = (&str, u64)> {
        self.docs.iter().map(|(id, doc)| (id.as_str(), doc.last_modified))
    }

    pub(crate) fn insert(&mut self, id: DocId, doc: Document) -> Option<Document> {
        self.docs.insert(id, doc)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Document> {
        self.docs.remove(id)
    }

    /// Returns false when `id` is not in the store
    pub(crate) fn set_last_modified(&mut self, id: &str, last_modified: u64) -> bool {
        match self.docs.get_mut(id) {
            Some(doc) => {
                doc.last_modified = last_modified;
                true
            }
            None => false,
        }
    }
}

/// A file discovered in the source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub id: DocId,
    pub path: PathBuf,
    pub last_modified: u64,
}

/// Configuration for the indexer
#[derive(Debug, Clone, Default)]
pub struct IndexConfig {
    /// Worker threads for a full build. 0 uses the available parallelism.
    pub worker_count: usize,
    /// Where the index artifact is stored. `None` uses the app data directory.
    pub artifact_path: Option<PathBuf>,
    /// Show a progress bar during full builds
    pub show_progress: bool,
}

impl IndexConfig {
    /// Resolve `worker_count`, mapping 0 to the available parallelism
    pub fn effective_worker_count(&self) -> usize {
        if self.worker_count == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.worker_count
        }
    }
}
