//! # docdex - TF-IDF search over a directory of text documents
//!
//! docdex keeps an inverted index of a flat directory of text files on disk,
//! brings it up to date on startup by diffing file modification times, and
//! ranks documents for a keyword with TF-IDF.
//!
//! ## Architecture
//!
//! - [`engine`] - The [`Engine`]: load-or-build on open, sync, search
//! - [`index`] - Index state, parallel build, sync and the artifact codec
//! - [`query`] - TF-IDF scoring
//! - [`output`] - Result formatting for the CLI
//! - [`utils`] - Tokenizer, directory listing, field escaping, app data
//!
//! ## Quick Start
//!
//! ```no_run
//! use docdex::Engine;
//! use std::path::Path;
//!
//! // Loads the stored index and syncs it, or builds one from scratch
//! let engine = Engine::open(Path::new("txt_files")).unwrap();
//!
//! for hit in engine.search("ownership").iter().take(5) {
//!     println!("{} {:.4}", hit.doc, hit.score);
//! }
//! ```
//!
//! ## Startup
//!
//! 1. **Artifact present** - load it, diff the directory against the stored
//!    timestamps, re-index only added/modified files, drop deleted ones, and
//!    save again if anything changed.
//! 2. **No artifact** - partition the files across a worker pool, merge the
//!    per-worker partial indexes, and write the first artifact.

pub mod engine;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use engine::Engine;
pub use index::{IndexConfig, SyncReport};
pub use query::SearchHit;
