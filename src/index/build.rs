use crate::index::snapshot::Snapshot;
use crate::index::types::{DocId, Document, Frequency, IndexConfig, InvertedIndex, SourceFile, Term};
use crate::utils::{modified_nanos, normalize_line};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

/// Result of streaming a single file (computed on a worker)
pub struct ScannedDocument {
    pub term_counts: FxHashMap<Term, Frequency>,
    pub word_count: u64,
    pub last_modified: u64,
}

/// Stream a file line by line and count its normalized terms
pub fn scan_document(path: &Path) -> io::Result<ScannedDocument> {
    let file = File::open(path)?;
    let last_modified = modified_nanos(&file.metadata()?);
    let mut reader = BufReader::new(file);

    let mut term_counts: FxHashMap<Term, Frequency> = FxHashMap::default();
    let mut word_count = 0u64;
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        for term in normalize_line(&text) {
            word_count += 1;
            *term_counts.entry(term).or_insert(0) += 1;
        }
    }

    Ok(ScannedDocument {
        term_counts,
        word_count,
        last_modified,
    })
}

/// Partial result owned by one worker
#[derive(Debug, Default)]
pub struct PartialIndex {
    pub index: InvertedIndex,
    pub documents: Vec<(DocId, Document)>,
    pub skipped: usize,
}

/// Split `len` items into `workers` contiguous half-open ranges.
///
/// Every range gets `len / workers` items and the first `len % workers`
/// ranges get one more, so the ranges cover `0..len` exactly once.
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 || workers == 0 {
        return Vec::new();
    }
    let workers = workers.min(len);
    let base = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Index one contiguous slice of files into a private partial result
fn index_partition(files: &[SourceFile], progress: &ProgressBar) -> PartialIndex {
    let mut partial = PartialIndex::default();

    for file in files {
        match scan_document(&file.path) {
            Ok(scanned) => {
                for (term, count) in scanned.term_counts {
                    partial.index.add_posting(term, &file.id, count);
                }
                partial.documents.push((
                    file.id.clone(),
                    Document {
                        word_count: scanned.word_count,
                        last_modified: scanned.last_modified,
                    },
                ));
            }
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", file.path.display(), e);
                partial.skipped += 1;
            }
        }
        progress.inc(1);
    }

    partial
}

/// Fold a worker's partial result into the shared snapshot (single-threaded)
pub fn merge_partial(snapshot: &mut Snapshot, partial: PartialIndex) {
    snapshot.index_mut().absorb(partial.index);
    for (id, doc) in partial.documents {
        snapshot.put_document(id, doc);
    }
}

fn build_progress_bar(total: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");
    pb.set_style(style);
    pb.set_message("Indexing files...");
    pb
}

/// Build a snapshot from scratch over `files`.
///
/// Files are partitioned across `min(workers, files.len())` threads, each
/// producing a [`PartialIndex`]. Partials are merged after all workers join,
/// so the result does not depend on the worker count.
pub fn build_snapshot(files: &[SourceFile], config: &IndexConfig) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    if files.is_empty() {
        info!("No files to index");
        return Ok(snapshot);
    }

    let workers = config.effective_worker_count().min(files.len());
    let ranges = partition_ranges(files.len(), workers);
    info!("Indexing {} files with {} workers", files.len(), ranges.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("docdex-indexer-{i}"))
        .build()
        .context("Failed to start indexing workers")?;

    let progress = build_progress_bar(files.len(), config.show_progress);

    let partials: Vec<PartialIndex> = pool.install(|| {
        ranges
            .into_par_iter()
            .map(|range| index_partition(&files[range], &progress))
            .collect()
    });

    progress.finish_with_message("Indexing complete");

    let mut skipped = 0;
    for partial in partials {
        skipped += partial.skipped;
        merge_partial(&mut snapshot, partial);
    }

    if skipped > 0 {
        warn!("{} files could not be read", skipped);
    }
    info!(
        "Indexed {} documents, {} unique terms",
        snapshot.documents().len(),
        snapshot.index().len()
    );

    Ok(snapshot)
}
