use crate::index::types::SourceFile;
use anyhow::Result;
use ignore::WalkBuilder;
use log::warn;
use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Modification time in nanoseconds since the UNIX epoch (0 if unavailable)
pub fn modified_nanos(metadata: &Metadata) -> u64 {
    metadata
        .modified()
        .map(|t| t.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos() as u64)
        .unwrap_or(0)
}

/// List the regular files directly inside `root`, sorted by file name.
///
/// Subdirectories are not descended. `exclude` names a file to leave out
/// (the index artifact when it is stored inside the indexed directory).
pub fn list_documents(root: &Path, exclude: Option<&Path>) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let excluded = exclude.and_then(|p| p.canonicalize().ok());

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if let Some(excluded) = &excluded {
            if path.canonicalize().ok().as_ref() == Some(excluded) {
                continue;
            }
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                continue;
            }
        };

        // Lossy decoding could map two names to one id
        let Some(id) = entry.file_name().to_str() else {
            warn!("Skipping file with non UTF-8 name: {}", path.display());
            continue;
        };

        files.push(SourceFile {
            id: id.to_string(),
            path: path.to_path_buf(),
            last_modified: modified_nanos(&metadata),
        });
    }

    Ok(files)
}
