use crate::index::snapshot::Snapshot;
use crate::utils::{FIELD_SEPARATOR, escape_field};
use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// First line of every artifact; bump the version on format changes
pub const FORMAT_HEADER: &str = "docdex-index v1";

pub const TERMS_MARKER: &str = "@terms";
pub const LENGTHS_MARKER: &str = "@lengths";
pub const TIMESTAMPS_MARKER: &str = "@timestamps";
pub const END_MARKER: &str = "@end";

/// Write the snapshot to `path`, creating parent directories as needed
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_snapshot(snapshot, &mut writer)?;
    writer.flush().context("Failed to flush index")?;

    info!(
        "Saved index ({} terms, {} documents) to {}",
        snapshot.index().len(),
        snapshot.documents().len(),
        path.display()
    );
    Ok(())
}

/// Serialize the snapshot as three sections: terms, lengths, timestamps.
///
/// Output is sorted so the same snapshot always produces the same bytes.
pub fn write_snapshot<W: Write>(snapshot: &Snapshot, out: &mut W) -> Result<()> {
    let sep = FIELD_SEPARATOR;

    writeln!(out, "{FORMAT_HEADER}")?;

    // Section 1: term, doc count, then (doc, frequency) pairs
    writeln!(out, "{TERMS_MARKER}")?;
    let mut terms: Vec<_> = snapshot.index().iter().collect();
    terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (term, postings) in terms {
        let mut docs: Vec<_> = postings.iter().collect();
        docs.sort_unstable_by(|a, b| a.0.cmp(b.0));

        write!(out, "{}{sep}{}", escape_field(term), docs.len())?;
        for (doc, freq) in docs {
            write!(out, "{sep}{}{sep}{}", escape_field(doc), freq)?;
        }
        writeln!(out)?;
    }

    let mut documents: Vec<_> = snapshot.documents().iter().collect();
    documents.sort_unstable_by(|a, b| a.0.cmp(b.0));

    // Section 2: document word counts
    writeln!(out, "{LENGTHS_MARKER}")?;
    for (id, doc) in &documents {
        writeln!(out, "{}{sep}{}", escape_field(id), doc.word_count)?;
    }

    // Section 3: raw modification timestamps (ns since epoch)
    writeln!(out, "{TIMESTAMPS_MARKER}")?;
    for (id, doc) in &documents {
        writeln!(out, "{}{sep}{}", escape_field(id), doc.last_modified)?;
    }

    writeln!(out, "{END_MARKER}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Document;

    #[test]
    fn test_write_layout() {
        let mut snapshot = Snapshot::new();
        snapshot.put_document(
            "my notes.txt".into(),
            Document {
                word_count: 3,
                last_modified: 42,
            },
        );
        snapshot.put_document(
            "a.txt".into(),
            Document {
                word_count: 1,
                last_modified: 7,
            },
        );
        snapshot.index_mut().add_posting("zeta".into(), "my notes.txt", 2);
        snapshot.index_mut().add_posting("alpha".into(), "my notes.txt", 1);
        snapshot.index_mut().add_posting("alpha".into(), "a.txt", 1);

        let mut buf = Vec::new();
        write_snapshot(&snapshot, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "docdex-index v1\n\
            @terms\n\
            alpha\t2\ta.txt\t1\tmy notes.txt\t1\n\
            zeta\t1\tmy notes.txt\t2\n\
            @lengths\n\
            a.txt\t1\n\
            my notes.txt\t3\n\
            @timestamps\n\
            a.txt\t7\n\
            my notes.txt\t42\n\
            @end\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.txt");
        save_snapshot(&Snapshot::new(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(FORMAT_HEADER));
        assert!(text.ends_with("@end\n"));
    }
}
