use crate::index::error::CodecError;
use crate::index::snapshot::Snapshot;
use crate::index::types::{Document, Frequency};
use crate::index::writer::{
    END_MARKER, FORMAT_HEADER, LENGTHS_MARKER, TERMS_MARKER, TIMESTAMPS_MARKER,
};
use crate::utils::{FIELD_SEPARATOR, unescape_field};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Terms,
    Lengths,
    Timestamps,
    Done,
}

/// Load a snapshot from `path`.
///
/// An artifact that cannot be opened is reported and yields an empty
/// snapshot; malformed lines are skipped.
pub fn load_snapshot(path: &Path) -> Snapshot {
    match File::open(path) {
        Ok(file) => {
            let snapshot = read_snapshot(BufReader::new(file));
            info!(
                "Loaded index ({} terms, {} documents) from {}",
                snapshot.index().len(),
                snapshot.documents().len(),
                path.display()
            );
            snapshot
        }
        Err(e) => {
            warn!("Failed to open index {}: {}", path.display(), e);
            Snapshot::new()
        }
    }
}

/// Parse an artifact, skipping lines that do not parse
pub fn read_snapshot<R: BufRead>(mut reader: R) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let mut section = Section::Preamble;
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Index read failed after line {}: {}", line_no, e);
                break;
            }
        }
        line_no += 1;

        let line = match std::str::from_utf8(trim_line_end(&buf)) {
            Ok(line) => line,
            Err(_) => {
                skip(line_no, &CodecError::InvalidUtf8);
                skipped += 1;
                continue;
            }
        };

        if section == Section::Preamble {
            if line != FORMAT_HEADER {
                warn!("Unsupported index format '{}', ignoring artifact", line);
                return Snapshot::new();
            }
            section = Section::Done;
            continue;
        }

        // Marker lines never contain a separator; data lines always do
        if !line.contains(FIELD_SEPARATOR) {
            match parse_marker(line) {
                Ok(next) => section = next,
                Err(e) => {
                    skip(line_no, &e);
                    skipped += 1;
                }
            }
            continue;
        }

        let result = match section {
            Section::Terms => parse_term_line(&mut snapshot, line),
            Section::Lengths => parse_length_line(&mut snapshot, line),
            Section::Timestamps => parse_timestamp_line(&mut snapshot, line),
            Section::Preamble | Section::Done => Err(CodecError::OutsideSection),
        };
        if let Err(e) = result {
            skip(line_no, &e);
            skipped += 1;
        }
    }

    if section == Section::Preamble {
        warn!("Index artifact is empty");
    }
    if skipped > 0 {
        warn!("Skipped {} malformed index lines", skipped);
    }
    snapshot
}

fn skip(line_no: usize, err: &CodecError) {
    debug!("Skipping index line {}: {}", line_no, err);
}

fn trim_line_end(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

fn parse_marker(line: &str) -> Result<Section, CodecError> {
    match line {
        TERMS_MARKER => Ok(Section::Terms),
        LENGTHS_MARKER => Ok(Section::Lengths),
        TIMESTAMPS_MARKER => Ok(Section::Timestamps),
        END_MARKER => Ok(Section::Done),
        other => Err(CodecError::UnknownMarker(other.to_string())),
    }
}

fn field(raw: &str, what: &'static str) -> Result<String, CodecError> {
    let value = unescape_field(raw).ok_or_else(|| CodecError::InvalidEscape(raw.to_string()))?;
    if value.is_empty() {
        return Err(CodecError::EmptyField(what));
    }
    Ok(value.into_owned())
}

fn number<T: FromStr>(raw: &str) -> Result<T, CodecError> {
    raw.parse()
        .map_err(|_| CodecError::InvalidNumber(raw.to_string()))
}

/// `term \t doc_count (\t doc \t freq){doc_count}`
fn parse_term_line(snapshot: &mut Snapshot, line: &str) -> Result<(), CodecError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 2 {
        return Err(CodecError::FieldCount {
            expected: 2,
            found: fields.len(),
        });
    }

    let term = field(fields[0], "term")?;
    let doc_count: usize = number(fields[1])?;
    let pairs = &fields[2..];
    if doc_count.checked_mul(2) != Some(pairs.len()) {
        return Err(CodecError::FieldCount {
            expected: doc_count.saturating_mul(2).saturating_add(2),
            found: fields.len(),
        });
    }

    // Validate the whole line before touching the index
    let mut postings = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks_exact(2) {
        let doc = field(pair[0], "document")?;
        let freq: Frequency = number(pair[1])?;
        if freq == 0 {
            return Err(CodecError::ZeroFrequency(doc));
        }
        postings.push((doc, freq));
    }

    for (doc, freq) in postings {
        snapshot.index_mut().add_posting(term.clone(), &doc, freq);
    }
    Ok(())
}

/// `doc \t word_count`
fn parse_length_line(snapshot: &mut Snapshot, line: &str) -> Result<(), CodecError> {
    let (doc, value) = split_pair(line)?;
    let word_count: u64 = number(value)?;
    snapshot.put_document(
        doc,
        Document {
            word_count,
            last_modified: 0,
        },
    );
    Ok(())
}

/// `doc \t nanos_since_epoch`
fn parse_timestamp_line(snapshot: &mut Snapshot, line: &str) -> Result<(), CodecError> {
    let (doc, value) = split_pair(line)?;
    let last_modified: u64 = number(value)?;
    if !snapshot.documents_mut().set_last_modified(&doc, last_modified) {
        return Err(CodecError::UnknownDocument(doc));
    }
    Ok(())
}

fn split_pair(line: &str) -> Result<(String, &str), CodecError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(CodecError::FieldCount {
            expected: 2,
            found: fields.len(),
        });
    }
    Ok((field(fields[0], "document")?, fields[1]))
}
