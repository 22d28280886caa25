/// Normalize a single raw token into an index term.
///
/// Every ASCII punctuation character is deleted (not replaced), then the
/// remainder is lowercased. Returns `None` when nothing is left, so stripped
/// tokens like `"--"` never reach the index or the word count.
pub fn normalize_token(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.to_lowercase())
}

/// Lazily split a line on whitespace and yield its normalized terms.
pub fn normalize_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().filter_map(normalize_token)
}

/// Normalize a query term.
///
/// Queries are a single term typed by the caller, so only case is folded;
/// punctuation is kept as given.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}
