use std::borrow::Cow;

/// Field separator used by the index artifact
pub const FIELD_SEPARATOR: char = '\t';

/// Escape a field so it contains no separator, line break or bare backslash.
///
/// `\` -> `\\`, TAB -> `\t`, LF -> `\n`, CR -> `\r`. Fields without any of
/// those characters are borrowed unchanged.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', '\t', '\n', '\r']) {
        return Cow::Borrowed(field);
    }

    let mut escaped = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Reverse [`escape_field`]. Returns `None` on an unknown or dangling escape.
pub fn unescape_field(field: &str) -> Option<Cow<'_, str>> {
    if !field.contains('\\') {
        return Some(Cow::Borrowed(field));
    }

    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(Cow::Owned(out))
}
