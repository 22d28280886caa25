//! Output formatting for ranked search results

use crate::query::SearchHit;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print up to `limit` hits to stdout
pub fn print_hits(query: &str, hits: &[SearchHit], limit: usize, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_hits(&mut stdout, query, hits, limit)
}

/// Write hits as `Rank N: <doc> (Score: <score>)` lines
pub fn write_hits<W: WriteColor>(
    out: &mut W,
    query: &str,
    hits: &[SearchHit],
    limit: usize,
) -> io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No results found for '{}'", query)?;
        return Ok(());
    }

    for (rank, hit) in hits.iter().take(limit).enumerate() {
        write!(out, "Rank {}: ", rank + 1)?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", hit.doc)?;
        out.reset()?;

        write!(out, " (Score: ")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{:.6}", hit.score)?;
        out.reset()?;
        writeln!(out, ")")?;
    }

    if hits.len() > limit {
        writeln!(out, "... and {} more", hits.len() - limit)?;
    }

    Ok(())
}
