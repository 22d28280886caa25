use crate::engine::Engine;
use crate::index::types::IndexConfig;
use anyhow::Result;
use std::path::Path;

/// Display index statistics for a document directory
pub fn show_stats(root_path: &Path, config: IndexConfig) -> Result<()> {
    let engine = Engine::open_with_config(root_path, config)?;

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Directory:        {}", engine.root().display());
    println!("Index location:   {}", engine.artifact_path().display());
    println!("Documents:        {}", engine.total_documents());
    println!("Unique terms:     {}", engine.unique_terms());
    println!("Total words:      {}", engine.total_words());
    println!("Avg doc size:     {:.1} words", engine.average_document_size());

    if let Ok(meta) = std::fs::metadata(engine.artifact_path()) {
        println!("Index size:       {}", format_size(meta.len()));
    }

    // Largest documents
    let mut docs: Vec<_> = engine.documents().iter().collect();
    docs.sort_by(|a, b| b.1.word_count.cmp(&a.1.word_count).then_with(|| a.0.cmp(b.0)));

    if !docs.is_empty() {
        println!();
        println!("Largest documents:");
        for (id, doc) in docs.iter().take(10) {
            println!("  {:8} {}", doc.word_count, id);
        }
        if docs.len() > 10 {
            println!("  ... and {} more", docs.len() - 10);
        }
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
