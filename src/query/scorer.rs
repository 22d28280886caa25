//! TF-IDF ranking for single-term queries
//!
//! - `TF  = frequency / word_count(document)`
//! - `IDF = log10(total_documents / documents_containing_term) + 1`
//! - `score = TF * IDF`
//!
//! The `+ 1` keeps a term that occurs in every document from scoring zero.

use crate::index::types::{DocId, DocumentStore, InvertedIndex};
use crate::utils::normalize_query;

/// A ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc: DocId,
    pub score: f64,
}

/// Inputs for scoring one (term, document) pair
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreContext {
    /// Occurrences of the term in the document
    pub frequency: u32,
    /// Normalized word count of the document
    pub word_count: u64,
    /// Number of documents in the store
    pub total_documents: usize,
    /// Number of documents that contain the term
    pub document_frequency: usize,
}

/// Scorer ranks documents of an index against a query term
pub struct Scorer<'a> {
    index: &'a InvertedIndex,
    documents: &'a DocumentStore,
}

impl<'a> Scorer<'a> {
    pub fn new(index: &'a InvertedIndex, documents: &'a DocumentStore) -> Self {
        Self { index, documents }
    }

    /// TF-IDF score for one (term, document) pair. Returns 0 for degenerate
    /// inputs (empty document or empty collection).
    pub fn calculate_score(ctx: &ScoreContext) -> f64 {
        if ctx.word_count == 0 || ctx.total_documents == 0 || ctx.document_frequency == 0 {
            return 0.0;
        }
        let tf = f64::from(ctx.frequency) / ctx.word_count as f64;
        let idf = (ctx.total_documents as f64 / ctx.document_frequency as f64).log10() + 1.0;
        tf * idf
    }

    /// Rank every document containing `query`, best first.
    ///
    /// The query is lowercased only. An unknown term yields an empty list.
    /// Documents with equal scores come back in no particular order.
    pub fn rank(&self, query: &str) -> Vec<SearchHit> {
        let term = normalize_query(query);
        let Some(postings) = self.index.postings(&term) else {
            return Vec::new();
        };

        let total_documents = self.documents.len();
        let document_frequency = postings.len();

        let mut hits: Vec<SearchHit> = postings
            .iter()
            .filter_map(|(doc, &frequency)| {
                // Postings without a store entry cannot be scored
                let word_count = self.documents.get(doc)?.word_count;
                let ctx = ScoreContext {
                    frequency,
                    word_count,
                    total_documents,
                    document_frequency,
                };
                Some(SearchHit {
                    doc: doc.clone(),
                    score: Self::calculate_score(&ctx),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Document;

    fn fixture() -> (InvertedIndex, DocumentStore) {
        let mut index = InvertedIndex::new();
        let mut documents = DocumentStore::new();
        for (doc, words) in [("a.txt", 10), ("b.txt", 4), ("c.txt", 5), ("d.txt", 8)] {
            documents.insert(
                doc.to_string(),
                Document {
                    word_count: words,
                    last_modified: 0,
                },
            );
        }
        index.add_posting("rare".into(), "a.txt", 1);
        index.add_posting("everywhere".into(), "a.txt", 1);
        index.add_posting("everywhere".into(), "b.txt", 2);
        index.add_posting("everywhere".into(), "c.txt", 1);
        index.add_posting("everywhere".into(), "d.txt", 1);
        (index, documents)
    }

    #[test]
    fn test_tf_idf_single_document() {
        let (index, documents) = fixture();
        let hits = Scorer::new(&index, &documents).rank("rare");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc, "a.txt");
        let expected = (1.0 / 10.0) * (4.0f64.log10() + 1.0);
        assert!((hits[0].score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_term_in_every_document_scores_positive() {
        let (index, documents) = fixture();
        let hits = Scorer::new(&index, &documents).rank("everywhere");
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|h| h.score > 0.0));
        // 2/4 beats 1/5, 1/8 and 1/10
        assert_eq!(hits[0].doc, "b.txt");
        assert!((hits[0].score - 0.5).abs() < 1e-12);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_query_is_lowercased() {
        let (index, documents) = fixture();
        assert_eq!(Scorer::new(&index, &documents).rank("RARE").len(), 1);
    }

    #[test]
    fn test_query_punctuation_not_stripped() {
        let (index, documents) = fixture();
        assert!(Scorer::new(&index, &documents).rank("rare!").is_empty());
    }

    #[test]
    fn test_absent_term_is_empty() {
        let (index, documents) = fixture();
        assert!(Scorer::new(&index, &documents).rank("missing").is_empty());
    }

    #[test]
    fn test_degenerate_context_scores_zero() {
        let ctx = ScoreContext {
            frequency: 1,
            ..Default::default()
        };
        assert_eq!(Scorer::calculate_score(&ctx), 0.0);
    }
}
