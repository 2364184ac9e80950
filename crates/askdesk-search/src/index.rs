//! Threshold-gated fuzzy index over searchable records.
//!
//! Scores run from 0.0 (exact) to 1.0 (no overlap), Fuse-style: a record is a
//! hit when its score is at or below the index threshold. Two thresholds are
//! in play process-wide — strict (answers, precision) and lenient
//! (suggestions, recall) — as two indexes over the same records.

use strsim::jaro_winkler;

use crate::record::SearchRecord;

/// A ranked hit: record position in the flattened collection plus its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub index: usize,
    pub score: f64,
}

/// In-memory fuzzy-match structure over one set of records. Never mutated;
/// rebuilt wholesale with its records on every dataset replacement.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    threshold: f64,
    /// Tokenized search text per record, in flattening order.
    entries: Vec<Vec<String>>,
    /// Lowercased search text per record, for whole-query containment.
    texts: Vec<String>,
}

impl FuzzyIndex {
    pub fn build(records: &[SearchRecord], threshold: f64) -> Self {
        let entries = records.iter().map(|r| tokenize(&r.search_text)).collect();
        let texts = records.iter().map(|r| r.search_text.to_lowercase()).collect();
        Self {
            threshold,
            entries,
            texts,
        }
    }

    pub fn empty(threshold: f64) -> Self {
        Self {
            threshold,
            entries: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rank all records against `query`, keeping those at or below the
    /// threshold, best first. Ties keep flattening order (stable sort).
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query_tokens = query_tokens(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }
        let needle = query.trim().to_lowercase();

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .zip(&self.texts)
            .enumerate()
            .filter_map(|(index, (tokens, text))| {
                let score = score(&query_tokens, tokens, text, &needle);
                (score <= self.threshold).then_some(SearchHit { index, score })
            })
            .collect();

        hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}

/// Lowercase alphanumeric tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Query tokens, dropping short filler words when longer ones exist.
fn query_tokens(query: &str) -> Vec<String> {
    let all = tokenize(query);
    let long: Vec<String> = all.iter().filter(|t| t.len() > 3).cloned().collect();
    if long.is_empty() { all } else { long }
}

/// Similarity of one query token against one record token. Containment of a
/// token of 3+ chars counts as exact; otherwise Jaro-Winkler.
fn token_similarity(qt: &str, rt: &str) -> f64 {
    if qt == rt {
        return 1.0;
    }
    let shorter = qt.len().min(rt.len());
    if shorter >= 3 && (rt.contains(qt) || qt.contains(rt)) {
        return 1.0;
    }
    jaro_winkler(qt, rt)
}

/// Fuse-style score: 0.0 exact, 1.0 unrelated. Blend of the best-matching
/// query token (recall) and the mean across query tokens (precision), with
/// whole-query containment short-circuiting to exact.
fn score(query_tokens: &[String], entry_tokens: &[String], text: &str, needle: &str) -> f64 {
    if entry_tokens.is_empty() {
        return 1.0;
    }
    if needle.len() >= 4 && text.contains(needle) {
        return 0.0;
    }

    let mut best_overall: f64 = 0.0;
    let mut sum = 0.0;
    for qt in query_tokens {
        let best = entry_tokens
            .iter()
            .map(|rt| token_similarity(qt, rt))
            .fold(0.0_f64, f64::max);
        best_overall = best_overall.max(best);
        sum += best;
    }
    let mean = sum / query_tokens.len() as f64;
    let similarity = 0.7 * best_overall + 0.3 * mean;
    1.0 - similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordKind, RecordPayload};
    use askdesk_core::types::Faq;

    fn record(question: &str, answer: &str) -> SearchRecord {
        SearchRecord {
            kind: RecordKind::Faq,
            search_text: format!("{question} {answer}"),
            payload: RecordPayload::Faq(Faq {
                question: question.into(),
                answer: answer.into(),
            }),
        }
    }

    fn records() -> Vec<SearchRecord> {
        vec![
            record("Do you offer internship opportunities?", "Yes, summer internships."),
            record("What courses do you offer for NEET?", "NEET Foundation and crash courses."),
            record("How can I enroll?", "Visit the admissions office."),
        ]
    }

    #[test]
    fn test_exact_phrase_scores_zero() {
        let index = FuzzyIndex::build(&records(), 0.3);
        let hits = index.search("internship opportunities");
        assert_eq!(hits[0].index, 0);
        assert!(hits[0].score < 1e-9);
    }

    #[test]
    fn test_typo_still_matches_strict() {
        let index = FuzzyIndex::build(&records(), 0.3);
        let hits = index.search("intership oportunities");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].index, 0);
    }

    #[test]
    fn test_gibberish_misses_strict() {
        let index = FuzzyIndex::build(&records(), 0.3);
        assert!(index.search("asdkfjasldkf").is_empty());
    }

    #[test]
    fn test_lenient_is_superset_of_strict() {
        let recs = records();
        let strict = FuzzyIndex::build(&recs, 0.3);
        let lenient = FuzzyIndex::build(&recs, 0.5);
        for query in ["neet courses", "enroll", "internship", "summer program"] {
            let s: Vec<usize> = strict.search(query).iter().map(|h| h.index).collect();
            let l: Vec<usize> = lenient.search(query).iter().map(|h| h.index).collect();
            for idx in &s {
                assert!(l.contains(idx), "lenient dropped {idx} for {query:?}");
            }
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let recs = records();
        let a = FuzzyIndex::build(&recs, 0.3);
        let b = FuzzyIndex::build(&recs, 0.3);
        for query in ["internship", "neet", "enroll", "asdkfjasldkf"] {
            assert_eq!(a.search(query), b.search(query), "query {query:?}");
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let recs = vec![
            record("NEET prep", "Details one."),
            record("NEET prep", "Details one."),
        ];
        let index = FuzzyIndex::build(&recs, 0.5);
        let hits = index.search("neet prep");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].index, 1);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = FuzzyIndex::build(&records(), 0.5);
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }
}
