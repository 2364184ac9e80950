//! Process-wide dataset + index holder with atomic snapshot swap.
//!
//! Readers take an `Arc<IndexSnapshot>` and keep it for the duration of a
//! query: a replacement landing mid-resolution means the reader finishes on
//! the old snapshot. No reader ever observes a half-built index or a mix of
//! records from two datasets.

use std::sync::{Arc, RwLock};

use askdesk_core::types::Dataset;

use crate::index::FuzzyIndex;
use crate::record::{self, SearchRecord};

/// Immutable view derived from exactly one dataset: the dataset itself, its
/// flattened records, and the strict/lenient indexes over them.
#[derive(Debug)]
pub struct IndexSnapshot {
    pub dataset: Dataset,
    pub records: Vec<SearchRecord>,
    pub strict: FuzzyIndex,
    pub lenient: FuzzyIndex,
}

impl IndexSnapshot {
    /// Build a snapshot off to the side. Synchronous and complete before any
    /// reader can observe it.
    pub fn build(dataset: Dataset, strict_threshold: f64, lenient_threshold: f64) -> Self {
        let records = record::flatten(&dataset);
        let strict = FuzzyIndex::build(&records, strict_threshold);
        let lenient = FuzzyIndex::build(&records, lenient_threshold);
        Self {
            dataset,
            records,
            strict,
            lenient,
        }
    }

    fn empty(strict_threshold: f64, lenient_threshold: f64) -> Self {
        Self {
            dataset: Dataset::default(),
            records: Vec::new(),
            strict: FuzzyIndex::empty(strict_threshold),
            lenient: FuzzyIndex::empty(lenient_threshold),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owns the current snapshot. `replace` is idempotent and always safe to call;
/// `snapshot` is wait-free apart from the lock around the Arc clone.
pub struct DatasetStore {
    current: RwLock<Arc<IndexSnapshot>>,
    strict_threshold: f64,
    lenient_threshold: f64,
}

impl DatasetStore {
    /// Start with an empty snapshot; resolution and suggestions tolerate it
    /// (defaults/apology) until the first dataset lands.
    pub fn new(strict_threshold: f64, lenient_threshold: f64) -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot::empty(
                strict_threshold,
                lenient_threshold,
            ))),
            strict_threshold,
            lenient_threshold,
        }
    }

    /// Replace the dataset wholesale. Structurally empty datasets are
    /// rejected and the previous snapshot stays in place — callers tolerate
    /// a temporarily stale index rather than losing a good one.
    pub fn replace(&self, dataset: Dataset) {
        if dataset.is_structurally_empty() {
            tracing::warn!("dataset not fully loaded, keeping previous index");
            return;
        }

        let snapshot = Arc::new(IndexSnapshot::build(
            dataset,
            self.strict_threshold,
            self.lenient_threshold,
        ));
        tracing::info!(records = snapshot.records.len(), "search index rebuilt");

        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = snapshot;
    }

    /// Current snapshot; the caller pins it for the whole query.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        match self.current.read() {
            Ok(g) => Arc::clone(&*g),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdesk_core::types::Faq;

    fn dataset(answer: &str) -> Dataset {
        Dataset {
            faqs: vec![Faq {
                question: "Do you offer internships?".into(),
                answer: answer.into(),
            }],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_replace_swaps_snapshot() {
        let store = DatasetStore::new(0.3, 0.5);
        assert!(store.snapshot().is_empty());

        store.replace(dataset("Yes."));
        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 1);
        assert!(!snap.strict.search("internships").is_empty());
    }

    #[test]
    fn test_empty_dataset_keeps_previous_snapshot() {
        let store = DatasetStore::new(0.3, 0.5);
        store.replace(dataset("Yes."));
        store.replace(Dataset::default());

        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 1);
        assert_eq!(snap.dataset.faqs[0].answer, "Yes.");
    }

    #[test]
    fn test_inflight_reader_keeps_old_snapshot() {
        let store = DatasetStore::new(0.3, 0.5);
        store.replace(dataset("Old answer."));

        let pinned = store.snapshot();
        store.replace(dataset("New answer."));

        assert_eq!(pinned.dataset.faqs[0].answer, "Old answer.");
        assert_eq!(store.snapshot().dataset.faqs[0].answer, "New answer.");
    }

    #[test]
    fn test_replace_is_idempotent() {
        let store = DatasetStore::new(0.3, 0.5);
        store.replace(dataset("Yes."));
        let first: Vec<_> = store.snapshot().strict.search("internship");
        store.replace(dataset("Yes."));
        let second: Vec<_> = store.snapshot().strict.search("internship");
        assert_eq!(first, second);
    }
}
