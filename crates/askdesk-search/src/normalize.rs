//! Query normalization: lowercase plus domain synonym rewriting.

use regex::Regex;
use std::collections::BTreeMap;

/// Rewrites whole-word synonym occurrences in a lowercased query.
///
/// Replacement is a single left-to-right pass per table entry, in table
/// iteration order. Chained synonyms (a value that matches a later key) are
/// not re-normalized — no fixed-point iteration, matching the observed
/// behavior of the feed this engine was built for.
pub struct QueryNormalizer {
    rules: Vec<(Regex, String)>,
}

impl QueryNormalizer {
    /// Compile the synonym table. Malformed keys are a programmer error and
    /// fail here, at startup, not per-query.
    pub fn new(synonyms: &BTreeMap<String, String>) -> Self {
        let rules = synonyms
            .iter()
            .map(|(key, value)| {
                let pattern = format!(r"\b{}\b", regex::escape(key));
                // Keys come from config and are escaped; compilation cannot
                // fail on user queries, only on startup with a broken table.
                let re = Regex::new(&pattern)
                    .unwrap_or_else(|e| panic!("invalid synonym key {key:?}: {e}"));
                (re, value.clone())
            })
            .collect();
        Self { rules }
    }

    /// Lowercase `query` and apply the synonym table.
    pub fn normalize(&self, query: &str) -> String {
        let mut processed = query.to_lowercase();
        for (re, replacement) in &self.rules {
            processed = re.replace_all(&processed, replacement.as_str()).into_owned();
        }
        processed
    }
}
