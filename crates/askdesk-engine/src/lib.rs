//! AskDesk resolution engine.
//!
//! Resolution is an ordered pipeline of strategies over one pinned dataset
//! snapshot: conversational short-circuits, then the keyword rule table, then
//! strict fuzzy search, then the generative fallback. First strategy to
//! produce an answer wins; every path terminates in an `Answer`, so `resolve`
//! is infallible by construction.

pub mod format;
pub mod reminder;
pub mod rules;
pub mod sentiment;
pub mod suggest;

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;

use askdesk_core::config::AskDeskConfig;
use askdesk_core::traits::AnswerProvider;
use askdesk_core::types::{Answer, AnswerKind, ChatHistory};
use askdesk_search::normalize::QueryNormalizer;
use askdesk_search::store::{DatasetStore, IndexSnapshot};

pub use sentiment::Sentiment;

/// Fixed reply when nothing — rules, fuzzy search, provider — produced one.
pub const APOLOGY: &str = "I'm sorry, I couldn't find any specific information \
    about that. Could you please rephrase your question?";

const ACKNOWLEDGMENT_REPLY: &str =
    "Great! Let me know if there's anything else I can help you with.";

const THANKS_REPLY: &str = "You're very welcome! Let me know if there's \
    anything else I can help with! 😊";

static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(hi|hii|hiii|hiiii|hello|hey)\b").unwrap()
});
static ACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(ok|done|got it|alright|cool|nice)\b").unwrap()
});
static THANKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bthank\b").unwrap());

/// Topics the generative fallback may answer. Anything else gets a fixed
/// redirect instead of an AI call.
const EDUCATION_KEYWORDS: &[&str] = &[
    "course", "exam", "study", "learn", "education", "college", "school",
    "student", "teacher", "class", "admission", "fee", "scholarship", "jee",
    "neet", "cet", "coaching", "academy", "institute", "syllabus", "batch",
    "faculty", "career", "degree", "subject", "marks", "result", "test",
];

pub struct Engine {
    store: Arc<DatasetStore>,
    provider: Option<Box<dyn AnswerProvider>>,
    normalizer: QueryNormalizer,
    institute_name: String,
    institute_description: String,
    max_results: usize,
    max_suggestions: usize,
    ai_timeout: Duration,
}

impl Engine {
    pub fn new(
        config: &AskDeskConfig,
        store: Arc<DatasetStore>,
        provider: Option<Box<dyn AnswerProvider>>,
    ) -> Self {
        Self {
            store,
            provider,
            normalizer: QueryNormalizer::new(&config.synonyms),
            institute_name: config.institute_name.clone(),
            institute_description: config.institute_description.clone(),
            max_results: config.search.max_results,
            max_suggestions: config.search.max_suggestions,
            ai_timeout: Duration::from_secs(config.llm.timeout_secs),
        }
    }

    /// Resolve one user query. Never fails: unresolvable queries come back as
    /// the apology with `AnswerKind::Error`, which the caller may log as an
    /// unresolved question.
    pub async fn resolve(&self, query: &str, history: &ChatHistory) -> Answer {
        let snapshot = self.store.snapshot();
        let raw = query.trim().to_lowercase();
        let normalized = self.normalizer.normalize(query);
        tracing::debug!(
            query = %raw,
            normalized = %normalized,
            turn = history.messages.len(),
            "resolving query"
        );

        if let Some(answer) = self.short_circuit(&raw, &normalized) {
            return answer;
        }
        if let Some(answer) = rules::apply(&snapshot.dataset, &normalized) {
            return answer;
        }
        if let Some(answer) = self.fuzzy_answer(&snapshot, &normalized) {
            return answer;
        }
        self.ai_fallback(&snapshot, query).await
    }

    /// Greetings, acknowledgments, and thanks never reach the dataset.
    fn short_circuit(&self, raw: &str, normalized: &str) -> Option<Answer> {
        if GREETING_RE.is_match(raw) {
            return Some(Answer::new(
                format!(
                    "Hey there! 👋 I'm here and ready to help you with everything about {}!",
                    self.institute_name
                ),
                AnswerKind::Greeting,
            ));
        }
        if ACK_RE.is_match(raw) {
            return Some(Answer::new(ACKNOWLEDGMENT_REPLY, AnswerKind::Acknowledgment));
        }
        if THANKS_RE.is_match(normalized) {
            return Some(Answer::new(THANKS_REPLY, AnswerKind::Thanks));
        }
        None
    }

    /// Strict fuzzy search, top hits formatted per record kind.
    fn fuzzy_answer(&self, snapshot: &IndexSnapshot, normalized: &str) -> Option<Answer> {
        let hits = snapshot.strict.search(normalized);
        let parts: Vec<String> = hits
            .iter()
            .take(self.max_results)
            .filter_map(|hit| {
                format::format_record(&snapshot.records[hit.index], &self.institute_name)
            })
            .collect();
        if parts.is_empty() {
            return None;
        }
        tracing::debug!(hits = parts.len(), "fuzzy search matched");
        let text = format::append_emoji(parts.join("\n\n"));
        Some(Answer::new(text, AnswerKind::Faq))
    }

    async fn ai_fallback(&self, snapshot: &IndexSnapshot, query: &str) -> Answer {
        let Some(provider) = self.provider.as_deref() else {
            return Answer::new(APOLOGY, AnswerKind::Error);
        };

        if !is_education_related(query) {
            return Answer::new(
                format!(
                    "I can only answer questions related to {} and education. \
                     Could you please ask something about our courses, \
                     admissions, or educational programs?",
                    self.institute_name
                ),
                AnswerKind::Ai,
            );
        }

        let context = self.context_slice(snapshot, query);
        match tokio::time::timeout(self.ai_timeout, provider.generate(query, &context)).await {
            Ok(Ok(reply)) if !reply.trim().is_empty() => {
                tracing::debug!(provider = provider.name(), "generative fallback answered");
                Answer::new(reply, AnswerKind::Ai)
            }
            Ok(Ok(_)) => {
                tracing::warn!(provider = provider.name(), "provider returned empty reply");
                Answer::new(APOLOGY, AnswerKind::Error)
            }
            Ok(Err(e)) => {
                tracing::warn!(provider = provider.name(), error = %e, "provider failed");
                Answer::new(APOLOGY, AnswerKind::Error)
            }
            Err(_) => {
                tracing::warn!(provider = provider.name(), "provider timed out");
                Answer::new(APOLOGY, AnswerKind::Error)
            }
        }
    }

    /// FAQ entries sharing a significant word with the query, capped so the
    /// prompt stays small. Falls back to the one-line institute description.
    fn context_slice(&self, snapshot: &IndexSnapshot, query: &str) -> String {
        let lowered = query.to_lowercase();
        let words: Vec<&str> = lowered
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .collect();

        let mut context = String::new();
        for faq in &snapshot.dataset.faqs {
            let haystack = format!("{} {}", faq.question, faq.answer).to_lowercase();
            if words.iter().any(|w| haystack.contains(w)) {
                context.push_str(&format!("Q: {}\nA: {}\n\n", faq.question, faq.answer));
                if context.len() > 1500 {
                    break;
                }
            }
        }

        if context.is_empty() {
            self.institute_description.clone()
        } else {
            context
        }
    }

    /// Suggested follow-up questions for the current query, from the lenient
    /// index topped up with curated defaults.
    pub fn suggest(&self, query: &str) -> Vec<String> {
        let snapshot = self.store.snapshot();
        suggest::suggest(&snapshot, query, self.max_suggestions)
    }

    /// Reminder line for the next important date within 30 days, if any.
    pub fn date_reminder(&self) -> Option<String> {
        let snapshot = self.store.snapshot();
        reminder::next_reminder(&snapshot.dataset, chrono::Local::now().date_naive())
    }
}

fn is_education_related(query: &str) -> bool {
    let lowered = query.to_lowercase();
    EDUCATION_KEYWORDS.iter().any(|k| lowered.contains(k))
}
