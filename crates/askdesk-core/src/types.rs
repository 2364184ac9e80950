//! Dataset model, answers, and conversation history.
//!
//! The dataset mirrors the institute's content feed. Two shapes exist in the
//! wild: a rich object (`faqs`, `courses`, `importantDates`, `contact`,
//! `successStats`, `testimonials`) and a flat list of FAQ entries. Both
//! deserialize into [`Dataset`]; the flat shape leaves every other collection
//! empty.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A coaching course (competitive or supplementary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Course catalog, split the way the feed splits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Courses {
    #[serde(default)]
    pub competitive: Vec<Course>,
    #[serde(default)]
    pub supplementary: Vec<Course>,
}

/// A dated event (registration deadline, exam session, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantDate {
    pub event: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// A contact card for one branch/office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub hours: String,
}

/// Aggregate results overview plus a per-exam breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessStats {
    pub overview: String,
    #[serde(default)]
    pub stats: Vec<ExamStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamStat {
    pub exam: String,
    pub success: String,
    pub toppers: String,
}

/// A student testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub feedback: String,
}

/// The authoritative content snapshot. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "DatasetShape", rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub courses: Courses,
    #[serde(default)]
    pub important_dates: Vec<ImportantDate>,
    #[serde(default)]
    pub contact: Vec<Contact>,
    #[serde(default)]
    pub success_stats: Option<SuccessStats>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

impl Dataset {
    /// True when the feed has not delivered any searchable content yet.
    /// The index builder skips rebuilds for such snapshots.
    pub fn is_structurally_empty(&self) -> bool {
        self.faqs.is_empty()
            && self.courses.competitive.is_empty()
            && self.courses.supplementary.is_empty()
    }
}

/// The two accepted wire shapes for a dataset.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetShape {
    Flat(Vec<Faq>),
    Rich(RichDataset),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RichDataset {
    #[serde(default)]
    faqs: Vec<Faq>,
    #[serde(default)]
    courses: Courses,
    #[serde(default)]
    important_dates: Vec<ImportantDate>,
    #[serde(default)]
    contact: Vec<Contact>,
    #[serde(default)]
    success_stats: Option<SuccessStats>,
    #[serde(default)]
    testimonials: Vec<Testimonial>,
}

impl From<DatasetShape> for Dataset {
    fn from(shape: DatasetShape) -> Self {
        match shape {
            DatasetShape::Flat(faqs) => Dataset {
                faqs,
                ..Dataset::default()
            },
            DatasetShape::Rich(rich) => Dataset {
                faqs: rich.faqs,
                courses: rich.courses,
                important_dates: rich.important_dates,
                contact: rich.contact,
                success_stats: rich.success_stats,
                testimonials: rich.testimonials,
            },
        }
    }
}

/// Classification of a resolved answer. Callers use this to decide side
/// effects — `Error` answers are candidates for the unresolved-question sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Greeting,
    Acknowledgment,
    Thanks,
    Faq,
    Ai,
    Error,
}

/// A resolved answer: the reply text plus its kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub kind: AnswerKind,
}

impl Answer {
    pub fn new(text: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Whether the caller should report this exchange as unresolved.
    pub fn is_unresolved(&self) -> bool {
        self.kind == AnswerKind::Error
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackVerdict {
    Positive,
    Negative,
}

/// One exchanged message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Conversation state owned by the caller. The engine reads it as context
/// and never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub feedback: HashMap<String, FeedbackVerdict>,
}

/// Fresh message identifier.
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_dataset_deserializes() {
        let json = r#"{
            "faqs": [{"question": "Do you offer internships?", "answer": "Yes."}],
            "courses": {
                "competitive": [{"name": "MHT-CET Crash Course", "duration": "6 months",
                                 "description": "Intensive prep.", "highlights": ["Mock tests"]}],
                "supplementary": []
            },
            "importantDates": [{"event": "MHT-CET Registration", "date": "March 15, 2026",
                                "description": "Register early."}],
            "contact": [{"address": "Main Road", "phone": "12345",
                         "email": "info@example.edu", "website": "example.edu", "hours": "9-5"}],
            "successStats": {"overview": "95% success.", "stats": [
                {"exam": "JEE", "success": "92%", "toppers": "12"}]},
            "testimonials": [{"name": "Rahul Patil", "feedback": "Great teachers."}]
        }"#;

        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.faqs.len(), 1);
        assert_eq!(ds.courses.competitive[0].name, "MHT-CET Crash Course");
        assert_eq!(ds.important_dates[0].event, "MHT-CET Registration");
        assert_eq!(ds.contact[0].phone, "12345");
        assert_eq!(ds.testimonials[0].name, "Rahul Patil");
        assert!(!ds.is_structurally_empty());
    }

    #[test]
    fn test_flat_dataset_deserializes() {
        let json = r#"[
            {"question": "Where are you located?", "answer": "Gadhinglaj."},
            {"question": "Do you teach physics?", "answer": "Yes."}
        ]"#;

        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.faqs.len(), 2);
        assert!(ds.courses.competitive.is_empty());
        assert!(ds.contact.is_empty());
    }

    #[test]
    fn test_empty_dataset_is_structurally_empty() {
        let ds = Dataset::default();
        assert!(ds.is_structurally_empty());
    }

    #[test]
    fn test_error_answer_is_unresolved() {
        assert!(Answer::new("sorry", AnswerKind::Error).is_unresolved());
        assert!(!Answer::new("hello", AnswerKind::Greeting).is_unresolved());
    }
}
