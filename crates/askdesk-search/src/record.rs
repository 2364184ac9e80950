//! Searchable records: the dataset flattened for matching.
//!
//! One record per dataset entry, except contacts and success stats which each
//! collapse into a single combined record. `search_text` exists purely for
//! matching; the payload is what a hit hands back to the formatter.

use askdesk_core::types::{Contact, Course, Dataset, Faq, ImportantDate, SuccessStats};

/// Tag for a searchable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Faq,
    CompetitiveCourse,
    SupplementaryCourse,
    Date,
    Contact,
    SuccessStats,
}

/// The original entry behind a record, as a tagged union rather than the
/// duck-typed shape checks the data feed's consumers historically used.
#[derive(Debug, Clone)]
pub enum RecordPayload {
    Faq(Faq),
    Course(Course),
    Date(ImportantDate),
    Contact(Vec<Contact>),
    SuccessStats(SuccessStats),
}

/// A derived, transient projection of one dataset entry.
#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub kind: RecordKind,
    pub search_text: String,
    pub payload: RecordPayload,
}

/// Flatten a dataset into records. Order is deterministic: FAQs, competitive
/// courses, supplementary courses, important dates, one combined contact
/// record, one combined success-stats record. Fuzzy ties preserve this order.
pub fn flatten(dataset: &Dataset) -> Vec<SearchRecord> {
    let mut records = Vec::new();

    for faq in &dataset.faqs {
        records.push(SearchRecord {
            kind: RecordKind::Faq,
            search_text: format!("{} {}", faq.question, faq.answer),
            payload: RecordPayload::Faq(faq.clone()),
        });
    }
    for course in &dataset.courses.competitive {
        records.push(SearchRecord {
            kind: RecordKind::CompetitiveCourse,
            search_text: format!("{} {}", course.name, course.description),
            payload: RecordPayload::Course(course.clone()),
        });
    }
    for course in &dataset.courses.supplementary {
        records.push(SearchRecord {
            kind: RecordKind::SupplementaryCourse,
            search_text: format!("{} {}", course.name, course.description),
            payload: RecordPayload::Course(course.clone()),
        });
    }
    for date in &dataset.important_dates {
        records.push(SearchRecord {
            kind: RecordKind::Date,
            search_text: format!("{} {} {}", date.event, date.date, date.description),
            payload: RecordPayload::Date(date.clone()),
        });
    }
    if !dataset.contact.is_empty() {
        records.push(SearchRecord {
            kind: RecordKind::Contact,
            search_text: format!(
                "contact address phone email website hours {}",
                serde_json::to_string(&dataset.contact).unwrap_or_default()
            ),
            payload: RecordPayload::Contact(dataset.contact.clone()),
        });
    }
    if let Some(stats) = &dataset.success_stats {
        records.push(SearchRecord {
            kind: RecordKind::SuccessStats,
            search_text: format!(
                "success statistics results achievements {}",
                serde_json::to_string(stats).unwrap_or_default()
            ),
            payload: RecordPayload::SuccessStats(stats.clone()),
        });
    }

    records
}
