//! Answer formatting per record kind.

use askdesk_core::types::{Contact, Course, SuccessStats, Testimonial};
use askdesk_search::record::{RecordPayload, SearchRecord};

/// Emoji the widget already considers "friendly" — one is appended to a fuzzy
/// answer only when none of these are present.
const FRIENDLY_EMOJI: &[&str] = &["😊", "👋", "🙌", "📚"];

/// Course details: name, duration, description, comma-joined highlights.
pub fn course_details(course: &Course) -> String {
    let mut text = format!(
        "{} ({}): {}",
        course.name, course.duration, course.description
    );
    if !course.highlights.is_empty() {
        text.push_str(&format!(" Highlights: {}.", course.highlights.join(", ")));
    }
    text
}

/// Numbered list of every contact record.
pub fn contact_list(contacts: &[Contact]) -> String {
    let mut text = String::from("Here are our contact details:\n\n");
    for (i, contact) in contacts.iter().enumerate() {
        text.push_str(&format!(
            "Contact {}:\nAddress: {}\nPhone: {}\nEmail: {}\nWebsite: {}\nWorking Hours: {}\n\n",
            i + 1,
            contact.address,
            contact.phone,
            contact.email,
            contact.website,
            contact.hours
        ));
    }
    text
}

pub fn testimonial_line(t: &Testimonial) -> String {
    format!("{}: \"{}\"", t.name, t.feedback)
}

pub fn success_stats_line(stats: &SuccessStats) -> String {
    let breakdown = stats
        .stats
        .iter()
        .map(|s| format!("{}: {} ({} toppers)", s.exam, s.success, s.toppers))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} Details: {}", stats.overview, breakdown)
}

/// Format one fuzzy hit for the final answer. `None` for payloads with
/// nothing to say (e.g. an empty contact list).
pub fn format_record(record: &SearchRecord, institute: &str) -> Option<String> {
    match &record.payload {
        RecordPayload::Faq(faq) => Some(faq.answer.clone()),
        RecordPayload::Course(course) => Some(course_details(course)),
        RecordPayload::Date(date) => Some(format!(
            "{} is scheduled for {}. {}",
            date.event, date.date, date.description
        )),
        RecordPayload::Contact(contacts) => contacts.first().map(|c| {
            format!(
                "Contact {} at {} or visit us at {}.",
                institute, c.phone, c.address
            )
        }),
        RecordPayload::SuccessStats(stats) => Some(success_stats_line(stats)),
    }
}

/// Append a friendly emoji unless one is already present.
pub fn append_emoji(mut text: String) -> String {
    if !FRIENDLY_EMOJI.iter().any(|e| text.contains(e)) {
        text.push_str(" 😊");
    }
    text
}
