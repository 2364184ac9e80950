//! Upcoming important-date reminders.
//!
//! Surfaces the next dataset event falling strictly within the next 30 days.
//! Date strings come from the feed in a handful of human formats; entries
//! that parse in none of them are skipped rather than erroring.

use chrono::NaiveDate;

use askdesk_core::types::Dataset;

const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%d %B %Y"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok())
}

/// The next event after `today` and within 30 days, formatted as a reminder
/// line. `None` when nothing is coming up.
pub fn next_reminder(dataset: &Dataset, today: NaiveDate) -> Option<String> {
    let mut upcoming: Vec<(NaiveDate, &askdesk_core::types::ImportantDate)> = dataset
        .important_dates
        .iter()
        .filter_map(|entry| {
            let date = parse_date(&entry.date)?;
            let diff = (date - today).num_days();
            (diff > 0 && diff < 30).then_some((date, entry))
        })
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);

    upcoming.first().map(|(_, entry)| {
        format!(
            "Reminder: {} is on {}. {}",
            entry.event, entry.date, entry.description
        )
    })
}
