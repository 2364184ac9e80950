//! Explicit keyword rules — the second resolution strategy.
//!
//! The rule set is data: an ordered table of {substring match, dataset lookup
//! + formatter} descriptors evaluated in a loop. A rule whose lookup finds no
//! backing entry is skipped and resolution falls through to the next rule and
//! then to fuzzy search — a matched keyword with no data never produces an
//! empty answer.

use askdesk_core::types::{Answer, AnswerKind, Dataset};

use crate::format;

pub struct KeywordRule {
    pub name: &'static str,
    /// Tested against the normalized, lowercased query.
    pub matches: fn(&str) -> bool,
    /// Looks up backing data and formats the reply; `None` skips the rule.
    pub answer: fn(&Dataset) -> Option<String>,
}

/// Ordered rule table. Order matters: JEE deliberately yields to NEET via its
/// own guard, and the author rule only fires after the general testimonial
/// rule had its chance.
pub const RULES: &[KeywordRule] = &[
    KeywordRule {
        name: "internship",
        matches: |q| q.contains("internship") || q.contains("intern"),
        answer: internship_answer,
    },
    KeywordRule {
        name: "mht-cet",
        matches: |q| q.contains("mht-cet") || q.contains("cet"),
        answer: |ds| exam_answer(ds, "mht-cet registration", "MHT-CET Registration", "mht-cet", None),
    },
    KeywordRule {
        name: "jee",
        matches: |q| q.contains("jee") && !q.contains("neet") && !q.contains("advanced"),
        answer: |ds| exam_answer(ds, "jee mains", "JEE Mains Session", "jee", Some("advanced")),
    },
    KeywordRule {
        name: "neet",
        matches: |q| q.contains("neet"),
        answer: |ds| {
            exam_answer(ds, "neet application deadline", "NEET Application Deadline", "neet", None)
        },
    },
    KeywordRule {
        name: "testimonials",
        matches: |q| q.contains("testimonial") || q.contains("feedback"),
        answer: testimonials_answer,
    },
    KeywordRule {
        name: "testimonial-author",
        matches: |q| q.contains("rahul patil"),
        answer: |ds| {
            ds.testimonials
                .iter()
                .find(|t| t.name.to_lowercase() == "rahul patil")
                .map(format::testimonial_line)
        },
    },
    KeywordRule {
        name: "contact",
        matches: |q| {
            ["contact", "phone", "email", "address", "website", "hours"]
                .iter()
                .any(|k| q.contains(k))
        },
        answer: |ds| (!ds.contact.is_empty()).then(|| format::contact_list(&ds.contact)),
    },
];

/// Evaluate the table in order; first rule with backing data wins.
pub fn apply(dataset: &Dataset, normalized_query: &str) -> Option<Answer> {
    for rule in RULES {
        if !(rule.matches)(normalized_query) {
            continue;
        }
        match (rule.answer)(dataset) {
            Some(text) => {
                tracing::debug!(rule = rule.name, "keyword rule matched");
                return Some(Answer::new(text, AnswerKind::Faq));
            }
            None => {
                tracing::debug!(rule = rule.name, "keyword matched but no backing data, falling through");
            }
        }
    }
    None
}

fn internship_answer(dataset: &Dataset) -> Option<String> {
    dataset
        .faqs
        .iter()
        .find(|faq| faq.question.to_lowercase().contains("internship"))
        .map(|faq| faq.answer.clone())
}

/// Shared shape of the exam rules: an optional deadline line followed by the
/// matching competitive course. The course is what makes the rule fire — a
/// deadline with no course still falls through, matching the feed's observed
/// behavior.
fn exam_answer(
    dataset: &Dataset,
    event_needle: &str,
    event_label: &str,
    course_needle: &str,
    course_exclude: Option<&str>,
) -> Option<String> {
    let mut response = String::new();
    if let Some(date) = dataset
        .important_dates
        .iter()
        .find(|d| d.event.to_lowercase().contains(event_needle))
    {
        response.push_str(&format!(
            "{} is scheduled for {}. {}\n",
            event_label, date.date, date.description
        ));
    }

    let course = dataset.courses.competitive.iter().find(|c| {
        let name = c.name.to_lowercase();
        name.contains(course_needle)
            && course_exclude.is_none_or(|excl| !name.contains(excl))
    })?;

    response.push_str(&format::course_details(course));
    Some(response)
}

fn testimonials_answer(dataset: &Dataset) -> Option<String> {
    if dataset.testimonials.is_empty() {
        return None;
    }
    let mut text = String::from("Testimonials:\n\n");
    for t in &dataset.testimonials {
        text.push_str(&format::testimonial_line(t));
        text.push_str("\n\n");
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdesk_core::types::{Course, Courses, Faq, ImportantDate, Testimonial};

    fn dataset() -> Dataset {
        Dataset {
            faqs: vec![Faq {
                question: "Do you offer internship opportunities?".into(),
                answer: "Yes, we offer summer internships for toppers.".into(),
            }],
            courses: Courses {
                competitive: vec![
                    Course {
                        name: "MHT-CET Crash Course".into(),
                        duration: "6 months".into(),
                        description: "Intensive prep.".into(),
                        highlights: vec!["Mock tests".into()],
                    },
                    Course {
                        name: "JEE Mains Program".into(),
                        duration: "1 year".into(),
                        description: "Full syllabus.".into(),
                        highlights: vec![],
                    },
                    Course {
                        name: "JEE Advanced Program".into(),
                        duration: "1 year".into(),
                        description: "For qualifiers.".into(),
                        highlights: vec![],
                    },
                ],
                supplementary: vec![],
            },
            important_dates: vec![ImportantDate {
                event: "MHT-CET Registration".into(),
                date: "March 15, 2026".into(),
                description: "Register early.".into(),
            }],
            contact: vec![],
            success_stats: None,
            testimonials: vec![Testimonial {
                name: "Rahul Patil".into(),
                feedback: "Great teachers.".into(),
            }],
        }
    }

    #[test]
    fn test_internship_rule_returns_faq_answer() {
        let answer = apply(&dataset(), "tell me about internship opportunities").unwrap();
        assert_eq!(answer.text, "Yes, we offer summer internships for toppers.");
        assert_eq!(answer.kind, AnswerKind::Faq);
    }

    #[test]
    fn test_cet_rule_combines_date_and_course() {
        let answer = apply(&dataset(), "when is mht-cet registration").unwrap();
        assert!(answer.text.starts_with("MHT-CET Registration is scheduled for March 15, 2026."));
        assert!(answer.text.contains("MHT-CET Crash Course (6 months): Intensive prep."));
        assert!(answer.text.contains("Highlights: Mock tests."));
    }

    #[test]
    fn test_jee_rule_skips_advanced_course() {
        let answer = apply(&dataset(), "jee coaching").unwrap();
        assert!(answer.text.contains("JEE Mains Program"));
        assert!(!answer.text.contains("Advanced"));
    }

    #[test]
    fn test_jee_rule_defers_to_neet() {
        // "jee" together with "neet" must not trigger the JEE rule; the NEET
        // rule has no backing data here so the whole table falls through.
        assert!(apply(&dataset(), "jee or neet which is better").is_none());
    }

    #[test]
    fn test_neet_rule_without_backing_data_falls_through() {
        assert!(apply(&dataset(), "neet application").is_none());
    }

    #[test]
    fn test_testimonials_rule_lists_all() {
        let answer = apply(&dataset(), "any feedback from students").unwrap();
        assert!(answer.text.starts_with("Testimonials:"));
        assert!(answer.text.contains("Rahul Patil: \"Great teachers.\""));
    }

    #[test]
    fn test_author_rule_single_testimonial() {
        let answer = apply(&dataset(), "what did rahul patil say").unwrap();
        assert_eq!(answer.text, "Rahul Patil: \"Great teachers.\"");
    }

    #[test]
    fn test_contact_rule_without_contacts_falls_through() {
        assert!(apply(&dataset(), "what is your phone number").is_none());
    }

    #[test]
    fn test_contact_rule_numbered_list() {
        let mut ds = dataset();
        ds.contact.push(askdesk_core::types::Contact {
            address: "Main Road".into(),
            phone: "12345".into(),
            email: "info@example.edu".into(),
            website: "example.edu".into(),
            hours: "9-5".into(),
        });
        let answer = apply(&ds, "how do i contact you").unwrap();
        assert!(answer.text.starts_with("Here are our contact details:"));
        assert!(answer.text.contains("Contact 1:\nAddress: Main Road\nPhone: 12345"));
    }

    #[test]
    fn test_no_keyword_no_answer() {
        assert!(apply(&dataset(), "what are your fees").is_none());
    }
}
