//! Compiled patterns shared by the extractor and the due-date resolver.
//!
//! Both sides must recognise exactly the same date fragments, otherwise an event
//! accepted at upload time could silently vanish from every dashboard view.
//! Word boundaries are ASCII-only, so "Examé" still counts as "Exam".

use crate::model::item::EventType;
use regex::Regex;
use std::sync::OnceLock;

/// Month name or abbreviation, optional period, whitespace, day 1-31.
/// Group 1 is the month word, group 2 the day.
pub fn month_day() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?-u:\b)(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+(0?[1-9]|[12][0-9]|3[01])(?-u:\b)",
        )
        .unwrap()
    })
}

/// `M/D`, `M-D` or `M.D` with month 1-12 and day 1-31.
/// Group 1 is the month, group 2 the day.
pub fn numeric_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?-u:\b)(0?[1-9]|1[0-2])[/\-.](0?[1-9]|[12][0-9]|3[01])(?-u:\b)").unwrap()
    })
}

/// Leading "due"/"deadline" marker with an optional colon or dash.
pub fn due_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?-u:\b)(due|deadline)(?-u:\b)\s*[:\-]?\s*").unwrap())
}

/// Keyword categories in precedence order. The first match decides the type.
pub fn categories() -> &'static [(EventType, Regex)] {
    static TABLE: OnceLock<Vec<(EventType, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            (EventType::Exam, r"(?i)(?-u:\b)(exam|midterm|final)(?-u:\b)"),
            (EventType::Quiz, r"(?i)(?-u:\b)(quiz)(?-u:\b)"),
            (
                EventType::Assignment,
                r"(?i)(?-u:\b)(homework|hw|assignment|paper|essay)(?-u:\b)",
            ),
            (
                EventType::Project,
                r"(?i)(?-u:\b)(project|presentation|proposal)(?-u:\b)",
            ),
            (EventType::Reading, r"(?i)(?-u:\b)(reading|chapter|ch\.)(?-u:\b)"),
        ]
        .into_iter()
        .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
        .collect()
    })
}

/// Zero-based month index for a month word as matched by [`month_day`].
pub fn month_index(word: &str) -> Option<u32> {
    let key = word.trim_end_matches('.').to_lowercase();
    let idx = match key.as_str() {
        "jan" | "january" => 0,
        "feb" | "february" => 1,
        "mar" | "march" => 2,
        "apr" | "april" => 3,
        "may" => 4,
        "jun" | "june" => 5,
        "jul" | "july" => 6,
        "aug" | "august" => 7,
        "sep" | "sept" | "september" => 8,
        "oct" | "october" => 9,
        "nov" | "november" => 10,
        "dec" | "december" => 11,
        _ => return None,
    };
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_accepts_abbreviations_and_periods() {
        let caps = month_day().captures("Paper due Sept. 14 at noon").unwrap();
        assert_eq!(&caps[0], "Sept. 14");
        assert_eq!(&caps[1], "Sept");
        assert_eq!(&caps[2], "14");

        assert!(month_day().is_match("DECEMBER 1"));
        assert!(!month_day().is_match("Mayday 3"));
        assert!(!month_day().is_match("Oct 32"));
    }

    #[test]
    fn numeric_date_bounds() {
        assert_eq!(numeric_date().find("exam 12/15").unwrap().as_str(), "12/15");
        assert_eq!(numeric_date().find("quiz 3-07").unwrap().as_str(), "3-07");
        assert_eq!(numeric_date().find("hw 4.1").unwrap().as_str(), "4.1");
        assert!(numeric_date().find("13/40").is_none());
        assert!(numeric_date().find("0/5").is_none());
    }

    #[test]
    fn month_lookup_covers_aliases() {
        assert_eq!(month_index("Jan"), Some(0));
        assert_eq!(month_index("sept"), Some(8));
        assert_eq!(month_index("SEPTEMBER"), Some(8));
        assert_eq!(month_index("Dec."), Some(11));
        assert_eq!(month_index("Smarch"), None);
    }

    #[test]
    fn category_order_is_fixed() {
        let order: Vec<EventType> = categories().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            order,
            vec![
                EventType::Exam,
                EventType::Quiz,
                EventType::Assignment,
                EventType::Project,
                EventType::Reading
            ]
        );
    }
}
