//! Column label cleaning.

/// Prefix the CSV loader gives to columns with an empty header cell.
pub const UNNAMED_PREFIX: &str = "Unnamed";

/// Literal replacements applied in order.
///
/// The minus sign U+2212 arrives as its UTF-8 bytes read through a single-byte
/// code page, either Latin-1 (`â` + two C1 controls) or Windows-1252 (`âˆ’`).
/// `?` is a lossy substitute for the same dash and is rewritten before the
/// `Nov-15` fix so that `Nov?15` is repaired in one pass.
const ARTIFACT_REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{e2}\u{88}\u{92}15", "-15"),
    ("\u{e2}\u{2c6}\u{2019}15", "-15"),
    ("\u{e2}\u{88}\u{92}", "-"),
    ("\u{e2}\u{2c6}\u{2019}", "-"),
    ("?", "-"),
    // The 11-15 age bracket, auto-formatted as a date by a spreadsheet.
    ("Nov-15", "11-15"),
];

/// Cleans a raw column label.
///
/// Line breaks and whitespace runs become a single space, known encoding
/// artifacts are repaired and the result is trimmed. Distinct raw labels may
/// clean to the same string; they are not merged.
pub fn clean_header(raw: &str) -> String {
    let mut value = raw.replace('\n', " ");
    for (artifact, replacement) in ARTIFACT_REPLACEMENTS {
        if value.contains(artifact) {
            value = value.replace(artifact, replacement);
        }
    }
    let mut parts = value.split_whitespace();
    let mut normalized = String::with_capacity(value.len());
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Returns true for loader placeholder labels such as `Unnamed: 4`.
pub fn is_unnamed(label: &str) -> bool {
    label.starts_with(UNNAMED_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_collapse() {
        assert_eq!(clean_header("Victims\nAge"), "Victims Age");
        assert_eq!(clean_header("Total\r\nOffenses"), "Total Offenses");
        assert_eq!(clean_header("  Crimes   Against\tPersons "), "Crimes Against Persons");
    }

    #[test]
    fn test_age_range_label() {
        assert_eq!(clean_header("Nov-15"), "11-15");
        assert_eq!(clean_header("Nov?15"), "11-15");
    }

    #[test]
    fn test_mojibake_minus() {
        assert_eq!(clean_header("Under\u{e2}\u{88}\u{92}10"), "Under-10");
        assert_eq!(clean_header("10\u{e2}\u{88}\u{92}15"), "10-15");
        assert_eq!(clean_header("10\u{e2}\u{2c6}\u{2019}15"), "10-15");
        assert_eq!(clean_header("20\u{e2}\u{2c6}\u{2019}24"), "20-24");
    }

    #[test]
    fn test_question_mark_becomes_dash() {
        assert_eq!(clean_header("16?19"), "16-19");
    }

    #[test]
    fn test_plain_labels_untouched() {
        assert_eq!(clean_header("Population1"), "Population1");
        assert_eq!(clean_header("Unnamed: 0"), "Unnamed: 0");
        assert_eq!(clean_header(""), "");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        for raw in ["Nov?15", "Victims\n\nAge ", "10\u{e2}\u{88}\u{92}15", "Kidnapping/ Abduction"] {
            let once = clean_header(raw);
            assert_eq!(clean_header(&once), once);
        }
    }

    #[test]
    fn test_is_unnamed() {
        assert!(is_unnamed("Unnamed: 3"));
        assert!(is_unnamed("Unnamed"));
        assert!(!is_unnamed("unnamed: 3"));
        assert!(!is_unnamed("State Unnamed"));
    }
}
