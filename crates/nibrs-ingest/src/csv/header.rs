//! Header row handling.

use std::collections::HashMap;

use csv::StringRecord;

const UTF8_BOM: char = '\u{feff}';

/// Placeholder label for an empty header cell at `position`.
pub(super) fn placeholder_label(position: usize) -> String {
    format!("Unnamed: {position}")
}

/// Reads the header labels from the first record.
///
/// Labels are kept as written apart from a leading byte order mark; any
/// cleaning happens in the normalizer. Empty cells get a positional
/// placeholder so every column has a label, and repeated labels are made
/// unique with [`deduplicate_labels`].
pub(super) fn read_headers(record: &StringRecord) -> Vec<String> {
    let labels = record
        .iter()
        .enumerate()
        .map(|(position, value)| {
            let value = if position == 0 {
                value.trim_start_matches(UTF8_BOM)
            } else {
                value
            };
            if value.is_empty() {
                placeholder_label(position)
            } else {
                value.to_string()
            }
        })
        .collect();
    deduplicate_labels(labels)
}

/// Suffixes repeated labels with `.1`, `.2`, ... in order of appearance.
///
/// A suffixed label that is itself taken gets suffixed again, so
/// `Total, Total, Total.1` becomes `Total, Total.1, Total.1.1`. Only exact
/// repeats are renamed; labels that differ only in whitespace stay apart.
pub(super) fn deduplicate_labels(labels: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(labels.len());
    labels
        .into_iter()
        .map(|mut label| {
            let mut count = counts.get(&label).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(label.clone(), count + 1);
                label = format!("{label}.{count}");
                count = counts.get(&label).copied().unwrap_or(0);
            }
            counts.insert(label.clone(), count + 1);
            label
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_empty_cells_get_placeholders() {
        let record = StringRecord::from(vec!["", "State", "", "Total"]);
        assert_eq!(
            read_headers(&record),
            vec!["Unnamed: 0", "State", "Unnamed: 2", "Total"]
        );
    }

    #[test]
    fn test_whitespace_cells_are_labels() {
        let record = StringRecord::from(vec!["State", " ", "Total"]);
        assert_eq!(read_headers(&record), vec!["State", " ", "Total"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let record = StringRecord::from(vec!["\u{feff}Index", "State"]);
        assert_eq!(read_headers(&record), vec!["Index", "State"]);
    }

    #[test]
    fn test_labels_kept_verbatim() {
        let record = StringRecord::from(vec!["Victims\nAge", " Total "]);
        assert_eq!(read_headers(&record), vec!["Victims\nAge", " Total "]);
    }

    #[test]
    fn test_repeated_labels_are_suffixed() {
        let record = StringRecord::from(vec!["State", "Total", "Total", "Total"]);
        assert_eq!(
            read_headers(&record),
            vec!["State", "Total", "Total.1", "Total.2"]
        );
    }

    #[test]
    fn test_suffix_collisions() {
        assert_eq!(
            deduplicate_labels(labels(&["Total", "Total", "Total.1"])),
            labels(&["Total", "Total.1", "Total.1.1"])
        );
        assert_eq!(
            deduplicate_labels(labels(&["Total.1", "Total", "Total"])),
            labels(&["Total.1", "Total", "Total.1.1"])
        );
    }

    #[test]
    fn test_near_duplicates_untouched() {
        assert_eq!(
            deduplicate_labels(labels(&["Total", "Total ", "Total\n"])),
            labels(&["Total", "Total ", "Total\n"])
        );
    }
}
