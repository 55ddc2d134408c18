//! Property tests for table normalization.

use nibrs_model::{Column, RawTable, RawValue, RowIndex};
use nibrs_normalize::{UNNAMED_PREFIX, cleaned_cell, match_value, normalize_table};
use proptest::prelude::*;

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("State".to_string()),
        Just("ID".to_string()),
        Just("Row".to_string()),
        Just("Nov-15".to_string()),
        Just("Victims\nAge".to_string()),
        Just("Unnamed: 1".to_string()),
        Just(" Unnamed: 7".to_string()),
        "[A-Za-z #?\n]{0,12}",
    ]
}

fn cell_strategy() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        Just(RawValue::Null),
        (-1000i64..1000).prop_map(|v| RawValue::from(v.to_string().as_str())),
        (-1000i64..1000).prop_map(|v| RawValue::Number(v as f64)),
        "[0-9]{1,3}(,[0-9]{3})?(\\.[0-9]{1,2})?".prop_map(|v| RawValue::from(v.as_str())),
        "[A-Za-z ,.-]{1,8}".prop_map(|v| RawValue::from(v.as_str())),
    ]
}

fn raw_table_strategy() -> impl Strategy<Value = RawTable> {
    (1usize..5, 0usize..8).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec(header_strategy(), width),
            prop::collection::vec(prop::collection::vec(cell_strategy(), width), height),
        )
            .prop_map(|(headers, rows)| RawTable::new(headers, rows))
    })
}

fn text_cell_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[A-Za-z ,.-]{1,8}".prop_map(Some),
        "[0-9]{1,3}(,[0-9]{3})?".prop_map(Some),
        "[a-z]{0,2}[0-9]{1,2}".prop_map(Some),
    ]
}

/// `-?digits(.digits)?`, written out by hand.
fn has_number_shape(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());
    digits(whole) && fraction.is_none_or(digits)
}

proptest! {
    #[test]
    fn no_placeholder_labels_survive(raw in raw_table_strategy()) {
        let table = normalize_table(&raw);
        for label in table.labels() {
            prop_assert!(!label.starts_with(UNNAMED_PREFIX));
        }
    }

    #[test]
    fn numeric_columns_hold_only_finite_numbers(raw in raw_table_strategy()) {
        let table = normalize_table(&raw);
        for (_, column) in table.columns() {
            if let Column::Numeric(values) = column {
                prop_assert!(values.iter().flatten().all(|v| v.is_finite()));
            }
            prop_assert_eq!(column.len(), table.row_count());
        }
    }

    #[test]
    fn rows_are_never_dropped(raw in raw_table_strategy()) {
        let table = normalize_table(&raw);
        if raw.is_empty() {
            prop_assert_eq!(table.row_count(), 0);
            prop_assert_eq!(table.column_count(), 0);
        } else {
            prop_assert_eq!(table.row_count(), raw.row_count());
        }
    }

    #[test]
    fn sequential_index_is_one_to_n(raw in raw_table_strategy()) {
        let table = normalize_table(&raw);
        if let RowIndex::Sequential { len } = table.index() {
            let expected: Vec<i64> = (1..=*len as i64).collect();
            prop_assert_eq!(table.index().labels(), expected);
        }
    }

    #[test]
    fn normalizing_twice_changes_nothing(raw in raw_table_strategy()) {
        let once = normalize_table(&raw);
        let twice = normalize_table(&RawTable::from(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn mostly_non_numeric_text_is_kept_verbatim(
        cells in prop::collection::vec(text_cell_strategy(), 1..10)
    ) {
        let raw = RawTable::new(
            vec!["Notes".to_string()],
            cells
                .iter()
                .map(|cell| vec![cell.as_deref().map_or(RawValue::Null, RawValue::from)])
                .collect(),
        );
        let non_empty: Vec<&str> = cells
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|cell| !cleaned_cell(cell).is_empty())
            .collect();
        let matching = non_empty
            .iter()
            .filter(|cell| has_number_shape(&match_value(cell)))
            .count();
        prop_assume!(!non_empty.is_empty() && matching * 2 < non_empty.len());

        let table = normalize_table(&raw);
        prop_assert_eq!(table.column("Notes"), Some(&Column::Text(cells)));
    }
}
