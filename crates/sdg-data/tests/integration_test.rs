//! Integration tests for sdg-data crate.

use proptest::prelude::*;
use sdg_common::test_utils::fixtures;
use sdg_common::SdgError;
use sdg_config::DatasetConfig;
use sdg_data::{filter, load_table, normalize, RawRow, RawTable, Selection};
use std::path::PathBuf;

fn dataset_at(path: impl Into<PathBuf>) -> DatasetConfig {
    DatasetConfig {
        path: path.into(),
        ..DatasetConfig::default()
    }
}

#[test]
fn test_load_sample_dataset() {
    let file = fixtures::write_temp_csv(fixtures::SAMPLE_CSV);
    let table = load_table(&dataset_at(file.path())).unwrap();

    assert_eq!(table.len(), 10);
    assert_eq!(table.indicators(), vec!["NY_GDP_PCAP", "SL_TLF_UEM"]);
    // "n/a" is malformed, the blank cell is simply missing
    assert_eq!(table.malformed_values(), 1);

    let view = filter(&table, &Selection::new("SL_TLF_UEM"));
    assert_eq!(view.len(), fixtures::SAMPLE_UNEMPLOYMENT_ROWS);

    let entities: Vec<&str> = table
        .entities("SL_TLF_UEM")
        .into_iter()
        .map(|e| e.as_str())
        .collect();
    assert_eq!(entities, vec!["fiji", "samoa", "tonga"]);
}

#[test]
fn test_missing_file_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(&dataset_at(dir.path().join("absent.csv"))).unwrap_err();

    assert!(err.is_data_unavailable());
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_missing_value_column_is_fatal() {
    let file = fixtures::write_temp_csv(
        "INDICATOR,Pacific Island Countries and territories,TIME_PERIOD\nIND_A,Fiji,2019\n",
    );
    let err = load_table(&dataset_at(file.path())).unwrap_err();

    assert!(matches!(err, SdgError::MissingColumn { ref column } if column == "OBS_VALUE"));
}

#[test]
fn test_custom_column_names() {
    let file = fixtures::write_temp_csv("code,country,year,value\nIND_A,Fiji,2019,4\n");
    let mut dataset = dataset_at(file.path());
    dataset.columns.indicator = "code".to_string();
    dataset.columns.entity = "country".to_string();
    dataset.columns.time_period = "year".to_string();
    dataset.columns.value = "value".to_string();

    let table = load_table(&dataset).unwrap();
    assert_eq!(table.rows()[0].value, Some(4.0));
}

#[test]
fn test_period_filter_uses_chronological_labels() {
    let csv = fixtures::csv_with_rows(&[
        ("IND_A", "Fiji", "2019.0", "1"),
        ("IND_A", "Fiji", "2020.0", "2"),
    ]);
    let file = fixtures::write_temp_csv(&csv);
    let table = load_table(&dataset_at(file.path())).unwrap();

    let view = filter(&table, &Selection::new("IND_A").with_periods(["2020"]));
    assert_eq!(view.len(), 1);
    assert_eq!(view.rows()[0].value, 2.0);
}

fn arb_rows() -> impl Strategy<Value = Vec<RawRow>> {
    let entity = prop::sample::select(vec!["Fiji", "fiji ", " TONGA", "Samoa", "samoa"]);
    let indicator = prop::sample::select(vec!["IND_A", "IND_B"]);
    let period = prop::sample::select(vec!["2018", "2019", "2020.0"]);
    let value = prop_oneof![
        (-1000i32..1000).prop_map(|v| v.to_string()),
        Just(String::new()),
        Just("n/a".to_string()),
    ];
    prop::collection::vec(
        (indicator, entity, period, value)
            .prop_map(|(i, e, p, v)| RawRow::new(i, e, p, v)),
        0..40,
    )
}

proptest! {
    #[test]
    fn prop_view_rows_always_match_selection(rows in arb_rows()) {
        let table = normalize(RawTable::from_rows(rows));
        let selection = Selection::new("IND_A").with_entities(["FIJI", "samoa"]);
        let view = filter(&table, &selection);

        for row in view.iter() {
            prop_assert!(row.entity.as_str() == "fiji" || row.entity.as_str() == "samoa");
        }
        let expected = table
            .rows()
            .iter()
            .filter(|row| selection.matches(row))
            .count();
        prop_assert_eq!(view.len(), expected);
    }
}
