//! Integration tests for sdg-graphs crate.

use sdg_common::test_utils::{assert_approx_eq, fixtures};
use sdg_config::{ColumnsConfig, GraphsConfig, PipelineConfig};
use sdg_data::{normalize, read_raw_table, Entity, Period, Selection, Table};
use sdg_graphs::{compute, render_bundle, CachedPipeline, PipelineOutcome};
use std::sync::Arc;

fn table_from(csv: &str) -> Table {
    normalize(read_raw_table(csv.as_bytes(), &ColumnsConfig::default()).unwrap())
}

#[test]
fn test_fiji_tonga_scenario() {
    let table = table_from(&fixtures::csv_with_rows(&[
        ("IND_A", "Fiji ", "2019", "10"),
        ("IND_A", "fiji", "2019", "20"),
        ("IND_A", "Tonga", "2020", "5"),
    ]));

    let outcome = compute(&table, &Selection::new("IND_A"));
    let PipelineOutcome::Charts(bundle) = outcome else {
        panic!("expected charts");
    };

    let totals: Vec<(&str, f64)> = bundle
        .totals
        .iter()
        .map(|(entity, total)| (entity.as_str(), *total))
        .collect();
    assert_eq!(totals, vec![("fiji", 30.0), ("tonga", 5.0)]);

    assert_eq!(bundle.pivot.len(), 2);
    assert_eq!(bundle.pivot[&Entity::new("fiji")].len(), 1);
    assert_eq!(bundle.pivot[&Entity::new("fiji")][&Period::new("2019")], 15.0);
    assert_eq!(bundle.pivot[&Entity::new("tonga")][&Period::new("2020")], 5.0);

    let fiji_box = bundle.box_summary[&Entity::new("fiji")];
    assert_approx_eq(fiji_box.q1, 12.5, 1e-12);
    assert_approx_eq(fiji_box.q2, 15.0, 1e-12);
    assert_approx_eq(fiji_box.q3, 17.5, 1e-12);

    let tonga_box = bundle.box_summary[&Entity::new("tonga")];
    assert_eq!(tonga_box.lower_fence, 5.0);
    assert_eq!(tonga_box.upper_fence, 5.0);
}

#[test]
fn test_unknown_indicator_is_empty_not_error() {
    let table = table_from(fixtures::SAMPLE_CSV);
    let outcome = compute(&table, &Selection::new("IND_NONE"));

    assert_eq!(
        outcome,
        PipelineOutcome::Empty {
            indicator: "IND_NONE".to_string()
        }
    );
}

#[test]
fn test_filtered_selection_to_svg() {
    let table = Arc::new(table_from(fixtures::SAMPLE_CSV));
    let pipeline = CachedPipeline::new(Arc::clone(&table), &PipelineConfig::default());

    let selection = Selection::new("SL_TLF_UEM")
        .with_entities(["Fiji", "Tonga"])
        .with_periods(["2019", "2020", "2021"]);
    let outcome = pipeline.compute(&selection);
    let bundle = outcome.charts().expect("charts");

    assert_eq!(bundle.rows, 4);
    assert!(!bundle.totals.contains_key(&Entity::new("samoa")));

    let charts = render_bundle(bundle, "Unemployment rate", &GraphsConfig::default()).unwrap();
    assert!(charts.bar.contains("Unemployment rate (SL_TLF_UEM)"));
    assert!(charts.heatmap.is_some());
}

#[test]
fn test_selection_excluding_everything_is_empty() {
    let table = table_from(fixtures::SAMPLE_CSV);
    let selection = Selection::new("SL_TLF_UEM").with_periods(["1990"]);

    assert!(compute(&table, &selection).is_empty());
}
