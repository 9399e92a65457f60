//! Aggregations over a filtered view.
//!
//! Each function is a pure reduction of a [`FilteredView`] into one
//! chart-ready shape. They share no state and may run in any order or in
//! parallel. Groups only exist for entities with at least one row, so no
//! reduction ever sees an empty group.

use sdg_data::{Entity, FilteredView, Period};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Entity to summed value.
pub type Totals = BTreeMap<Entity, f64>;

/// Entity to five-number summary.
pub type BoxSummaries = BTreeMap<Entity, BoxSummary>;

/// Entity to its values in chronological order.
pub type TimeSeries = BTreeMap<Entity, Vec<SeriesPoint>>;

/// Entity to period to mean value. Absent cells are absent, never zero.
pub type Pivot = BTreeMap<Entity, BTreeMap<Period, f64>>;

/// Multiplier applied to the interquartile range to place the fences.
pub const TUKEY_FENCE_FACTOR: f64 = 1.5;

/// Quartiles and Tukey fences of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    /// 25th percentile.
    pub q1: f64,
    /// Median.
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
    /// `q1 - 1.5 * IQR`.
    pub lower_fence: f64,
    /// `q3 + 1.5 * IQR`.
    pub upper_fence: f64,
}

impl BoxSummary {
    /// Summarizes `values`, or returns `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let q2 = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q2,
            q3,
            lower_fence: TUKEY_FENCE_FACTOR.mul_add(-iqr, q1),
            upper_fence: TUKEY_FENCE_FACTOR.mul_add(iqr, q3),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// One point of a time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Time period.
    pub period: Period,
    /// Observation value.
    pub value: f64,
}

/// Linear-interpolation quantile of an ascending slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    let weight = position - lower as f64;

    Some((sorted[upper] - sorted[lower]).mul_add(weight, sorted[lower]))
}

fn group_values(view: &FilteredView<'_>) -> BTreeMap<Entity, Vec<f64>> {
    let mut groups: BTreeMap<Entity, Vec<f64>> = BTreeMap::new();
    for row in view.iter() {
        groups.entry(row.entity.clone()).or_default().push(row.value);
    }
    groups
}

// Values are summed in ascending order so the result does not depend on
// the order rows appear in the source file.
fn ordered_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

/// Sums values per entity.
pub fn totals(view: &FilteredView<'_>) -> Totals {
    let totals: Totals = group_values(view)
        .into_iter()
        .map(|(entity, mut values)| (entity, ordered_sum(&mut values)))
        .collect();

    debug!("Computed totals for {} entities", totals.len());
    totals
}

/// Quartiles and fences per entity.
pub fn box_summary(view: &FilteredView<'_>) -> BoxSummaries {
    let summaries: BoxSummaries = group_values(view)
        .into_iter()
        .filter_map(|(entity, values)| {
            BoxSummary::from_values(&values).map(|summary| (entity, summary))
        })
        .collect();

    debug!("Computed box summaries for {} entities", summaries.len());
    summaries
}

/// Chronologically ordered values per entity.
///
/// Rows sharing a period keep their table order.
pub fn time_series(view: &FilteredView<'_>) -> TimeSeries {
    let mut series: TimeSeries = BTreeMap::new();
    for row in view.iter() {
        series
            .entry(row.entity.clone())
            .or_default()
            .push(SeriesPoint {
                period: row.period.clone(),
                value: row.value,
            });
    }

    for points in series.values_mut() {
        points.sort_by(|a, b| a.period.cmp(&b.period));
    }

    debug!("Computed time series for {} entities", series.len());
    series
}

/// Mean value per (entity, period) cell.
pub fn pivot(view: &FilteredView<'_>) -> Pivot {
    let mut cells: BTreeMap<Entity, BTreeMap<Period, Vec<f64>>> = BTreeMap::new();
    for row in view.iter() {
        cells
            .entry(row.entity.clone())
            .or_default()
            .entry(row.period.clone())
            .or_default()
            .push(row.value);
    }

    let matrix: Pivot = cells
        .into_iter()
        .map(|(entity, periods)| {
            let means = periods
                .into_iter()
                .map(|(period, mut values)| {
                    let count = values.len() as f64;
                    (period, ordered_sum(&mut values) / count)
                })
                .collect();
            (entity, means)
        })
        .collect();

    debug!("Computed pivot matrix with {} rows", matrix.len());
    matrix
}

/// A named reduction of a filtered view.
pub trait ViewAggregator {
    /// Shape produced by the reduction.
    type Output;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reduces `view`.
    fn aggregate(&self, view: &FilteredView<'_>) -> Self::Output;
}

/// [`totals`] as a [`ViewAggregator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalsAggregator;

/// [`box_summary`] as a [`ViewAggregator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxSummaryAggregator;

/// [`time_series`] as a [`ViewAggregator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesAggregator;

/// [`pivot`] as a [`ViewAggregator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotAggregator;

impl ViewAggregator for TotalsAggregator {
    type Output = Totals;

    fn name(&self) -> &'static str {
        "totals"
    }

    fn aggregate(&self, view: &FilteredView<'_>) -> Totals {
        totals(view)
    }
}

impl ViewAggregator for BoxSummaryAggregator {
    type Output = BoxSummaries;

    fn name(&self) -> &'static str {
        "box_summary"
    }

    fn aggregate(&self, view: &FilteredView<'_>) -> BoxSummaries {
        box_summary(view)
    }
}

impl ViewAggregator for TimeSeriesAggregator {
    type Output = TimeSeries;

    fn name(&self) -> &'static str {
        "time_series"
    }

    fn aggregate(&self, view: &FilteredView<'_>) -> TimeSeries {
        time_series(view)
    }
}

impl ViewAggregator for PivotAggregator {
    type Output = Pivot;

    fn name(&self) -> &'static str {
        "pivot"
    }

    fn aggregate(&self, view: &FilteredView<'_>) -> Pivot {
        pivot(view)
    }
}
