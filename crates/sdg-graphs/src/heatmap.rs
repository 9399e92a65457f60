//! Heatmap of mean values by entity and period.

use crate::renderer::{axis_style, segment_label, title_style};
use crate::{ChartKind, ChartRenderer, GraphConfig, Pivot};
use plotters::prelude::*;
use sdg_common::{Result, SdgError};
use sdg_data::Period;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Draws entities as rows and periods as columns. Absent cells stay blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapRenderer;

/// Cell color for a value scaled into `0.0..=1.0`, blue (low) to red (high).
pub fn heat_color(scaled: f64) -> HSLColor {
    let scaled = if scaled.is_finite() {
        scaled.clamp(0.0, 1.0)
    } else {
        0.5
    };
    HSLColor((1.0 - scaled) * 0.66, 0.75, 0.5)
}

fn scale(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

impl ChartRenderer for HeatmapRenderer {
    type Input = Pivot;

    fn kind(&self) -> ChartKind {
        ChartKind::Heatmap
    }

    fn render_svg(&self, config: &GraphConfig, pivot: &Pivot) -> Result<String> {
        let values: Vec<f64> = pivot.values().flat_map(|row| row.values().copied()).collect();
        if values.is_empty() {
            return Err(SdgError::graph("No pivot cells to render"));
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let columns: BTreeMap<&Period, usize> = pivot
            .values()
            .flat_map(BTreeMap::keys)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(index, period)| (period, index))
            .collect();
        let column_labels: Vec<String> = columns.keys().map(ToString::to_string).collect();
        let row_labels: Vec<String> = pivot.keys().map(ToString::to_string).collect();

        let background = self.get_background_color(config);
        let margins = &config.style.margins;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            root.fill(&background)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, title_style(config))
                .margin(margins.top)
                .x_label_area_size(margins.bottom)
                .y_label_area_size(margins.left.saturating_mul(2))
                .build_cartesian_2d(
                    (0..column_labels.len()).into_segmented(),
                    (0..row_labels.len()).into_segmented(),
                )?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(column_labels.len())
                .y_labels(row_labels.len())
                .x_label_formatter(&|value: &SegmentValue<usize>| {
                    segment_label(&column_labels, value)
                })
                .y_label_formatter(&|value: &SegmentValue<usize>| segment_label(&row_labels, value))
                .x_desc(config.x_label.as_deref().unwrap_or_default())
                .y_desc(config.y_label.as_deref().unwrap_or_default())
                .axis_desc_style(axis_style(config))
                .draw()?;

            chart.draw_series(pivot.values().enumerate().flat_map(|(row, cells)| {
                let columns = &columns;
                cells.iter().filter_map(move |(period, value)| {
                    let column = *columns.get(period)?;
                    Some(Rectangle::new(
                        [
                            (SegmentValue::Exact(column), SegmentValue::Exact(row)),
                            (SegmentValue::Exact(column + 1), SegmentValue::Exact(row + 1)),
                        ],
                        heat_color(scale(*value, min, max)).filled(),
                    ))
                })
            }))?;

            root.present()?;
        }

        debug!(
            "Rendered heatmap with {} cells ({} x {})",
            values.len(),
            row_labels.len(),
            column_labels.len()
        );
        Ok(svg)
    }
}
