//! Bar chart of summed values per entity.

use crate::renderer::{
    axis_style, rotated_label_area, rotated_label_style, segment_inset, segment_label,
    title_style, value_range,
};
use crate::{ChartKind, ChartRenderer, GraphConfig, Totals};
use plotters::prelude::*;
use sdg_common::{Result, SdgError};
use tracing::debug;

/// Draws one bar per entity, entities ascending along the x axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarChartRenderer;

impl ChartRenderer for BarChartRenderer {
    type Input = Totals;

    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn render_svg(&self, config: &GraphConfig, totals: &Totals) -> Result<String> {
        let (y_min, y_max) = value_range(totals.values().copied(), true)
            .ok_or_else(|| SdgError::graph("No totals to render"))?;

        let labels: Vec<String> = totals.keys().map(ToString::to_string).collect();
        let colors = self.get_colors(&config.style.color_scheme);
        let background = self.get_background_color(config);
        let margins = &config.style.margins;
        let inset = segment_inset(config, labels.len());

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            root.fill(&background)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, title_style(config))
                .margin(margins.top)
                .x_label_area_size(rotated_label_area(config, &labels))
                .y_label_area_size(margins.left)
                .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len())
                .x_label_style(rotated_label_style(config))
                .x_label_formatter(&|value: &SegmentValue<usize>| segment_label(&labels, value))
                .x_desc(config.x_label.as_deref().unwrap_or_default())
                .y_desc(config.y_label.as_deref().unwrap_or_default())
                .axis_desc_style(axis_style(config))
                .draw()?;

            chart.draw_series(totals.values().enumerate().map(|(index, total)| {
                let color = colors[index % colors.len()];
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(index), 0.0),
                        (SegmentValue::Exact(index + 1), *total),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, inset, inset);
                bar
            }))?;

            root.present()?;
        }

        debug!("Rendered bar chart with {} bars", labels.len());
        Ok(svg)
    }
}
