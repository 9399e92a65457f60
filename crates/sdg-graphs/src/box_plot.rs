//! Box plot of quartiles and Tukey fences per entity.
//!
//! Boxes are drawn from precomputed [`BoxSummary`] values rather than from
//! raw observations, so the chart shows exactly what the pipeline returned.

use crate::aggregator::{BoxSummaries, BoxSummary};
use crate::renderer::{
    axis_style, rotated_label_area, rotated_label_style, segment_inset, segment_label,
    title_style, value_range,
};
use crate::{ChartKind, ChartRenderer, GraphConfig};
use plotters::prelude::*;
use sdg_common::{Result, SdgError};
use tracing::debug;

/// Draws one box per entity with whiskers reaching the fences.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxPlotRenderer;

type Point = (SegmentValue<usize>, f64);

fn span(index: usize, value: f64) -> [Point; 2] {
    [
        (SegmentValue::Exact(index), value),
        (SegmentValue::Exact(index + 1), value),
    ]
}

fn whiskers(index: usize, summary: &BoxSummary) -> [Vec<Point>; 2] {
    let center = || SegmentValue::CenterOf(index);
    [
        vec![(center(), summary.lower_fence), (center(), summary.q1)],
        vec![(center(), summary.q3), (center(), summary.upper_fence)],
    ]
}

impl ChartRenderer for BoxPlotRenderer {
    type Input = BoxSummaries;

    fn kind(&self) -> ChartKind {
        ChartKind::Box
    }

    fn render_svg(&self, config: &GraphConfig, summaries: &BoxSummaries) -> Result<String> {
        let (y_min, y_max) = value_range(
            summaries
                .values()
                .flat_map(|summary| [summary.lower_fence, summary.upper_fence]),
            false,
        )
        .ok_or_else(|| SdgError::graph("No box summaries to render"))?;

        let labels: Vec<String> = summaries.keys().map(ToString::to_string).collect();
        let colors = self.get_colors(&config.style.color_scheme);
        let background = self.get_background_color(config);
        let margins = &config.style.margins;
        let box_inset = segment_inset(config, labels.len());
        let cap_inset = box_inset.saturating_mul(2);

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

            // Whiskers first so the boxes cover their inner ends.
            chart.draw_series(summaries.values().enumerate().flat_map(|(index, summary)| {
                whiskers(index, summary)
                    .into_iter()
                    .map(|path| PathElement::new(path, BLACK.stroke_width(1)))
            }))?;

            chart.draw_series(summaries.values().enumerate().flat_map(|(index, summary)| {
                [summary.lower_fence, summary.upper_fence]
                    .into_iter()
                    .map(move |fence| {
                        let mut cap = Rectangle::new(span(index, fence), BLACK.stroke_width(1));
                        cap.set_margin(0, 0, cap_inset, cap_inset);
                        cap
                    })
            }))?;

            chart.draw_series(summaries.values().enumerate().map(|(index, summary)| {
                let color = colors[index % colors.len()];
                let mut body = Rectangle::new(
                    [
                        (SegmentValue::Exact(index), summary.q1),
                        (SegmentValue::Exact(index + 1), summary.q3),
                    ],
                    color.mix(0.7).filled(),
                );
                body.set_margin(0, 0, box_inset, box_inset);
                body
            }))?;

            chart.draw_series(summaries.values().enumerate().map(|(index, summary)| {
                let mut median = Rectangle::new(span(index, summary.q2), BLACK.stroke_width(2));
                median.set_margin(0, 0, box_inset, box_inset);
                median
            }))?;

            root.present()?;
        }

        debug!("Rendered box plot with {} boxes", labels.len());
        Ok(svg)
    }
}
