//! Line chart with one series per entity.

use crate::renderer::{axis_style, segment_label, title_style, value_range};
use crate::{ChartKind, ChartRenderer, GraphConfig, TimeSeries};
use plotters::prelude::*;
use sdg_common::{Result, SdgError};
use sdg_data::Period;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Caption of the time axis.
pub const TIME_AXIS_LABEL: &str = "Time period";

/// Draws each entity's series over the union of periods, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartRenderer;

/// Every period present in any series, with its x position.
fn period_axis(series: &TimeSeries) -> BTreeMap<&Period, usize> {
    series
        .values()
        .flatten()
        .map(|point| &point.period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(index, period)| (period, index))
        .collect()
}

impl ChartRenderer for LineChartRenderer {
    type Input = TimeSeries;

    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn render_svg(&self, config: &GraphConfig, series: &TimeSeries) -> Result<String> {
        let (y_min, y_max) = value_range(
            series.values().flatten().map(|point| point.value),
            false,
        )
        .ok_or_else(|| SdgError::graph("No time series to render"))?;

        let axis = period_axis(series);
        let labels: Vec<String> = axis.keys().map(ToString::to_string).collect();
        let colors = self.get_colors(&config.style.color_scheme);
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
                .y_label_area_size(margins.left)
                .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)?;

            chart
                .configure_mesh()
                .x_labels(labels.len())
                .x_label_formatter(&|value: &SegmentValue<usize>| segment_label(&labels, value))
                .x_desc(config.x_label.as_deref().unwrap_or(TIME_AXIS_LABEL))
                .y_desc(config.y_label.as_deref().unwrap_or_default())
                .axis_desc_style(axis_style(config))
                .draw()?;

            for (index, (entity, points)) in series.iter().enumerate() {
                let color = colors[index % colors.len()];
                let coordinates: Vec<(SegmentValue<usize>, f64)> = points
                    .iter()
                    .filter_map(|point| {
                        axis.get(&point.period)
                            .map(|x| (SegmentValue::CenterOf(*x), point.value))
                    })
                    .collect();

                chart
                    .draw_series(LineSeries::new(
                        coordinates.iter().cloned(),
                        color.stroke_width(2),
                    ))?
                    .label(entity.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 12, y)], color.stroke_width(2))
                    });

                chart.draw_series(
                    coordinates
                        .into_iter()
                        .map(|coordinate| Circle::new(coordinate, 3, color.filled())),
                )?;
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;

            root.present()?;
        }

        debug!(
            "Rendered line chart with {} series over {} periods",
            series.len(),
            labels.len()
        );
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesPoint;
    use sdg_data::Entity;

    fn point(period: &str, value: f64) -> SeriesPoint {
        SeriesPoint {
            period: Period::new(period),
            value,
        }
    }

    fn series() -> TimeSeries {
        [
            (
                Entity::new("Fiji"),
                vec![point("2018", 1.0), point("2019", 2.0)],
            ),
            (Entity::new("Tonga"), vec![point("2020", 5.0)]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_period_axis_is_union_in_order() {
        let series = series();
        let axis = period_axis(&series);
        let periods: Vec<&str> = axis.keys().map(|p| p.as_str()).collect();

        assert_eq!(periods, vec!["2018", "2019", "2020"]);
        assert_eq!(axis[&Period::new("2020")], 2);
    }

    #[test]
    fn test_render_line_chart() {
        let config = GraphConfig::default().with_axes(TIME_AXIS_LABEL, "Observation Value");
        let svg = LineChartRenderer.render_svg(&config, &series()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("2019"));
        assert!(svg.contains("tonga"));
    }

    #[test]
    fn test_empty_series_are_rejected() {
        let err = LineChartRenderer
            .render_svg(&GraphConfig::default(), &TimeSeries::new())
            .unwrap_err();
        assert!(matches!(err, SdgError::Graph { .. }));
    }
}
