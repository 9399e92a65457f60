//! Rendering a whole chart bundle for the dashboard page.

use crate::line::TIME_AXIS_LABEL;
use crate::{
    BarChartRenderer, BoxPlotRenderer, ChartBundle, ChartKind, ChartRenderer, GraphConfig,
    HeatmapRenderer, LineChartRenderer,
};
use sdg_common::{Result, SdgError};
use sdg_config::GraphsConfig;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// SVG markup for each dashboard panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCharts {
    /// Totals per entity.
    pub bar: String,
    /// Quartiles per entity.
    pub box_plot: String,
    /// Series per entity.
    pub line: String,
    /// Mean matrix, absent when the heatmap panel is disabled.
    pub heatmap: Option<String>,
}

impl RenderedCharts {
    /// Panels in page order, skipping a disabled heatmap.
    pub fn panels(&self) -> Vec<(ChartKind, &str)> {
        let mut panels = vec![
            (ChartKind::Bar, self.bar.as_str()),
            (ChartKind::Box, self.box_plot.as_str()),
            (ChartKind::Line, self.line.as_str()),
        ];
        if let Some(heatmap) = &self.heatmap {
            panels.push((ChartKind::Heatmap, heatmap.as_str()));
        }
        panels
    }
}

/// Chart caption, e.g. `Unemployment rate (SL_TLF_UEM)`.
pub fn chart_title(label: &str, code: &str) -> String {
    if label == code {
        code.to_string()
    } else {
        format!("{label} ({code})")
    }
}

/// Renders every panel of `bundle`.
///
/// CPU bound; async callers should run it on a blocking thread.
#[instrument(skip(bundle, settings), fields(indicator = %bundle.indicator))]
pub fn render_bundle(
    bundle: &ChartBundle,
    label: &str,
    settings: &GraphsConfig,
) -> Result<RenderedCharts> {
    let start = Instant::now();
    let base = GraphConfig::from_settings(settings, chart_title(label, &bundle.indicator));

    let bar = render_panel(&BarChartRenderer, &base, &bundle.totals)?;
    let box_plot = render_panel(&BoxPlotRenderer, &base, &bundle.box_summary)?;

    let line_config = base
        .clone()
        .with_axes(TIME_AXIS_LABEL, settings.value_axis_label.clone());
    let line = render_panel(&LineChartRenderer, &line_config, &bundle.time_series)?;

    let heatmap = if settings.enable_heatmap {
        let heatmap_config = base
            .clone()
            .with_axes(TIME_AXIS_LABEL, settings.entity_axis_label.clone());
        Some(render_panel(&HeatmapRenderer, &heatmap_config, &bundle.pivot)?)
    } else {
        None
    };

    info!(
        "Rendered charts for {} in {:?}",
        bundle.indicator,
        start.elapsed()
    );

    Ok(RenderedCharts {
        bar,
        box_plot,
        line,
        heatmap,
    })
}

fn render_panel<R: ChartRenderer>(
    renderer: &R,
    config: &GraphConfig,
    input: &R::Input,
) -> Result<String> {
    let kind = renderer.kind();
    debug!(%kind, "Rendering panel");
    renderer
        .render_svg(config, input)
        .map_err(|e| SdgError::graph_with_source(format!("Failed to render {kind} chart"), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute;
    use sdg_data::{normalize, RawRow, RawTable, Selection};

    fn bundle() -> ChartBundle {
        let table = normalize(RawTable::from_rows(vec![
            RawRow::new("IND_A", "Fiji ", "2019", "10"),
            RawRow::new("IND_A", "fiji", "2019", "20"),
            RawRow::new("IND_A", "Tonga", "2020", "5"),
        ]));
        compute(&table, &Selection::new("IND_A"))
            .charts()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title("Unemployment rate", "SL_TLF_UEM"),
            "Unemployment rate (SL_TLF_UEM)"
        );
        assert_eq!(chart_title("IND_A", "IND_A"), "IND_A");
    }

    #[test]
    fn test_render_bundle() {
        let charts = render_bundle(&bundle(), "Indicator A", &GraphsConfig::default()).unwrap();

        for svg in [&charts.bar, &charts.box_plot, &charts.line] {
            assert!(svg.contains("<svg"));
            assert!(svg.contains("Indicator A (IND_A)"));
        }
        assert!(charts.heatmap.unwrap().contains("<svg"));
    }

    #[test]
    fn test_heatmap_can_be_disabled() {
        let settings = GraphsConfig {
            enable_heatmap: false,
            ..GraphsConfig::default()
        };
        let charts = render_bundle(&bundle(), "IND_A", &settings).unwrap();
        assert!(charts.heatmap.is_none());

        let kinds: Vec<ChartKind> = charts.panels().into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![ChartKind::Bar, ChartKind::Box, ChartKind::Line]);
    }

    #[test]
    fn test_panels_follow_page_order() {
        let charts = render_bundle(&bundle(), "IND_A", &GraphsConfig::default()).unwrap();
        let panels = charts.panels();

        assert_eq!(panels.len(), 4);
        assert_eq!(panels[0], (ChartKind::Bar, charts.bar.as_str()));
        assert_eq!(panels[3].0, ChartKind::Heatmap);
    }

    #[test]
    fn test_render_failure_names_the_panel() {
        let err = render_panel(
            &BarChartRenderer,
            &GraphConfig::default(),
            &crate::Totals::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Failed to render bar chart"));
        assert!(std::error::Error::source(&err)
            .unwrap()
            .to_string()
            .contains("No totals to render"));
    }
}
