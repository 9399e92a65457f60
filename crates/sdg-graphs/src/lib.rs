//! # SDG Graphs
//!
//! The aggregation pipeline and chart rendering for the SDG dashboard.
//!
//! [`compute`] turns a filtered view of the observation table into the four
//! chart-ready shapes (totals, box summary, time series and pivot). The
//! renderers turn each shape into SVG markup with `plotters`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod aggregator;
pub mod bar;
pub mod box_plot;
pub mod charts;
pub mod heatmap;
pub mod line;
pub mod pipeline;
pub mod renderer;
pub mod types;

pub use aggregator::{
    box_summary, pivot, time_series, totals, BoxSummaries, BoxSummary, BoxSummaryAggregator, Pivot,
    PivotAggregator, SeriesPoint, TimeSeries, TimeSeriesAggregator, Totals, TotalsAggregator,
    ViewAggregator,
};
pub use bar::BarChartRenderer;
pub use box_plot::BoxPlotRenderer;
pub use charts::{chart_title, render_bundle, RenderedCharts};
pub use heatmap::HeatmapRenderer;
pub use line::LineChartRenderer;
pub use pipeline::{compute, CacheMetrics, CachedPipeline, ChartBundle, PipelineOutcome};
pub use renderer::ChartRenderer;
pub use types::{ChartKind, ColorScheme, FontConfig, GraphConfig, MarginConfig, StyleConfig};
