//! Pipeline entry point and its optional result cache.

use crate::aggregator::{
    BoxSummaries, BoxSummaryAggregator, Pivot, PivotAggregator, TimeSeries,
    TimeSeriesAggregator, Totals, TotalsAggregator, ViewAggregator,
};
use moka::sync::Cache;
use sdg_config::PipelineConfig;
use sdg_data::{filter, FilteredView, Selection, Table};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The four chart-ready shapes computed from one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    /// Indicator the bundle describes.
    pub indicator: String,
    /// Rows that went into every aggregate.
    pub rows: usize,
    /// Sum per entity.
    pub totals: Totals,
    /// Quartiles and fences per entity.
    pub box_summary: BoxSummaries,
    /// Chronological values per entity.
    pub time_series: TimeSeries,
    /// Mean per entity and period.
    pub pivot: Pivot,
}

/// Result of running the pipeline for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// At least one row matched.
    Charts(ChartBundle),
    /// No row matched. Not an error; the caller reports that there is no data.
    Empty {
        /// Indicator that was requested.
        indicator: String,
    },
}

impl PipelineOutcome {
    /// Whether no row matched.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// The bundle, when there is one.
    pub const fn charts(&self) -> Option<&ChartBundle> {
        match self {
            Self::Charts(bundle) => Some(bundle),
            Self::Empty { .. } => None,
        }
    }

    /// Indicator that was requested.
    pub fn indicator(&self) -> &str {
        match self {
            Self::Charts(bundle) => &bundle.indicator,
            Self::Empty { indicator } => indicator,
        }
    }
}

/// Filters `table` by `selection` and computes all four aggregates from the
/// same view.
#[instrument(skip(table, selection), fields(indicator = %selection.indicator()))]
pub fn compute(table: &Table, selection: &Selection) -> PipelineOutcome {
    let view = filter(table, selection);

    if view.is_empty() {
        debug!("No rows matched the selection");
        return PipelineOutcome::Empty {
            indicator: selection.indicator().to_string(),
        };
    }

    let bundle = ChartBundle {
        indicator: selection.indicator().to_string(),
        rows: view.len(),
        totals: run(&TotalsAggregator, &view),
        box_summary: run(&BoxSummaryAggregator, &view),
        time_series: run(&TimeSeriesAggregator, &view),
        pivot: run(&PivotAggregator, &view),
    };

    debug!(
        rows = bundle.rows,
        entities = bundle.totals.len(),
        "Computed chart bundle"
    );
    PipelineOutcome::Charts(bundle)
}

fn run<A: ViewAggregator>(aggregator: &A, view: &FilteredView<'_>) -> A::Output {
    debug!(aggregator = aggregator.name(), "Aggregating view");
    aggregator.aggregate(view)
}

/// Cache hit and miss counters.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that ran the pipeline.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// [`compute`] over one table snapshot, memoized per selection.
///
/// The cache lives and dies with the table it was built for, so an entry can
/// never describe data other than the table being served.
pub struct CachedPipeline {
    table: Arc<Table>,
    cache: Option<Cache<Selection, Arc<PipelineOutcome>>>,
    metrics: CacheMetrics,
}

impl CachedPipeline {
    /// Wraps `table`, caching results when the configuration enables it.
    pub fn new(table: Arc<Table>, config: &PipelineConfig) -> Self {
        let cache = config.cache_enabled.then(|| {
            info!(
                "Pipeline cache enabled with capacity {}",
                config.cache_capacity
            );
            Cache::builder().max_capacity(config.cache_capacity).build()
        });

        Self {
            table,
            cache,
            metrics: CacheMetrics::default(),
        }
    }

    /// The table every result is computed from.
    pub const fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Runs the pipeline for `selection`, reusing a cached result if present.
    pub fn compute(&self, selection: &Selection) -> Arc<PipelineOutcome> {
        let Some(cache) = &self.cache else {
            return Arc::new(compute(&self.table, selection));
        };

        if let Some(outcome) = cache.get(selection) {
            debug!(indicator = %selection.indicator(), "Pipeline cache hit");
            self.metrics.record_hit();
            return outcome;
        }

        self.metrics.record_miss();
        let outcome = Arc::new(compute(&self.table, selection));
        cache.insert(selection.clone(), Arc::clone(&outcome));
        outcome
    }

    /// Hit and miss counters.
    pub const fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Whether results are cached.
    pub const fn is_caching(&self) -> bool {
        self.cache.is_some()
    }
}

impl std::fmt::Debug for CachedPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedPipeline")
            .field("rows", &self.table.len())
            .field("caching", &self.is_caching())
            .field("metrics", &self.metrics)
            .finish()
    }
}
