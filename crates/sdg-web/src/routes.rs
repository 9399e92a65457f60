//! Router and request handlers.
//!
//! The HTML and JSON chart routes both go through [`ChartQuery::selection`]
//! and the one cached pipeline in [`AppState`].

use crate::error::{HtmlError, WebResult};
use crate::pages::{self, FormChoices};
use crate::query::ChartQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::{Html, Json},
    routing::get,
    Form, Router,
};
use sdg_data::{Category, Selection, CATALOG};
use sdg_graphs::{chart_title, render_bundle, PipelineOutcome};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

/// An indicator present in the loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorSummary {
    /// Indicator code.
    pub code: String,
    /// Catalog label, or the code when the catalog does not list it.
    pub label: String,
    /// Catalog category key, if any.
    pub category: Option<&'static str>,
}

/// Builds the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/visualize", get(visualize_query).post(visualize_form))
        .route("/api/catalog", get(api_catalog))
        .route("/api/indicators", get(api_indicators))
        .route("/api/charts", get(api_charts))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let table = state.table();
    let present = table.indicators();

    let mut entities = BTreeSet::new();
    let mut periods = BTreeSet::new();
    for code in &present {
        entities.extend(table.entities(code));
        periods.extend(table.periods(code));
    }
    let entities: Vec<&str> = entities.into_iter().map(|entity| entity.as_str()).collect();
    let periods: Vec<&str> = periods.into_iter().map(|period| period.as_str()).collect();

    let choices = FormChoices {
        present: &present,
        entities: &entities,
        periods: &periods,
    };
    Html(pages::index_page(state.title(), CATALOG.categories(), &choices))
}

async fn visualize_query(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Html<String>, HtmlError> {
    visualize(state, query).await
}

async fn visualize_form(
    State(state): State<AppState>,
    Form(query): Form<ChartQuery>,
) -> Result<Html<String>, HtmlError> {
    visualize(state, query).await
}

async fn visualize(state: AppState, query: ChartQuery) -> Result<Html<String>, HtmlError> {
    let selection = query.selection()?;
    let label = query.label()?;
    let category = query.category_title();

    let page =
        tokio::task::spawn_blocking(move || dashboard(&state, category, &selection, &label))
            .await??;
    Ok(Html(page))
}

fn dashboard(
    state: &AppState,
    category: Option<&str>,
    selection: &Selection,
    label: &str,
) -> WebResult<String> {
    let outcome = state.pipeline.compute(selection);
    let caption = chart_title(label, selection.indicator());

    match outcome.as_ref() {
        PipelineOutcome::Empty { .. } => {
            debug!(indicator = %selection.indicator(), "Nothing to chart");
            Ok(pages::no_data_page(state.title(), &caption))
        }
        PipelineOutcome::Charts(bundle) => {
            let charts = render_bundle(bundle, label, &state.config.graphs)?;
            Ok(pages::dashboard_page(
                state.title(),
                category,
                &caption,
                bundle,
                &charts,
            ))
        }
    }
}

async fn api_catalog() -> Json<&'static [Category]> {
    Json(CATALOG.categories())
}

async fn api_indicators(State(state): State<AppState>) -> Json<Vec<IndicatorSummary>> {
    let indicators = state
        .table()
        .indicators()
        .into_iter()
        .map(|code| IndicatorSummary {
            code: code.to_string(),
            label: CATALOG.find_label(code).unwrap_or(code).to_string(),
            category: CATALOG.category_of(code),
        })
        .collect();
    Json(indicators)
}

async fn api_charts(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> WebResult<Json<PipelineOutcome>> {
    let selection = query.selection()?;
    let pipeline = Arc::clone(&state.pipeline);

    let outcome = tokio::task::spawn_blocking(move || pipeline.compute(&selection)).await?;
    Ok(Json(outcome.as_ref().clone()))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let table = state.table();
    let metrics = state.pipeline.metrics();
    Json(json!({
        "status": "ok",
        "rows": table.len(),
        "indicators": table.indicators().len(),
        "cache": {
            "enabled": state.pipeline.is_caching(),
            "hits": metrics.hits(),
            "misses": metrics.misses(),
            "hit_rate": metrics.hit_rate(),
        },
    }))
}
