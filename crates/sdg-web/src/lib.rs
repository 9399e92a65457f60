//! # SDG Web
//!
//! HTTP surface of the SDG dashboard: HTML pages with inline SVG charts and a
//! small JSON API over the same aggregation pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pages;
pub mod query;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ErrorResponse, HtmlError, WebError, WebResult};
pub use query::ChartQuery;
pub use routes::{router, IndicatorSummary};
pub use server::{serve, serve_with_shutdown};
pub use state::AppState;
