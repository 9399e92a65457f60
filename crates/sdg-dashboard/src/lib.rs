//! # SDG Dashboard
//!
//! Web dashboard for SDG 08 (Decent Work and Economic Growth) indicators across
//! Pacific Island countries and territories.
//!
//! This is the main binary crate. It resolves configuration, loads the dataset
//! once, and serves the [`sdg_web`] router.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::Dashboard;
pub use cli::Args;
pub use error::{DashboardError, DashboardResult};
