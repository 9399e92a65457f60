//! # SDG Data
//!
//! Observation table loading, normalization, filtering, and the indicator
//! catalog for the SDG dashboard.
//!
//! A [`Table`] can only be obtained through [`normalize`], so every row the
//! pipeline sees has a normalized entity, a sortable period, and a value that
//! is either a finite number or missing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod period;

pub use catalog::{label_for, Catalog, Category, IndicatorEntry, CATALOG};
pub use filter::{filter, FilteredView, Selection, ViewRow};
pub use loader::{load_table, read_raw_table};
pub use model::{Entity, Observation, RawRow, RawTable, Table};
pub use normalize::{normalize, normalize_entity, normalize_period, parse_value};
pub use period::Period;
