//! # SDG Config
//!
//! Type-safe configuration management for the SDG dashboard.
//!
//! This crate provides the configuration schema, its defaults, YAML loading
//! with environment overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
