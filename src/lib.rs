//! Census Fields
//!
//! Declarative collection of US Census survey fields: a nested category
//! configuration is normalized and resolved into fields, grouped into one
//! query per (dataset, year) partition, aggregated into a wide table with
//! ratio columns, and optionally joined with boundary geometry to derive
//! densities.
//!
//! This crate provides the core implementation for the
//! `census-fields` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! census-fields init-config census_fields.toml
//! census-fields fetch --state MA --level tract --config census_fields.toml
//! ```

pub mod aggregator;
pub mod categories;
pub mod census;
pub mod commands;
pub mod density;
pub mod output;
pub mod pipeline;
pub mod planner;
pub mod resolver;
pub mod table;
pub mod utils;
