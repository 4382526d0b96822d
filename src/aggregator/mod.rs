//! Aggregation of raw survey responses into field columns.
//!
//! This module transforms per-partition responses into:
//! - Field value columns (row-wise sums of codes)
//! - Ratio columns (value over universe)
//! - One wide table merged across partitions

pub mod fields;
pub mod merge;

// Re-export main types and functions
pub use fields::{numeric_column, parse_numeric, ratio_values, sum_values};
pub use merge::{aggregate, merge_partitions, AggregateOptions};
