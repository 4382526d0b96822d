//! Field resolution.
//!
//! Flattens normalized categories into one `ResolvedField` per
//! (category, field, year), with universe codes resolved and the ACS
//! estimate-suffix convention applied.

pub mod field;
pub mod resolve;

// Re-export main types and functions
pub use field::{Partition, ResolvedField};
pub use resolve::{
    density_columns, resolve_categories, resolve_categories_with, resolve_fields, resolve_fields_with,
    with_estimate_suffix,
};
