//! Category configuration: schema, loading and normalization.
//!
//! This module handles:
//! - The user-facing configuration schema (TOML or JSON)
//! - The built-in category set
//! - Normalizing sources, years and field names

pub mod loader;
pub mod normalizer;
pub mod schema;

// Re-export main types and functions
pub use loader::{
    default_categories, load_categories, parse_categories_json, parse_categories_toml, DEFAULT_CATEGORIES_TOML,
};
pub use normalizer::{
    canonical_dataset, normalize_categories, qualified_name, NormalizedCategory, NormalizedConfig,
    NormalizedField,
};
pub use schema::{CategoryConfig, OneOrMany, RawCategory, Universe};
