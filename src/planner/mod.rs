//! Query planning.
//!
//! This module turns resolved fields into survey queries:
//! - One query per (dataset, year) partition
//! - The deduplicated variable set each query needs
//! - The geography `for`/`in` predicate for the requested level

pub mod geography;
pub mod plan;

// Re-export main types and functions
pub use geography::{geography_clause, GeoClause, GeoLevel};
pub use plan::{plan_queries, PlanOptions, QueryPlan};
