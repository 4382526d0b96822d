//! Resolved fields and source partitions.

use crate::categories::Universe;
use crate::utils::config::{DENSITY_SUFFIX, RATIO_SUFFIX};
use serde::Serialize;
use std::fmt;

/// A (dataset, year) pair: the unit of query batching.
///
/// Ordering is by dataset, then year; merge order follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Partition {
    /// Canonical API dataset path, e.g. "acs/acs5"
    pub dataset: String,
    pub year: u16,
}

impl Partition {
    pub fn new(dataset: impl Into<String>, year: u16) -> Self {
        Self {
            dataset: dataset.into(),
            year,
        }
    }

    /// American Community Survey datasets use estimate-suffixed codes
    pub fn is_acs(&self) -> bool {
        self.dataset.starts_with("acs")
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dataset, self.year)
    }
}

/// One output field, ready to be planned and aggregated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedField {
    /// Qualified column name
    pub name: String,

    pub category: String,

    /// Field name as written in the configuration
    pub field: String,

    pub partition: Partition,

    /// Codes whose values are summed, in configuration order
    pub sum_codes: Vec<String>,

    pub universe: Universe,
}

impl ResolvedField {
    pub fn ratio_column(&self) -> String {
        format!("{}{}", self.name, RATIO_SUFFIX)
    }

    pub fn density_column(&self) -> String {
        format!("{}{}", self.name, DENSITY_SUFFIX)
    }
}
