//! Category configuration schema.
//!
//! This is the human-authored form: a mapping of category name to source,
//! optional years, fields (lists of variable codes to sum) and universes.
//!
//! ```toml
//! [income]
//! source = "acs5"
//! years = 2023
//!
//! [income.fields]
//! median = ["B19013_001"]
//! 050PercentPoverty = ["C17002_002"]
//!
//! [income.fields_universe]
//! default = "C17002_001"
//! median = "NO_DENSITY_OR_RATIO"
//! ```

use crate::utils::config::{DENSITY_ONLY, NO_DENSITY_OR_RATIO};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories keyed by name, in document order
pub type CategoryConfig = IndexMap<String, RawCategory>;

/// A single value or a list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    /// Always view the value as a list
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// One category as written by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategory {
    /// Source identifier, e.g. "acs5", "acs1", "decennial_dhc"
    pub source: String,

    /// Survey year(s); latest known year when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<OneOrMany<u16>>,

    /// Field name -> variable codes to sum
    pub fields: IndexMap<String, OneOrMany<String>>,

    /// Field name (or "default") -> universe code or sentinel
    #[serde(default)]
    pub fields_universe: IndexMap<String, String>,
}

impl RawCategory {
    /// Start a category for the given source with no fields
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            years: None,
            fields: IndexMap::new(),
            fields_universe: IndexMap::new(),
        }
    }

    pub fn with_years(mut self, years: Vec<u16>) -> Self {
        self.years = Some(OneOrMany::Many(years));
        self
    }

    pub fn with_field<S: Into<String>>(mut self, name: impl Into<String>, codes: Vec<S>) -> Self {
        let codes = codes.into_iter().map(Into::into).collect();
        self.fields.insert(name.into(), OneOrMany::Many(codes));
        self
    }

    pub fn with_universe(mut self, field: impl Into<String>, code: impl Into<String>) -> Self {
        self.fields_universe.insert(field.into(), code.into());
        self
    }
}

/// Denominator of a field.
///
/// A concrete code enables both ratio and density, `DensityOnly` only
/// density, `NoDensityOrRatio` neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Universe {
    Concrete(String),
    DensityOnly,
    NoDensityOrRatio,
}

impl Universe {
    /// Parse the configuration spelling of a universe
    pub fn parse(raw: &str) -> Self {
        match raw {
            DENSITY_ONLY => Universe::DensityOnly,
            NO_DENSITY_OR_RATIO => Universe::NoDensityOrRatio,
            code => Universe::Concrete(code.to_string()),
        }
    }

    pub fn has_ratio(&self) -> bool {
        matches!(self, Universe::Concrete(_))
    }

    pub fn has_density(&self) -> bool {
        !matches!(self, Universe::NoDensityOrRatio)
    }

    /// The variable code to request, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Universe::Concrete(code) => Some(code),
            _ => None,
        }
    }

    /// Rewrite the concrete code, leaving sentinels untouched
    pub fn map_code(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Universe::Concrete(code) => Universe::Concrete(f(code)),
            other => other,
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Universe::Concrete(code) => write!(f, "{}", code),
            Universe::DensityOnly => write!(f, "{}", DENSITY_ONLY),
            Universe::NoDensityOrRatio => write!(f, "{}", NO_DENSITY_OR_RATIO),
        }
    }
}

impl Serialize for Universe {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
