//! Category normalization.
//!
//! Turns the human-authored configuration into an unambiguous form:
//! - sources become API dataset paths ("acs5" -> "acs/acs5")
//! - years become a non-empty ordered list (latest year when omitted)
//! - every (field, year) pair gets one qualified column name
//!
//! Naming is decided once for the whole configuration: if any dataset is
//! requested for more than one year, every name becomes
//! `{year}_{category}_{field}`, otherwise `{category}_{field}`.
//!
//! Normalization never modifies its input.

use super::schema::{CategoryConfig, RawCategory, Universe};
use crate::utils::config::{latest_year, DEFAULT_UNIVERSE_KEY};
use crate::utils::error::ConfigError;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A (field, year) pair with its qualified column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField {
    /// Qualified column name, e.g. "income_median" or "2023_income_median"
    pub name: String,

    /// Field name as written in the configuration
    pub field: String,

    pub year: u16,

    /// Variable codes to sum, as written (no suffix applied yet)
    pub codes: Vec<String>,
}

/// A category after source, years and field names were normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCategory {
    pub name: String,

    /// Canonical API dataset path, e.g. "acs/acs5"
    pub dataset: String,

    pub years: Vec<u16>,

    /// One entry per (field, year), fields in configuration order
    pub fields: Vec<NormalizedField>,

    /// Universe entries keyed by configuration field name (and "default")
    pub universes: IndexMap<String, Universe>,
}

impl NormalizedCategory {
    /// Universe of a field: its own entry, else the category default
    pub fn universe_for(&self, field: &str) -> Result<&Universe, ConfigError> {
        self.universes
            .get(field)
            .or_else(|| self.universes.get(DEFAULT_UNIVERSE_KEY))
            .ok_or_else(|| ConfigError::MissingUniverseDefault {
                category: self.name.clone(),
                field: field.to_string(),
            })
    }
}

/// The whole normalized configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedConfig {
    pub categories: Vec<NormalizedCategory>,

    /// Whether field names carry a year prefix
    pub year_prefixed: bool,
}

impl NormalizedConfig {
    /// All qualified field names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }
}

/// Map a source identifier to its API dataset path.
///
/// Returns `None` for unrecognized identifiers.
pub fn canonical_dataset(source: &str) -> Option<String> {
    if source.starts_with("acs") {
        let dataset = if source == "acs1" { "acs/acs1" } else { "acs/acs5" };
        Some(dataset.to_string())
    } else if source.starts_with("dec") {
        let suffix = source.rsplit_once('_').map(|(_, s)| s).unwrap_or("dhc");
        Some(format!("dec/{}", suffix))
    } else if source == "dhc" {
        Some("dec/dhc".to_string())
    } else {
        None
    }
}

/// Qualified column name of a field
pub fn qualified_name(category: &str, field: &str, year: u16, year_prefixed: bool) -> String {
    if year_prefixed {
        format!("{}_{}_{}", year, category, field)
    } else {
        format!("{}_{}", category, field)
    }
}

/// Normalize a category configuration.
///
/// # Errors
/// * `ConfigError::UnrecognizedSource` - source cannot be mapped to a dataset
/// * `ConfigError::EmptyYears` - `years` given but empty
/// * `ConfigError::NoDefaultYear` - no years and no latest year for the dataset
/// * `ConfigError::NameCollision` - two fields flatten to the same name
pub fn normalize_categories(config: &CategoryConfig) -> Result<NormalizedConfig, ConfigError> {
    // Pass 1: datasets and years
    let mut staged = Vec::with_capacity(config.len());
    for (name, raw) in config {
        let dataset = canonical_dataset(&raw.source).ok_or_else(|| {
            ConfigError::UnrecognizedSource {
                category: name.clone(),
                given: raw.source.clone(),
            }
        })?;
        let years = resolve_years(name, &dataset, raw)?;
        staged.push((name, raw, dataset, years));
    }

    // One naming convention for the whole table
    let mut years_by_dataset: BTreeMap<&str, BTreeSet<u16>> = BTreeMap::new();
    for (_, _, dataset, years) in &staged {
        years_by_dataset
            .entry(dataset.as_str())
            .or_default()
            .extend(years.iter().copied());
    }
    let year_prefixed = years_by_dataset.values().any(|years| years.len() > 1);
    debug!(
        "Naming convention: {}",
        if year_prefixed {
            "{year}_{category}_{field}"
        } else {
            "{category}_{field}"
        }
    );

    // Pass 2: fields
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut categories = Vec::with_capacity(staged.len());

    for (name, raw, dataset, years) in staged {
        let mut fields = Vec::with_capacity(raw.fields.len() * years.len());

        for (field, codes) in &raw.fields {
            for &year in &years {
                let qualified = qualified_name(name, field, year, year_prefixed);
                let origin = format!("category '{}' field '{}' ({})", name, field, year);

                if let Some(first) = seen.insert(qualified.clone(), origin.clone()) {
                    return Err(ConfigError::NameCollision {
                        name: qualified,
                        first,
                        second: origin,
                    });
                }

                fields.push(NormalizedField {
                    name: qualified,
                    field: field.clone(),
                    year,
                    codes: codes.to_vec(),
                });
            }
        }

        let universes = raw
            .fields_universe
            .iter()
            .map(|(key, code)| (key.clone(), Universe::parse(code)))
            .collect::<IndexMap<_, _>>();

        for key in universes.keys() {
            if key != DEFAULT_UNIVERSE_KEY && !raw.fields.contains_key(key) {
                warn!(
                    "Category '{}': universe entry '{}' does not match any field",
                    name, key
                );
            }
        }

        categories.push(NormalizedCategory {
            name: name.clone(),
            dataset,
            years,
            fields,
            universes,
        });
    }

    debug!(
        "Normalized {} categories into {} fields",
        categories.len(),
        seen.len()
    );

    Ok(NormalizedConfig {
        categories,
        year_prefixed,
    })
}

/// Years of a category as an ordered, duplicate-free list
fn resolve_years(category: &str, dataset: &str, raw: &RawCategory) -> Result<Vec<u16>, ConfigError> {
    match &raw.years {
        Some(years) => {
            let years: IndexSet<u16> = years.to_vec().into_iter().collect();
            if years.is_empty() {
                return Err(ConfigError::EmptyYears {
                    category: category.to_string(),
                });
            }
            Ok(years.into_iter().collect())
        }
        None => latest_year(dataset)
            .map(|year| vec![year])
            .ok_or_else(|| ConfigError::NoDefaultYear {
                category: category.to_string(),
                dataset: dataset.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_dataset_acs() {
        assert_eq!(canonical_dataset("acs5").as_deref(), Some("acs/acs5"));
        assert_eq!(canonical_dataset("acs").as_deref(), Some("acs/acs5"));
        assert_eq!(canonical_dataset("acs1").as_deref(), Some("acs/acs1"));
        assert_eq!(canonical_dataset("acs/acs5").as_deref(), Some("acs/acs5"));
    }

    #[test]
    fn test_canonical_dataset_decennial() {
        assert_eq!(canonical_dataset("decennial_dhc").as_deref(), Some("dec/dhc"));
        assert_eq!(canonical_dataset("decennial").as_deref(), Some("dec/dhc"));
        assert_eq!(canonical_dataset("decennial_pl").as_deref(), Some("dec/pl"));
        assert_eq!(canonical_dataset("dec_sf_1").as_deref(), Some("dec/1"));
        assert_eq!(canonical_dataset("dhc").as_deref(), Some("dec/dhc"));
    }

    #[test]
    fn test_canonical_dataset_unrecognized() {
        assert_eq!(canonical_dataset("pums"), None);
        assert_eq!(canonical_dataset(""), None);
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name("income", "median", 2023, false), "income_median");
        assert_eq!(
            qualified_name("income", "median", 2023, true),
            "2023_income_median"
        );
    }

    #[test]
    fn test_duplicate_years_collapse() {
        let mut config = CategoryConfig::new();
        config.insert(
            "income".to_string(),
            RawCategory::new("acs5")
                .with_years(vec![2023, 2023])
                .with_field("median", vec!["B19013_001"])
                .with_universe("default", "NO_DENSITY_OR_RATIO"),
        );

        let normalized = normalize_categories(&config).unwrap();
        assert_eq!(normalized.categories[0].years, vec![2023]);
        assert!(!normalized.year_prefixed);
    }

    #[test]
    fn test_universe_lookup_falls_back_to_default() {
        let mut config = CategoryConfig::new();
        config.insert(
            "income".to_string(),
            RawCategory::new("acs5")
                .with_field("median", vec!["B19013_001"])
                .with_field("poor", vec!["C17002_002"])
                .with_universe("default", "C17002_001")
                .with_universe("median", "NO_DENSITY_OR_RATIO"),
        );

        let normalized = normalize_categories(&config).unwrap();
        let income = &normalized.categories[0];
        assert_eq!(
            income.universe_for("median").unwrap(),
            &Universe::NoDensityOrRatio
        );
        assert_eq!(income.universe_for("poor").unwrap().code(), Some("C17002_001"));
    }
}
