//! Resolve normalized categories into fields.
//!
//! For each category, field and year this produces one `ResolvedField`
//! carrying its partition, the codes to sum and its universe. ACS codes get
//! the estimate suffix exactly once; decennial codes are left alone.

use super::field::{Partition, ResolvedField};
use crate::categories::{normalize_categories, CategoryConfig, NormalizedConfig};
use crate::utils::config::{ESTIMATE_SUFFIX, GEOID_COLUMN, NAME_COLUMN};
use crate::utils::error::ConfigError;
use log::debug;
use std::collections::HashMap;

/// Append the estimate suffix unless already present
pub fn with_estimate_suffix(code: &str) -> String {
    if code.ends_with(ESTIMATE_SUFFIX) {
        code.to_string()
    } else {
        format!("{}{}", code, ESTIMATE_SUFFIX)
    }
}

/// Resolve every field of a normalized configuration, in configuration
/// order, with ratio columns enabled.
pub fn resolve_fields(config: &NormalizedConfig) -> Result<Vec<ResolvedField>, ConfigError> {
    resolve_fields_with(config, true)
}

/// Resolve every field of a normalized configuration, in configuration order.
///
/// `compute_ratios` says whether `_ratio` columns will be emitted; when it
/// is off their names are free for other fields.
///
/// # Errors
/// * `ConfigError::MissingUniverseDefault` - a field has no universe entry
///   and its category has no default
/// * `ConfigError::NameCollision` - a derived ratio/density column or an
///   identifier column clashes with another output column
pub fn resolve_fields_with(
    config: &NormalizedConfig,
    compute_ratios: bool,
) -> Result<Vec<ResolvedField>, ConfigError> {
    let mut resolved = Vec::new();

    for category in &config.categories {
        for field in &category.fields {
            let partition = Partition::new(category.dataset.clone(), field.year);
            let universe = category.universe_for(&field.field)?.clone();

            let (sum_codes, universe) = if partition.is_acs() {
                (
                    field.codes.iter().map(|c| with_estimate_suffix(c)).collect(),
                    universe.map_code(|c| with_estimate_suffix(&c)),
                )
            } else {
                (field.codes.clone(), universe)
            };

            resolved.push(ResolvedField {
                name: field.name.clone(),
                category: category.name.clone(),
                field: field.field.clone(),
                partition,
                sum_codes,
                universe,
            });
        }
    }

    check_output_columns(&resolved, compute_ratios)?;
    debug!("Resolved {} fields", resolved.len());

    Ok(resolved)
}

/// Normalize and resolve in one step
pub fn resolve_categories(categories: &CategoryConfig) -> Result<Vec<ResolvedField>, ConfigError> {
    resolve_fields(&normalize_categories(categories)?)
}

/// Normalize and resolve, with or without ratio columns
pub fn resolve_categories_with(
    categories: &CategoryConfig,
    compute_ratios: bool,
) -> Result<Vec<ResolvedField>, ConfigError> {
    resolve_fields_with(&normalize_categories(categories)?, compute_ratios)
}

/// Names of fields that get a density column
pub fn density_columns(fields: &[ResolvedField]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.universe.has_density())
        .map(|f| f.name.clone())
        .collect()
}

/// Every column the fields can produce must be unique
fn check_output_columns(fields: &[ResolvedField], compute_ratios: bool) -> Result<(), ConfigError> {
    let mut owners: HashMap<String, String> = HashMap::new();
    owners.insert(GEOID_COLUMN.to_string(), "the identifier column".to_string());
    owners.insert(NAME_COLUMN.to_string(), "the name column".to_string());

    for field in fields {
        let owner = format!("field '{}'", field.name);
        let mut columns = vec![field.name.clone()];
        if compute_ratios && field.universe.has_ratio() {
            columns.push(field.ratio_column());
        }
        if field.universe.has_density() {
            columns.push(field.density_column());
        }

        for column in columns {
            if let Some(first) = owners.insert(column.clone(), owner.clone()) {
                return Err(ConfigError::NameCollision {
                    name: column,
                    first,
                    second: owner,
                });
            }
        }
    }

    Ok(())
}
