//! Loading category configurations from TOML or JSON.

use super::schema::CategoryConfig;
use crate::utils::error::ConfigError;
use log::debug;
use std::fs;
use std::path::Path;

/// Built-in categories: population, race, income, commute, vehicles
pub const DEFAULT_CATEGORIES_TOML: &str = include_str!("../../config/census_fields.toml");

/// Load categories from a file.
///
/// Files ending in `.json` are parsed as JSON, everything else as TOML.
/// Category and field order follow the document.
///
/// # Errors
/// * `ConfigError::ReadFailed` - file cannot be read
/// * `ConfigError::TomlError` / `ConfigError::JsonError` - invalid document
pub fn load_categories(path: impl AsRef<Path>) -> Result<CategoryConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Reading categories from: {}", path.display());

    let contents = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let categories = if is_json {
        parse_categories_json(&contents)?
    } else {
        parse_categories_toml(&contents)?
    };

    debug!("Loaded {} categories", categories.len());
    Ok(categories)
}

pub fn parse_categories_toml(contents: &str) -> Result<CategoryConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

pub fn parse_categories_json(contents: &str) -> Result<CategoryConfig, ConfigError> {
    Ok(serde_json::from_str(contents)?)
}

/// The built-in category set
pub fn default_categories() -> Result<CategoryConfig, ConfigError> {
    parse_categories_toml(DEFAULT_CATEGORIES_TOML)
}
