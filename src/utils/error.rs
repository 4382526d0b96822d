//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors in a category configuration.
///
/// All of these are raised before any external query is issued.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Category '{category}': unrecognized source '{given}' (expected acs5, acs1, decennial_<suffix> or dhc)")]
    UnrecognizedSource { category: String, given: String },

    #[error("Category '{category}': field '{field}' has no universe entry and no 'default' universe")]
    MissingUniverseDefault { category: String, field: String },

    #[error("Column name '{name}' is produced by both {first} and {second}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Category '{category}': no years given and no latest year is known for dataset '{dataset}'")]
    NoDefaultYear { category: String, dataset: String },

    #[error("Category '{category}': 'years' must not be empty")]
    EmptyYears { category: String },

    #[error("Unknown geography level '{0}' (expected block, blockgroup, tract or place)")]
    UnknownLevel(String),

    #[error("Unknown state '{0}'")]
    UnknownState(String),

    #[error("Failed to read configuration: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors that can occur while querying the survey API
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Response is missing geography column '{0}'")]
    MissingGeography(String),
}

/// Errors raised while computing field columns from raw survey values
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Code '{code}' for GEOID {geoid} is not numeric: '{value}'")]
    NonNumeric {
        code: String,
        geoid: String,
        value: String,
    },

    #[error("Code '{code}' is missing from the {partition} response")]
    MissingCode { code: String, partition: String },

    #[error("No response available for partition {0}")]
    MissingPartition(String),

    #[error("Column '{0}' appears in more than one table")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} values, table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors that can occur while loading boundary geometry
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("GeoJSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid GeoJSON: {0}")]
    InvalidFormat(String),

    #[error("Feature {0} has no identifier property")]
    MissingIdentifier(usize),

    #[error("Unsupported geometry type '{0}'")]
    UnsupportedGeometry(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Any failure of a census collection run
#[derive(Error, Debug)]
pub enum CensusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Query for partition {partition} failed: {source}")]
    Query {
        partition: String,
        #[source]
        source: QueryError,
    },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
