use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// File format of the fetched table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    /// Requires `--geometry`
    Geojson,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Geojson => "geojson",
        };
        f.write_str(name)
    }
}

/// Arguments for the fetch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FetchArgs {
    /// Category configuration file (built-in set if absent)
    pub config: Option<PathBuf>,

    /// State abbreviation, name or FIPS code
    pub state: String,

    /// Geography level (block, blockgroup, tract, place)
    pub level: String,

    /// Census API key
    pub api_key: Option<String>,

    /// Alternative API root
    pub base_url: Option<String>,

    /// Emit `_ratio` columns
    pub compute_ratios: bool,

    /// Request place names (place level only)
    pub place_names: bool,

    /// GeoJSON boundaries to join and derive densities from
    pub geometry: Option<PathBuf>,

    /// Feature property holding the identifier (GEOID/GEOID20/GEOID10 if absent)
    pub geoid_property: Option<String>,

    /// Columns to derive densities for, overriding the configuration
    pub density_fields: Option<Vec<String>>,

    /// Output path
    pub output: PathBuf,

    pub format: OutputFormat,

    /// Print a table summary to stdout
    pub print_summary: bool,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            config: None,
            state: String::new(),
            level: "tract".to_string(),
            api_key: None,
            base_url: None,
            compute_ratios: true,
            place_names: false,
            geometry: None,
            geoid_property: None,
            density_fields: None,
            output: PathBuf::from("census_fields.json"),
            format: OutputFormat::Json,
            print_summary: false,
        }
    }
}

/// Arguments for the plan command
#[derive(Debug, Clone)]
pub struct PlanArgs {
    pub config: Option<PathBuf>,
    pub state: String,
    pub level: String,
    pub place_names: bool,

    /// Print the plan as JSON instead of text
    pub json: bool,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            config: None,
            state: String::new(),
            level: "tract".to_string(),
            place_names: false,
            json: false,
        }
    }
}
