//! Configuration and constants for the CLI.

use std::time::Duration;

/// Root of the Census data API
pub const CENSUS_API_BASE_URL: &str = "https://api.census.gov/data";

/// Default timeout for survey API requests (block-level pulls can be slow)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variable holding the Census API key
pub const API_KEY_ENV: &str = "CENSUS_API_KEY";

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Latest published year per dataset, used when a category omits `years`.
///
/// `dec/dhc` is available down to blocks, `acs/acs5` only to block groups,
/// `acs/acs1` only to places.
pub const LATEST_YEARS: &[(&str, u16)] = &[
    ("dec/dhc", 2020),
    ("acs/acs5", 2023),
    ("acs/acs1", 2024),
];

/// Universe sentinel: compute density but not ratio
pub const DENSITY_ONLY: &str = "DENSITY_ONLY";

/// Universe sentinel: compute neither density nor ratio
pub const NO_DENSITY_OR_RATIO: &str = "NO_DENSITY_OR_RATIO";

/// Key of the per-category fallback universe
pub const DEFAULT_UNIVERSE_KEY: &str = "default";

/// ACS variables are requested as estimate columns, e.g. `B19013_001E`
pub const ESTIMATE_SUFFIX: char = 'E';

/// Identifier column of every output table
pub const GEOID_COLUMN: &str = "GEOID";

/// Geography name column (only present when names are requested)
pub const NAME_COLUMN: &str = "NAME";

/// Suffix of ratio columns
pub const RATIO_SUFFIX: &str = "_ratio";

/// Suffix of density columns
pub const DENSITY_SUFFIX: &str = "_density";

// Property names that carry the identifier in TIGER/Line derived GeoJSON
pub const GEOID_PROPERTY_CANDIDATES: &[&str] = &["GEOID", "GEOID20", "GEOID10"];

/// Look up the latest known year for a canonical dataset path
pub fn latest_year(dataset: &str) -> Option<u16> {
    LATEST_YEARS
        .iter()
        .find(|(name, _)| *name == dataset)
        .map(|(_, year)| *year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_year_known() {
        assert_eq!(latest_year("dec/dhc"), Some(2020));
        assert_eq!(latest_year("acs/acs5"), Some(2023));
        assert_eq!(latest_year("acs/acs1"), Some(2024));
    }

    #[test]
    fn test_latest_year_unknown() {
        assert_eq!(latest_year("dec/pl"), None);
    }
}
