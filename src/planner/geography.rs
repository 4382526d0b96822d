//! Geography levels and their containment hierarchy.
//!
//! The hierarchies mirror the "geographies" listed by the Census data API
//! for each dataset. The innermost level is queried with a wildcard; outer
//! levels constrain it.

use crate::utils::error::ConfigError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Logical geography level of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    Block,
    BlockGroup,
    Tract,
    Place,
}

impl GeoLevel {
    /// Containment levels, outermost first
    pub fn hierarchy(&self) -> &'static [&'static str] {
        match self {
            GeoLevel::Block => &["state", "county", "tract", "block"],
            GeoLevel::BlockGroup => &["state", "county", "tract", "block group"],
            GeoLevel::Tract => &["state", "county", "tract"],
            GeoLevel::Place => &["state", "place"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeoLevel::Block => "block",
            GeoLevel::BlockGroup => "blockgroup",
            GeoLevel::Tract => "tract",
            GeoLevel::Place => "place",
        }
    }
}

impl FromStr for GeoLevel {
    type Err = ConfigError;

    /// Accepts `block`, `blockgroup`, `block group`, `block_group`, `tract`,
    /// `place` and the plural of each
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);

        match singular {
            "block" => Ok(GeoLevel::Block),
            "blockgroup" | "block group" | "block_group" => Ok(GeoLevel::BlockGroup),
            "tract" => Ok(GeoLevel::Tract),
            "place" => Ok(GeoLevel::Place),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `for`/`in` geography predicate of a survey query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoClause {
    /// Innermost level with a wildcard, e.g. "tract:*"
    #[serde(rename = "for")]
    pub for_target: String,

    /// Outer constraints, outermost first, e.g. ["state:25", "county:*"]
    #[serde(rename = "in")]
    pub in_constraints: Vec<String>,
}

/// Build the geography predicate for a level within one state
pub fn geography_clause(level: GeoLevel, state_fips: &str) -> GeoClause {
    let hierarchy = level.hierarchy();
    let (innermost, outer) = hierarchy.split_last().unwrap_or((&"state", &[][..]));

    let in_constraints = outer
        .iter()
        .map(|geo| {
            if *geo == "state" {
                format!("state:{}", state_fips)
            } else {
                format!("{}:*", geo)
            }
        })
        .collect();

    GeoClause {
        for_target: format!("{}:*", innermost),
        in_constraints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_aliases() {
        for alias in [
            "blockgroup",
            "blockgroups",
            "block group",
            "block groups",
            "block_group",
            "Block_Groups",
        ] {
            assert_eq!(alias.parse::<GeoLevel>().unwrap(), GeoLevel::BlockGroup);
        }
        assert_eq!("blocks".parse::<GeoLevel>().unwrap(), GeoLevel::Block);
        assert_eq!("tracts".parse::<GeoLevel>().unwrap(), GeoLevel::Tract);
        assert_eq!("places".parse::<GeoLevel>().unwrap(), GeoLevel::Place);
    }

    #[test]
    fn test_unknown_level() {
        assert!("county".parse::<GeoLevel>().is_err());
    }

    #[test]
    fn test_tract_clause() {
        let clause = geography_clause(GeoLevel::Tract, "25");
        assert_eq!(clause.for_target, "tract:*");
        assert_eq!(clause.in_constraints, vec!["state:25", "county:*"]);
    }

    #[test]
    fn test_place_clause() {
        let clause = geography_clause(GeoLevel::Place, "06");
        assert_eq!(clause.for_target, "place:*");
        assert_eq!(clause.in_constraints, vec!["state:06"]);
    }

    #[test]
    fn test_block_group_clause() {
        let clause = geography_clause(GeoLevel::BlockGroup, "25");
        assert_eq!(clause.for_target, "block group:*");
        assert_eq!(
            clause.in_constraints,
            vec!["state:25", "county:*", "tract:*"]
        );
    }
}
