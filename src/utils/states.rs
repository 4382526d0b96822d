//! State lookup: postal abbreviation, name or FIPS code to a two-digit FIPS code.

use super::error::ConfigError;

/// A US state or state-equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub abbr: &'static str,
    pub name: &'static str,
    pub fips: &'static str,
}

const fn state(abbr: &'static str, name: &'static str, fips: &'static str) -> State {
    State { abbr, name, fips }
}

/// The 50 states, DC and Puerto Rico
pub const STATES: &[State] = &[
    state("AL", "Alabama", "01"),
    state("AK", "Alaska", "02"),
    state("AZ", "Arizona", "04"),
    state("AR", "Arkansas", "05"),
    state("CA", "California", "06"),
    state("CO", "Colorado", "08"),
    state("CT", "Connecticut", "09"),
    state("DE", "Delaware", "10"),
    state("DC", "District of Columbia", "11"),
    state("FL", "Florida", "12"),
    state("GA", "Georgia", "13"),
    state("HI", "Hawaii", "15"),
    state("ID", "Idaho", "16"),
    state("IL", "Illinois", "17"),
    state("IN", "Indiana", "18"),
    state("IA", "Iowa", "19"),
    state("KS", "Kansas", "20"),
    state("KY", "Kentucky", "21"),
    state("LA", "Louisiana", "22"),
    state("ME", "Maine", "23"),
    state("MD", "Maryland", "24"),
    state("MA", "Massachusetts", "25"),
    state("MI", "Michigan", "26"),
    state("MN", "Minnesota", "27"),
    state("MS", "Mississippi", "28"),
    state("MO", "Missouri", "29"),
    state("MT", "Montana", "30"),
    state("NE", "Nebraska", "31"),
    state("NV", "Nevada", "32"),
    state("NH", "New Hampshire", "33"),
    state("NJ", "New Jersey", "34"),
    state("NM", "New Mexico", "35"),
    state("NY", "New York", "36"),
    state("NC", "North Carolina", "37"),
    state("ND", "North Dakota", "38"),
    state("OH", "Ohio", "39"),
    state("OK", "Oklahoma", "40"),
    state("OR", "Oregon", "41"),
    state("PA", "Pennsylvania", "42"),
    state("RI", "Rhode Island", "44"),
    state("SC", "South Carolina", "45"),
    state("SD", "South Dakota", "46"),
    state("TN", "Tennessee", "47"),
    state("TX", "Texas", "48"),
    state("UT", "Utah", "49"),
    state("VT", "Vermont", "50"),
    state("VA", "Virginia", "51"),
    state("WA", "Washington", "53"),
    state("WV", "West Virginia", "54"),
    state("WI", "Wisconsin", "55"),
    state("WY", "Wyoming", "56"),
    state("PR", "Puerto Rico", "72"),
];

/// Resolve a state given as abbreviation ("MA"), name ("Massachusetts")
/// or FIPS code ("25" or "025")
pub fn lookup_state(query: &str) -> Result<&'static State, ConfigError> {
    let query = query.trim();

    if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        let fips = format!("{:0>2}", query.trim_start_matches('0'));
        return STATES
            .iter()
            .find(|s| s.fips == fips)
            .ok_or_else(|| ConfigError::UnknownState(query.to_string()));
    }

    STATES
        .iter()
        .find(|s| s.abbr.eq_ignore_ascii_case(query) || s.name.eq_ignore_ascii_case(query))
        .ok_or_else(|| ConfigError::UnknownState(query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_abbreviation() {
        assert_eq!(lookup_state("MA").unwrap().fips, "25");
        assert_eq!(lookup_state("ma").unwrap().fips, "25");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup_state("New York").unwrap().fips, "36");
        assert_eq!(lookup_state("district of columbia").unwrap().fips, "11");
    }

    #[test]
    fn test_lookup_by_fips() {
        assert_eq!(lookup_state("6").unwrap().abbr, "CA");
        assert_eq!(lookup_state("06").unwrap().abbr, "CA");
        assert_eq!(lookup_state("72").unwrap().abbr, "PR");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup_state("Atlantis").is_err());
        assert!(lookup_state("03").is_err());
        assert!(lookup_state("").is_err());
    }
}
