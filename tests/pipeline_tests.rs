mod common;

use census_fields::categories::RawCategory;
use census_fields::census::RawTable;
use census_fields::pipeline::{collect_census_fields, plan_collection, CensusRequest};
use census_fields::planner::GeoLevel;
use census_fields::utils::error::{CensusError, ConfigError, QueryError};
use common::{config, geoids, income_category, population_category, MockSource};
use pretty_assertions::assert_eq;

fn tract_request() -> CensusRequest {
    CensusRequest::new("25", GeoLevel::Tract)
}

#[test]
fn test_income_end_to_end() {
    let categories = config(vec![("income", income_category())]);
    let source = MockSource::new().with_response(
        "acs/acs5",
        2023,
        RawTable::new(geoids(&["25025000100", "25025000200"]))
            .with_column("B19013_001E", vec!["85000", "61000"])
            .with_column("C17002_001E", vec!["4000", "2500"])
            .with_column("C17002_002E", vec!["400", "500"]),
    );

    let frame = collect_census_fields(&source, &categories, &tract_request()).unwrap();

    assert_eq!(
        frame.column_names(),
        vec![
            "GEOID",
            "income_median",
            "income_050PercentPoverty",
            "income_050PercentPoverty_ratio"
        ]
    );
    assert!(!frame.has_column("income_median_ratio"));
    assert!(!frame.has_column("income_median_density"));
    assert_eq!(
        frame.value("income_050PercentPoverty_ratio", "25025000200"),
        Some(Some(0.2))
    );

    let calls = source.calls.borrow();
    assert_eq!(calls.len(), 1);
    let requested: Vec<&str> = calls[0].variables.iter().map(String::as_str).collect();
    assert_eq!(requested, vec!["B19013_001E", "C17002_001E", "C17002_002E"]);
}

#[test]
fn test_mixed_year_configuration_prefixes_all_names() {
    let categories = config(vec![
        (
            "a",
            RawCategory::new("decennial_dhc")
                .with_years(vec![2020])
                .with_field("total", vec!["P1_001N"])
                .with_universe("default", "DENSITY_ONLY"),
        ),
        (
            "b",
            RawCategory::new("decennial_dhc")
                .with_years(vec![2010, 2020])
                .with_field("white", vec!["P3_002N"])
                .with_universe("default", "NO_DENSITY_OR_RATIO"),
        ),
    ]);
    let source = MockSource::new()
        .with_response(
            "dec/dhc",
            2010,
            RawTable::new(geoids(&["1"])).with_column("P3_002N", vec!["7"]),
        )
        .with_response(
            "dec/dhc",
            2020,
            RawTable::new(geoids(&["1"]))
                .with_column("P1_001N", vec!["10"])
                .with_column("P3_002N", vec!["8"]),
        );

    let frame = collect_census_fields(&source, &categories, &tract_request()).unwrap();

    assert_eq!(
        frame.column_names(),
        vec!["GEOID", "2020_a_total", "2010_b_white", "2020_b_white"]
    );
    assert_eq!(frame.value("2010_b_white", "1"), Some(Some(7.0)));
    assert_eq!(source.call_count(), 2);
}

#[test]
fn test_configuration_errors_raised_before_any_fetch() {
    let categories = config(vec![
        ("population", population_category()),
        ("bad", RawCategory::new("pums").with_field("x", vec!["X"])),
    ]);
    let source = MockSource::new();

    let err = collect_census_fields(&source, &categories, &tract_request()).unwrap_err();

    assert!(matches!(
        err,
        CensusError::Config(ConfigError::UnrecognizedSource { .. })
    ));
    assert_eq!(source.call_count(), 0);
}

#[test]
fn test_missing_universe_raised_before_any_fetch() {
    let categories = config(vec![(
        "population",
        RawCategory::new("dhc").with_field("total", vec!["P1_001N"]),
    )]);
    let source = MockSource::new();

    let err = collect_census_fields(&source, &categories, &tract_request()).unwrap_err();

    assert!(matches!(
        err,
        CensusError::Config(ConfigError::MissingUniverseDefault { .. })
    ));
    assert_eq!(source.call_count(), 0);
}

#[test]
fn test_query_failure_names_partition_and_aborts() {
    let categories = config(vec![
        ("population", population_category()),
        ("income", income_category()),
    ]);
    // acs/acs5 2023 sorts first and has no canned response
    let source = MockSource::new().with_response(
        "dec/dhc",
        2020,
        RawTable::new(geoids(&["1"])).with_column("P1_001N", vec!["10"]),
    );

    let err = collect_census_fields(&source, &categories, &tract_request()).unwrap_err();

    match err {
        CensusError::Query { partition, source: QueryError::HttpStatus { status, .. } } => {
            assert_eq!(partition, "acs/acs5 2023");
            assert_eq!(status, 400);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(source.call_count(), 1);
}

#[test]
fn test_partitions_fetched_in_sorted_order() {
    let categories = config(vec![
        ("population", population_category()),
        ("income", income_category()),
    ]);
    let source = MockSource::new()
        .with_response(
            "dec/dhc",
            2020,
            RawTable::new(geoids(&["1"])).with_column("P1_001N", vec!["10"]),
        )
        .with_response(
            "acs/acs5",
            2023,
            RawTable::new(geoids(&["1"]))
                .with_column("B19013_001E", vec!["1"])
                .with_column("C17002_001E", vec!["1"])
                .with_column("C17002_002E", vec!["1"]),
        );

    collect_census_fields(&source, &categories, &tract_request()).unwrap();

    let order: Vec<String> = source
        .calls
        .borrow()
        .iter()
        .map(|plan| plan.partition.to_string())
        .collect();
    assert_eq!(order, vec!["acs/acs5 2023", "dec/dhc 2020"]);
}

#[test]
fn test_place_names_carried_into_table() {
    let categories = config(vec![("population", population_category())]);
    let source = MockSource::new().with_response(
        "dec/dhc",
        2020,
        RawTable::new(geoids(&["2507000"]))
            .with_names(vec!["Boston city, Massachusetts"])
            .with_column("P1_001N", vec!["675647"]),
    );
    let mut request = CensusRequest::new("25", GeoLevel::Place);
    request.add_place_names = true;

    let frame = collect_census_fields(&source, &categories, &request).unwrap();

    assert_eq!(frame.column_names(), vec!["GEOID", "NAME", "population_2020"]);
    assert!(source.calls.borrow()[0].requests_names());
}

#[test]
fn test_plan_collection_reports_naming() {
    let categories = config(vec![("income", income_category().with_years(vec![2022, 2023]))]);
    let plan = plan_collection(&categories, &tract_request()).unwrap();

    assert!(plan.year_prefixed);
    assert_eq!(plan.fields.len(), 4);
    assert_eq!(plan.queries.len(), 2);
}

#[test]
fn test_ratio_names_free_without_ratios() {
    let categories = config(vec![(
        "income",
        RawCategory::new("acs5")
            .with_years(vec![2023])
            .with_field("poor", vec!["C17002_002"])
            .with_field("poor_ratio", vec!["C17002_003"])
            .with_universe("default", "C17002_001"),
    )]);
    let mut request = tract_request();

    assert!(matches!(
        plan_collection(&categories, &request),
        Err(ConfigError::NameCollision { .. })
    ));

    request.compute_ratios = false;
    let source = MockSource::new().with_response(
        "acs/acs5",
        2023,
        RawTable::new(geoids(&["1"]))
            .with_column("C17002_001E", vec!["10"])
            .with_column("C17002_002E", vec!["2"])
            .with_column("C17002_003E", vec!["3"]),
    );

    let frame = collect_census_fields(&source, &categories, &request).unwrap();

    assert_eq!(
        frame.column_names(),
        vec!["GEOID", "income_poor", "income_poor_ratio"]
    );
    assert_eq!(frame.value("income_poor_ratio", "1"), Some(Some(3.0)));
}
