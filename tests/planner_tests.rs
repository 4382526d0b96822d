mod common;

use census_fields::categories::{default_categories, RawCategory};
use census_fields::planner::{plan_queries, GeoLevel, PlanOptions};
use census_fields::resolver::{resolve_categories, Partition};
use common::{config, income_category, population_category};
use pretty_assertions::assert_eq;

fn options(level: GeoLevel) -> PlanOptions {
    PlanOptions {
        level,
        state_fips: "25".to_string(),
        include_names: false,
    }
}

#[test]
fn test_one_query_per_partition() {
    let fields = resolve_categories(&default_categories().unwrap()).unwrap();
    let plans = plan_queries(&fields, &options(GeoLevel::Tract));

    let partitions: Vec<&Partition> = plans.iter().map(|p| &p.partition).collect();
    assert_eq!(
        partitions,
        vec![&Partition::new("acs/acs5", 2023), &Partition::new("dec/dhc", 2020)]
    );
}

#[test]
fn test_variables_are_minimal() {
    let categories = config(vec![
        ("population", population_category()),
        ("income", income_category()),
    ]);
    let fields = resolve_categories(&categories).unwrap();

    let plans = plan_queries(&fields, &options(GeoLevel::BlockGroup));

    let acs: Vec<&str> = plans[0].variables.iter().map(String::as_str).collect();
    assert_eq!(acs, vec!["B19013_001E", "C17002_001E", "C17002_002E"]);

    let dec: Vec<&str> = plans[1].variables.iter().map(String::as_str).collect();
    assert_eq!(dec, vec!["P1_001N"]);
}

#[test]
fn test_shared_codes_collapse() {
    let categories = config(vec![(
        "race",
        RawCategory::new("dhc")
            .with_field("black", vec!["P3_003N"])
            .with_field("nonWhite", vec!["P3_003N", "P3_004N"])
            .with_universe("default", "P3_001N"),
    )]);
    let fields = resolve_categories(&categories).unwrap();

    let plans = plan_queries(&fields, &options(GeoLevel::Block));
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].variables.len(), 3);
}

#[test]
fn test_geography_clause_and_hierarchy() {
    let fields = resolve_categories(&config(vec![("population", population_category())])).unwrap();
    let plans = plan_queries(&fields, &options(GeoLevel::Block));

    assert_eq!(plans[0].geography.for_target, "block:*");
    assert_eq!(
        plans[0].geography.in_constraints,
        vec!["state:25", "county:*", "tract:*"]
    );
    assert_eq!(plans[0].hierarchy, vec!["state", "county", "tract", "block"]);
}

#[test]
fn test_place_names_only_at_place_level() {
    let fields = resolve_categories(&config(vec![("population", population_category())])).unwrap();

    let place = plan_queries(
        &fields,
        &PlanOptions {
            level: GeoLevel::Place,
            state_fips: "25".to_string(),
            include_names: true,
        },
    );
    assert!(place[0].requests_names());

    let tract = plan_queries(
        &fields,
        &PlanOptions {
            level: GeoLevel::Tract,
            state_fips: "25".to_string(),
            include_names: true,
        },
    );
    assert!(!tract[0].requests_names());
}

#[test]
fn test_plan_independent_of_field_order() {
    let forward = resolve_categories(&config(vec![
        ("population", population_category()),
        ("income", income_category()),
    ]))
    .unwrap();
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(
        plan_queries(&forward, &options(GeoLevel::Tract)),
        plan_queries(&backward, &options(GeoLevel::Tract))
    );
}
