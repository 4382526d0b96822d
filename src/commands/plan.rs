//! Plan command: show what a fetch would query, without querying.

use super::models::PlanArgs;
use super::utils::load_config;
use crate::census::{endpoint, query_params};
use crate::pipeline::{plan_collection, CensusRequest};
use crate::planner::GeoLevel;
use crate::utils::config::CENSUS_API_BASE_URL;
use crate::utils::lookup_state;
use anyhow::{Context, Result};

/// Execute the plan command
pub fn execute_plan(args: PlanArgs) -> Result<()> {
    let categories = load_config(args.config.as_deref())?;
    let state = lookup_state(&args.state)?;
    let level: GeoLevel = args.level.parse()?;

    let mut request = CensusRequest::new(state.fips, level);
    request.add_place_names = args.place_names;

    let plan = plan_collection(&categories, &request).context("Invalid category configuration")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan.queries)?);
        return Ok(());
    }

    println!("State: {} ({}), level: {}", state.name, state.fips, level);
    println!(
        "Naming: {}",
        if plan.year_prefixed {
            "{year}_{category}_{field}"
        } else {
            "{category}_{field}"
        }
    );
    println!();

    println!("Fields ({}):", plan.fields.len());
    for field in &plan.fields {
        println!(
            "  {:<40} {:<16} sum({}) / {}",
            field.name,
            field.partition.to_string(),
            field.sum_codes.join(" + "),
            field.universe
        );
    }
    println!();

    println!("Queries ({}):", plan.queries.len());
    for query in &plan.queries {
        let params = query_params(query, None)
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        println!("  {}?{}", endpoint(CENSUS_API_BASE_URL, query), params);
    }

    Ok(())
}
