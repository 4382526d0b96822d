//! Fetch command implementation.
//!
//! The fetch command:
//! 1. Loads the category configuration
//! 2. Queries every (dataset, year) partition
//! 3. Aggregates fields and ratios into one table
//! 4. Optionally joins boundary geometry and derives densities
//! 5. Writes the output file

use super::models::{FetchArgs, OutputFormat};
use super::utils::load_config;
use crate::census::CensusClient;
use crate::density::{join_densities, load_geojson, DensitySelection, GeoFrame};
use crate::output::{write_geojson, write_table_csv, write_table_json};
use crate::pipeline::{collect_census_fields, CensusRequest};
use crate::planner::GeoLevel;
use crate::table::Frame;
use crate::utils::lookup_state;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the fetch command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid category configuration (before any query is sent)
/// * Survey API failures, naming the failed partition
/// * Geometry and file write errors
pub fn execute_fetch(args: FetchArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading categories...");
    let categories = load_config(args.config.as_deref())?;
    let state = lookup_state(&args.state)?;
    let level: GeoLevel = args.level.parse()?;

    let request = CensusRequest {
        state_fips: state.fips.to_string(),
        level,
        compute_ratios: args.compute_ratios,
        add_place_names: args.place_names,
    };
    debug!("Request: {:?}", request);

    if args.api_key.is_none() {
        warn!("No API key given; the Census API limits anonymous requests");
    }

    info!("Step 2/4: Querying {} {}s...", state.name, level);
    let mut client = CensusClient::new(args.api_key.clone()).context("Failed to create Census API client")?;
    if let Some(base_url) = &args.base_url {
        client = client.with_base_url(base_url.as_str());
    }

    let frame = collect_census_fields(&client, &categories, &request)
        .context("Failed to collect census fields")?;

    let joined = match &args.geometry {
        Some(path) => {
            info!("Step 3/4: Joining geometry from {}...", path.display());
            let geometry = load_geojson(path, args.geoid_property.as_deref())
                .with_context(|| format!("Failed to load geometry from {}", path.display()))?;

            let selection = match &args.density_fields {
                Some(columns) => DensitySelection::Explicit(columns),
                None => DensitySelection::Categories(&categories),
            };
            Some(join_densities(&geometry, &frame, selection).context("Failed to derive densities")?)
        }
        None => {
            info!("Step 3/4: Skipping geometry join (no --geometry)");
            None
        }
    };

    info!("Step 4/4: Writing {} output...", args.format);
    let table = joined.as_ref().map(|g| &g.frame).unwrap_or(&frame);
    match args.format {
        OutputFormat::Json => write_table_json(table, &args.output).context("Failed to write JSON")?,
        OutputFormat::Csv => write_table_csv(table, &args.output).context("Failed to write CSV")?,
        OutputFormat::Geojson => {
            let geo = joined
                .as_ref()
                .context("GeoJSON output needs --geometry")?;
            write_geojson(geo, &args.output).context("Failed to write GeoJSON")?;
        }
    }
    info!("✓ Table written to: {}", args.output.display());

    if args.print_summary {
        print_summary(table, joined.as_ref());
    }

    info!("Fetch completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Validate fetch arguments
///
/// **Public** - can be called before execute_fetch for early validation
pub fn validate_args(args: &FetchArgs) -> Result<()> {
    if args.state.trim().is_empty() {
        anyhow::bail!("State cannot be empty");
    }
    lookup_state(&args.state)?;
    args.level.parse::<GeoLevel>()?;

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.format == OutputFormat::Geojson && args.geometry.is_none() {
        anyhow::bail!("GeoJSON output needs --geometry");
    }

    if args.density_fields.is_some() && args.geometry.is_none() {
        anyhow::bail!("--density-fields needs --geometry");
    }

    if let Some(path) = &args.geometry {
        if !path.is_file() {
            anyhow::bail!("Geometry file not found: {}", path.display());
        }
    }

    if let Some(base_url) = &args.base_url {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("API base URL must start with http:// or https://");
        }
    }

    Ok(())
}

fn print_summary(table: &Frame, joined: Option<&GeoFrame>) {
    println!("\n{}", "=".repeat(80));
    println!("CENSUS FIELDS SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Rows:    {}", table.len());
    println!("Columns: {}", table.column_names().len());
    if let Some(geo) = joined {
        let without_geometry = geo.areas.iter().filter(|a| a.is_none()).count();
        println!("Rows without geometry: {}", without_geometry);
    }
    println!();

    for column in table.columns() {
        let defined: Vec<f64> = column
            .values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        let missing = column.values.len() - defined.len();

        if defined.is_empty() {
            println!("  {:<48} (no values, {} missing)", column.name, missing);
            continue;
        }

        let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
        let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = defined.iter().sum::<f64>() / defined.len() as f64;
        println!(
            "  {:<48} min {:>12.3}  mean {:>12.3}  max {:>12.3}  missing {}",
            column.name, min, mean, max, missing
        );
    }
    println!("{}", "=".repeat(80));
}
