//! census-fields CLI
//!
//! Fetches US Census survey fields for every unit of a state, derives
//! ratios and densities, and writes them as JSON, CSV or GeoJSON.

use anyhow::Result;
use census_fields::commands::{
    display_version, execute_fetch, execute_plan, init_config, validate_args, validate_config, FetchArgs,
    OutputFormat, PlanArgs,
};
use census_fields::utils::config::API_KEY_ENV;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// census-fields - Census survey fields per geographic unit
#[derive(Parser, Debug)]
#[command(name = "census-fields")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch fields for every unit of a state
    Fetch {
        /// State abbreviation, name or FIPS code
        #[arg(short, long)]
        state: String,

        /// Geography level: block, blockgroup, tract or place
        #[arg(short, long, default_value = "tract")]
        level: String,

        /// Category configuration (TOML or JSON); built-in set if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Census API key
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,

        /// Census API root URL
        #[arg(long)]
        base_url: Option<String>,

        /// Skip ratio columns
        #[arg(long)]
        no_ratios: bool,

        /// Include place names (place level only)
        #[arg(long)]
        place_names: bool,

        /// GeoJSON boundaries in a projected CRS; enables density columns
        #[arg(short, long)]
        geometry: Option<PathBuf>,

        /// Feature property holding the identifier
        #[arg(long)]
        geoid_property: Option<String>,

        /// Columns to derive densities for (default: from the configuration)
        #[arg(long, value_delimiter = ',')]
        density_fields: Option<Vec<String>>,

        /// Output path
        #[arg(short, long, default_value = "census_fields.json")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print a column summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Show the fields and queries a fetch would run, without querying
    Plan {
        /// State abbreviation, name or FIPS code
        #[arg(short, long)]
        state: String,

        /// Geography level
        #[arg(short, long, default_value = "tract")]
        level: String,

        /// Category configuration; built-in set if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Include place names (place level only)
        #[arg(long)]
        place_names: bool,

        /// Print the planned queries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a category configuration
    Validate {
        /// Category configuration; built-in set if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the built-in category configuration to a file
    InitConfig {
        /// Destination path
        #[arg(default_value = "census_fields.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Fetch {
            state,
            level,
            config,
            api_key,
            base_url,
            no_ratios,
            place_names,
            geometry,
            geoid_property,
            density_fields,
            output,
            format,
            summary,
        } => {
            let args = FetchArgs {
                config,
                state,
                level,
                api_key,
                base_url,
                compute_ratios: !no_ratios,
                place_names,
                geometry,
                geoid_property,
                density_fields,
                output,
                format,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_fetch(args)?;
        }

        Commands::Plan {
            state,
            level,
            config,
            place_names,
            json,
        } => {
            execute_plan(PlanArgs {
                config,
                state,
                level,
                place_names,
                json,
            })?;
        }

        Commands::Validate { config } => {
            validate_config(config)?;
        }

        Commands::InitConfig { path, force } => {
            init_config(path, force)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
