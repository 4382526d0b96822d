use crate::categories::{default_categories, load_categories, CategoryConfig, DEFAULT_CATEGORIES_TOML};
use crate::resolver::resolve_categories;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Load a category configuration file, or the built-in set when no path is given
pub fn load_config(path: Option<&Path>) -> Result<CategoryConfig> {
    match path {
        Some(path) => load_categories(path)
            .with_context(|| format!("Failed to load categories from {}", path.display())),
        None => {
            info!("Using built-in categories");
            default_categories().context("Built-in categories are invalid")
        }
    }
}

/// Validate a category configuration and list the columns it produces
pub fn validate_config(path: Option<PathBuf>) -> Result<()> {
    match &path {
        Some(path) => println!("Validating categories: {}", path.display()),
        None => println!("Validating built-in categories"),
    }

    let categories = load_config(path.as_deref())?;
    let fields = resolve_categories(&categories).context("Invalid category configuration")?;

    println!("✓ Valid category configuration");
    println!("  Categories: {}", categories.len());
    println!("  Fields: {}", fields.len());
    println!();

    for field in &fields {
        let mut columns = vec![field.name.clone()];
        if field.universe.has_ratio() {
            columns.push(field.ratio_column());
        }
        if field.universe.has_density() {
            columns.push(field.density_column());
        }
        println!(
            "  {:<40} {:<16} {}",
            field.name,
            field.partition.to_string(),
            columns.join(", ")
        );
    }

    Ok(())
}

/// Write the built-in configuration as a starting point
pub fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory {}", parent.display()))?;
    }

    std::fs::write(&path, DEFAULT_CATEGORIES_TOML)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Category configuration written to: {}", path.display());
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("census-fields v{}", env!("CARGO_PKG_VERSION"));
    println!("Output Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Fetch US Census survey fields, derive ratios and densities,");
    println!("and join them with boundary shapes.");
}
