//! Join census values with boundary geometry and derive densities.

use super::geometry::GeometryTable;
use crate::categories::CategoryConfig;
use crate::resolver::{density_columns, resolve_categories_with};
use crate::table::{Column, Frame};
use crate::utils::config::DENSITY_SUFFIX;
use crate::utils::error::CensusError;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Which value columns get a `_density` column
#[derive(Debug, Clone, Copy)]
pub enum DensitySelection<'a> {
    /// Caller-supplied column names
    Explicit(&'a [String]),

    /// Re-derived from the category configuration the table was built from
    Categories(&'a CategoryConfig),
}

impl DensitySelection<'_> {
    pub fn columns(&self) -> Result<Vec<String>, CensusError> {
        match self {
            DensitySelection::Explicit(columns) => Ok(columns.to_vec()),
            DensitySelection::Categories(categories) => {
                let fields = resolve_categories_with(categories, false)?;
                Ok(density_columns(&fields))
            }
        }
    }
}

/// Census table joined with geometry, row-aligned
#[derive(Debug, Clone)]
pub struct GeoFrame {
    pub frame: Frame,

    /// Planar area per row; `None` for rows with no geometry
    pub areas: Vec<Option<f64>>,
    pub geometries: Vec<Option<Value>>,
}

impl GeoFrame {
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}

/// Full outer join of geometry and census table, then a density column
/// `<col>_density = value / area` right after each selected column.
///
/// The join uses the identifier, plus the name when both sides carry names.
/// Rows present on only one side get undefined cells, and a repeated
/// identifier keeps one row per matching pair, each with its own unit's area. Selected columns that
/// are not in the table are skipped.
///
/// # Errors
/// * `CensusError::Config` - the category configuration is invalid
/// * `CensusError::Aggregate` - a density column name already exists
pub fn join_densities(
    geometry: &GeometryTable,
    census: &Frame,
    selection: DensitySelection<'_>,
) -> Result<GeoFrame, CensusError> {
    let selected: HashSet<String> = selection.columns()?.into_iter().collect();
    let on_names = geometry.has_names() && census.has_names();

    let geo_frame = geometry_frame(geometry);
    let (mut frame, rows) = geo_frame.outer_join_rows(census, on_names)?;

    let mut areas = Vec::with_capacity(frame.len());
    let mut geometries = Vec::with_capacity(frame.len());
    for (unit, _) in rows {
        match unit.map(|i| &geometry.units[i]) {
            Some(unit) => {
                areas.push(Some(unit.area));
                geometries.push(unit.geometry.clone());
            }
            None => {
                areas.push(None);
                geometries.push(None);
            }
        }
    }

    let unmatched = areas.iter().filter(|a| a.is_none()).count();
    if unmatched > 0 {
        warn!("{} census rows have no matching geometry", unmatched);
    }

    let targets: Vec<String> = frame
        .columns()
        .iter()
        .map(|c| c.name.clone())
        .filter(|name| selected.contains(name))
        .collect();

    for name in &targets {
        let values = match frame.column(name) {
            Some(column) => density_values(&column.values, &areas),
            None => continue,
        };
        let density = Column::new(format!("{}{}", name, DENSITY_SUFFIX), values);
        frame.insert_column_after(name, density)?;
        debug!("Added density for {}", name);
    }

    info!(
        "Joined {} rows with geometry, {} density columns",
        frame.len(),
        targets.len()
    );

    Ok(GeoFrame {
        frame,
        areas,
        geometries,
    })
}

/// Identifier and name columns of the geometry side
fn geometry_frame(geometry: &GeometryTable) -> Frame {
    let geoids = geometry.units.iter().map(|u| u.geoid.clone()).collect();
    if geometry.has_names() {
        let names = geometry
            .units
            .iter()
            .map(|u| u.name.clone().unwrap_or_default())
            .collect();
        Frame::with_names(geoids, names)
    } else {
        Frame::new(geoids)
    }
}

/// Value over area; undefined when either side is undefined
fn density_values(values: &[Option<f64>], areas: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(areas)
        .map(|(value, area)| match (value, area) {
            (Some(value), Some(area)) => Some(value / area),
            _ => None,
        })
        .collect()
}
