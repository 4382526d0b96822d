//! Boundary geometry: geographic units with a planar area.
//!
//! Geometry comes from outside (TIGER/Line shapes converted to GeoJSON in a
//! projected coordinate system). Area is computed in the file's own units;
//! whether those are meters or feet is the caller's concern.

use crate::utils::config::{GEOID_PROPERTY_CANDIDATES, NAME_COLUMN};
use crate::utils::error::GeometryError;
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A geographic unit with its boundary
#[derive(Debug, Clone, PartialEq)]
pub struct GeoUnit {
    pub geoid: String,
    pub name: Option<String>,

    /// Planar area in squared coordinate units
    pub area: f64,

    /// GeoJSON geometry object, passed through to output
    pub geometry: Option<Value>,
}

impl GeoUnit {
    pub fn new(geoid: impl Into<String>, area: f64) -> Self {
        Self {
            geoid: geoid.into(),
            name: None,
            area,
            geometry: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// All units of one state and level
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryTable {
    pub units: Vec<GeoUnit>,
}

impl GeometryTable {
    pub fn new(units: Vec<GeoUnit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Names can be joined on only if every unit has one
    pub fn has_names(&self) -> bool {
        !self.units.is_empty() && self.units.iter().all(|u| u.name.is_some())
    }
}

/// Load a GeoJSON FeatureCollection.
///
/// The identifier is read from `id_property` when given, otherwise from the
/// first of `GEOID`, `GEOID20`, `GEOID10` present on the feature.
pub fn load_geojson(path: impl AsRef<Path>, id_property: Option<&str>) -> Result<GeometryTable, GeometryError> {
    let path = path.as_ref();
    debug!("Reading geometry from: {}", path.display());

    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;
    let table = parse_feature_collection(&document, id_property)?;

    info!("Loaded {} geographic units from {}", table.len(), path.display());
    Ok(table)
}

pub fn parse_feature_collection(document: &Value, id_property: Option<&str>) -> Result<GeometryTable, GeometryError> {
    if document.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(GeometryError::InvalidFormat(
            "expected a FeatureCollection".to_string(),
        ));
    }

    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| GeometryError::InvalidFormat("missing 'features' array".to_string()))?;

    let mut units = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        let properties = feature.get("properties").and_then(Value::as_object);

        let geoid = properties
            .and_then(|props| match id_property {
                Some(key) => props.get(key),
                None => GEOID_PROPERTY_CANDIDATES.iter().find_map(|key| props.get(*key)),
            })
            .and_then(property_text)
            .ok_or(GeometryError::MissingIdentifier(index))?;

        let name = properties
            .and_then(|props| props.get(NAME_COLUMN))
            .and_then(property_text);

        let geometry = feature.get("geometry").filter(|g| !g.is_null()).cloned();
        let area = match &geometry {
            Some(geometry) => planar_area(geometry)?,
            None => {
                warn!("Feature {} ({}) has no geometry", index, geoid);
                f64::NAN
            }
        };

        units.push(GeoUnit {
            geoid,
            name,
            area,
            geometry,
        });
    }

    Ok(GeometryTable { units })
}

fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Planar area of a Polygon or MultiPolygon: outer rings minus holes
pub fn planar_area(geometry: &Value) -> Result<f64, GeometryError> {
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| GeometryError::InvalidFormat("geometry without type".to_string()))?;
    let coordinates = geometry
        .get("coordinates")
        .ok_or_else(|| GeometryError::InvalidFormat("geometry without coordinates".to_string()))?;

    match kind {
        "Polygon" => polygon_area(coordinates),
        "MultiPolygon" => as_array(coordinates)?
            .iter()
            .map(polygon_area)
            .sum(),
        other => Err(GeometryError::UnsupportedGeometry(other.to_string())),
    }
}

fn polygon_area(rings: &Value) -> Result<f64, GeometryError> {
    let mut area = 0.0;
    for (i, ring) in as_array(rings)?.iter().enumerate() {
        let ring_area = ring_area(ring)?.abs();
        if i == 0 {
            area += ring_area;
        } else {
            area -= ring_area;
        }
    }
    Ok(area)
}

/// Shoelace formula; sign depends on winding
fn ring_area(ring: &Value) -> Result<f64, GeometryError> {
    let points = as_array(ring)?
        .iter()
        .map(position)
        .collect::<Result<Vec<_>, _>>()?;

    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|((x1, y1), (x2, y2))| x1 * y2 - x2 * y1)
        .sum();

    Ok(twice_area / 2.0)
}

fn position(value: &Value) -> Result<(f64, f64), GeometryError> {
    let coords = as_array(value)?;
    match (
        coords.first().and_then(Value::as_f64),
        coords.get(1).and_then(Value::as_f64),
    ) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(GeometryError::InvalidFormat(format!("invalid position: {}", value))),
    }
}

fn as_array(value: &Value) -> Result<&Vec<Value>, GeometryError> {
    value
        .as_array()
        .ok_or_else(|| GeometryError::InvalidFormat(format!("expected an array, got: {}", value)))
}
