//! GeoJSON output for tables joined with geometry.

use super::{file_size, frame_records, prepare_output_path};
use crate::density::GeoFrame;
use crate::utils::error::OutputError;
use log::info;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// One feature per row; properties follow column order, rows without
/// geometry get a `null` geometry
pub fn to_feature_collection(geo: &GeoFrame) -> Value {
    let features: Vec<Value> = frame_records(&geo.frame)
        .into_iter()
        .zip(&geo.geometries)
        .map(|(record, geometry)| {
            let properties: Map<String, Value> = record.into_iter().collect();
            json!({
                "type": "Feature",
                "geometry": geometry.clone().unwrap_or(Value::Null),
                "properties": properties,
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write a joined table to a GeoJSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_geojson(geo: &GeoFrame, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing GeoJSON to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    serde_json::to_writer(BufWriter::new(file), &to_feature_collection(geo))?;

    info!("GeoJSON written successfully ({} bytes)", file_size(output_path));
    Ok(())
}
