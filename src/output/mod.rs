//! Output writers for collected tables.
//!
//! This module handles writing data to disk in various formats:
//! - JSON documents (columns plus records)
//! - CSV tables
//! - GeoJSON feature collections for tables joined with geometry

pub mod csv;
pub mod geojson;
pub mod json;

use crate::table::Frame;
use crate::utils::config::{GEOID_COLUMN, NAME_COLUMN};
use crate::utils::error::OutputError;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::path::Path;

// Re-export main functions
pub use self::csv::{write_csv, write_table_csv};
pub use self::geojson::{to_feature_collection, write_geojson};
pub use self::json::{read_table_json, to_document, write_table_json, TableDocument};

/// One record per row, keyed by column name in column order.
///
/// Undefined and non-finite cells become `null`.
pub fn frame_records(frame: &Frame) -> Vec<IndexMap<String, Value>> {
    (0..frame.len())
        .map(|row| {
            let mut record = IndexMap::new();
            record.insert(
                GEOID_COLUMN.to_string(),
                Value::String(frame.geoids()[row].clone()),
            );
            if let Some(names) = frame.names() {
                record.insert(
                    NAME_COLUMN.to_string(),
                    names[row].clone().map(Value::String).unwrap_or(Value::Null),
                );
            }
            for column in frame.columns() {
                record.insert(column.name.clone(), cell_value(column.values[row]));
            }
            record
        })
        .collect()
}

fn cell_value(cell: Option<f64>) -> Value {
    cell.and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Validate an output path and create missing parent directories
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or parent cannot be created
pub fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    Ok(())
}

/// File size in bytes, 0 if unknown
pub(crate) fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_prepare_output_path_empty() {
        assert!(prepare_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_prepare_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(prepare_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_prepare_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b/table.json");
        prepare_output_path(&nested).unwrap();
        assert!(temp_dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_records_null_for_undefined_and_nan() {
        let mut frame = Frame::new(vec!["1".to_string(), "2".to_string()]);
        frame
            .push_column(Column::new("x", vec![Some(f64::NAN), None]))
            .unwrap();

        let records = frame_records(&frame);
        assert_eq!(records[0]["GEOID"], Value::String("1".to_string()));
        assert_eq!(records[0]["x"], Value::Null);
        assert_eq!(records[1]["x"], Value::Null);
    }
}
