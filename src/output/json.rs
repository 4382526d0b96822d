//! JSON table output writer.
//!
//! Writes a collected table as `{ version, generated_at, columns, records }`.

use super::{file_size, frame_records, prepare_output_path};
use crate::table::Frame;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialized form of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Output schema version
    pub version: String,

    /// ISO 8601 timestamp
    pub generated_at: String,

    /// Column names in table order
    pub columns: Vec<String>,

    /// One object per row; undefined and NaN cells are `null`
    pub records: Vec<IndexMap<String, Value>>,
}

/// Build the document for a table
pub fn to_document(frame: &Frame) -> TableDocument {
    TableDocument {
        version: SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        columns: frame.column_names(),
        records: frame_records(frame),
    }
}

/// Write a table to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_table_json(frame: &Frame, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing table to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &to_document(frame))?;

    info!("Table written successfully ({} bytes)", file_size(output_path));
    Ok(())
}

/// Read a table document back from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_table_json(input_path: impl AsRef<Path>) -> Result<TableDocument, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading table from: {}", input_path.display());

    let file = File::open(input_path)?;
    let document: TableDocument = serde_json::from_reader(file)?;

    debug!(
        "Table loaded: version {}, {} rows",
        document.version,
        document.records.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use tempfile::NamedTempFile;

    fn create_test_frame() -> Frame {
        let mut frame = Frame::with_names(
            vec!["2507000".to_string(), "2511000".to_string()],
            vec!["Boston".to_string(), "Cambridge".to_string()],
        );
        frame
            .push_column(Column::new("population_total", vec![Some(675647.0), Some(118403.0)]))
            .unwrap();
        frame
    }

    #[test]
    fn test_write_and_read_table() {
        let frame = create_test_frame();
        let temp_file = NamedTempFile::new().unwrap();

        write_table_json(&frame, temp_file.path()).unwrap();
        let loaded = read_table_json(temp_file.path()).unwrap();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.columns, vec!["GEOID", "NAME", "population_total"]);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1]["NAME"], Value::String("Cambridge".to_string()));
    }

    #[test]
    fn test_record_keys_follow_column_order() {
        let document = to_document(&create_test_frame());
        let keys: Vec<&String> = document.records[0].keys().collect();
        assert_eq!(keys, document.columns.iter().collect::<Vec<_>>());
    }
}
