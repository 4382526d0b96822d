//! CSV table output writer.

use super::{file_size, prepare_output_path};
use crate::table::Frame;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

/// Write a table as CSV to any writer.
///
/// Undefined cells are empty; NaN is written as `NaN`.
pub fn write_csv<W: Write>(frame: &Frame, writer: W) -> Result<(), OutputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(frame.column_names())?;

    for row in 0..frame.len() {
        let mut record = Vec::with_capacity(frame.columns().len() + 2);
        record.push(frame.geoids()[row].clone());
        if let Some(names) = frame.names() {
            record.push(names[row].clone().unwrap_or_default());
        }
        for column in frame.columns() {
            record.push(format_cell(column.values[row]));
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file
pub fn write_table_csv(frame: &Frame, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing CSV to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = std::fs::File::create(output_path)?;
    write_csv(frame, std::io::BufWriter::new(file))?;

    info!("CSV written successfully ({} bytes)", file_size(output_path));
    Ok(())
}

fn format_cell(cell: Option<f64>) -> String {
    match cell {
        None => String::new(),
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(None), "");
        assert_eq!(format_cell(Some(f64::NAN)), "NaN");
        assert_eq!(format_cell(Some(2.5)), "2.5");
        assert_eq!(format_cell(Some(3.0)), "3");
    }

    #[test]
    fn test_write_csv() {
        let mut frame = Frame::new(vec!["01".to_string(), "02".to_string()]);
        frame
            .push_column(Column::new("a", vec![Some(1.0), None]))
            .unwrap();

        let mut buffer = Vec::new();
        write_csv(&frame, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "GEOID,a\n01,1\n02,\n");
    }
}
