//! Per-field value and ratio columns.

use crate::census::RawTable;
use crate::resolver::{Partition, ResolvedField};
use crate::utils::error::AggregateError;

/// Coerce one raw cell to a number.
///
/// A null cell becomes NaN; text that is not a number is an error naming
/// the code and unit.
pub fn parse_numeric(code: &str, geoid: &str, cell: Option<&str>) -> Result<f64, AggregateError> {
    match cell {
        None => Ok(f64::NAN),
        Some(text) => text.trim().parse::<f64>().map_err(|_| AggregateError::NonNumeric {
            code: code.to_string(),
            geoid: geoid.to_string(),
            value: text.to_string(),
        }),
    }
}

/// One raw code as numbers, row-aligned with the table
pub fn numeric_column(raw: &RawTable, code: &str, partition: &Partition) -> Result<Vec<f64>, AggregateError> {
    let cells = raw.column(code).ok_or_else(|| AggregateError::MissingCode {
        code: code.to_string(),
        partition: partition.to_string(),
    })?;

    cells
        .iter()
        .zip(&raw.geoids)
        .map(|(cell, geoid)| parse_numeric(code, geoid, cell.as_deref()))
        .collect()
}

/// Row-wise sum of a field's codes.
///
/// Null cells are skipped, so a row whose codes are all null sums to zero.
/// Text that is not a number is still an error.
pub fn sum_values(raw: &RawTable, field: &ResolvedField) -> Result<Vec<f64>, AggregateError> {
    let mut totals = vec![0.0; raw.len()];

    for code in &field.sum_codes {
        let cells = raw.column(code).ok_or_else(|| AggregateError::MissingCode {
            code: code.to_string(),
            partition: field.partition.to_string(),
        })?;

        for ((total, cell), geoid) in totals.iter_mut().zip(cells).zip(&raw.geoids) {
            if let Some(text) = cell.as_deref() {
                *total += parse_numeric(code, geoid, Some(text))?;
            }
        }
    }

    Ok(totals)
}

/// Row-wise `value / universe`, or `None` when the field has no concrete
/// universe.
///
/// Division keeps float semantics: 0/0 is NaN and x/0 is infinite.
pub fn ratio_values(
    raw: &RawTable,
    field: &ResolvedField,
    values: &[f64],
) -> Result<Option<Vec<f64>>, AggregateError> {
    let Some(code) = field.universe.code() else {
        return Ok(None);
    };

    let universe = numeric_column(raw, code, &field.partition)?;
    Ok(Some(
        values
            .iter()
            .zip(universe)
            .map(|(value, total)| value / total)
            .collect(),
    ))
}
