//! Build per-partition working tables and merge them into one.

use super::fields::{ratio_values, sum_values};
use crate::census::RawTable;
use crate::resolver::{Partition, ResolvedField};
use crate::table::{Column, Frame};
use crate::utils::error::AggregateError;
use log::{debug, info};
use std::collections::BTreeMap;

/// Aggregation switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Emit `_ratio` columns for fields with a concrete universe
    pub compute_ratios: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            compute_ratios: true,
        }
    }
}

/// Compute every field from the raw partition responses and merge the
/// partitions into one table.
///
/// Columns follow field order, each field's ratio right after its value.
/// Partitions are merged with a full outer join in partition order, on the
/// identifier plus name when every partition carries names.
///
/// # Errors
/// * `AggregateError::MissingPartition` - no response for a field's partition
/// * `AggregateError::MissingCode` - a code is absent from its response
/// * `AggregateError::NonNumeric` - a value cannot be read as a number
pub fn aggregate(
    fields: &[ResolvedField],
    responses: &BTreeMap<Partition, RawTable>,
    options: AggregateOptions,
) -> Result<Frame, AggregateError> {
    let mut working: BTreeMap<&Partition, Frame> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();

    for field in fields {
        let raw = responses
            .get(&field.partition)
            .ok_or_else(|| AggregateError::MissingPartition(field.partition.to_string()))?;

        let frame = working
            .entry(&field.partition)
            .or_insert_with(|| base_frame(raw));

        let values = sum_values(raw, field)?;
        let ratios = if options.compute_ratios {
            ratio_values(raw, field, &values)?
        } else {
            None
        };

        frame.push_column(Column::new(field.name.clone(), present(&values)))?;
        order.push(field.name.clone());

        if let Some(ratios) = ratios {
            let ratio_name = field.ratio_column();
            frame.push_column(Column::new(ratio_name.clone(), present(&ratios)))?;
            order.push(ratio_name);
        }
    }

    debug!("Computed {} columns over {} partitions", order.len(), working.len());

    let mut merged = merge_partitions(working.into_values().collect())?;
    merged.reorder(&order);

    info!(
        "Aggregated table: {} rows, {} columns",
        merged.len(),
        merged.column_names().len()
    );
    Ok(merged)
}

/// Outer-join partition tables in the given order
pub fn merge_partitions(frames: Vec<Frame>) -> Result<Frame, AggregateError> {
    let on_names = !frames.is_empty() && frames.iter().all(Frame::has_names);

    let mut merged: Option<Frame> = None;
    for frame in frames {
        merged = Some(match merged {
            None => frame,
            Some(acc) => acc.outer_join(&frame, on_names)?,
        });
    }

    Ok(merged.unwrap_or_default())
}

/// Identifier (and name) columns of a partition, no values yet
fn base_frame(raw: &RawTable) -> Frame {
    match &raw.names {
        Some(names) => Frame::with_names(raw.geoids.clone(), names.clone()),
        None => Frame::new(raw.geoids.clone()),
    }
}

fn present(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}
