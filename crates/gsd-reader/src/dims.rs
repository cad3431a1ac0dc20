//! Dimension resolution for array items.
//!
//! Array extents are not stored with the array: each axis names a scalar
//! integer item whose value is the extent. Resolution runs once all records
//! are decoded and the segment exists, and only reads from the record list.

use crate::error::{GsdError, Result};
use crate::header::ItemRecord;
use crate::segment::DataSegment;
use crate::types::{Dimension, GsdItem, GsdValue};

/// Resolve every array's dimensions and freeze the records into items.
pub fn resolve_dimensions(records: Vec<ItemRecord>, segment: &DataSegment) -> Result<Vec<GsdItem>> {
    let resolved = records
        .iter()
        .map(|record| {
            if record.is_array {
                resolve_item(record, &records, segment)
            } else {
                Ok(Vec::new())
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(records
        .into_iter()
        .zip(resolved)
        .map(|(record, dims)| GsdItem::new(record, dims, segment.clone()))
        .collect())
}

/// Resolve the axes of one array item, in declaration order.
fn resolve_item(
    record: &ItemRecord,
    records: &[ItemRecord],
    segment: &DataSegment,
) -> Result<Vec<Dimension>> {
    record
        .dim_refs()
        .iter()
        .enumerate()
        .map(|(axis, &reference)| resolve_axis(record, axis, reference, records, segment))
        .collect()
}

fn resolve_axis(
    record: &ItemRecord,
    axis: usize,
    reference: i32,
    records: &[ItemRecord],
    segment: &DataSegment,
) -> Result<Dimension> {
    let number = record.number;
    let target = usize::try_from(reference)
        .ok()
        .filter(|&n| n >= 1 && n <= records.len())
        .and_then(|n| records.get(n - 1))
        .ok_or_else(|| {
            GsdError::invalid_dimension(
                number,
                axis,
                format!("reference {reference} is outside 1..={}", records.len()),
            )
        })?;

    if target.number == number {
        return Err(GsdError::invalid_dimension(
            number,
            axis,
            "dimension refers to the item itself",
        ));
    }
    if target.is_array || !target.data_type.is_integer() {
        return Err(GsdError::invalid_dimension(
            number,
            axis,
            format!(
                "item {} ({}) is not a scalar integer",
                target.number, target.name
            ),
        ));
    }

    let value = segment
        .slice(target.offset, target.length)
        .and_then(|bytes| GsdValue::decode_scalar(target.data_type, bytes))
        .map_err(|e| {
            GsdError::invalid_dimension(
                number,
                axis,
                format!("cannot decode item {} ({}): {e}", target.number, target.name),
            )
        })?;
    let size = value
        .as_i64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| {
            GsdError::invalid_dimension(
                number,
                axis,
                format!("item {} ({}) holds negative extent {value:?}", target.number, target.name),
            )
        })?;

    tracing::trace!(
        item = number,
        axis,
        dim_item = target.number,
        size,
        "Resolved dimension"
    );

    Ok(Dimension {
        name: target.name.clone(),
        unit: target.unit.clone(),
        size,
    })
}
