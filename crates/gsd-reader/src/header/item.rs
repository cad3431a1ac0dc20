//! Item descriptor table parsing.
//!
//! One fixed-size record per item follows the file descriptor.
//!
//! # Record Structure (64 bytes, little-endian)
//!
//! | Offset | Length | Field      | Description                          |
//! |--------|--------|------------|--------------------------------------|
//! | 0      | 1      | array      | Logical: item is an array            |
//! | 1-15   | 15     | name       | Blank-padded item name               |
//! | 16-17  | 2      | namelen    | Significant name length (i16)        |
//! | 18-27  | 10     | unit       | Blank-padded unit                    |
//! | 28-29  | 2      | unitlen    | Significant unit length (i16)        |
//! | 30-31  | 2      | data_type  | Type code 1-7 (i16)                  |
//! | 32-35  | 4      | location   | Absolute file position of the value  |
//! | 36-39  | 4      | length     | Value length in bytes                |
//! | 40-43  | 4      | no_dims    | Dimension count (negative means 0)   |
//! | 44-63  | 20     | dimnumbers | 5 × i32 item numbers giving extents  |

use std::io::Read;

use crate::bytes::{read_bool, read_i16, read_i32, read_i32_array, read_text, truncate_text};
use crate::error::{GsdError, Result};
use crate::types::GsdType;

use super::{FileHeader, read_block};

/// Length of one item descriptor record.
pub const ITEM_RECORD_LEN: usize = 64;

/// Width of the name field.
pub const NAME_LEN: usize = 15;

/// Width of the unit field.
pub const UNIT_LEN: usize = 10;

/// Maximum number of array dimensions.
pub const MAX_DIMS: usize = 5;

/// Item descriptor as decoded from the table, before dimensions are
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// 1-based item number.
    pub number: usize,
    pub name: String,
    pub unit: String,
    pub data_type: GsdType,
    pub is_array: bool,
    /// Byte offset relative to the start of the data segment.
    pub offset: usize,
    /// Value length in bytes.
    pub length: usize,
    /// Declared dimension count (0 for scalars).
    pub ndims: usize,
    /// Item numbers supplying each axis extent; only the first `ndims`
    /// entries are meaningful.
    pub dim_numbers: [i32; MAX_DIMS],
}

impl ItemRecord {
    /// Dimension references in axis order.
    #[must_use]
    pub fn dim_refs(&self) -> &[i32] {
        &self.dim_numbers[..self.ndims]
    }
}

/// Read the whole item table in one pass and parse it.
pub fn read_item_table<R: Read>(reader: &mut R, header: &FileHeader) -> Result<Vec<ItemRecord>> {
    let len = header
        .item_count
        .checked_mul(ITEM_RECORD_LEN)
        .ok_or_else(|| GsdError::invalid_format("item table size overflows"))?;
    let block = read_block(reader, len, "item table")?;
    parse_item_table(&block, header)
}

/// Parse `header.item_count` records, numbering them 1..=N in order.
pub fn parse_item_table(data: &[u8], header: &FileHeader) -> Result<Vec<ItemRecord>> {
    let mut records = Vec::with_capacity(header.item_count);

    for idx in 0..header.item_count {
        let offset = idx * ITEM_RECORD_LEN;
        let record = data
            .get(offset..offset + ITEM_RECORD_LEN)
            .ok_or_else(|| {
                GsdError::invalid_format(format!(
                    "item table truncated: record {} out of bounds",
                    idx + 1
                ))
            })?;
        records.push(parse_item_record(record, idx + 1, header)?);
    }

    Ok(records)
}

/// Parse one item record.
///
/// # Arguments
/// * `data` - The 64-byte record
/// * `number` - 1-based item number
/// * `header` - File header, for the data segment bounds
pub fn parse_item_record(data: &[u8], number: usize, header: &FileHeader) -> Result<ItemRecord> {
    let is_array = read_bool(data, 0)?;

    let name = truncate_text(read_text(data, 1, NAME_LEN)?, read_i16(data, 16)?);
    let unit = truncate_text(read_text(data, 18, UNIT_LEN)?, read_i16(data, 28)?);

    let code = read_i16(data, 30)?;
    let data_type = GsdType::from_code(code).ok_or(GsdError::InvalidType { number, code })?;

    let location = read_i32(data, 32)?;
    let length = read_i32(data, 36)?;
    let no_dims = read_i32(data, 40)?;
    let dim_numbers = read_i32_array::<MAX_DIMS>(data, 44)?;

    let length = usize::try_from(length).map_err(|_| {
        GsdError::invalid_format(format!("item {number} ({name}) has negative length {length}"))
    })?;

    // Absolute location, corrected to be relative to the segment start.
    let relative = i64::from(location) - header.data_start as i64;
    let offset = usize::try_from(relative)
        .ok()
        .filter(|&off| (off as u64).saturating_add(length as u64) <= header.data_len())
        .ok_or_else(|| {
            GsdError::invalid_format(format!(
                "item {number} ({name}) at location {location} with length {length} \
                 lies outside the data segment"
            ))
        })?;

    // Some writers store -1 for scalars.
    let ndims = if is_array {
        usize::try_from(no_dims).unwrap_or(0)
    } else {
        0
    };
    if ndims > MAX_DIMS {
        return Err(GsdError::invalid_format(format!(
            "item {number} ({name}) declares {ndims} dimensions, at most {MAX_DIMS} allowed"
        )));
    }

    tracing::trace!(
        number,
        name = %name,
        data_type = %data_type,
        is_array,
        offset,
        length,
        ndims,
        "Decoded item descriptor"
    );

    Ok(ItemRecord {
        number,
        name,
        unit,
        data_type,
        is_array,
        offset,
        length,
        ndims,
        dim_numbers,
    })
}
