//! File descriptor (global header) parsing.
//!
//! # Structure (64 bytes, little-endian)
//!
//! | Offset | Length | Field        | Description                        |
//! |--------|--------|--------------|------------------------------------|
//! | 0-3    | 4      | version      | Format version (f32)               |
//! | 4-7    | 4      | max_no_items | Declared item capacity (i32)       |
//! | 8-11   | 4      | no_items     | Number of items in the file (i32)  |
//! | 12-15  | 4      | str_data     | First byte of the data segment     |
//! | 16-19  | 4      | end_data     | Last byte of the data segment      |
//! | 20-59  | 40     | comment      | Blank-padded label                 |
//! | 60-63  | 4      | size         | Total size (diagnostic only)       |

use std::io::Read;

use crate::bytes::{read_f32, read_i32, read_text};
use crate::error::{GsdError, Result};

use super::read_block;

/// Length of the file descriptor in bytes.
pub const FILE_HEADER_LEN: usize = 64;

/// Width of the label field.
pub const LABEL_LEN: usize = 40;

/// Global metadata from the file descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileHeader {
    /// GSD format version.
    pub version: f32,
    /// Declared maximum number of items.
    pub max_items: i32,
    /// Number of items actually present.
    pub item_count: usize,
    /// File position of the first data byte.
    pub data_start: u64,
    /// File position of the last data byte (inclusive).
    pub data_end: u64,
    /// Free-text label, trailing blanks removed.
    pub label: String,
    /// Redundant size field, only compared against the file length.
    pub total_size: i32,
}

impl FileHeader {
    /// Length of the data segment in bytes.
    #[must_use]
    pub fn data_len(&self) -> u64 {
        (self.data_end + 1).saturating_sub(self.data_start)
    }
}

/// Read and parse the file descriptor from the current position.
pub fn read_file_header<R: Read>(reader: &mut R) -> Result<FileHeader> {
    let block = read_block(reader, FILE_HEADER_LEN, "header")?;
    parse_file_header(&block)
}

/// Parse a file descriptor.
pub fn parse_file_header(data: &[u8]) -> Result<FileHeader> {
    if data.len() < FILE_HEADER_LEN {
        return Err(GsdError::invalid_format(format!(
            "header truncated: expected {FILE_HEADER_LEN} bytes, found {}",
            data.len()
        )));
    }

    let version = read_f32(data, 0)?;
    let max_items = read_i32(data, 4)?;
    let no_items = read_i32(data, 8)?;
    let str_data = read_i32(data, 12)?;
    let end_data = read_i32(data, 16)?;
    let label = read_text(data, 20, LABEL_LEN)?;
    let total_size = read_i32(data, 60)?;

    let item_count = usize::try_from(no_items)
        .map_err(|_| GsdError::invalid_format(format!("negative item count {no_items}")))?;
    let data_start = u64::try_from(str_data)
        .map_err(|_| GsdError::invalid_format(format!("negative data start {str_data}")))?;
    let data_end = u64::try_from(end_data)
        .ok()
        .filter(|&end| end + 1 >= data_start)
        .ok_or_else(|| {
            GsdError::invalid_format(format!(
                "data end {end_data} precedes data start {str_data}"
            ))
        })?;

    Ok(FileHeader {
        version,
        max_items,
        item_count,
        data_start,
        data_end,
        label,
        total_size,
    })
}
