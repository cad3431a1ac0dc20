//! GSD header parsing.
//!
//! This module handles the two fixed-layout parts at the front of a GSD
//! file:
//! - The file descriptor (global metadata)
//! - The item descriptor table (one record per item)

pub mod file;
pub mod item;

use std::io::Read;

use crate::error::{GsdError, Result};

pub use file::{FILE_HEADER_LEN, FileHeader, LABEL_LEN, parse_file_header, read_file_header};
pub use item::{
    ITEM_RECORD_LEN, ItemRecord, MAX_DIMS, NAME_LEN, UNIT_LEN, parse_item_record,
    parse_item_table, read_item_table,
};

/// Read exactly `len` bytes, reporting a short read as a truncated `what`.
pub(crate) fn read_block<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(GsdError::invalid_format(format!(
            "{what} truncated: expected {len} bytes, found {}",
            buf.len()
        )));
    }
    Ok(buf)
}
