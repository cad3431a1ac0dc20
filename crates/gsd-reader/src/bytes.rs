//! Little-endian primitive decoding.
//!
//! GSD files were written on VAX hardware, so every multi-byte field is
//! little-endian regardless of the host. All readers check bounds and fail
//! with [`GsdError::BufferUnderrun`] instead of panicking.

use crate::error::{GsdError, Result};

/// Copy `N` bytes starting at `offset`.
fn take<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| data.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| GsdError::underrun(offset, N, data.len().saturating_sub(offset)))
}

/// Read a signed byte.
pub fn read_i8(data: &[u8], offset: usize) -> Result<i8> {
    take::<1>(data, offset).map(i8::from_le_bytes)
}

/// Read a one-byte logical. Any non-zero byte is true.
pub fn read_bool(data: &[u8], offset: usize) -> Result<bool> {
    take::<1>(data, offset).map(|b| b[0] != 0)
}

/// Read a little-endian i16.
pub fn read_i16(data: &[u8], offset: usize) -> Result<i16> {
    take::<2>(data, offset).map(i16::from_le_bytes)
}

/// Read a little-endian i32.
pub fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    take::<4>(data, offset).map(i32::from_le_bytes)
}

/// Read a little-endian IEEE f32.
pub fn read_f32(data: &[u8], offset: usize) -> Result<f32> {
    take::<4>(data, offset).map(f32::from_le_bytes)
}

/// Read a little-endian IEEE f64.
pub fn read_f64(data: &[u8], offset: usize) -> Result<f64> {
    take::<8>(data, offset).map(f64::from_le_bytes)
}

/// Read `N` consecutive little-endian i32 values.
pub fn read_i32_array<const N: usize>(data: &[u8], offset: usize) -> Result<[i32; N]> {
    let mut out = [0i32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = read_i32(data, offset.saturating_add(i * 4))?;
    }
    Ok(out)
}

/// Read a fixed-width text field, trimming trailing blanks and NULs.
///
/// Each byte maps to one Latin-1 character, so character counts match the
/// byte lengths stored on disk.
pub fn read_text(data: &[u8], offset: usize, width: usize) -> Result<String> {
    let slice = offset
        .checked_add(width)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| GsdError::underrun(offset, width, data.len().saturating_sub(offset)))?;
    let text: String = slice.iter().map(|&b| char::from(b)).collect();
    Ok(text.trim_end_matches([' ', '\0']).to_string())
}

/// Truncate trimmed text to the explicit length stored next to it, counted
/// in characters.
///
/// Negative lengths yield an empty string; lengths past the end keep the
/// whole text.
#[must_use]
pub fn truncate_text(text: String, len: i16) -> String {
    let len = usize::try_from(len).unwrap_or(0);
    match text.char_indices().nth(len) {
        Some((end, _)) => text[..end].to_string(),
        None => text,
    }
}
