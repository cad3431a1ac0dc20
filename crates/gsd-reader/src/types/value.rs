//! Decoded item values.

use crate::bytes::{read_bool, read_f32, read_f64, read_i8, read_i16, read_i32, read_text};
use crate::error::{GsdError, Result};

use super::GsdType;

/// Value of a GSD item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GsdValue {
    Byte(i8),
    Logical(bool),
    Word(i16),
    Integer(i32),
    Real(f32),
    Double(f64),
    Char(String),
    /// Array item with its resolved shape.
    Array(GsdArray),
}

impl GsdValue {
    /// Decode a scalar of `data_type` from the start of `bytes`.
    ///
    /// Char scalars take the whole slice as text.
    pub(crate) fn decode_scalar(data_type: GsdType, bytes: &[u8]) -> Result<Self> {
        Ok(match data_type {
            GsdType::Byte => Self::Byte(read_i8(bytes, 0)?),
            GsdType::Logical => Self::Logical(read_bool(bytes, 0)?),
            GsdType::Word => Self::Word(read_i16(bytes, 0)?),
            GsdType::Integer => Self::Integer(read_i32(bytes, 0)?),
            GsdType::Real => Self::Real(read_f32(bytes, 0)?),
            GsdType::Double => Self::Double(read_f64(bytes, 0)?),
            GsdType::Char => Self::Char(read_text(bytes, 0, bytes.len())?),
        })
    }

    /// Type of the value (element type for arrays).
    #[must_use]
    pub fn data_type(&self) -> GsdType {
        match self {
            Self::Byte(_) => GsdType::Byte,
            Self::Logical(_) => GsdType::Logical,
            Self::Word(_) => GsdType::Word,
            Self::Integer(_) => GsdType::Integer,
            Self::Real(_) => GsdType::Real,
            Self::Double(_) => GsdType::Double,
            Self::Char(_) => GsdType::Char,
            Self::Array(array) => array.data_type(),
        }
    }

    /// Integer value of a byte, word or integer scalar.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Byte(v) => Some(i64::from(v)),
            Self::Word(v) => Some(i64::from(v)),
            Self::Integer(v) => Some(i64::from(v)),
            _ => None,
        }
    }

    /// Numeric value of any non-char scalar.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Real(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            Self::Logical(v) => Some(if v { 1.0 } else { 0.0 }),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Text of a char scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Char(s) => Some(s),
            _ => None,
        }
    }

    /// Array contents, if this is an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&GsdArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

/// Multi-dimensional array value.
///
/// Elements are stored in file order, first axis varying fastest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GsdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

/// Typed element storage of a [`GsdArray`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ArrayData {
    Byte(Vec<i8>),
    Logical(Vec<bool>),
    Word(Vec<i16>),
    Integer(Vec<i32>),
    Real(Vec<f32>),
    Double(Vec<f64>),
    Char(Vec<String>),
}

impl GsdArray {
    /// Decode `shape.iter().product()` elements from the start of `bytes`.
    pub(crate) fn decode(data_type: GsdType, shape: Vec<usize>, bytes: &[u8]) -> Result<Self> {
        let width = data_type.width();
        let count = shape
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| GsdError::underrun(0, usize::MAX, bytes.len()))?;
        let needed = count
            .checked_mul(width)
            .ok_or_else(|| GsdError::underrun(0, usize::MAX, bytes.len()))?;
        if needed > bytes.len() {
            return Err(GsdError::underrun(0, needed, bytes.len()));
        }

        let bytes = &bytes[..needed];
        let data = match data_type {
            GsdType::Byte => ArrayData::Byte(collect(bytes, i8::from_le_bytes)),
            GsdType::Logical => ArrayData::Logical(collect(bytes, |b: [u8; 1]| b[0] != 0)),
            GsdType::Word => ArrayData::Word(collect(bytes, i16::from_le_bytes)),
            GsdType::Integer => ArrayData::Integer(collect(bytes, i32::from_le_bytes)),
            GsdType::Real => ArrayData::Real(collect(bytes, f32::from_le_bytes)),
            GsdType::Double => ArrayData::Double(collect(bytes, f64::from_le_bytes)),
            GsdType::Char => ArrayData::Char(
                bytes
                    .chunks_exact(width)
                    .map(|chunk| read_text(chunk, 0, width))
                    .collect::<Result<_>>()?,
            ),
        };

        Ok(Self { shape, data })
    }

    /// Axis sizes.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> ArrayData {
        self.data
    }

    /// Element type.
    #[must_use]
    pub fn data_type(&self) -> GsdType {
        self.data.data_type()
    }

    /// Elements converted to `f64`, for numeric arrays.
    #[must_use]
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match &self.data {
            ArrayData::Byte(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            ArrayData::Word(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            ArrayData::Integer(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            ArrayData::Real(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            ArrayData::Double(v) => Some(v.clone()),
            ArrayData::Logical(_) | ArrayData::Char(_) => None,
        }
    }
}

impl ArrayData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Logical(v) => v.len(),
            Self::Word(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::Real(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Char(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn data_type(&self) -> GsdType {
        match self {
            Self::Byte(_) => GsdType::Byte,
            Self::Logical(_) => GsdType::Logical,
            Self::Word(_) => GsdType::Word,
            Self::Integer(_) => GsdType::Integer,
            Self::Real(_) => GsdType::Real,
            Self::Double(_) => GsdType::Double,
            Self::Char(_) => GsdType::Char,
        }
    }
}

/// Split `bytes` into `N`-byte elements and convert each one.
fn collect<T, const N: usize>(bytes: &[u8], convert: impl Fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .filter_map(|chunk| <[u8; N]>::try_from(chunk).ok())
        .map(convert)
        .collect()
}
