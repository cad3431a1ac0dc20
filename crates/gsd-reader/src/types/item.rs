//! Item descriptors.

use crate::error::Result;
use crate::header::ItemRecord;
use crate::segment::DataSegment;

use super::{GsdArray, GsdType, GsdValue};

/// One resolved array axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dimension {
    /// Name of the scalar item supplying the extent.
    pub name: String,
    /// Unit of that item.
    pub unit: String,
    /// Number of elements along this axis.
    pub size: usize,
}

/// A GSD item: its metadata plus a handle on the shared data segment.
///
/// The value is decoded only when [`GsdItem::value`] is called, and only the
/// item's own byte range is read.
#[derive(Debug, Clone)]
pub struct GsdItem {
    record: ItemRecord,
    dimensions: Vec<Dimension>,
    segment: DataSegment,
}

impl GsdItem {
    pub(crate) fn new(
        record: ItemRecord,
        dimensions: Vec<Dimension>,
        segment: DataSegment,
    ) -> Self {
        Self {
            record,
            dimensions,
            segment,
        }
    }

    /// 1-based item number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.record.number
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.record.unit
    }

    #[must_use]
    pub fn data_type(&self) -> GsdType {
        self.record.data_type
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.record.is_array
    }

    /// Byte offset within the data segment.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.record.offset
    }

    /// Length of the stored value in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.record.length
    }

    /// Declared number of dimensions (0 for scalars).
    #[must_use]
    pub fn ndims(&self) -> usize {
        self.record.ndims
    }

    /// Item numbers that supply each axis extent.
    #[must_use]
    pub fn dim_numbers(&self) -> &[i32] {
        self.record.dim_refs()
    }

    /// Resolved axes (empty for scalars).
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn dim_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name.as_str()).collect()
    }

    #[must_use]
    pub fn dim_units(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.unit.as_str()).collect()
    }

    /// Array shape. Scalars have an empty shape; arrays without declared
    /// dimensions are treated as one axis spanning the stored bytes.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        if !self.is_array() {
            Vec::new()
        } else if self.dimensions.is_empty() {
            vec![self.record.length / self.data_type().width()]
        } else {
            self.dimensions.iter().map(|d| d.size).collect()
        }
    }

    /// Number of elements in the value.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    /// The raw bytes of this item, exactly its recorded range.
    pub fn raw_bytes(&self) -> Result<&[u8]> {
        self.segment.slice(self.record.offset, self.record.length)
    }

    /// Decode the item's value.
    pub fn value(&self) -> Result<GsdValue> {
        let bytes = self.raw_bytes()?;
        if self.is_array() {
            GsdArray::decode(self.data_type(), self.shape(), bytes).map(GsdValue::Array)
        } else {
            GsdValue::decode_scalar(self.data_type(), bytes)
        }
    }
}

impl PartialEq for GsdItem {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
            && self.dimensions == other.dimensions
            && self.segment.ptr_eq(&other.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAX_DIMS;

    fn record(
        number: usize,
        data_type: GsdType,
        is_array: bool,
        offset: usize,
        length: usize,
    ) -> ItemRecord {
        ItemRecord {
            number,
            name: format!("ITEM{number}"),
            unit: String::new(),
            data_type,
            is_array,
            offset,
            length,
            ndims: 0,
            dim_numbers: [0; MAX_DIMS],
        }
    }

    #[test]
    fn test_scalar_item() {
        let segment = DataSegment::from_bytes(7i32.to_le_bytes().to_vec());
        let item = GsdItem::new(record(1, GsdType::Integer, false, 0, 4), Vec::new(), segment);
        assert!(item.shape().is_empty());
        assert_eq!(item.size(), 1);
        assert_eq!(item.value().unwrap(), GsdValue::Integer(7));
    }

    #[test]
    fn test_array_with_dimensions() {
        let bytes: Vec<u8> = (0..12).flat_map(|v| (v as f32).to_le_bytes()).collect();
        let mut rec = record(3, GsdType::Real, true, 0, 48);
        rec.ndims = 2;
        rec.dim_numbers = [1, 2, 0, 0, 0];
        let dims = vec![
            Dimension {
                name: "NX".into(),
                unit: "PIX".into(),
                size: 3,
            },
            Dimension {
                name: "NY".into(),
                unit: "PIX".into(),
                size: 4,
            },
        ];
        let item = GsdItem::new(rec, dims, DataSegment::from_bytes(bytes));
        assert_eq!(item.shape(), vec![3, 4]);
        assert_eq!(item.size(), 12);
        assert_eq!(item.dim_names(), vec!["NX", "NY"]);
        assert_eq!(item.dim_units(), vec!["PIX", "PIX"]);
        assert_eq!(item.dim_numbers(), &[1, 2]);

        let value = item.value().unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.shape(), &[3, 4]);
        assert_eq!(array.len(), 12);
    }

    #[test]
    fn test_array_without_dimensions_spans_bytes() {
        let segment = DataSegment::from_bytes(vec![0u8; 6]);
        let item = GsdItem::new(record(1, GsdType::Word, true, 0, 6), Vec::new(), segment);
        assert_eq!(item.shape(), vec![3]);
        assert_eq!(item.value().unwrap().as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_clones_compare_equal() {
        let segment = DataSegment::from_bytes(vec![0u8; 4]);
        let item = GsdItem::new(record(1, GsdType::Integer, false, 0, 4), Vec::new(), segment);
        assert_eq!(item.clone(), item);
    }
}
