//! Synthetic GSD file builder for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

const HEADER_LEN: usize = 64;
const RECORD_LEN: usize = 64;

/// One item to lay out in the fixture.
pub struct FixtureItem {
    pub name: String,
    pub unit: String,
    pub code: i16,
    pub array: bool,
    pub ndims: i32,
    pub dims: [i32; 5],
    pub data: Vec<u8>,
}

/// Builds GSD bytes: header, item table, then item values back to back.
pub struct GsdFixture {
    pub version: f32,
    pub max_items: i32,
    pub label: String,
    pub items: Vec<FixtureItem>,
    /// Bytes of padding between the item table and the data segment.
    pub gap: usize,
}

impl GsdFixture {
    pub fn new(label: &str) -> Self {
        Self {
            version: 5.3,
            max_items: 200,
            label: label.to_string(),
            items: Vec::new(),
            gap: 0,
        }
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    fn push(
        mut self,
        name: &str,
        unit: &str,
        code: i16,
        array: bool,
        refs: &[i32],
        data: Vec<u8>,
    ) -> Self {
        let mut dims = [0; 5];
        dims[..refs.len()].copy_from_slice(refs);
        self.items.push(FixtureItem {
            name: name.to_string(),
            unit: unit.to_string(),
            code,
            array,
            ndims: if array { refs.len() as i32 } else { -1 },
            dims,
            data,
        });
        self
    }

    pub fn int(self, name: &str, unit: &str, value: i32) -> Self {
        self.push(name, unit, 4, false, &[], value.to_le_bytes().to_vec())
    }

    pub fn word(self, name: &str, value: i16) -> Self {
        self.push(name, "", 3, false, &[], value.to_le_bytes().to_vec())
    }

    pub fn double(self, name: &str, unit: &str, value: f64) -> Self {
        self.push(name, unit, 6, false, &[], value.to_le_bytes().to_vec())
    }

    pub fn logical(self, name: &str, value: bool) -> Self {
        self.push(name, "", 2, false, &[], vec![u8::from(value)])
    }

    pub fn chars(self, name: &str, value: &str) -> Self {
        self.push(name, "", 7, false, &[], pad(value, 16))
    }

    pub fn real_array(self, name: &str, unit: &str, values: &[f32], refs: &[i32]) -> Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(name, unit, 5, true, refs, data)
    }

    pub fn int_array(self, name: &str, values: &[i32], refs: &[i32]) -> Self {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(name, "", 4, true, refs, data)
    }

    pub fn char_array(self, name: &str, values: &[&str], refs: &[i32]) -> Self {
        let data = values.iter().flat_map(|v| pad(v, 16)).collect();
        self.push(name, "", 7, true, refs, data)
    }

    /// File position of the first data byte.
    pub fn data_start(&self) -> usize {
        HEADER_LEN + RECORD_LEN * self.items.len() + self.gap
    }

    /// Segment-relative offset of each item's value.
    pub fn offsets(&self) -> Vec<usize> {
        let mut offset = 0;
        self.items
            .iter()
            .map(|item| {
                let this = offset;
                offset += item.data.len();
                this
            })
            .collect()
    }

    pub fn build(&self) -> Vec<u8> {
        let start = self.data_start();
        let data_len: usize = self.items.iter().map(|i| i.data.len()).sum();
        let end = start + data_len - 1;
        let total = start + data_len;

        let mut buf = Vec::with_capacity(total);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.max_items.to_le_bytes());
        buf.extend_from_slice(&(self.items.len() as i32).to_le_bytes());
        buf.extend_from_slice(&(start as i32).to_le_bytes());
        buf.extend_from_slice(&(end as i32).to_le_bytes());
        buf.extend_from_slice(&pad(&self.label, 40));
        buf.extend_from_slice(&(total as i32).to_le_bytes());

        for (item, offset) in self.items.iter().zip(self.offsets()) {
            buf.push(u8::from(item.array));
            buf.extend_from_slice(&pad(&item.name, 15));
            buf.extend_from_slice(&(item.name.len() as i16).to_le_bytes());
            buf.extend_from_slice(&pad(&item.unit, 10));
            buf.extend_from_slice(&(item.unit.len() as i16).to_le_bytes());
            buf.extend_from_slice(&item.code.to_le_bytes());
            buf.extend_from_slice(&((start + offset) as i32).to_le_bytes());
            buf.extend_from_slice(&(item.data.len() as i32).to_le_bytes());
            buf.extend_from_slice(&item.ndims.to_le_bytes());
            for d in item.dims {
                buf.extend_from_slice(&d.to_le_bytes());
            }
        }

        buf.resize(start, 0);
        for item in &self.items {
            buf.extend_from_slice(&item.data);
        }
        buf
    }

    pub fn write(&self) -> NamedTempFile {
        write_bytes(&self.build())
    }
}

pub fn write_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

fn pad(text: &str, width: usize) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(width, b' ');
    bytes
}
