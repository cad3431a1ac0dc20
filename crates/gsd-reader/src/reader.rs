//! GSD file reader.
//!
//! Loading runs strictly in order: file descriptor, item table, data segment,
//! dimension resolution, name index. Any failure aborts the load and no
//! partially built [`GsdFile`] is returned.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::dims::resolve_dimensions;
use crate::error::{GsdError, Result};
use crate::header::{FileHeader, ItemRecord, read_file_header, read_item_table};
use crate::index::ItemIndex;
use crate::segment::DataSegment;
use crate::types::{GsdItem, GsdReaderOptions, GsdValue};

/// Name of the main spectral data array in JCMT files.
pub const MAIN_DATA_ITEM: &str = "C13DAT";

/// A loaded GSD file.
///
/// Immutable once built: lookups and value decoding take `&self` and may run
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct GsdFile {
    path: Option<PathBuf>,
    header: FileHeader,
    items: Vec<GsdItem>,
    index: ItemIndex,
}

impl GsdFile {
    /// Open and load a GSD file with default options.
    ///
    /// # Arguments
    /// * `path` - Path to the GSD file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, GsdReaderOptions::default())
    }

    /// Open and load a GSD file.
    ///
    /// The file handle is closed before this returns; a mapped segment stays
    /// valid on its own.
    pub fn open_with_options(path: impl AsRef<Path>, options: GsdReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Opening GSD file");

        let mut file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GsdError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GsdError::Io(e)
            }
        })?;
        let file_len = file.metadata()?.len();

        let header = read_file_header(&mut file)?;
        let records = read_item_table(&mut file, &header)?;
        let segment = DataSegment::from_file(&mut file, &header, file_len, &options)?;
        drop(file);

        Self::assemble(
            Some(path.to_path_buf()),
            header,
            records,
            segment,
            file_len,
            &options,
        )
    }

    /// Resolve dimensions and build the index over decoded parts.
    fn assemble(
        path: Option<PathBuf>,
        header: FileHeader,
        records: Vec<ItemRecord>,
        segment: DataSegment,
        file_len: u64,
        options: &GsdReaderOptions,
    ) -> Result<Self> {
        tracing::debug!(
            version = header.version,
            max_items = header.max_items,
            item_count = header.item_count,
            data_start = header.data_start,
            data_end = header.data_end,
            label = %header.label,
            "Read GSD header"
        );

        if options.check_total_size && u64::try_from(header.total_size).ok() != Some(file_len) {
            tracing::warn!(
                declared = header.total_size,
                actual = file_len,
                "GSD size field does not match file length"
            );
        }

        let mapped = segment.is_mapped();
        let items = resolve_dimensions(records, &segment)?;
        let index = ItemIndex::build(&items);

        tracing::info!(
            items = items.len(),
            version = header.version,
            mapped,
            "Loaded GSD file"
        );

        Ok(Self {
            path,
            header,
            items,
            index,
        })
    }

    /// Source path, when loaded from the filesystem.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.header.label
    }

    #[must_use]
    pub fn version(&self) -> f32 {
        self.header.version
    }

    /// Number of items in the file.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Declared item capacity from the header.
    #[must_use]
    pub fn max_items(&self) -> i32 {
        self.header.max_items
    }

    /// Copy of all items in file order.
    ///
    /// Index `i` holds item number `i + 1`. Clones share the data segment,
    /// so this does not copy values.
    #[must_use]
    pub fn items(&self) -> Vec<GsdItem> {
        self.items.clone()
    }

    /// Iterate over items in file order.
    pub fn iter(&self) -> impl Iterator<Item = &GsdItem> {
        self.items.iter()
    }

    /// Look up an item by name, ignoring case.
    pub fn item_by_name(&self, name: &str) -> Result<&GsdItem> {
        let idx = self.index.position(name)?;
        Ok(&self.items[idx])
    }

    /// Look up an item by its 1-based number.
    pub fn item_by_number(&self, number: usize) -> Result<&GsdItem> {
        let idx = self.index.check_number(number)?;
        Ok(&self.items[idx])
    }

    /// Decode an item's value.
    pub fn decode_value(&self, item: &GsdItem) -> Result<GsdValue> {
        item.value()
    }

    /// Look up an item by name and decode its value.
    pub fn value_of(&self, name: &str) -> Result<GsdValue> {
        self.item_by_name(name)?.value()
    }

    /// Whether an item with this name exists, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }
}

impl<'a> IntoIterator for &'a GsdFile {
    type Item = &'a GsdItem;
    type IntoIter = std::slice::Iter<'a, GsdItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::fmt::Display for GsdFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self
            .path
            .as_deref()
            .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string());
        write!(
            f,
            "GSD file: {path} Number of items: {}",
            self.item_count()
        )?;
        match self.item_by_name(MAIN_DATA_ITEM) {
            Ok(item) => write!(f, " Data array size: {} elements", item.size()),
            Err(_) => write!(f, " No {MAIN_DATA_ITEM}"),
        }
    }
}

/// GSD reader over any seekable byte source.
///
/// The data segment is always read into memory.
pub struct GsdReader<R: Read + Seek> {
    reader: R,
    options: GsdReaderOptions,
}

impl<R: Read + Seek> GsdReader<R> {
    /// Create a new GSD reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            options: GsdReaderOptions::default(),
        }
    }

    /// Create a new GSD reader with options.
    pub fn with_options(reader: R, options: GsdReaderOptions) -> Self {
        Self { reader, options }
    }

    /// Load the file. Offsets in the header are absolute, so reading always
    /// starts from the beginning of the source.
    pub fn read(mut self) -> Result<GsdFile> {
        let source_len = self.reader.seek(SeekFrom::End(0))?;
        self.reader.rewind()?;

        let header = read_file_header(&mut self.reader)?;
        let records = read_item_table(&mut self.reader, &header)?;
        let segment = DataSegment::read_range(&mut self.reader, &header, source_len)?;

        GsdFile::assemble(None, header, records, segment, source_len, &self.options)
    }
}

/// Read a GSD file from a path.
///
/// This is a convenience function for [`GsdFile::open`].
pub fn read_gsd(path: impl AsRef<Path>) -> Result<GsdFile> {
    GsdFile::open(path)
}

/// Read a GSD file with options.
pub fn read_gsd_with_options(
    path: impl AsRef<Path>,
    options: GsdReaderOptions,
) -> Result<GsdFile> {
    GsdFile::open_with_options(path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn minimal_file() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1.0f32.to_le_bytes());
        buf.extend_from_slice(&10i32.to_le_bytes());
        buf.extend_from_slice(&1i32.to_le_bytes());
        buf.extend_from_slice(&128i32.to_le_bytes());
        buf.extend_from_slice(&131i32.to_le_bytes());
        buf.extend_from_slice(&[b' '; 40]);
        buf.extend_from_slice(&132i32.to_le_bytes());

        let mut rec = vec![0u8];
        rec.extend_from_slice(b"NSCAN          ");
        rec.extend_from_slice(&5i16.to_le_bytes());
        rec.extend_from_slice(&[b' '; 10]);
        rec.extend_from_slice(&0i16.to_le_bytes());
        rec.extend_from_slice(&4i16.to_le_bytes());
        rec.extend_from_slice(&128i32.to_le_bytes());
        rec.extend_from_slice(&4i32.to_le_bytes());
        rec.extend_from_slice(&0i32.to_le_bytes());
        rec.extend_from_slice(&[0u8; 20]);
        buf.extend_from_slice(&rec);

        buf.extend_from_slice(&42i32.to_le_bytes());
        buf
    }

    #[test]
    fn test_read_from_memory() {
        let gsd = GsdReader::new(Cursor::new(minimal_file())).read().unwrap();
        assert_eq!(gsd.item_count(), 1);
        assert_eq!(gsd.max_items(), 10);
        assert_eq!(gsd.label(), "");
        assert!(gsd.path().is_none());
        assert_eq!(gsd.value_of("nscan").unwrap(), GsdValue::Integer(42));
    }

    #[test]
    fn test_display_without_main_array() {
        let gsd = GsdReader::new(Cursor::new(minimal_file())).read().unwrap();
        assert_eq!(
            gsd.to_string(),
            "GSD file: <memory> Number of items: 1 No C13DAT"
        );
    }

    #[test]
    fn test_items_returns_independent_copy() {
        let gsd = GsdReader::new(Cursor::new(minimal_file())).read().unwrap();
        let mut copy = gsd.items();
        copy.clear();
        assert_eq!(gsd.item_count(), 1);
        assert_eq!(gsd.iter().count(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = GsdFile::open("/nonexistent/obs_das_0001.gsd").unwrap_err();
        assert!(matches!(err, GsdError::FileNotFound { .. }));
    }

    #[test]
    fn test_reader_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GsdFile>();
        assert_send_sync::<GsdItem>();
    }
}
