//! Shared read-only view of the data segment.
//!
//! Every [`GsdItem`](crate::GsdItem) holds a clone of the same
//! [`DataSegment`] plus its own offset and length, so cloning items never
//! copies data. The segment is either a memory map of the file range or an
//! owned buffer, depending on [`GsdReaderOptions`].

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use memmap2::{Mmap, MmapOptions};

use crate::error::{GsdError, Result};
use crate::header::FileHeader;
use crate::types::{DataAccess, GsdReaderOptions};

enum Backing {
    Mapped(Mmap),
    Buffered(Box<[u8]>),
}

/// Reference-counted view of the bytes between the header's data start and
/// data end offsets.
#[derive(Clone)]
pub struct DataSegment {
    inner: Arc<Backing>,
}

impl DataSegment {
    /// Wrap bytes already held in memory.
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            inner: Arc::new(Backing::Buffered(bytes.into())),
        }
    }

    /// Establish the segment for an open file, choosing the backing from
    /// `options`. The caller may drop `file` afterwards.
    pub(crate) fn from_file(
        file: &mut File,
        header: &FileHeader,
        file_len: u64,
        options: &GsdReaderOptions,
    ) -> Result<Self> {
        check_bounds(header, file_len)?;
        let len = header.data_len();

        let mapped = match options.access {
            DataAccess::Mapped => len > 0,
            DataAccess::Buffered => false,
            DataAccess::Auto => len > 0 && len >= options.buffer_threshold,
        };
        tracing::debug!(
            start = header.data_start,
            len,
            mapped,
            "Establishing data segment"
        );

        if mapped {
            Self::map(file, header.data_start, len)
        } else {
            Self::read_range(file, header, file_len)
        }
    }

    /// Read the segment range from any seekable source into memory.
    pub(crate) fn read_range<R: Read + Seek>(
        reader: &mut R,
        header: &FileHeader,
        file_len: u64,
    ) -> Result<Self> {
        check_bounds(header, file_len)?;
        let len = usize::try_from(header.data_len())
            .map_err(|_| GsdError::invalid_format("data segment too large for this platform"))?;

        let mut buf = vec![0u8; len];
        reader.seek(SeekFrom::Start(header.data_start))?;
        reader.read_exact(&mut buf)?;
        Ok(Self::from_bytes(buf))
    }

    #[allow(unsafe_code)]
    fn map(file: &File, start: u64, len: u64) -> Result<Self> {
        let len = usize::try_from(len)
            .map_err(|_| GsdError::invalid_format("data segment too large for this platform"))?;
        // SAFETY: the file is opened read-only and the range was checked
        // against its length. Truncating the file while it is mapped is
        // outside what this reader supports.
        let mmap = unsafe { MmapOptions::new().offset(start).len(len).map(file)? };
        Ok(Self {
            inner: Arc::new(Backing::Mapped(mmap)),
        })
    }

    /// Segment length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the segment is backed by a memory map.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        matches!(*self.inner, Backing::Mapped(_))
    }

    /// Whether two handles share the same underlying segment.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrow exactly `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let bytes = self.as_bytes();
        offset
            .checked_add(len)
            .and_then(|end| bytes.get(offset..end))
            .ok_or_else(|| GsdError::underrun(offset, len, bytes.len().saturating_sub(offset)))
    }

    fn as_bytes(&self) -> &[u8] {
        match &*self.inner {
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Buffered(buf) => &buf[..],
        }
    }
}

impl std::fmt::Debug for DataSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSegment")
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

/// The declared segment must lie within the file.
fn check_bounds(header: &FileHeader, file_len: u64) -> Result<()> {
    let end = header.data_start + header.data_len();
    if end > file_len {
        return Err(GsdError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "data segment ends at byte {end} but the file is only {file_len} bytes long"
            ),
        )));
    }
    Ok(())
}
