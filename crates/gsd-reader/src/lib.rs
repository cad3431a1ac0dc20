//! Global Section Data (GSD) file reader.
//!
//! GSD is the little-endian binary format written by the JCMT
//! instrument-control system. A file holds a fixed header, a table of named
//! items, and a data segment with every item's value. This crate reads the
//! header and item table eagerly and decodes item values on demand from a
//! shared, read-only view of the data segment.
//!
//! # Features
//!
//! - Memory-mapped or buffered data segment, chosen per file size
//! - Lookup by case-insensitive name or 1-based item number
//! - Array shapes resolved from the scalar items that hold their extents
//! - Optional `serde` serialization of metadata and values
//!
//! # Example
//!
//! ```no_run
//! use gsd_reader::{GsdFile, GsdValue};
//!
//! let gsd = GsdFile::open("obs_das_0042.gsd").unwrap();
//! println!("{} ({} items)", gsd.label(), gsd.item_count());
//!
//! let data = gsd.item_by_name("c13dat").unwrap();
//! println!("shape: {:?} {:?}", data.shape(), data.dim_names());
//!
//! if let GsdValue::Array(array) = data.value().unwrap() {
//!     println!("{} elements", array.len());
//! }
//! ```

pub mod bytes;
mod dims;
mod error;
pub mod header;
mod index;
mod reader;
mod segment;
mod types;

// Re-export error types
pub use error::{GsdError, Result};

// Re-export core types
pub use types::{
    ArrayData, CHAR_WIDTH, DEFAULT_BUFFER_THRESHOLD, DataAccess, Dimension, GsdArray, GsdItem,
    GsdReaderOptions, GsdType, GsdValue,
};

pub use header::FileHeader;
pub use index::ItemIndex;
pub use segment::DataSegment;

// Re-export reader functionality
pub use reader::{GsdFile, GsdReader, MAIN_DATA_ITEM, read_gsd, read_gsd_with_options};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
