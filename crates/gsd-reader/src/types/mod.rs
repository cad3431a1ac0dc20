//! Core types for GSD file handling.
//!
//! This module provides the item descriptor, value and option types
//! returned by the reader.

mod item;
mod item_type;
mod options;
mod value;

pub use item::{Dimension, GsdItem};
pub use item_type::{CHAR_WIDTH, GsdType};
pub use options::{DEFAULT_BUFFER_THRESHOLD, DataAccess, GsdReaderOptions};
pub use value::{ArrayData, GsdArray, GsdValue};
