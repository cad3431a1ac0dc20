//! Reader options.

/// How the data segment is held in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataAccess {
    /// Map large segments, buffer small ones (default).
    #[default]
    Auto,
    /// Always memory-map the segment.
    Mapped,
    /// Always read the segment into an owned buffer.
    Buffered,
}

/// Options for reading GSD files.
#[derive(Debug, Clone, Copy)]
pub struct GsdReaderOptions {
    /// Segment backing strategy (default: `Auto`).
    pub access: DataAccess,
    /// Under `Auto`, segments smaller than this many bytes are buffered
    /// (default: 64 KiB).
    pub buffer_threshold: u64,
    /// Warn when the header's size field disagrees with the file length
    /// (default: true).
    pub check_total_size: bool,
}

/// Default `buffer_threshold`.
pub const DEFAULT_BUFFER_THRESHOLD: u64 = 64 * 1024;

impl Default for GsdReaderOptions {
    fn default() -> Self {
        Self {
            access: DataAccess::Auto,
            buffer_threshold: DEFAULT_BUFFER_THRESHOLD,
            check_total_size: true,
        }
    }
}

impl GsdReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment backing strategy.
    #[must_use]
    pub fn with_access(mut self, access: DataAccess) -> Self {
        self.access = access;
        self
    }

    /// Set the `Auto` buffering threshold.
    #[must_use]
    pub fn with_buffer_threshold(mut self, bytes: u64) -> Self {
        self.buffer_threshold = bytes;
        self
    }

    /// Skip the diagnostic size comparison.
    #[must_use]
    pub fn skip_size_check(mut self) -> Self {
        self.check_total_size = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = GsdReaderOptions::default();
        assert_eq!(opts.access, DataAccess::Auto);
        assert_eq!(opts.buffer_threshold, DEFAULT_BUFFER_THRESHOLD);
        assert!(opts.check_total_size);
    }

    #[test]
    fn test_builder() {
        let opts = GsdReaderOptions::new()
            .with_access(DataAccess::Mapped)
            .with_buffer_threshold(0)
            .skip_size_check();
        assert_eq!(opts.access, DataAccess::Mapped);
        assert_eq!(opts.buffer_threshold, 0);
        assert!(!opts.check_total_size);
    }
}
