//! Error types for cache compaction.

/// Errors that can occur when removing entries from the cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Removal positions are unsorted, duplicated or out of range.
    #[error("Invalid removal position {position} at index {index} for length {len}")]
    InvalidPositions {
        index: usize,
        position: usize,
        len: usize,
    },
}
