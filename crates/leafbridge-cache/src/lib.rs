//! In-memory cache of buffered leaves and proofs.
//!
//! Entries live in one dense vector and are addressed by position. Removing a
//! batch of positions compacts the vector in a single pass, which renumbers
//! every entry at or after the first removed position.
//!
//! Nothing here is synchronized: a cache must be owned by one thread, or
//! guarded by a single-writer lock, for the duration of a compaction.

mod cache;
mod compact;
mod error;

pub use self::cache::LeafCache;
pub use self::compact::compact_in_place;
pub use self::error::Error;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
