//! Wire formats for accumulator leaves.
//!
//! A leaf is the committed data of one unspent output. It is serialized as
//!
//! ```text
//! block_hash (32) || txid (32) || vout BE32 (4) || coinbase_height BE32 (4) || amount BE64 (8) || script_pubkey
//! ```
//!
//! The script has no length prefix, so a leaf is only self-delimiting when
//! wrapped in a frame: a big-endian `u16` length followed by that many bytes.

mod error;
mod frame;
mod leaf;

pub use self::error::Error;
pub use self::frame::{
    FRAME_PREFIX_SIZE, FrameIter, MAX_FRAME_PAYLOAD, frame, unframe, write_frame,
};
pub use self::leaf::{LEAF_PREFIX_SIZE, LeafData, LeafFrames, LeafHash, write_leaf_frame};

/// Result type for leaf and frame codec operations.
pub type Result<T> = std::result::Result<T, Error>;
