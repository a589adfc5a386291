//! Error types for the node commands.

use bitcoin::BlockHash;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Leaf or frame codec error.
    #[error(transparent)]
    Leaf(#[from] leafbridge_leaf::Error),

    /// Cache compaction error.
    #[error(transparent)]
    Cache(#[from] leafbridge_cache::Error),

    /// Network lookup error.
    #[error(transparent)]
    Network(#[from] leafbridge_primitives::Error),

    /// Raw block could not be decoded.
    #[error("Failed to decode block: {0}")]
    BlockDecode(#[from] bitcoin::consensus::encode::Error),

    /// First block of the chain is not the expected genesis block.
    #[error("Genesis mismatch: expected {expected}, got {got}")]
    GenesisMismatch { expected: BlockHash, got: BlockHash },

    /// Block file belongs to another network.
    #[error("Block file magic {0:02x?} does not match the selected chain")]
    NetworkMismatch([u8; 4]),

    /// Invalid hex input.
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
