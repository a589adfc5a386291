//! Error types for the leaf and frame codecs.

/// Errors that can occur while encoding or decoding leaves and frames.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is shorter than the fixed 80-byte leaf prefix.
    #[error("Not long enough for leaf data: got {len} bytes, need 80")]
    Malformed { len: usize },

    /// Fewer than two bytes left for a frame length prefix.
    #[error("Frame prefix needs 2 bytes, only {0} left")]
    ShortBuffer(usize),

    /// Frame declares more payload than the buffer holds.
    #[error("Frame declares {declared} bytes but payload has {available} left")]
    TruncatedPayload { declared: usize, available: usize },

    /// Payload does not fit in a 16-bit length prefix.
    #[error("Frame payload of {0} bytes exceeds the 65535 byte limit")]
    PayloadTooLarge(usize),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
