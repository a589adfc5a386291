//! Primitives shared by the leafbridge crates.
//!
//! Network constants (genesis hashes and on-disk magic bytes), the output
//! spendability rule and the fixed-width outpoint encoding used in accumulator
//! leaves.

mod error;
mod network;
mod script;

pub use self::error::Error;
pub use self::network::{check_magic_bytes, genesis_hash, network_from_magic};
pub use self::script::{MAX_SCRIPT_SIZE, is_unspendable};

use bitcoin::OutPoint;

/// Result type for primitive lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// Size of an encoded [`OutPoint`]: txid (32 bytes) || vout (4 bytes).
pub const OUTPOINT_SIZE: usize = 36;

/// Convert OutPoint to its 36-byte leaf form.
///
/// Format: txid (32 bytes, raw) || vout (4 bytes, big-endian)
pub fn outpoint_to_bytes(outpoint: &OutPoint) -> [u8; OUTPOINT_SIZE] {
    let mut bytes = [0u8; OUTPOINT_SIZE];
    bytes[..32].copy_from_slice(outpoint.txid.as_ref());
    bytes[32..].copy_from_slice(&outpoint.vout.to_be_bytes());
    bytes
}

/// Parse the 36-byte leaf form back to OutPoint.
pub fn outpoint_from_bytes(bytes: &[u8; OUTPOINT_SIZE]) -> OutPoint {
    use bitcoin::hashes::Hash;

    let mut txid_bytes = [0u8; 32];
    txid_bytes.copy_from_slice(&bytes[..32]);
    let mut vout_bytes = [0u8; 4];
    vout_bytes.copy_from_slice(&bytes[32..]);
    OutPoint {
        txid: bitcoin::Txid::from_byte_array(txid_bytes),
        vout: u32::from_be_bytes(vout_bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;

    #[test]
    fn test_outpoint_bytes_roundtrip() {
        let outpoint = OutPoint {
            txid: bitcoin::Txid::from_byte_array([7u8; 32]),
            vout: 0x0102_0304,
        };

        let bytes = outpoint_to_bytes(&outpoint);
        assert_eq!(&bytes[..32], &[7u8; 32]);
        // vout is big-endian, unlike the consensus encoding.
        assert_eq!(&bytes[32..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(outpoint_from_bytes(&bytes), outpoint);
    }
}
