use crate::frame::{FrameIter, write_frame};
use crate::{Error, Result};
use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, OutPoint, ScriptBuf};
use leafbridge_primitives::{OUTPOINT_SIZE, outpoint_from_bytes, outpoint_to_bytes};
use sha2::{Digest, Sha256};
use std::io::Write;

/// Size of the fixed-width part of a serialized leaf, before the script.
pub const LEAF_PREFIX_SIZE: usize = 32 + OUTPOINT_SIZE + 4 + 8;

/// Accumulator identifier of a leaf: SHA-256 of its serialization.
pub type LeafHash = [u8; 32];

/// All the data committed to by one leaf of the accumulator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeafData {
    /// Hash of the block creating the output.
    pub block_hash: BlockHash,
    /// The output being committed to.
    pub outpoint: OutPoint,
    /// Height of the creating block.
    pub coinbase_height: i32,
    /// Output value in satoshis.
    pub amount: i64,
    /// Locking script of the output.
    pub script_pubkey: ScriptBuf,
}

fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

impl LeafData {
    /// Length of [`Self::to_bytes`].
    pub fn serialized_len(&self) -> usize {
        LEAF_PREFIX_SIZE + self.script_pubkey.len()
    }

    /// Serializes the leaf in its fixed field order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.serialized_len());
        data.extend_from_slice(&self.block_hash.to_byte_array());
        data.extend_from_slice(&outpoint_to_bytes(&self.outpoint));
        data.extend_from_slice(&self.coinbase_height.to_be_bytes());
        data.extend_from_slice(&self.amount.to_be_bytes());
        data.extend_from_slice(self.script_pubkey.as_bytes());
        data
    }

    /// Parses a serialized leaf.
    ///
    /// Everything past the 80-byte prefix is taken verbatim as the script.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < LEAF_PREFIX_SIZE {
            return Err(Error::Malformed { len: bytes.len() });
        }

        Ok(Self {
            block_hash: BlockHash::from_byte_array(array(&bytes[0..32])),
            outpoint: outpoint_from_bytes(&array(&bytes[32..68])),
            coinbase_height: i32::from_be_bytes(array(&bytes[68..72])),
            amount: i64::from_be_bytes(array(&bytes[72..80])),
            script_pubkey: ScriptBuf::from_bytes(bytes[LEAF_PREFIX_SIZE..].to_vec()),
        })
    }

    /// Returns the accumulator identifier of this leaf.
    pub fn leaf_hash(&self) -> LeafHash {
        Sha256::digest(&self.to_bytes()).into()
    }

    /// Whether the committed output can never be spent.
    pub fn is_unspendable(&self) -> bool {
        leafbridge_primitives::is_unspendable(&self.script_pubkey)
    }
}

/// Writes `leaf` as a single frame.
pub fn write_leaf_frame<W: Write>(writer: &mut W, leaf: &LeafData) -> Result<()> {
    write_frame(writer, &leaf.to_bytes())
}

/// Iterator decoding a stream of framed leaves.
///
/// Leaves decoded before a broken record are unaffected by it; the caller
/// decides whether to stop at the first error.
#[derive(Debug, Clone)]
pub struct LeafFrames<'a> {
    frames: FrameIter<'a>,
}

impl<'a> LeafFrames<'a> {
    /// Constructs a new instance of [`LeafFrames`].
    pub fn new(stream: &'a [u8]) -> Self {
        Self {
            frames: FrameIter::new(stream),
        }
    }
}

impl Iterator for LeafFrames<'_> {
    type Item = Result<LeafData>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .next()
            .map(|payload| payload.and_then(LeafData::from_bytes))
    }
}
