//! Translation of Bitcoin blocks into accumulator operations.
//!
//! For every block the bridge needs two lists: the outpoints to delete from the
//! accumulator (each requiring a deletion proof) and the leaves to add. Outputs
//! created and spent within the same block appear in neither list. They are found
//! by [`dedup_block`], which numbers every input and every output of the block
//! in one flattened sequence, coinbase included:
//!
//! ```text
//! tx0 (coinbase): in 0        out 0, 1
//! tx1:            in 1, 2     out 2
//! tx2:            in 3        out 3, 4     (in 3 spends tx1:0, i.e. out 2)
//!
//! inskip = [3], outskip = [2]
//! ```

mod dedup;
mod deletions;
mod leaves;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use self::dedup::{BlockSkips, dedup_block, dedup_transactions};
pub use self::deletions::{block_to_del_outpoints, extract_deletions, extract_deletions_from};
pub use self::leaves::block_to_add_leaves;

use bitcoin::{Block, BlockHash, OutPoint};
use leafbridge_leaf::LeafData;

/// Accumulator operations implied by one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDiff {
    /// Hash of the block.
    pub block_hash: BlockHash,
    /// Height of the block.
    pub height: i32,
    /// Skip lists computed for the block.
    pub skips: BlockSkips,
    /// Outpoints requiring a deletion proof, in block input order.
    pub deletions: Vec<OutPoint>,
    /// New leaves, in block output order.
    pub additions: Vec<LeafData>,
}

impl BlockDiff {
    /// Computes the accumulator operations for `block` at `height`.
    pub fn from_block(block: &Block, height: i32) -> Self {
        let skips = dedup_block(block);
        let deletions = extract_deletions(block, &skips.inskip);
        let additions = block_to_add_leaves(block, height, &skips.outskip);

        tracing::debug!(
            "Block #{height}: {} deletions, {} additions, {} skipped",
            deletions.len(),
            additions.len(),
            skips.outskip.len(),
        );

        Self {
            block_hash: block.block_hash(),
            height,
            skips,
            deletions,
            additions,
        }
    }
}
