use bitcoin::{Block, OutPoint};
use leafbridge_leaf::LeafData;
use leafbridge_primitives::is_unspendable;

/// Builds the leaves created by `block`.
///
/// Every output becomes a leaf unless it is listed in `outskip` or can never
/// be spent. Coinbase outputs are included.
pub fn block_to_add_leaves(block: &Block, height: i32, outskip: &[u32]) -> Vec<LeafData> {
    let block_hash = block.block_hash();
    let mut skips = outskip.iter().copied().peekable();
    let mut leaves = Vec::new();

    let mut index = 0u32;
    for tx in &block.txdata {
        let txid = tx.compute_txid();

        for (vout, output) in tx.output.iter().enumerate() {
            let skipped = skips.next_if_eq(&index).is_some();
            index += 1;

            if skipped || is_unspendable(&output.script_pubkey) {
                continue;
            }

            leaves.push(LeafData {
                block_hash,
                outpoint: OutPoint {
                    txid,
                    vout: vout as u32,
                },
                coinbase_height: height,
                // Bounded by MAX_MONEY.
                amount: output.value.to_sat() as i64,
                script_pubkey: output.script_pubkey.clone(),
            });
        }
    }

    leaves
}
