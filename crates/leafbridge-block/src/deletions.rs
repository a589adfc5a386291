use crate::dedup::dedup_block;
use bitcoin::{Block, OutPoint, Transaction};

/// Returns the outpoints spent by `block` that need deletion proofs.
///
/// That is every input except the coinbase inputs and the inputs listed in
/// `inskip`, in block order. The order matters to proof batching downstream.
pub fn extract_deletions(block: &Block, inskip: &[u32]) -> Vec<OutPoint> {
    extract_deletions_from(&block.txdata, inskip)
}

/// Same as [`extract_deletions`], over a bare transaction list.
///
/// `inskip` must be ascending, as produced by [`crate::dedup_transactions`].
pub fn extract_deletions_from(txdata: &[Transaction], inskip: &[u32]) -> Vec<OutPoint> {
    let num_spends = txdata
        .iter()
        .skip(1)
        .map(|tx| tx.input.len())
        .sum::<usize>();

    let mut deletions = Vec::with_capacity(num_spends.saturating_sub(inskip.len()));
    let mut skips = inskip.iter().copied().peekable();

    let mut index = 0u32;
    for (tx_index, tx) in txdata.iter().enumerate() {
        // Coinbase can have many inputs.
        if tx_index == 0 {
            index += tx.input.len() as u32;
            continue;
        }

        for input in &tx.input {
            if skips.next_if_eq(&index).is_none() {
                deletions.push(input.previous_output);
            }
            index += 1;
        }
    }

    deletions
}

/// Dedups `block` and returns the outpoints that need deletion proofs.
pub fn block_to_del_outpoints(block: &Block) -> Vec<OutPoint> {
    let skips = dedup_block(block);
    extract_deletions(block, &skips.inskip)
}
