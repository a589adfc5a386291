use bitcoin::{Block, OutPoint, Transaction};
use std::collections::HashMap;

/// Inputs and outputs of a block that cancel each other out.
///
/// Indices count every input (resp. output) of the block in order, the
/// coinbase included, even though the coinbase can never be deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSkips {
    /// Total number of inputs in the block.
    pub input_count: usize,
    /// Total number of outputs in the block.
    pub output_count: usize,
    /// Ascending indices of inputs spending an output of the same block.
    pub inskip: Vec<u32>,
    /// Ascending indices of outputs spent within the same block.
    pub outskip: Vec<u32>,
}

/// Finds the outputs of `block` that are spent within `block`.
pub fn dedup_block(block: &Block) -> BlockSkips {
    dedup_transactions(&block.txdata)
}

/// Same as [`dedup_block`], over a bare transaction list whose first entry is
/// the coinbase.
///
/// If two inputs spend the same outpoint, only the later one is matched; the
/// earlier one is left to the deletion list.
pub fn dedup_transactions(txdata: &[Transaction]) -> BlockSkips {
    let num_inputs = txdata.iter().map(|tx| tx.input.len()).sum::<usize>();
    let mut spent_in_block = HashMap::<OutPoint, u32>::with_capacity(num_inputs);

    let mut index = 0u32;
    for (tx_index, tx) in txdata.iter().enumerate() {
        if tx_index == 0 {
            index += tx.input.len() as u32;
            continue;
        }

        for input in &tx.input {
            spent_in_block.insert(input.previous_output, index);
            index += 1;
        }
    }
    let input_count = index as usize;

    let mut inskip = Vec::new();
    let mut outskip = Vec::new();

    index = 0;
    for (tx_index, tx) in txdata.iter().enumerate() {
        if tx_index == 0 {
            index += tx.output.len() as u32;
            continue;
        }

        let txid = tx.compute_txid();
        for vout in 0..tx.output.len() as u32 {
            if let Some(&input_index) = spent_in_block.get(&OutPoint { txid, vout }) {
                inskip.push(input_index);
                outskip.push(index);
            }
            index += 1;
        }
    }
    let output_count = index as usize;

    // Collected in output order, not input order.
    inskip.sort_unstable();

    tracing::trace!(
        "Dedup: {input_count} inputs, {output_count} outputs, {} spent within block",
        outskip.len()
    );

    BlockSkips {
        input_count,
        output_count,
        inskip,
        outskip,
    }
}
