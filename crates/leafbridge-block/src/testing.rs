//! Block fixtures for tests.

use bitcoin::absolute::LockTime;
use bitcoin::blockdata::block::{Header, Version};
use bitcoin::blockdata::transaction::Version as TxVersion;
use bitcoin::hashes::Hash;
use bitcoin::{
    Amount, Block, CompactTarget, OutPoint, PubkeyHash, ScriptBuf, Sequence, Transaction, TxIn,
    TxOut, Txid, Witness,
};

/// An outpoint of a transaction outside of the block under test.
pub fn external_outpoint(n: u8, vout: u32) -> OutPoint {
    OutPoint {
        txid: Txid::from_byte_array([n; 32]),
        vout,
    }
}

/// A spendable P2PKH output of `sats`.
pub fn p2pkh_output(sats: u64) -> TxOut {
    TxOut {
        value: Amount::from_sat(sats),
        script_pubkey: ScriptBuf::new_p2pkh(&PubkeyHash::all_zeros()),
    }
}

/// An OP_RETURN output carrying `data`.
pub fn op_return_output(data: &[u8]) -> TxOut {
    let mut script = vec![0x6a, data.len() as u8];
    script.extend_from_slice(data);
    TxOut {
        value: Amount::ZERO,
        script_pubkey: ScriptBuf::from_bytes(script),
    }
}

fn input(previous_output: OutPoint, script_sig: ScriptBuf) -> TxIn {
    TxIn {
        previous_output,
        script_sig,
        sequence: Sequence::MAX,
        witness: Witness::new(),
    }
}

/// A coinbase paying `outputs.len()` outputs, unique per `height`.
pub fn coinbase_tx(height: u32, outputs: Vec<TxOut>) -> Transaction {
    let mut coinbase_script = vec![0x04];
    coinbase_script.extend_from_slice(&height.to_le_bytes());

    Transaction {
        version: TxVersion::TWO,
        lock_time: LockTime::ZERO,
        input: vec![input(OutPoint::null(), ScriptBuf::from_bytes(coinbase_script))],
        output: outputs,
    }
}

/// A transaction spending `prevouts`.
///
/// `tag` goes into the lock time so that otherwise identical transactions get
/// distinct txids.
pub fn spending_tx(prevouts: &[OutPoint], outputs: Vec<TxOut>, tag: u32) -> Transaction {
    Transaction {
        version: TxVersion::TWO,
        lock_time: LockTime::from_consensus(tag),
        input: prevouts
            .iter()
            .map(|prevout| input(*prevout, ScriptBuf::new()))
            .collect(),
        output: outputs,
    }
}

/// Wraps `txdata` into a block. `nonce` distinguishes block hashes.
pub fn make_block(txdata: Vec<Transaction>, nonce: u32) -> Block {
    Block {
        header: Header {
            version: Version::TWO,
            prev_blockhash: bitcoin::BlockHash::all_zeros(),
            merkle_root: bitcoin::TxMerkleNode::all_zeros(),
            time: 0,
            bits: CompactTarget::from_consensus(0),
            nonce,
        },
        txdata,
    }
}

/// Returns the outpoint of output `vout` of `tx`.
pub fn outpoint_of(tx: &Transaction, vout: u32) -> OutPoint {
    OutPoint {
        txid: tx.compute_txid(),
        vout,
    }
}
