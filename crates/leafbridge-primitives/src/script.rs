use bitcoin::Script;
use bitcoin::opcodes::all::OP_RETURN;

/// Scripts larger than this can never be satisfied.
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Returns `true` if an output with this script can never be spent.
///
/// Such outputs never enter the accumulator. An empty script is spendable.
pub fn is_unspendable(script: &Script) -> bool {
    let bytes = script.as_bytes();
    bytes.len() > MAX_SCRIPT_SIZE || bytes.first() == Some(&OP_RETURN.to_u8())
}
