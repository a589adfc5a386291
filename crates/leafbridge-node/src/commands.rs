pub mod decode_leaves;
pub mod process_blocks;
pub mod tools;
