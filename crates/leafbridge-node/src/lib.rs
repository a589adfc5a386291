//! Leafbridge Node Library.
//!
//! Command line front end of the bridge: reads raw blocks from disk, turns them
//! into accumulator additions and deletions, and streams the new leaves to a
//! framed leaf file.

mod block_file;
mod cli;
mod commands;
mod error;

pub use self::block_file::BlockFileReader;
pub use self::cli::run;
pub use self::commands::process_blocks::{BlockProcessor, BlockStats};
pub use self::error::Error;

/// Result type for node commands.
pub type Result<T> = std::result::Result<T, Error>;
