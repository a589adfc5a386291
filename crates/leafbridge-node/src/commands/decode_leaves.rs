use crate::Result;
use leafbridge_leaf::{LeafData, LeafFrames};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
pub struct DecodeLeaves {
    /// Path to the framed leaf file.
    #[clap(index = 1, value_name = "PATH")]
    path: PathBuf,

    /// Maximum number of leaves to print.
    #[clap(long)]
    limit: Option<usize>,
}

#[derive(Debug, serde::Serialize)]
struct LeafEntry<'a> {
    leaf_hash: String,
    #[serde(flatten)]
    leaf: &'a LeafData,
}

/// Writes one JSON line per leaf of `stream`, stopping at the first broken record.
fn write_leaves<W: Write>(stream: &[u8], limit: usize, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for leaf in LeafFrames::new(stream).take(limit) {
        let leaf = leaf?;
        let entry = LeafEntry {
            leaf_hash: hex::encode(leaf.leaf_hash()),
            leaf: &leaf,
        };
        serde_json::to_writer(&mut *out, &entry)?;
        writeln!(out)?;
        count += 1;
    }
    Ok(count)
}

impl DecodeLeaves {
    pub fn run(self) -> Result<()> {
        let stream = std::fs::read(&self.path)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let count = write_leaves(&stream, self.limit.unwrap_or(usize::MAX), &mut out)?;
        out.flush()?;

        tracing::info!("Decoded {count} leaves from {}", self.path.display());

        Ok(())
    }
}
