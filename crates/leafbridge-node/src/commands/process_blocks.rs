use crate::block_file::BlockFileReader;
use crate::cli::params::Chain;
use crate::{Error, Result};
use bitcoin::{Block, OutPoint};
use leafbridge_block::BlockDiff;
use leafbridge_cache::LeafCache;
use leafbridge_leaf::{LeafData, write_leaf_frame};
use leafbridge_primitives::genesis_hash;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Log progress every this many blocks.
const PROGRESS_INTERVAL: usize = 1000;

#[derive(Debug, clap::Parser)]
pub struct ProcessBlocks {
    /// Specify the chain.
    #[arg(long, value_name = "CHAIN", default_value = "mainnet")]
    chain: Chain,

    /// Path to the blk file to read.
    #[clap(long, value_name = "PATH")]
    blocks: PathBuf,

    /// Path of the framed leaf file to write.
    #[clap(long, value_name = "PATH")]
    leaves_out: PathBuf,

    /// Height of the first block in the file.
    ///
    /// When 0, the first block must be the genesis block of the chain.
    #[clap(long, default_value_t = 0)]
    start_height: i32,

    /// Number of blocks to process.
    ///
    /// Defaults to every block in the file.
    #[clap(long)]
    block_count: Option<usize>,

    /// Number of blocks a new leaf is kept in the cache before it expires.
    #[clap(long, default_value_t = 1000)]
    cache_blocks: i32,
}

/// Counters of processed blocks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BlockStats {
    pub blocks: usize,
    pub additions: usize,
    pub deletions: usize,
    pub skipped: usize,
    pub cache_hits: usize,
    pub expired: usize,
}

impl std::ops::AddAssign for BlockStats {
    fn add_assign(&mut self, other: Self) {
        self.blocks += other.blocks;
        self.additions += other.additions;
        self.deletions += other.deletions;
        self.skipped += other.skipped;
        self.cache_hits += other.cache_hits;
        self.expired += other.expired;
    }
}

#[derive(Debug, serde::Serialize)]
struct Summary {
    #[serde(flatten)]
    stats: BlockStats,
    cache_len: usize,
}

/// Streams the new leaves of each block to `writer` and keeps recent leaves
/// cached until they are spent or expire.
pub struct BlockProcessor<W> {
    writer: W,
    cache: LeafCache<LeafData>,
    cache_blocks: i32,
}

impl<W: Write> BlockProcessor<W> {
    /// Constructs a new instance of [`BlockProcessor`].
    pub fn new(writer: W, cache_blocks: i32) -> Self {
        Self {
            writer,
            cache: LeafCache::new(),
            cache_blocks,
        }
    }

    pub fn cache(&self) -> &LeafCache<LeafData> {
        &self.cache
    }

    /// Processes the block at `height`.
    pub fn process_block(&mut self, block: &Block, height: i32) -> Result<BlockStats> {
        let BlockDiff {
            skips,
            deletions,
            additions,
            ..
        } = BlockDiff::from_block(block, height);

        for leaf in &additions {
            write_leaf_frame(&mut self.writer, leaf)?;
        }

        let spent = deletions.iter().copied().collect::<HashSet<OutPoint>>();
        let expiry = height.saturating_sub(self.cache_blocks);

        let mut cache_hits = 0;
        let mut expired = 0;
        let positions = self.cache.positions_where(|leaf| {
            if spent.contains(&leaf.outpoint) {
                cache_hits += 1;
                true
            } else if leaf.coinbase_height < expiry {
                expired += 1;
                true
            } else {
                false
            }
        });
        self.cache.remove_positions(&positions)?;

        let stats = BlockStats {
            blocks: 1,
            additions: additions.len(),
            deletions: deletions.len(),
            skipped: skips.outskip.len(),
            cache_hits,
            expired,
        };

        self.cache.extend(additions);

        Ok(stats)
    }

    /// Flushes and returns the leaf writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl ProcessBlocks {
    pub fn run(self) -> Result<()> {
        let network = self.chain.bitcoin_network();

        let blocks = BlockFileReader::new(BufReader::new(File::open(&self.blocks)?))
            .with_network(network);
        let writer = BufWriter::new(File::create(&self.leaves_out)?);
        let mut processor = BlockProcessor::new(writer, self.cache_blocks);

        tracing::info!(
            "Processing {} from height {}",
            self.blocks.display(),
            self.start_height
        );

        let now = Instant::now();
        let mut total = BlockStats::default();
        let mut height = self.start_height;

        for block in blocks.take(self.block_count.unwrap_or(usize::MAX)) {
            let block = block?;

            if height == 0 {
                let expected = genesis_hash(network)?;
                let got = block.block_hash();
                if got != expected {
                    return Err(Error::GenesisMismatch { expected, got });
                }
            }

            total += processor.process_block(&block, height)?;

            if total.blocks % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Processed #{height}, {} leaves cached, {:.2}s elapsed",
                    processor.cache().len(),
                    now.elapsed().as_secs_f64()
                );
            }

            height += 1;
        }

        let cache_len = processor.cache().len();
        processor.finish()?;

        tracing::info!(
            "Wrote {} leaves from {} blocks to {}",
            total.additions,
            total.blocks,
            self.leaves_out.display()
        );

        let summary = Summary {
            stats: total,
            cache_len,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_file::tests::write_block_record;
    use bitcoin::Network;
    use bitcoin::constants::genesis_block;
    use leafbridge_block::testing::*;
    use leafbridge_leaf::LeafFrames;

    /// Three blocks: the second spends an output of the first plus one output
    /// of its own, the third is coinbase only.
    fn sample_chain() -> Vec<Block> {
        let coinbase1 = coinbase_tx(1, vec![p2pkh_output(50)]);
        let tx1 = spending_tx(
            &[external_outpoint(1, 0)],
            vec![p2pkh_output(10), p2pkh_output(20)],
            1,
        );
        let tx1_out0 = outpoint_of(&tx1, 0);
        let block1 = make_block(vec![coinbase1, tx1], 1);

        let coinbase2 = coinbase_tx(2, vec![p2pkh_output(50)]);
        let tx2 = spending_tx(
            &[tx1_out0, external_outpoint(2, 0)],
            vec![p2pkh_output(5)],
            2,
        );
        let tx3 = spending_tx(&[outpoint_of(&tx2, 0)], vec![op_return_output(b"x")], 3);
        let block2 = make_block(vec![coinbase2, tx2, tx3], 2);

        let block3 = make_block(vec![coinbase_tx(3, vec![p2pkh_output(50)])], 3);

        vec![block1, block2, block3]
    }

    #[test]
    fn test_block_processor() {
        let blocks = sample_chain();
        let mut processor = BlockProcessor::new(Vec::new(), 1);

        let stats = processor.process_block(&blocks[0], 1).unwrap();
        assert_eq!(
            stats,
            BlockStats {
                blocks: 1,
                additions: 3,
                deletions: 1,
                ..Default::default()
            }
        );
        assert_eq!(processor.cache().len(), 3);

        let stats = processor.process_block(&blocks[1], 2).unwrap();
        assert_eq!(
            stats,
            BlockStats {
                blocks: 1,
                additions: 1,
                deletions: 2,
                skipped: 1,
                cache_hits: 1,
                expired: 0,
            }
        );
        assert_eq!(processor.cache().len(), 3);

        // Leaves of block 1 are now older than one block.
        let stats = processor.process_block(&blocks[2], 3).unwrap();
        assert_eq!(stats.expired, 2);
        assert_eq!(processor.cache().len(), 2);
        assert!(
            processor
                .cache()
                .iter()
                .all(|leaf| leaf.coinbase_height >= 2)
        );

        let written = processor.finish().unwrap();
        let leaves = LeafFrames::new(&written)
            .collect::<leafbridge_leaf::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(leaves.len(), 5);
        assert_eq!(leaves[0].block_hash, blocks[0].block_hash());
        assert_eq!(leaves[4].coinbase_height, 3);
    }

    #[test]
    fn test_process_blocks_command() {
        let dir = tempfile::tempdir().unwrap();
        let blocks_path = dir.path().join("blk00000.dat");
        let leaves_path = dir.path().join("leaves.dat");

        let mut data = Vec::new();
        for block in sample_chain() {
            write_block_record(&mut data, Network::Regtest, &block);
        }
        std::fs::write(&blocks_path, data).unwrap();

        let cmd = ProcessBlocks {
            chain: Chain::Regtest,
            blocks: blocks_path,
            leaves_out: leaves_path.clone(),
            start_height: 1,
            block_count: Some(2),
            cache_blocks: 1000,
        };
        cmd.run().unwrap();

        let written = std::fs::read(&leaves_path).unwrap();
        assert_eq!(LeafFrames::new(&written).count(), 4);
    }

    #[test]
    fn test_genesis_check() {
        let dir = tempfile::tempdir().unwrap();
        let blocks_path = dir.path().join("blk00000.dat");

        let mut data = Vec::new();
        write_block_record(&mut data, Network::Regtest, &genesis_block(Network::Regtest));
        std::fs::write(&blocks_path, &data).unwrap();

        let cmd = ProcessBlocks {
            chain: Chain::Regtest,
            blocks: blocks_path.clone(),
            leaves_out: dir.path().join("leaves.dat"),
            start_height: 0,
            block_count: None,
            cache_blocks: 1000,
        };
        cmd.run().unwrap();

        let mut data = Vec::new();
        write_block_record(&mut data, Network::Regtest, &sample_chain()[0]);
        std::fs::write(&blocks_path, &data).unwrap();

        let cmd = ProcessBlocks {
            chain: Chain::Regtest,
            blocks: blocks_path,
            leaves_out: dir.path().join("leaves.dat"),
            start_height: 0,
            block_count: None,
            cache_blocks: 1000,
        };
        assert!(matches!(cmd.run(), Err(Error::GenesisMismatch { .. })));
    }
}
