//! Sequential reader of `blk*.dat` files.
//!
//! Each record is `magic (4) || size LE32 (4) || raw block (size)`. Files are
//! preallocated, so the first record without a known magic marks the end.

use crate::{Error, Result};
use bitcoin::{Block, Network};
use leafbridge_primitives::{check_magic_bytes, network_from_magic};
use std::io::{ErrorKind, Read};

/// Upper bound of a serialized block.
const MAX_BLOCK_RECORD_SIZE: usize = 4_000_000;

/// Reads blocks one after another from a blk file.
pub struct BlockFileReader<R> {
    reader: R,
    network: Option<Network>,
    done: bool,
}

impl<R: Read> BlockFileReader<R> {
    /// Constructs a new instance of [`BlockFileReader`].
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            network: None,
            done: false,
        }
    }

    /// Rejects records carrying the magic of any network other than `network`.
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Reads the next block, `None` at the end of the file.
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        if self.done {
            return Ok(None);
        }

        let mut magic = [0u8; 4];
        match self.reader.read_exact(&mut magic) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                self.done = true;
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }

        if !check_magic_bytes(&magic) {
            if magic != [0u8; 4] {
                tracing::warn!("Stray bytes {magic:02x?} after the last block record");
            }
            self.done = true;
            return Ok(None);
        }

        if let Some(expected) = self.network {
            if network_from_magic(magic) != Some(expected) {
                return Err(Error::NetworkMismatch(magic));
            }
        }

        let mut size = [0u8; 4];
        self.reader.read_exact(&mut size)?;
        let size = u32::from_le_bytes(size) as usize;

        if size > MAX_BLOCK_RECORD_SIZE {
            return Err(std::io::Error::new(
                ErrorKind::InvalidData,
                format!("Block record of {size} bytes exceeds {MAX_BLOCK_RECORD_SIZE}"),
            )
            .into());
        }

        let mut data = vec![0u8; size];
        self.reader.read_exact(&mut data)?;

        Ok(Some(bitcoin::consensus::deserialize(&data)?))
    }
}

impl<R: Read> Iterator for BlockFileReader<R> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.next_block();
        if next.is_err() {
            self.done = true;
        }
        next.transpose()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use leafbridge_block::testing::{coinbase_tx, make_block, p2pkh_output};
    use std::io::Cursor;

    pub(crate) fn write_block_record(data: &mut Vec<u8>, network: Network, block: &Block) {
        let raw = bitcoin::consensus::serialize(block);
        data.extend_from_slice(&network.magic().to_bytes());
        data.extend_from_slice(&(raw.len() as u32).to_le_bytes());
        data.extend_from_slice(&raw);
    }

    fn sample_blocks() -> Vec<Block> {
        (1..=3)
            .map(|height| make_block(vec![coinbase_tx(height, vec![p2pkh_output(50)])], height))
            .collect()
    }

    #[test]
    fn test_read_blocks_until_padding() {
        let blocks = sample_blocks();
        let mut data = Vec::new();
        for block in &blocks {
            write_block_record(&mut data, Network::Regtest, block);
        }
        // Preallocated tail.
        data.extend_from_slice(&[0u8; 64]);

        let read = BlockFileReader::new(Cursor::new(data))
            .with_network(Network::Regtest)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(read, blocks);
    }

    #[test]
    fn test_read_blocks_until_eof() {
        let blocks = sample_blocks();
        let mut data = Vec::new();
        for block in &blocks {
            write_block_record(&mut data, Network::Bitcoin, block);
        }

        let mut reader = BlockFileReader::new(Cursor::new(data));
        for block in &blocks {
            assert_eq!(reader.next_block().unwrap().as_ref(), Some(block));
        }
        assert!(reader.next_block().unwrap().is_none());
        assert!(reader.next_block().unwrap().is_none());
    }

    #[test]
    fn test_network_mismatch() {
        let mut data = Vec::new();
        write_block_record(&mut data, Network::Testnet, &sample_blocks()[0]);

        let mut reader = BlockFileReader::new(Cursor::new(data)).with_network(Network::Bitcoin);
        assert!(matches!(reader.next(), Some(Err(Error::NetworkMismatch(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_record() {
        let mut data = Vec::new();
        write_block_record(&mut data, Network::Regtest, &sample_blocks()[0]);
        data.truncate(data.len() - 1);

        let mut reader = BlockFileReader::new(Cursor::new(data));
        assert!(matches!(reader.next_block(), Err(Error::Io(_))));
    }
}
