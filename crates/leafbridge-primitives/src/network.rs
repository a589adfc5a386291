use crate::{Error, Result};
use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, Network};

/// Genesis block hashes in raw (internal) byte order.
const GENESIS_HASHES: [(Network, [u8; 32]); 4] = [
    (
        Network::Bitcoin,
        [
            0x6f, 0xe2, 0x8c, 0x0a, 0xb6, 0xf1, 0xb3, 0x72, 0xc1, 0xa6, 0xa2, 0x46, 0xae, 0x63,
            0xf7, 0x4f, 0x93, 0x1e, 0x83, 0x65, 0xe1, 0x5a, 0x08, 0x9c, 0x68, 0xd6, 0x19, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ],
    ),
    (
        Network::Testnet,
        [
            0x43, 0x49, 0x7f, 0xd7, 0xf8, 0x26, 0x95, 0x71, 0x08, 0xf4, 0xa3, 0x0f, 0xd9, 0xce,
            0xc3, 0xae, 0xba, 0x79, 0x97, 0x20, 0x84, 0xe9, 0x0e, 0xad, 0x01, 0xea, 0x33, 0x09,
            0x00, 0x00, 0x00, 0x00,
        ],
    ),
    (
        Network::Regtest,
        [
            0x06, 0x22, 0x6e, 0x46, 0x11, 0x1a, 0x0b, 0x59, 0xca, 0xaf, 0x12, 0x60, 0x43, 0xeb,
            0x5b, 0xbf, 0x28, 0xc3, 0x4f, 0x3a, 0x5e, 0x33, 0x2a, 0x1f, 0xc7, 0xb2, 0xb7, 0x3c,
            0xf1, 0x88, 0x91, 0x0f,
        ],
    ),
    (
        Network::Signet,
        [
            0xf6, 0x1e, 0xee, 0x3b, 0x63, 0xa3, 0x80, 0xa4, 0x77, 0xa0, 0x63, 0xaf, 0x32, 0xb2,
            0xbb, 0xc9, 0x7c, 0x9f, 0xf9, 0xf0, 0x1f, 0x2c, 0x42, 0x25, 0xe9, 0x73, 0x98, 0x81,
            0x08, 0x00, 0x00, 0x00,
        ],
    ),
];

/// Message-start markers prefixing every block record in `blk*.dat` files.
const MAGIC_BYTES: [(Network, [u8; 4]); 4] = [
    (Network::Bitcoin, [0xf9, 0xbe, 0xb4, 0xd9]),
    (Network::Testnet, [0x0b, 0x11, 0x09, 0x07]),
    (Network::Regtest, [0xfa, 0xbf, 0xb5, 0xda]),
    (Network::Signet, [0x0a, 0x03, 0xcf, 0x40]),
];

/// Returns the genesis block hash of `network`.
///
/// Only mainnet, testnet3, regtest and the default signet are known.
pub fn genesis_hash(network: Network) -> Result<BlockHash> {
    GENESIS_HASHES
        .iter()
        .find(|(net, _)| *net == network)
        .map(|(_, hash)| BlockHash::from_byte_array(*hash))
        .ok_or(Error::UnsupportedNetwork(network))
}

/// Returns the network whose on-disk magic is `magic`, if any.
pub fn network_from_magic(magic: [u8; 4]) -> Option<Network> {
    MAGIC_BYTES
        .iter()
        .find(|(_, bytes)| *bytes == magic)
        .map(|(net, _)| *net)
}

/// Checks whether `bytes` is one of the known magic markers.
///
/// A reader of a blk file stops at the first record that fails this check,
/// since the remainder of a preallocated file is zero padding.
pub fn check_magic_bytes(bytes: &[u8]) -> bool {
    let is_magic = <[u8; 4]>::try_from(bytes)
        .ok()
        .and_then(network_from_magic)
        .is_some();

    if !is_magic {
        tracing::debug!("Got non magic bytes {bytes:02x?}");
    }

    is_magic
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::constants::genesis_block;

    #[test]
    fn test_genesis_hash_matches_chain_constants() {
        for network in [
            Network::Bitcoin,
            Network::Testnet,
            Network::Regtest,
            Network::Signet,
        ] {
            assert_eq!(
                genesis_hash(network).unwrap(),
                genesis_block(network).block_hash(),
                "Genesis hash mismatch for {network}"
            );
        }
    }

    #[test]
    fn test_mainnet_genesis_display() {
        assert_eq!(
            genesis_hash(Network::Bitcoin).unwrap().to_string(),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
    }

    #[test]
    fn test_magic_matches_network_constants() {
        for (network, magic) in MAGIC_BYTES {
            assert_eq!(network.magic().to_bytes(), magic);
            assert_eq!(network_from_magic(magic), Some(network));
        }
    }

    #[test]
    fn test_check_magic_bytes() {
        assert!(check_magic_bytes(&[0xf9, 0xbe, 0xb4, 0xd9]));
        assert!(check_magic_bytes(&[0x0a, 0x03, 0xcf, 0x40]));
        assert!(!check_magic_bytes(&[0, 0, 0, 0]));
        assert!(!check_magic_bytes(&[0xf9, 0xbe, 0xb4]));
    }
}
