use crate::Result;
use crate::cli::params::Chain;
use leafbridge_leaf::{LeafData, LeafHash};
use leafbridge_primitives::genesis_hash;

/// Utilities
#[derive(Debug, clap::Subcommand)]
pub enum Tools {
    /// Print the genesis block hash of a chain.
    #[command(name = "genesis-hash")]
    GenesisHash {
        /// Specify the chain.
        #[arg(long, value_name = "CHAIN", default_value = "mainnet")]
        chain: Chain,
    },

    /// Compute the accumulator hash of a serialized leaf.
    ///
    /// The input is the hex of the unframed leaf serialization, with or without
    /// a `0x` prefix.
    #[command(name = "leaf-hash")]
    LeafHash {
        #[arg(index = 1)]
        input: String,
    },
}

fn leaf_hash_of_hex(input: &str) -> Result<LeafHash> {
    let str_without_0x = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(str_without_0x)?;
    Ok(LeafData::from_bytes(&bytes)?.leaf_hash())
}

impl Tools {
    pub fn run(self) -> Result<()> {
        match self {
            Self::GenesisHash { chain } => {
                println!("{}", genesis_hash(chain.bitcoin_network())?);
            }
            Self::LeafHash { input } => {
                println!("{}", hex::encode(leaf_hash_of_hex(&input)?));
            }
        }
        Ok(())
    }
}
