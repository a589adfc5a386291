use bitcoin::Network;

/// Bitcoin chain type.
#[derive(Clone, Copy, Default, Debug, clap::ValueEnum)]
pub enum Chain {
    /// Bitcoin mainnet.
    #[default]
    Mainnet,
    /// Bitcoin testnet3.
    Testnet,
    /// Bitcoin regtest.
    Regtest,
    /// Bitcoin signet.
    Signet,
}

impl Chain {
    pub fn bitcoin_network(&self) -> Network {
        match self {
            Self::Mainnet => Network::Bitcoin,
            Self::Testnet => Network::Testnet,
            Self::Regtest => Network::Regtest,
            Self::Signet => Network::Signet,
        }
    }
}
