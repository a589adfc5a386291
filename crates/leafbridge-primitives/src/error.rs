//! Error types for network lookups.

use bitcoin::Network;

/// Errors that can occur when resolving network constants.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No genesis hash is known for this network.
    #[error("Network not supported: {0}")]
    UnsupportedNetwork(Network),
}
