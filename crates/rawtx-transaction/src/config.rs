//! Builder configuration.

use rawtx_script::Network;
use serde::{Deserialize, Serialize};

/// Settings applied to a `Transaction` while it is being assembled.
///
/// Deserializes from JSON or TOML, with missing fields taking their defaults:
///
/// ```json
/// { "network": "testnet" }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When set, `add_output` rejects addresses from any other network.
    /// `None` accepts mainnet and testnet alike.
    pub network: Option<Network>,
}

impl Config {
    /// Accept destination addresses from either network.
    pub fn any_network() -> Self {
        Config { network: None }
    }

    /// Only accept mainnet destination addresses.
    pub fn mainnet() -> Self {
        Config {
            network: Some(Network::Mainnet),
        }
    }

    /// Only accept testnet destination addresses.
    pub fn testnet() -> Self {
        Config {
            network: Some(Network::Testnet),
        }
    }

    /// True if an address on `network` may be paid under this config.
    pub fn accepts(&self, network: Network) -> bool {
        self.network.map_or(true, |pinned| pinned == network)
    }
}
