//! P2PKH address handling.
//!
//! Decodes Base58Check address strings into a public key hash plus network,
//! builds addresses from hashes or public keys, and turns an address into
//! the locking script that pays it.

use std::fmt;
use std::str::FromStr;

use rawtx_primitives::base58;
use rawtx_primitives::hash::hash160;
use rawtx_primitives::PrimitivesError;

use crate::{Script, ScriptError};

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;
/// Version byte plus 20-byte hash.
const PAYLOAD_LEN: usize = 21;

/// Network type for address prefix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Mainnet (address prefix 0x00, starts with '1').
    Mainnet,
    /// Testnet (address prefix 0x6f, starts with 'm' or 'n').
    Testnet,
}

impl Network {
    /// The P2PKH version byte for this network.
    pub fn p2pkh_version(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }
}

/// A P2PKH address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The human-readable Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    /// The network this address belongs to.
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Validates the checksum, the payload length, and the version byte
    /// (0x00 = mainnet, 0x6f = testnet).
    ///
    /// # Arguments
    /// * `addr` - The Base58Check address string.
    ///
    /// # Returns
    /// An `Address`, or the first validation failure.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let payload = base58::check_decode(addr).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => ScriptError::EncodingChecksumFailed,
            PrimitivesError::InvalidBase58(reason) => {
                ScriptError::InvalidAddress(format!("'{}': {}", addr, reason))
            }
            other => ScriptError::Primitives(other),
        })?;

        if payload.len() != PAYLOAD_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let network = match payload[0] {
            MAINNET_P2PKH => Network::Mainnet,
            TESTNET_P2PKH => Network::Testnet,
            _ => return Err(ScriptError::UnsupportedAddress(addr.to_string())),
        };

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&payload[1..]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    ///
    /// # Arguments
    /// * `hash` - The 20-byte hash160 of the public key.
    /// * `network` - The target network.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut payload = Vec::with_capacity(PAYLOAD_LEN);
        payload.push(network.p2pkh_version());
        payload.extend_from_slice(hash);

        Address {
            address_string: base58::check_encode(&payload),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from a hex-encoded public key.
    ///
    /// The key bytes are hashed with hash160; no curve validation is done.
    pub fn from_public_key_string(pub_key_hex: &str, mainnet: bool) -> Result<Self, ScriptError> {
        let pub_key_bytes =
            hex::decode(pub_key_hex).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        let network = if mainnet { Network::Mainnet } else { Network::Testnet };
        Ok(Self::from_public_key_hash(&hash160(&pub_key_bytes), network))
    }

    /// The P2PKH locking script paying this address.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh_lock(&self.public_key_hash)
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

/// Decode an address string and return its P2PKH locking script.
///
/// # Arguments
/// * `address` - Base58Check P2PKH address, mainnet or testnet.
///
/// # Returns
/// The 25-byte locking script, or the address decoding error.
pub fn address_to_script(address: &str) -> Result<Script, ScriptError> {
    Ok(Address::from_string(address)?.locking_script())
}

#[cfg(test)]
mod tests {
    //! Address parsing, generation, and locking script derivation.

    use super::*;

    /// The public key hash shared across several test vectors.
    const TEST_PUBLIC_KEY_HASH: &str = "00ac6144c4db7b5790f343cf0477a65fb8a02eb7";

    fn hash_from_hex(s: &str) -> [u8; 20] {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&hex::decode(s).expect("valid hex"));
        hash
    }

    // -----------------------------------------------------------------------
    // from_string
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_string_mainnet() {
        let address_str = "1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr";
        let addr = Address::from_string(address_str).expect("should parse mainnet");
        assert_eq!(addr.address_string, address_str);
        assert_eq!(
            hex::encode(addr.public_key_hash),
            "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
        assert_eq!(addr.network, Network::Mainnet);
    }

    #[test]
    fn test_from_string_testnet() {
        let address_str = "mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd";
        let addr: Address = address_str.parse().expect("should parse testnet");
        assert_eq!(
            hex::encode(addr.public_key_hash),
            "8fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
        assert_eq!(addr.network, Network::Testnet);
        assert_eq!(format!("{}", addr), address_str);
    }

    /// A string that decodes to the wrong payload length.
    #[test]
    fn test_from_string_short_address() {
        let result = Address::from_string("ADD8E55");
        assert!(result.is_err());
    }

    /// A well-formed Base58Check payload with an unknown version byte.
    #[test]
    fn test_from_string_unsupported_version() {
        let mut payload = vec![0x05];
        payload.extend_from_slice(&[0x11; 20]);
        let encoded = base58::check_encode(&payload);
        assert!(matches!(
            Address::from_string(&encoded),
            Err(ScriptError::UnsupportedAddress(_))
        ));
    }

    #[test]
    fn test_from_string_bad_checksum() {
        // Last character altered from ...BHc.
        assert!(matches!(
            Address::from_string("1FromKBPAS8MWsk1Yv1Yiu8rJbjfVioBHd"),
            Err(ScriptError::EncodingChecksumFailed)
        ));
    }

    #[test]
    fn test_from_string_invalid_characters() {
        assert!(matches!(
            Address::from_string("1FromKBPAS8MWsk1Yv1Yiu8rJbjfVioB0l"),
            Err(ScriptError::InvalidAddress(_))
        ));
        assert!(Address::from_string("").is_err());
    }

    #[test]
    fn test_from_string_wrong_payload_length() {
        let encoded = base58::check_encode(&[0x00; 10]);
        assert!(matches!(
            Address::from_string(&encoded),
            Err(ScriptError::InvalidAddressLength(_))
        ));
    }

    // -----------------------------------------------------------------------
    // from_public_key_string / from_public_key_hash
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_public_key_string() {
        let pubkey = "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce";
        let main = Address::from_public_key_string(pubkey, true).expect("should create");
        assert_eq!(hex::encode(main.public_key_hash), TEST_PUBLIC_KEY_HASH);
        assert_eq!(main.address_string, "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS");

        let test = Address::from_public_key_string(pubkey, false).expect("should create");
        assert_eq!(test.address_string, "mfaWoDuTsFfiunLTqZx4fKpVsUctiDV9jk");
        assert_eq!(test.network, Network::Testnet);
    }

    #[test]
    fn test_from_public_key_string_invalid() {
        assert!(matches!(
            Address::from_public_key_string("invalid_pubkey", true),
            Err(ScriptError::InvalidHex(_))
        ));
    }

    /// from_public_key_hash followed by from_string yields the same address.
    #[test]
    fn test_public_key_hash_roundtrip() {
        let hash = hash_from_hex(TEST_PUBLIC_KEY_HASH);
        for network in [Network::Mainnet, Network::Testnet] {
            let addr = Address::from_public_key_hash(&hash, network);
            let parsed = Address::from_string(&addr.address_string).expect("should parse back");
            assert_eq!(addr, parsed);
        }
    }

    // -----------------------------------------------------------------------
    // Locking scripts
    // -----------------------------------------------------------------------

    #[test]
    fn test_address_to_script() {
        let script = address_to_script("1FromKBPAS8MWsk1Yv1Yiu8rJbjfVioBHc").unwrap();
        assert_eq!(
            script.to_hex(),
            "76a914a2fd2e039a86dbcf0e1a664729e09e8007f8951088ac"
        );
        assert!(script.is_p2pkh());
    }

    /// Mainnet and testnet forms of one hash lock to the same script.
    #[test]
    fn test_locking_script_network_independent() {
        let main = address_to_script("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        let test = address_to_script("mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd").unwrap();
        assert_eq!(main, test);
        assert_eq!(
            main.public_key_hash().unwrap(),
            hash_from_hex("8fe80c75c9560e8b56ed64ea3c26e18d2c52211b")
        );
    }

    #[test]
    fn test_address_to_script_invalid() {
        assert!(address_to_script("not-an-address").is_err());
    }

    #[test]
    fn test_network_serde() {
        assert_eq!(serde_json::to_string(&Network::Mainnet).unwrap(), r#""mainnet""#);
        let n: Network = serde_json::from_str(r#""testnet""#).unwrap();
        assert_eq!(n, Network::Testnet);
    }
}
