//! Hash function primitives.
//!
//! SHA-256 and its doubled form are used for transaction identifiers and
//! Base58Check checksums; RIPEMD-160 and Hash160 derive the 20-byte public
//! key hash carried by P2PKH addresses.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d): `SHA-256(SHA-256(data))`.
///
/// The digest is returned in internal byte order. Reverse it before
/// hex-encoding when a display-order identifier is wanted.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte double-SHA-256 digest.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Hash160: `RIPEMD-160(SHA-256(data))`.
///
/// Used to derive the public key hash embedded in P2PKH addresses.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}
