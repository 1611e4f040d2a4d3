//! Legacy hash preimage.
//!
//! The transaction hash reported by `Transaction::hash` is taken over the
//! serialized transaction with the 4-byte little-endian sighash type
//! appended, the same shape the legacy signature digest commits to for
//! `SIGHASH_ALL` when every unlocking script is already in place.

use rawtx_primitives::hash::sha256d;
use rawtx_primitives::util::TxWriter;

use crate::transaction::Transaction;

// -----------------------------------------------------------------------
// Sighash flag constants
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

// -----------------------------------------------------------------------
// Preimage
// -----------------------------------------------------------------------

/// Build the preimage: `tx.to_bytes() ++ sighash_type.to_le_bytes()`.
///
/// # Arguments
/// * `tx`           - The transaction to hash.
/// * `sighash_type` - The flag appended after the serialization.
///
/// # Returns
/// The raw preimage bytes (not yet hashed).
pub fn legacy_preimage(tx: &Transaction, sighash_type: u32) -> Vec<u8> {
    let mut writer = TxWriter::with_capacity(tx.size() + 4);
    tx.write_to(&mut writer);
    writer.write_u32_le(sighash_type);
    writer.into_bytes()
}

/// Double SHA-256 of `legacy_preimage(tx, sighash_type)`, in internal order.
pub fn legacy_digest(tx: &Transaction, sighash_type: u32) -> [u8; 32] {
    sha256d(&legacy_preimage(tx, sighash_type))
}
