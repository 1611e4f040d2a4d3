/// Raw transaction toolkit - hashing, compact integers, and encodings.
///
/// This crate provides the building blocks the transaction builder leans on:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - A 32-byte chain hash type for transaction identifiers
/// - Compact-length (VarInt) encoding and little-endian byte writers/readers
/// - Base58 and Base58Check encoding/decoding

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base58;

mod error;
pub use error::PrimitivesError;
