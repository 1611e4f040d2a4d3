//! Script types, the push-data codec, and P2PKH address handling.
//!
//! Provides the `Script` type, opcode constants, script chunk parsing and
//! push encoding, and Base58Check address decoding into locking scripts.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{address_to_script, Address, Network};
pub use chunk::{encode_push_data, push_data_prefix, ScriptChunk};
