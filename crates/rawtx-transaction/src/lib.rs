//! Legacy raw transaction assembly, serialization, and hashing.
//!
//! Provides the `Transaction` builder with its input and output records,
//! the fixed version-1 wire format, and the transaction hash and ID.

pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;
pub mod config;

mod error;
pub use config::Config;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use input::TransactionInput;
pub use output::TransactionOutput;
