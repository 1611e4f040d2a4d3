use rawtx_primitives::PrimitivesError;
use rawtx_script::ScriptError;

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The previous-output identifier handed to `add_input` is not 32 bytes.
    #[error("previous output hash must be 32 bytes, got {got}")]
    InvalidPrevOutputLength { got: usize },

    /// The destination address could not be turned into a locking script,
    /// or it belongs to a network the builder is not configured for.
    #[error("invalid address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: ScriptError,
    },

    /// The bytes do not describe a legacy transaction this builder produces.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// An underlying script error (forwarded from `rawtx-script`).
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// An underlying primitives error (forwarded from `rawtx-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}
