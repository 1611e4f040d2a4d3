/// Error types for script operations.
///
/// Covers push-data encoding, script decoding, and address validation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A zero-length blob was submitted to the push-data encoder.
    #[error("cannot push zero-length data")]
    EmptyPush,

    /// Push data exceeds the 4-byte length field of OP_PUSHDATA4.
    #[error("data too big")]
    DataTooBig,

    /// A push data part in a multi-push encoding was rejected.
    #[error("part {index} rejected: {reason}")]
    PartRejected { index: usize, reason: String },

    /// Not enough bytes in the script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Attempted to append a push data opcode without its payload.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Base58Check payload has the wrong length for a P2PKH address.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is neither mainnet nor testnet P2PKH.
    #[error("address not supported {0}")]
    UnsupportedAddress(String),

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    EncodingChecksumFailed,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Script is empty when a non-empty script was expected.
    #[error("script is empty")]
    EmptyScript,

    /// Script is not a P2PKH script.
    #[error("not a P2PKH")]
    NotP2PKH,

    /// Error from the primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] rawtx_primitives::PrimitivesError),
}
