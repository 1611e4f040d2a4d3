//! Transaction input referencing a previous output.
//!
//! Holds the previous output's transaction hash and index, the unlocking
//! script, and the spent amount. The amount is bookkeeping only and never
//! reaches the wire.

use rawtx_primitives::chainhash::{Hash, HASH_SIZE};
use rawtx_primitives::util::{TxReader, TxWriter};
use rawtx_script::Script;

use crate::TransactionError;

/// Sequence number indicating a finalized input (no relative lock-time).
/// Every input this builder emits carries it.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A single input in a legacy transaction.
///
/// # Wire format
///
/// | Field              | Size             |
/// |--------------------|------------------|
/// | prev_output_hash   | 32 bytes (as stored) |
/// | prev_output_index  | 4 bytes (LE)     |
/// | script length      | VarInt           |
/// | unlocking_script   | variable         |
/// | sequence           | 4 bytes (LE)     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    prev_output_hash: Hash,
    prev_output_index: u32,
    amount: u64,
    unlocking_script: Script,
}

impl TransactionInput {
    /// Create an input spending `prev_output_index` of `prev_output_hash`.
    ///
    /// # Arguments
    /// * `prev_output_hash` - Previous transaction hash, serialized as given.
    /// * `prev_output_index` - Output index within that transaction.
    /// * `amount` - Value of the spent output. Not serialized.
    /// * `unlocking_script` - Script satisfying the spent output; may be empty.
    pub fn new(
        prev_output_hash: Hash,
        prev_output_index: u32,
        amount: u64,
        unlocking_script: Script,
    ) -> Self {
        TransactionInput {
            prev_output_hash,
            prev_output_index,
            amount,
            unlocking_script,
        }
    }

    /// The previous transaction hash in stored (wire) order.
    pub fn prev_output_hash(&self) -> &Hash {
        &self.prev_output_hash
    }

    pub fn prev_output_index(&self) -> u32 {
        self.prev_output_index
    }

    /// The amount recorded when the input was added, or 0 for parsed inputs.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn unlocking_script(&self) -> &Script {
        &self.unlocking_script
    }

    /// Always `DEFAULT_SEQUENCE_NUMBER`.
    pub fn sequence(&self) -> u32 {
        DEFAULT_SEQUENCE_NUMBER
    }

    /// Deserialize a `TransactionInput` from a `TxReader`.
    ///
    /// Only final inputs are accepted; any other sequence number is a
    /// `SerializationError`. The amount is not on the wire and is set to 0.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let hash_bytes = reader.read_array::<HASH_SIZE>().map_err(|e| {
            TransactionError::SerializationError(format!("reading previous output hash: {}", e))
        })?;

        let prev_output_index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_len = usize::try_from(script_len.value()).map_err(|_| {
            TransactionError::SerializationError(format!(
                "unlocking script length {} out of range",
                script_len.value()
            ))
        })?;

        let script_bytes = reader.read_bytes(script_len).map_err(|e| {
            TransactionError::SerializationError(format!("reading unlocking script: {}", e))
        })?;

        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence number: {}", e))
        })?;
        if sequence != DEFAULT_SEQUENCE_NUMBER {
            return Err(TransactionError::SerializationError(format!(
                "unsupported sequence number {:#010x}",
                sequence
            )));
        }

        Ok(TransactionInput {
            prev_output_hash: Hash::new(hash_bytes),
            prev_output_index,
            amount: 0,
            unlocking_script: Script::from_bytes(script_bytes),
        })
    }

    /// Serialize this `TransactionInput` into a `TxWriter`.
    pub fn write_to(&self, writer: &mut TxWriter) {
        writer.write_bytes(self.prev_output_hash.as_bytes());
        writer.write_u32_le(self.prev_output_index);
        writer.write_var_bytes(self.unlocking_script.to_bytes());
        writer.write_u32_le(DEFAULT_SEQUENCE_NUMBER);
    }

    /// Serialize this input to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = TxWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionInput {
        TransactionInput::new(
            Hash::new([0x11; 32]),
            7,
            5_000,
            Script::from_hex("76a914dd6cce9f255a8cc17bda8ba0373df8e861cb866e88ac").unwrap(),
        )
    }

    /// Hash bytes are written as stored, followed by index, script, and sequence.
    #[test]
    fn test_write_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 32 + 4 + 1 + 25 + 4);
        assert_eq!(&bytes[..32], &[0x11; 32]);
        assert_eq!(&bytes[32..36], &[7, 0, 0, 0]);
        assert_eq!(bytes[36], 25);
        assert_eq!(&bytes[bytes.len() - 4..], &[0xff; 4]);
    }

    /// An empty unlocking script is a single zero-length prefix.
    #[test]
    fn test_write_empty_script() {
        let input = TransactionInput::new(Hash::default(), 0, 0, Script::new());
        let bytes = input.to_bytes();
        assert_eq!(bytes.len(), 41);
        assert_eq!(bytes[36], 0x00);
    }

    /// Reading back drops the amount but keeps everything on the wire.
    #[test]
    fn test_read_back() {
        let original = sample();
        let bytes = original.to_bytes();
        let mut reader = TxReader::new(&bytes);
        let parsed = TransactionInput::read_from(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 0);
        assert_eq!(parsed.prev_output_hash(), original.prev_output_hash());
        assert_eq!(parsed.prev_output_index(), 7);
        assert_eq!(parsed.unlocking_script(), original.unlocking_script());
        assert_eq!(parsed.amount(), 0);
        assert_eq!(parsed.sequence(), DEFAULT_SEQUENCE_NUMBER);
    }

    #[test]
    fn test_read_rejects_non_final_sequence() {
        let mut bytes = sample().to_bytes();
        let n = bytes.len();
        bytes[n - 4..].copy_from_slice(&0xfffffffeu32.to_le_bytes());
        let mut reader = TxReader::new(&bytes);
        assert!(matches!(
            TransactionInput::read_from(&mut reader),
            Err(TransactionError::SerializationError(_))
        ));
    }

    #[test]
    fn test_read_truncated() {
        let bytes = sample().to_bytes();
        for cut in [10, 33, 37, bytes.len() - 1] {
            let mut reader = TxReader::new(&bytes[..cut]);
            assert!(TransactionInput::read_from(&mut reader).is_err(), "cut at {}", cut);
        }
    }
}
