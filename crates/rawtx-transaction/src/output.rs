//! Transaction output with an amount and locking script.
//!
//! Outputs are either P2PKH payments or zero-value `OP_RETURN` data
//! carriers. Fields are private so the data-carrier amount cannot be
//! changed after construction.

use rawtx_primitives::util::{TxReader, TxWriter};
use rawtx_script::{Address, Script};

use crate::TransactionError;

/// A single output in a legacy transaction.
///
/// # Wire format
///
/// | Field            | Size           |
/// |------------------|----------------|
/// | amount           | 8 bytes (LE)   |
/// | script length    | VarInt         |
/// | locking_script   | variable       |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    amount: u64,
    locking_script: Script,
}

impl TransactionOutput {
    /// An output paying `amount` to the P2PKH script of `address`.
    pub fn p2pkh(amount: u64, address: &Address) -> Self {
        TransactionOutput {
            amount,
            locking_script: address.locking_script(),
        }
    }

    /// A zero-value output whose script is `OP_RETURN` followed by `payload`.
    pub fn data(payload: &[u8]) -> Self {
        TransactionOutput {
            amount: 0,
            locking_script: Script::data_carrier(payload),
        }
    }

    /// An output with an arbitrary, already-built locking script.
    ///
    /// # Returns
    /// `InvalidTransaction` if the script is a data carrier and `amount` is
    /// not zero.
    pub fn from_script(amount: u64, locking_script: Script) -> Result<Self, TransactionError> {
        if locking_script.is_data() && amount != 0 {
            return Err(TransactionError::InvalidTransaction(format!(
                "data carrier output must have zero amount, got {}",
                amount
            )));
        }
        Ok(TransactionOutput {
            amount,
            locking_script,
        })
    }

    /// Value in the smallest currency unit.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn locking_script(&self) -> &Script {
        &self.locking_script
    }

    /// Return the locking script as a hex-encoded string.
    pub fn locking_script_hex(&self) -> String {
        self.locking_script.to_hex()
    }

    /// True when the locking script is a data carrier.
    pub fn is_data(&self) -> bool {
        self.locking_script.is_data()
    }

    /// Deserialize a `TransactionOutput` from a `TxReader`.
    ///
    /// Reads 8-byte LE amount, a varint script length, and the script bytes.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded output.
    ///
    /// # Returns
    /// `Ok(TransactionOutput)` on success, or a `SerializationError` if the
    /// data is truncated or a data carrier has a non-zero amount.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let amount = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading amount: {}", e))
        })?;

        let script_len = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading script length: {}", e))
        })?;

        let script_len = usize::try_from(script_len.value()).map_err(|_| {
            TransactionError::SerializationError(format!(
                "locking script length {} out of range",
                script_len.value()
            ))
        })?;

        let script_bytes = reader.read_bytes(script_len).map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;

        let locking_script = Script::from_bytes(script_bytes);
        if locking_script.is_data() && amount != 0 {
            return Err(TransactionError::SerializationError(format!(
                "data carrier output with non-zero amount {}",
                amount
            )));
        }

        Ok(TransactionOutput {
            amount,
            locking_script,
        })
    }

    /// Serialize this `TransactionOutput` into a `TxWriter`.
    pub fn write_to(&self, writer: &mut TxWriter) {
        writer.write_u64_le(self.amount);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }

    /// Serialize this output to a byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = TxWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2pkh_output_bytes() {
        let address = Address::from_string("1FromKBPAS8MWsk1Yv1Yiu8rJbjfVioBHc").unwrap();
        let output = TransactionOutput::p2pkh(118_307, &address);
        assert_eq!(
            hex::encode(output.to_bytes()),
            "23ce0100000000001976a914a2fd2e039a86dbcf0e1a664729e09e8007f8951088ac"
        );
        assert!(!output.is_data());
    }

    #[test]
    fn test_data_output() {
        let output = TransactionOutput::data(b"hello");
        assert_eq!(output.amount(), 0);
        assert_eq!(output.locking_script_hex(), "6a68656c6c6f");
        assert!(output.is_data());
        assert_eq!(hex::encode(output.to_bytes()), "0000000000000000066a68656c6c6f");
    }

    /// A 300-byte payload needs a three-byte script length prefix.
    #[test]
    fn test_data_output_long_payload_varint() {
        let output = TransactionOutput::data(&[0x01; 300]);
        let bytes = output.to_bytes();
        assert_eq!(&bytes[8..11], &[0xfd, 0x2d, 0x01]);
        assert_eq!(bytes.len(), 8 + 3 + 301);
    }

    #[test]
    fn test_read_back() {
        let output = TransactionOutput::from_script(42, Script::from_bytes(&[0x51])).unwrap();
        let bytes = output.to_bytes();
        let mut reader = TxReader::new(&bytes);
        assert_eq!(TransactionOutput::read_from(&mut reader).unwrap(), output);
        assert_eq!(reader.remaining(), 0);
    }

    /// A data carrier only accepts a zero amount; other scripts take any.
    #[test]
    fn test_from_script_data_carrier_amount() {
        assert!(matches!(
            TransactionOutput::from_script(5_000, Script::data_carrier(b"hi")),
            Err(TransactionError::InvalidTransaction(_))
        ));
        assert!(matches!(
            TransactionOutput::from_script(1, Script::from_bytes(&[0x00, 0x6a])),
            Err(TransactionError::InvalidTransaction(_))
        ));
        let zero = TransactionOutput::from_script(0, Script::data_carrier(b"hi")).unwrap();
        assert_eq!(zero, TransactionOutput::data(b"hi"));
    }

    /// Parsing refuses a data carrier that carries value.
    #[test]
    fn test_read_rejects_valued_data_carrier() {
        let bytes = hex::decode("e803000000000000036a6869").unwrap();
        let mut reader = TxReader::new(&bytes);
        assert!(matches!(
            TransactionOutput::read_from(&mut reader),
            Err(TransactionError::SerializationError(_))
        ));

        let bytes = hex::decode("0000000000000000036a6869").unwrap();
        let mut reader = TxReader::new(&bytes);
        assert!(TransactionOutput::read_from(&mut reader).unwrap().is_data());
    }

    #[test]
    fn test_read_truncated_script() {
        let bytes = hex::decode("0000000000000000056a01").unwrap();
        let mut reader = TxReader::new(&bytes);
        assert!(matches!(
            TransactionOutput::read_from(&mut reader),
            Err(TransactionError::SerializationError(_))
        ));
    }
}
