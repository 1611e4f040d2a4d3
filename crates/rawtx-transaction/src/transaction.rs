//! Core transaction type.
//!
//! Assembles inputs and outputs into the fixed legacy layout (version 1,
//! lock time 0, final sequences), serializes it to the wire format, and
//! computes its hashes. Appends are all-or-nothing: a failed call leaves the
//! transaction exactly as it was.

use rawtx_primitives::chainhash::{double_hash_h, Hash, HASH_SIZE};
use rawtx_primitives::PrimitivesError;
use rawtx_primitives::util::{reverse_bytes, TxReader, TxWriter, VarInt};
use rawtx_script::{Address, Script, ScriptError};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash::{self, SIGHASH_ALL};
use crate::TransactionError;

/// Transaction format version. The only one this builder writes or reads.
pub const VERSION: u32 = 1;

/// Lock time. Always zero: transactions are final immediately.
pub const LOCK_TIME: u32 = 0;

/// Smallest possible serialized input: hash, index, empty script, sequence.
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;
/// Smallest possible serialized output: amount and empty script.
const MIN_OUTPUT_SIZE: usize = 8 + 1;

/// A legacy transaction: ordered inputs and outputs with fixed version and
/// lock time.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE), always 1    |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE), always 0    |
///
/// Equality compares inputs and outputs only. Two transactions that
/// serialize identically are equal whatever `Config` built them.
#[derive(Clone, Debug, Default)]
pub struct Transaction {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
    config: Config,
}

impl Transaction {
    /// Create a new empty transaction accepting addresses from any network.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new empty transaction governed by `config`.
    pub fn with_config(config: Config) -> Self {
        Transaction {
            inputs: Vec::new(),
            outputs: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -----------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------

    /// Append an input spending output `output_index` of `prev_tx_id`.
    ///
    /// # Arguments
    /// * `prev_tx_id` - 32-byte previous transaction hash, serialized in the
    ///   order given.
    /// * `output_index` - Index of the spent output.
    /// * `amount` - Value of the spent output, kept for bookkeeping only.
    /// * `unlocking_script` - Raw unlocking script bytes; may be empty.
    ///
    /// # Returns
    /// `InvalidPrevOutputLength` if `prev_tx_id` is not exactly 32 bytes,
    /// in which case nothing is appended.
    pub fn add_input(
        &mut self,
        prev_tx_id: &[u8],
        output_index: u32,
        amount: u64,
        unlocking_script: &[u8],
    ) -> Result<(), TransactionError> {
        let prev_output_hash = Hash::from_bytes(prev_tx_id).map_err(|_| {
            TransactionError::InvalidPrevOutputLength {
                got: prev_tx_id.len(),
            }
        })?;
        self.push_input(TransactionInput::new(
            prev_output_hash,
            output_index,
            amount,
            Script::from_bytes(unlocking_script),
        ));
        Ok(())
    }

    /// Append an input whose previous transaction ID is given as display
    /// hex, the byte-reversed form shown by block explorers.
    ///
    /// # Returns
    /// A `Primitives` error if `prev_tx_id` is not valid hex, or
    /// `InvalidPrevOutputLength` if it does not decode to 32 bytes. Nothing
    /// is appended on error.
    pub fn add_input_from_hex(
        &mut self,
        prev_tx_id: &str,
        output_index: u32,
        amount: u64,
        unlocking_script: &[u8],
    ) -> Result<(), TransactionError> {
        let decoded = hex::decode(prev_tx_id).map_err(PrimitivesError::from)?;
        if decoded.len() != HASH_SIZE {
            return Err(TransactionError::InvalidPrevOutputLength { got: decoded.len() });
        }
        let prev_output_hash = Hash::from_bytes(&reverse_bytes(&decoded))?;
        self.push_input(TransactionInput::new(
            prev_output_hash,
            output_index,
            amount,
            Script::from_bytes(unlocking_script),
        ));
        Ok(())
    }

    fn push_input(&mut self, input: TransactionInput) {
        debug!(
            prev_output = %input.prev_output_hash(),
            index = input.prev_output_index(),
            amount = input.amount(),
            script_len = input.unlocking_script().len(),
            inputs = self.inputs.len() + 1,
            "added input"
        );
        self.inputs.push(input);
    }

    /// Return the inputs in insertion order.
    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    /// Return the number of inputs in the transaction.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Sum of the amounts recorded on the inputs.
    pub fn total_input_amount(&self) -> u64 {
        self.inputs
            .iter()
            .fold(0u64, |total, i| total.saturating_add(i.amount()))
    }

    // -----------------------------------------------------------------
    // Outputs
    // -----------------------------------------------------------------

    /// Append an output paying `amount` to `destination_address`.
    ///
    /// The address is decoded into a P2PKH locking script. If the config
    /// pins a network, addresses from the other network are refused.
    ///
    /// # Returns
    /// `InvalidAddress` carrying the address and the decode failure; nothing
    /// is appended.
    pub fn add_output(
        &mut self,
        amount: u64,
        destination_address: &str,
    ) -> Result<(), TransactionError> {
        let address = Address::from_string(destination_address).map_err(|source| {
            warn!(address = destination_address, error = %source, "rejected destination address");
            TransactionError::InvalidAddress {
                address: destination_address.to_string(),
                source,
            }
        })?;

        if !self.config.accepts(address.network) {
            warn!(
                address = destination_address,
                network = ?address.network,
                "destination address on unexpected network"
            );
            return Err(TransactionError::InvalidAddress {
                address: destination_address.to_string(),
                source: ScriptError::UnsupportedAddress(format!(
                    "{} is a {:?} address",
                    destination_address, address.network
                )),
            });
        }

        self.push_output(TransactionOutput::p2pkh(amount, &address));
        Ok(())
    }

    /// Append a zero-value output carrying `payload` after `OP_RETURN`.
    ///
    /// The payload is embedded raw, without a push prefix. Never fails.
    pub fn add_data_output(&mut self, payload: &[u8]) {
        self.push_output(TransactionOutput::data(payload));
    }

    fn push_output(&mut self, output: TransactionOutput) {
        debug!(
            amount = output.amount(),
            data = output.is_data(),
            script_len = output.locking_script().len(),
            outputs = self.outputs.len() + 1,
            "added output"
        );
        self.outputs.push(output);
    }

    /// Return the outputs in insertion order.
    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    /// Return the number of outputs in the transaction.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output amounts.
    pub fn total_output_amount(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |total, o| total.saturating_add(o.amount()))
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Write the wire-format bytes into `writer`.
    pub fn write_to(&self, writer: &mut TxWriter) {
        writer.write_u32_le(VERSION);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(writer);
        }

        writer.write_u32_le(LOCK_TIME);
    }

    /// Serialize this transaction to raw bytes.
    ///
    /// # Returns
    /// version(4) + varint(n_in) + inputs + varint(n_out) + outputs + locktime(4).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = TxWriter::with_capacity(self.size());
        self.write_to(&mut writer);
        trace!(len = writer.len(), "serialized transaction");
        writer.into_bytes()
    }

    /// Serialize this transaction to a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Return the size of the serialized transaction in bytes.
    pub fn size(&self) -> usize {
        let inputs: usize = self
            .inputs
            .iter()
            .map(|i| {
                let script_len = i.unlocking_script().len();
                MIN_INPUT_SIZE - 1 + VarInt::from(script_len).length() + script_len
            })
            .sum();
        let outputs: usize = self
            .outputs
            .iter()
            .map(|o| {
                let script_len = o.locking_script().len();
                MIN_OUTPUT_SIZE - 1 + VarInt::from(script_len).length() + script_len
            })
            .sum();
        4 + VarInt::from(self.inputs.len()).length()
            + inputs
            + VarInt::from(self.outputs.len()).length()
            + outputs
            + 4
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must contain exactly one complete transaction with no
    /// trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = TxReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `TxReader`.
    ///
    /// Only the layout this builder writes is accepted: version 1, lock
    /// time 0, and final sequence numbers on every input. Parsed inputs
    /// carry an amount of 0 and the default config is attached.
    pub fn read_from(reader: &mut TxReader) -> Result<Self, TransactionError> {
        let version = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading version: {}", e))
        })?;
        if version != VERSION {
            return Err(TransactionError::SerializationError(format!(
                "unsupported version {}",
                version
            )));
        }

        let input_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading input count: {}", e))
        })?;
        let mut inputs = Vec::with_capacity(bounded_capacity(
            input_count.value(),
            reader.remaining() / MIN_INPUT_SIZE,
        ));
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| {
            TransactionError::SerializationError(format!("reading output count: {}", e))
        })?;
        let mut outputs = Vec::with_capacity(bounded_capacity(
            output_count.value(),
            reader.remaining() / MIN_OUTPUT_SIZE,
        ));
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading lock time: {}", e))
        })?;
        if lock_time != LOCK_TIME {
            return Err(TransactionError::SerializationError(format!(
                "unsupported lock time {}",
                lock_time
            )));
        }

        debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            "parsed transaction"
        );

        Ok(Transaction {
            inputs,
            outputs,
            config: Config::default(),
        })
    }

    // -----------------------------------------------------------------
    // Hashing
    // -----------------------------------------------------------------

    /// Double SHA-256 of the serialization followed by the little-endian
    /// `SIGHASH_ALL` flag, in internal byte order.
    pub fn hash_bytes(&self) -> [u8; 32] {
        let digest = sighash::legacy_digest(self, SIGHASH_ALL);
        trace!(digest = %hex::encode(digest), "computed transaction hash");
        digest
    }

    /// `hash_bytes()` reversed and hex-encoded.
    pub fn hash(&self) -> String {
        hex::encode(reverse_bytes(&self.hash_bytes()))
    }

    /// Compute the canonical transaction ID (double SHA-256 of the
    /// serialization, no flag appended).
    ///
    /// The returned `Hash` holds internal byte order; its `Display` shows
    /// the conventional reversed form.
    pub fn tx_id(&self) -> Hash {
        double_hash_h(&self.to_bytes())
    }

    /// Compute the transaction ID as a human-readable hex string.
    pub fn tx_id_hex(&self) -> String {
        self.tx_id().to_string()
    }
}

/// Clamp a count read from the wire to what the remaining bytes could hold.
fn bounded_capacity(count: u64, max_fit: usize) -> usize {
    usize::try_from(count).map_or(max_fit, |c| c.min(max_fit))
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs && self.outputs == other.outputs
    }
}

impl Eq for Transaction {}

impl std::fmt::Display for Transaction {
    /// Display the transaction as its hex-encoded serialization.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

