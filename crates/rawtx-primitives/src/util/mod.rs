//! Utility types for binary serialization.
//!
//! Provides the compact-length `VarInt`, the `TxWriter` / `TxReader` pair
//! used to lay out and read back little-endian wire data, and the
//! `reverse_bytes` helper used to turn internal-order hashes into their
//! conventional display order.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// Marker byte for a 2-byte little-endian VarInt payload.
pub const VARINT_U16_MARKER: u8 = 0xfd;
/// Marker byte for a 4-byte little-endian VarInt payload.
pub const VARINT_U32_MARKER: u8 = 0xfe;
/// Marker byte for an 8-byte little-endian VarInt payload.
pub const VARINT_U64_MARKER: u8 = 0xff;

/// A compact-length (variable-length) unsigned integer.
///
/// Used on the wire to prefix the input list, the output list, and every
/// script. The encoding is 1, 3, 5, or 9 bytes depending on magnitude:
///
/// | Value range               | Encoding                 |
/// |---------------------------|--------------------------|
/// | `0..=0xfc`                | 1 byte, the value itself |
/// | `0xfd..=0xffff`           | `0xfd` + u16 LE          |
/// | `0x1_0000..=0xffff_ffff`  | `0xfe` + u32 LE          |
/// | above                     | `0xff` + u64 LE          |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the front of a byte slice.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `UnexpectedEof` when the
    /// slice is shorter than the encoding its marker announces.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut reader = TxReader::new(data);
        let value = reader.read_varint()?;
        Ok((value, data.len() - reader.remaining()))
    }

    /// Return the wire-format byte length of this VarInt (1, 3, 5, or 9).
    pub fn length(&self) -> usize {
        if self.0 < VARINT_U16_MARKER as u64 {
            1
        } else if self.0 <= u16::MAX as u64 {
            3
        } else if self.0 <= u32::MAX as u64 {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.put_bytes(&mut buf);
        buf
    }

    /// Write the VarInt into a destination buffer.
    ///
    /// The buffer must be at least `self.length()` bytes long.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> usize {
        let v = self.0;
        match self.length() {
            1 => {
                dst[0] = v as u8;
                1
            }
            3 => {
                dst[0] = VARINT_U16_MARKER;
                dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
                3
            }
            5 => {
                dst[0] = VARINT_U32_MARKER;
                dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
                5
            }
            _ => {
                dst[0] = VARINT_U64_MARKER;
                dst[1..9].copy_from_slice(&v.to_le_bytes());
                9
            }
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

// ---------------------------------------------------------------------------
// Byte order
// ---------------------------------------------------------------------------

/// Return a copy of `data` with the byte order reversed.
///
/// The input is left untouched. Hashes are produced and consumed in
/// internal (little-endian) order; this is only for display.
pub fn reverse_bytes(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

// ---------------------------------------------------------------------------
// TxReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for little-endian wire data.
///
/// Wraps a byte slice and maintains a read position.
pub struct TxReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TxReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        TxReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `UnexpectedEof` if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a VarInt and advance the position past its full encoding.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let value = match self.read_u8()? {
            VARINT_U64_MARKER => self.read_u64_le()?,
            VARINT_U32_MARKER => self.read_u32_le()? as u64,
            VARINT_U16_MARKER => self.read_u16_le()? as u64,
            b => b as u64,
        };
        Ok(VarInt(value))
    }

    /// Return the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// TxWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for little-endian wire data.
///
/// Wraps a `Vec<u8>`; every write appends, nothing is ever rewritten.
#[derive(Debug, Default)]
pub struct TxWriter {
    buf: Vec<u8>,
}

impl TxWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        TxWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        TxWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt in its compact encoding.
    pub fn write_varint(&mut self, varint: VarInt) {
        let mut scratch = [0u8; 9];
        let n = varint.put_bytes(&mut scratch);
        self.buf.extend_from_slice(&scratch[..n]);
    }

    /// Append `bytes` prefixed by their length as a VarInt.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
