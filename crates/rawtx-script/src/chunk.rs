//! Script chunk parsing and push-data encoding.
//!
//! A script chunk is either an opcode or a data push with its associated
//! bytes. This module holds the push-data codec: choosing the length
//! prefix for a blob on the way in, and splitting raw script bytes back into
//! chunks on the way out.
//!
//! | Data length      | Prefix                          | Overhead |
//! |------------------|---------------------------------|----------|
//! | 0                | rejected (`EmptyPush`)          | -        |
//! | 1..=75           | the length itself               | 1        |
//! | 76..=255         | `OP_PUSHDATA1` + u8             | 2        |
//! | 256..=65535      | `OP_PUSHDATA2` + u16 LE         | 3        |
//! | 65536..          | `OP_PUSHDATA4` + u32 LE         | 5        |

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation or a top-level
    /// `OP_RETURN` carrying trailing bytes.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Render this chunk as an ASM token.
    ///
    /// Pushes render as hex, a data-carrying `OP_RETURN` as the opcode name
    /// followed by its payload hex, everything else by name.
    pub fn to_asm_string(&self) -> String {
        match (&self.data, self.op) {
            (Some(data), OP_RETURN) if data.is_empty() => opcode_to_string(OP_RETURN),
            (Some(data), OP_RETURN) => format!("OP_RETURN {}", hex::encode(data)),
            (Some(data), op) if is_push_data_op(op) => hex::encode(data),
            _ => opcode_to_string(self.op),
        }
    }
}

/// Compute the push prefix for a blob of `data_len` bytes.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix bytes, `EmptyPush` for a zero length, or `DataTooBig` when the
/// length does not fit the 4-byte `OP_PUSHDATA4` field.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    match data_len {
        0 => Err(ScriptError::EmptyPush),
        1..=0x4b => Ok(vec![data_len as u8]),
        0x4c..=0xff => Ok(vec![OP_PUSHDATA1, data_len as u8]),
        0x100..=0xffff => {
            let mut buf = vec![OP_PUSHDATA2];
            buf.extend_from_slice(&(data_len as u16).to_le_bytes());
            Ok(buf)
        }
        _ => {
            let len = u32::try_from(data_len).map_err(|_| ScriptError::DataTooBig)?;
            let mut buf = vec![OP_PUSHDATA4];
            buf.extend_from_slice(&len.to_le_bytes());
            Ok(buf)
        }
    }
}

/// Encode a single blob as a push: prefix followed by the data verbatim.
pub fn encode_push_data(data: &[u8]) -> Result<Vec<u8>, ScriptError> {
    let prefix = push_data_prefix(data.len())?;
    let mut out = Vec::with_capacity(prefix.len() + data.len());
    out.extend_from_slice(&prefix);
    out.extend_from_slice(data);
    Ok(out)
}

/// Encode several blobs as consecutive pushes.
///
/// Fails with `PartRejected` naming the first part that cannot be pushed.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (index, part) in parts.iter().enumerate() {
        let pushed = encode_push_data(part).map_err(|e| ScriptError::PartRejected {
            index,
            reason: e.to_string(),
        })?;
        result.extend_from_slice(&pushed);
    }
    Ok(result)
}

/// Decode raw script bytes into chunks.
///
/// Handles direct pushes, `OP_PUSHDATA1/2/4`, and `OP_RETURN`: outside a
/// conditional block, `OP_RETURN` takes the rest of the script as its data.
///
/// # Returns
/// The parsed chunks, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    let mut conditional_depth: u32 = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let data_len = match op {
            OP_IF | OP_NOTIF | OP_VERIF | OP_VERNOTIF => {
                conditional_depth += 1;
                None
            }
            OP_ENDIF => {
                conditional_depth = conditional_depth.saturating_sub(1);
                None
            }
            OP_RETURN if conditional_depth == 0 => Some(bytes.len() - pos),
            OP_DATA_1..=OP_DATA_75 => Some(op as usize),
            OP_PUSHDATA1 => Some(read_len(bytes, &mut pos, 1)?),
            OP_PUSHDATA2 => Some(read_len(bytes, &mut pos, 2)?),
            OP_PUSHDATA4 => Some(read_len(bytes, &mut pos, 4)?),
            _ => None,
        };

        let data = match data_len {
            Some(len) => {
                let end = pos.checked_add(len).ok_or(ScriptError::DataTooSmall)?;
                if end > bytes.len() {
                    return Err(ScriptError::DataTooSmall);
                }
                let data = bytes[pos..end].to_vec();
                pos = end;
                Some(data)
            }
            None => None,
        };

        chunks.push(ScriptChunk { op, data });
    }

    Ok(chunks)
}

/// Read a little-endian length field of `width` bytes at `pos`.
fn read_len(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    let field = bytes
        .get(*pos..*pos + width)
        .ok_or(ScriptError::DataTooSmall)?;
    *pos += width;
    let mut le = [0u8; 4];
    le[..width].copy_from_slice(field);
    Ok(u32::from_le_bytes(le) as usize)
}
