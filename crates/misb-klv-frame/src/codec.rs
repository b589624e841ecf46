use crate::ber::decode_ber_length;
use crate::error::{FrameError, Result};
use crate::key::KEY_LEN;

/// Local tag of the checksum item that terminates every packet.
pub const CHECKSUM_TAG: u8 = 1;

/// Position and declared size of one packet inside a buffer.
///
/// Packet layout:
/// ```text
/// ┌───────────────┬─────────────┬──────────────────────────────────┐
/// │ Key (16B)     │ BER length  │ Local set (payload_len bytes)    │
/// │ 06 0E 2B 34 ..│ (1-9B)      │ tag │ len │ value │ ... │ 01 02 CS│
/// └───────────────┴─────────────┴──────────────────────────────────┘
/// ^ start                       ^ value_start                     ^ end()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Offset of the first key byte.
    pub start: usize,
    /// Offset of the first local-set byte.
    pub value_start: usize,
    /// Declared local-set length.
    pub payload_len: usize,
}

impl PacketHeader {
    /// Bytes taken by the key and the BER length.
    pub fn header_len(&self) -> usize {
        self.value_start - self.start
    }

    /// Offset one past the declared end of the local set.
    pub fn end(&self) -> usize {
        self.value_start.saturating_add(self.payload_len)
    }
}

/// Read the packet header for a key located at `key_offset`.
///
/// The caller is expected to have located the key (see [`crate::find_key`]);
/// only the BER length that follows it is validated here.
pub fn read_header(buf: &[u8], key_offset: usize) -> Result<PacketHeader> {
    let length_offset = key_offset + KEY_LEN;
    let length_field = buf.get(length_offset..).unwrap_or_default();
    let ber = decode_ber_length(length_field).map_err(|err| at_offset(err, length_offset, buf))?;

    Ok(PacketHeader {
        start: key_offset,
        value_start: length_offset + ber.header_len,
        payload_len: ber.length,
    })
}

/// Position of one tag/length/value item inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHeader {
    /// Local tag id.
    pub tag: u8,
    /// Offset of the tag byte.
    pub start: usize,
    /// Offset of the first value byte.
    pub value_start: usize,
    /// Declared value length.
    pub len: usize,
}

impl ItemHeader {
    /// Offset one past the last value byte.
    pub fn end(&self) -> usize {
        self.value_start.saturating_add(self.len)
    }
}

/// Read the tag byte and BER length of the item starting at `offset`.
///
/// Value bytes are not checked against the buffer length; compare
/// [`ItemHeader::end`] with the bound that applies.
pub fn read_item_header(buf: &[u8], offset: usize) -> Result<ItemHeader> {
    let tag = *buf.get(offset).ok_or(FrameError::Truncated {
        needed: offset + 1,
        available: buf.len(),
    })?;
    let length_field = buf.get(offset + 1..).unwrap_or_default();
    let ber = decode_ber_length(length_field).map_err(|err| at_offset(err, offset + 1, buf))?;

    Ok(ItemHeader {
        tag,
        start: offset,
        value_start: offset + 1 + ber.header_len,
        len: ber.length,
    })
}

/// Rebase a truncation reported for a sub-slice onto the whole buffer.
fn at_offset(err: FrameError, offset: usize, buf: &[u8]) -> FrameError {
    match err {
        FrameError::Truncated { needed, .. } => FrameError::Truncated {
            needed: offset + needed,
            available: buf.len(),
        },
        other => other,
    }
}
