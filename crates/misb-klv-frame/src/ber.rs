//! BER length fields.
//!
//! ```text
//! short form:  0LLLLLLL                      length = L (0..=127)
//! long form:   1NNNNNNN  B1 B2 .. BN         length = big-endian B1..BN
//! ```

use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// Longest long-form length accepted: eight bytes, a `u64`.
const MAX_LENGTH_BYTES: usize = 8;

/// A decoded BER length and the number of header bytes it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BerLength {
    /// The encoded length value.
    pub length: usize,
    /// Bytes consumed by the length field itself (1 for short form).
    pub header_len: usize,
}

/// Decode the BER length at the start of `data`.
pub fn decode_ber_length(data: &[u8]) -> Result<BerLength> {
    let first = *data.first().ok_or(FrameError::Truncated {
        needed: 1,
        available: 0,
    })?;

    if first & 0x80 == 0 {
        return Ok(BerLength {
            length: usize::from(first),
            header_len: 1,
        });
    }

    let count = usize::from(first & 0x7F);
    if count == 0 || count > MAX_LENGTH_BYTES {
        return Err(FrameError::InvalidBerLength(first));
    }
    if data.len() < 1 + count {
        return Err(FrameError::Truncated {
            needed: 1 + count,
            available: data.len(),
        });
    }

    let value = data[1..=count]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let length = usize::try_from(value).map_err(|_| FrameError::LengthOverflow)?;

    Ok(BerLength {
        length,
        header_len: 1 + count,
    })
}

/// Encode `length` in the shortest BER form.
pub fn encode_ber_length(length: usize, dst: &mut BytesMut) {
    if length < 0x80 {
        dst.put_u8(length as u8);
        return;
    }

    let bytes = (length as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];
    dst.reserve(1 + significant.len());
    dst.put_u8(0x80 | significant.len() as u8);
    dst.put_slice(significant);
}
