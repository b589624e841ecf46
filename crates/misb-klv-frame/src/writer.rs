use bytes::{BufMut, Bytes, BytesMut};

use crate::ber::encode_ber_length;
use crate::checksum::checksum;
use crate::codec::CHECKSUM_TAG;
use crate::key::UNIVERSAL_KEY;

/// Builds a UAS Datalink Local Set packet item by item.
///
/// Items are written in insertion order; the checksum item is appended by
/// [`LocalSetWriter::finish`]. Fixtures, tests and tools use this to produce
/// byte-exact packets.
#[derive(Debug, Default, Clone)]
pub struct LocalSetWriter {
    items: BytesMut,
}

impl LocalSetWriter {
    /// Create an empty local set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item with a raw value.
    pub fn item(&mut self, tag: u8, value: &[u8]) -> &mut Self {
        self.items.put_u8(tag);
        encode_ber_length(value.len(), &mut self.items);
        self.items.put_slice(value);
        self
    }

    /// Append a one-byte unsigned item.
    pub fn u8(&mut self, tag: u8, value: u8) -> &mut Self {
        self.item(tag, &[value])
    }

    /// Append a big-endian `u16` item.
    pub fn u16(&mut self, tag: u8, value: u16) -> &mut Self {
        self.item(tag, &value.to_be_bytes())
    }

    /// Append a big-endian `i16` item.
    pub fn i16(&mut self, tag: u8, value: i16) -> &mut Self {
        self.item(tag, &value.to_be_bytes())
    }

    /// Append a big-endian `u32` item.
    pub fn u32(&mut self, tag: u8, value: u32) -> &mut Self {
        self.item(tag, &value.to_be_bytes())
    }

    /// Append a big-endian `i32` item.
    pub fn i32(&mut self, tag: u8, value: i32) -> &mut Self {
        self.item(tag, &value.to_be_bytes())
    }

    /// Append a big-endian `u64` item.
    pub fn u64(&mut self, tag: u8, value: u64) -> &mut Self {
        self.item(tag, &value.to_be_bytes())
    }

    /// Append a text item (bytes as-is).
    pub fn text(&mut self, tag: u8, value: &str) -> &mut Self {
        self.item(tag, value.as_bytes())
    }

    /// Encoded local-set bytes written so far (no key, length or checksum).
    pub fn local_set(&self) -> &[u8] {
        &self.items
    }

    /// Number of local-set bytes written so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been written.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Encode the complete packet: key, BER length, items, checksum item.
    pub fn finish(&self) -> Bytes {
        let mut dst = BytesMut::new();
        self.finish_into(&mut dst);
        dst.freeze()
    }

    /// Append the complete packet to `dst`.
    ///
    /// The checksum is computed from the packet's own first byte, so packets
    /// can be concatenated at any offset.
    pub fn finish_into(&self, dst: &mut BytesMut) {
        let payload_len = self.items.len() + 4;
        let start = dst.len();

        dst.reserve(UNIVERSAL_KEY.len() + 9 + payload_len);
        dst.put_slice(&UNIVERSAL_KEY);
        encode_ber_length(payload_len, dst);
        dst.put_slice(&self.items);
        dst.put_u8(CHECKSUM_TAG);
        dst.put_u8(2);

        let sum = checksum(&dst[start..]);
        dst.put_u16(sum);
    }
}
