/// Compute the ST 0601 running checksum over `bytes`.
///
/// Bytes are summed as big-endian 16-bit words: a byte at an even offset from
/// the start of `bytes` contributes `byte << 8`, an odd offset contributes
/// `byte`. The sum wraps at 16 bits.
///
/// For a packet, `bytes` runs from the first key byte through the checksum
/// item's tag and length bytes, excluding the two checksum value bytes.
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes.iter().enumerate().fold(0u16, |sum, (offset, &byte)| {
        let word = if offset % 2 == 0 {
            u16::from(byte) << 8
        } else {
            u16::from(byte)
        };
        sum.wrapping_add(word)
    })
}
