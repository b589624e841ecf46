//! The UAS Datalink Local Set universal key and the key locator.

/// Length of a SMPTE universal key.
pub const KEY_LEN: usize = 16;

/// MISB ST 0601 UAS Datalink Local Set key.
pub const UNIVERSAL_KEY: [u8; KEY_LEN] = [
    0x06, 0x0E, 0x2B, 0x34, // SMPTE designator
    0x02, 0x0B, 0x01, 0x01, // local set, BER length, 1-byte tags
    0x0E, 0x01, 0x03, 0x01, // MISB registry
    0x01, 0x00, 0x00, 0x00, // ST 0601 local set
];

/// Find the lowest offset `>= start` at which the universal key begins.
pub fn find_key(buf: &[u8], start: usize) -> Option<usize> {
    let haystack = buf.get(start..)?;
    if haystack.len() < KEY_LEN {
        return None;
    }

    let first = UNIVERSAL_KEY[0];
    let last_candidate = haystack.len() - KEY_LEN;
    let mut pos = 0usize;
    while pos <= last_candidate {
        // Skip to the next candidate first byte before comparing the whole key.
        match haystack[pos..=last_candidate].iter().position(|&b| b == first) {
            Some(skip) => pos += skip,
            None => return None,
        }
        if haystack[pos..pos + KEY_LEN] == UNIVERSAL_KEY {
            return Some(start + pos);
        }
        pos += 1;
    }
    None
}
