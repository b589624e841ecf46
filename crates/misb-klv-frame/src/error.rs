/// Errors that can occur while framing KLV packets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The buffer ended before a complete header or value.
    #[error("truncated input ({needed} bytes needed, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// A long-form BER length announced zero or more than eight length bytes.
    #[error("invalid BER length byte 0x{0:02X}")]
    InvalidBerLength(u8),

    /// The decoded length does not fit in `usize` on this platform.
    #[error("BER length overflows usize")]
    LengthOverflow,
}

pub type Result<T> = std::result::Result<T, FrameError>;
