use misb_klv_frame::FrameError;

/// Reasons a candidate packet is dropped, plus I/O failures of the reader layers.
///
/// `decode`, `StreamDecoder::feed` and `StreamDecoder::finish` never return
/// these; packet-level variants only show up in logs and in
/// [`crate::assembler::assemble_packet`] results.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A tag id outside 1..=142.
    #[error("unknown tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    /// The declared payload or the buffer ended before the checksum item.
    #[error("packet truncated at offset {offset} (no checksum item before byte {limit})")]
    TruncatedPacket { offset: usize, limit: usize },

    /// A packet or item length field is not valid BER.
    #[error("malformed length at offset {offset}: {source}")]
    MalformedLength { offset: usize, source: FrameError },

    /// The checksum item does not carry exactly two bytes.
    #[error("checksum item has length {length} (expected 2)")]
    MalformedChecksum { length: usize },

    /// The computed checksum differs from the declared one.
    #[error("checksum mismatch (declared 0x{declared:04X}, computed 0x{computed:04X})")]
    ChecksumMismatch { declared: u16, computed: u16 },

    /// An I/O error occurred while reading a stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
