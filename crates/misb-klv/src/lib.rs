//! MISB ST 0601 UAS Datalink Local Set decoding.
//!
//! misb-klv finds KLV packets in a byte stream, validates their checksums, and
//! turns each tag into a named, physically scaled value.
//!
//! # Crate Structure
//!
//! - [`frame`]: universal key, BER lengths, checksum and a local-set writer
//! - [`decode`](mod@decode): field decode table, packet assembly, batch and stream decoders
//!
//! The most used items are re-exported at the root:
//!
//! ```
//! use misb_klv::{decode, DecodeOptions};
//! use misb_klv::frame::LocalSetWriter;
//!
//! let mut writer = LocalSetWriter::new();
//! writer.u64(2, 1_633_936_902_656).u8(65, 17);
//! let batch = decode(&writer.finish(), &DecodeOptions::default());
//! assert_eq!(batch.packets.len(), 1);
//! ```

/// Re-export frame types.
pub mod frame {
    pub use misb_klv_frame::*;
}

/// Re-export decoder types.
pub mod decode {
    pub use misb_klv_decode::*;
}

pub use misb_klv_decode::{
    create_decoder, decode, DecodeError, DecodeOptions, Packet, PacketBatch, PacketReader,
    ReaderConfig, StreamDecoder, Value,
};

#[cfg(feature = "async")]
pub use misb_klv_decode::KlvCodec;
