//! MISB ST 0601 UAS Datalink Local Set decoding.
//!
//! Turns raw KLV bytes into [`Packet`]s of named, physically scaled values.
//! Three entry points share one pipeline (key locator, packet assembler,
//! field decode table):
//! - [`decode`] for a complete buffer
//! - [`StreamDecoder`] (via [`create_decoder`]) for chunked input
//! - [`PacketReader`] for any `std::io::Read`, and `KlvCodec` (feature
//!   `async`) for `tokio_util::codec::FramedRead`
//!
//! Decoding never fails: malformed packets are counted in
//! [`PacketBatch::dropped_count`] and, with [`DecodeOptions::log_errors`],
//! reported as `tracing` events.
//!
//! ```
//! use misb_klv_decode::{decode, DecodeOptions};
//!
//! let batch = decode(b"no key here", &DecodeOptions::default());
//! assert!(batch.packets.is_empty());
//! ```

pub mod assembler;
pub mod batch;
#[cfg(feature = "async")]
pub mod codec;
pub mod config;
pub mod error;
pub mod packet;
pub mod reader;
pub mod remap;
pub mod stream;
pub mod table;
pub mod value;

pub use assembler::{assemble_packet, Assembly};
pub use batch::{decode, PacketBatch};
#[cfg(feature = "async")]
pub use codec::KlvCodec;
pub use config::{DecodeOptions, ReaderConfig, DEFAULT_CHUNK_SIZE};
pub use error::{DecodeError, Result};
pub use packet::{Field, Packet};
pub use reader::PacketReader;
pub use remap::{linear_remap, RemapScale};
pub use stream::{create_decoder, StreamDecoder};
pub use table::{field_spec, FieldSpec, Rule, FIELDS, MAX_TAG};
pub use value::Value;
