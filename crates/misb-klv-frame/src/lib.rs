//! Universal-key framing for MISB ST 0601 KLV packets.
//!
//! This is the byte-level layer of misb-klv. Every UAS Datalink Local Set packet
//! is framed as:
//! - the 16-byte universal key (`06 0E 2B 34 02 0B 01 01 0E 01 03 01 01 00 00 00`)
//! - a BER-encoded payload length (short or long form)
//! - tag/length/value items, terminated by the checksum item (tag 1)
//!
//! Nothing here interprets item values; see `misb-klv-decode` for that.

pub mod ber;
pub mod checksum;
pub mod codec;
pub mod error;
pub mod key;
pub mod writer;

pub use ber::{decode_ber_length, encode_ber_length, BerLength};
pub use checksum::checksum;
pub use codec::{read_header, read_item_header, ItemHeader, PacketHeader, CHECKSUM_TAG};
pub use error::{FrameError, Result};
pub use key::{find_key, KEY_LEN, UNIVERSAL_KEY};
pub use writer::LocalSetWriter;
