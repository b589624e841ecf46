//! Batch Decoder: every packet found in one contiguous buffer.

use misb_klv_frame::{find_key, read_header, FrameError, KEY_LEN};
use serde::Serialize;
use tracing::{debug, warn};

use crate::assembler::assemble_packet;
use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::packet::Packet;

/// Packets decoded from one buffer, plus how many candidates were dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PacketBatch {
    /// Surfaced packets, in buffer order.
    pub packets: Vec<Packet>,
    /// Keys found whose packet was aborted.
    pub dropped_count: usize,
}

impl PacketBatch {
    /// `true` when the batch neither surfaced nor dropped anything.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty() && self.dropped_count == 0
    }

    /// Append `other` to this batch.
    pub fn merge(&mut self, other: PacketBatch) {
        self.packets.extend(other.packets);
        self.dropped_count += other.dropped_count;
    }
}

/// Decode every packet in `buf`.
///
/// Each Universal Key found yields exactly one packet or one drop. After a
/// packet the scan resumes past its checksum item; after an abort it resumes
/// where the assembler stopped. Never fails.
pub fn decode(buf: &[u8], options: &DecodeOptions) -> PacketBatch {
    let mut batch = PacketBatch::default();
    let mut pos = 0;

    while let Some(key) = find_key(buf, pos) {
        let header = match read_header(buf, key) {
            Ok(header) => header,
            Err(err) => {
                let offset = key + KEY_LEN;
                let error = match err {
                    FrameError::Truncated { .. } => DecodeError::TruncatedPacket {
                        offset,
                        limit: buf.len(),
                    },
                    source => DecodeError::MalformedLength { offset, source },
                };
                record_drop(&mut batch, options, key, &error);
                pos = offset;
                continue;
            }
        };

        let assembly = assemble_packet(buf, &header, options);
        match assembly.result {
            Ok(mut packet) => {
                if options.remove_undefined_keys {
                    packet.remove_undefined();
                }
                batch.packets.push(packet);
            }
            Err(error) => record_drop(&mut batch, options, key, &error),
        }
        pos = assembly.resume_at;
    }

    debug!(
        bytes = buf.len(),
        packets = batch.packets.len(),
        dropped = batch.dropped_count,
        "decoded batch"
    );
    batch
}

fn record_drop(batch: &mut PacketBatch, options: &DecodeOptions, key: usize, error: &DecodeError) {
    batch.dropped_count += 1;
    if options.log_errors {
        warn!(offset = key, error = %error, "dropping packet");
    }
}
