//! Packet Assembler: walks the items of one packet until its checksum item.

use misb_klv_frame::{checksum, read_item_header, FrameError, PacketHeader};
use tracing::{debug, warn};

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::packet::Packet;
use crate::table::{field_spec, Rule};

/// Outcome of assembling one packet.
#[derive(Debug)]
pub struct Assembly {
    /// The packet, or the reason it was dropped.
    pub result: Result<Packet, DecodeError>,
    /// Offset where the batch scan for the next key resumes.
    ///
    /// After a complete packet this is one past its checksum item; after an
    /// abort it is just past the packet header, so a key overlapped by the
    /// aborted items is still found.
    pub resume_at: usize,
}

impl Assembly {
    fn abort(error: DecodeError, header: &PacketHeader) -> Self {
        Self {
            result: Err(error),
            resume_at: header.value_start,
        }
    }
}

/// Decode the items of the packet described by `header`.
///
/// Items are consumed until the checksum item (tag 1). The packet is aborted
/// when a tag is outside 1..=142, when an item length is malformed, or when an
/// item would run past the declared payload (or the buffer) before the
/// checksum item is reached.
pub fn assemble_packet(buf: &[u8], header: &PacketHeader, options: &DecodeOptions) -> Assembly {
    let limit = header.end();
    let mut packet = Packet::default();
    let mut pos = header.value_start;

    loop {
        if pos >= limit || pos >= buf.len() {
            return Assembly::abort(DecodeError::TruncatedPacket { offset: pos, limit }, header);
        }

        let tag = buf[pos];
        let Some(spec) = field_spec(tag) else {
            return Assembly::abort(DecodeError::UnknownTag { tag, offset: pos }, header);
        };

        let item = match read_item_header(buf, pos) {
            Ok(item) => item,
            Err(FrameError::Truncated { .. }) => {
                return Assembly::abort(DecodeError::TruncatedPacket { offset: pos, limit }, header);
            }
            Err(source) => {
                return Assembly::abort(DecodeError::MalformedLength { offset: pos, source }, header);
            }
        };
        if item.end() > limit || item.end() > buf.len() {
            return Assembly::abort(DecodeError::TruncatedPacket { offset: pos, limit }, header);
        }
        let value = &buf[item.value_start..item.end()];

        if matches!(spec.rule, Rule::Checksum) {
            if item.len != 2 {
                return Assembly::abort(DecodeError::MalformedChecksum { length: item.len }, header);
            }

            let declared = u16::from_be_bytes([value[0], value[1]]);
            let computed = checksum(&buf[header.start..item.value_start]);
            if options.log_key_values {
                debug!(tag, name = spec.name, value = declared, "decoded field");
            }

            if declared != computed {
                if options.strict_checksum {
                    return Assembly {
                        result: Err(DecodeError::ChecksumMismatch { declared, computed }),
                        resume_at: item.end(),
                    };
                }
                if options.log_errors {
                    warn!(
                        offset = header.start,
                        declared, computed, "checksum mismatch, keeping packet"
                    );
                }
            }

            packet.checksum = declared;
            packet.checksum_valid = declared == computed;
            return Assembly {
                result: Ok(packet),
                resume_at: item.end(),
            };
        }

        let decoded = spec.rule.decode(value);
        if options.log_key_values {
            debug!(tag, name = spec.name, value = ?decoded, "decoded field");
        }
        packet.insert(spec, decoded);
        pos = item.end();
    }
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};
    use misb_klv_frame::{read_header, LocalSetWriter, UNIVERSAL_KEY};

    use super::*;
    use crate::value::Value;

    fn assemble(buf: &[u8], options: &DecodeOptions) -> Assembly {
        let header = read_header(buf, 0).unwrap();
        assemble_packet(buf, &header, options)
    }

    /// Key, BER length and raw local-set bytes, with a correct checksum item.
    fn raw_packet(declared_len: u8, items: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_slice(&UNIVERSAL_KEY);
        buf.put_u8(declared_len);
        buf.put_slice(items);
        buf.put_slice(&[1, 2]);
        let sum = checksum(&buf);
        buf.put_u16(sum);
        buf.to_vec()
    }

    #[test]
    fn decodes_until_checksum() {
        let mut writer = LocalSetWriter::new();
        writer.u64(2, 1_633_936_902_656).text(3, "MISSION01").u16(5, 0xFFFF);
        let buf = writer.finish();

        let assembly = assemble(&buf, &DecodeOptions::default());
        let packet = assembly.result.unwrap();
        assert_eq!(assembly.resume_at, buf.len());
        assert_eq!(packet.get("timestamp"), Some(&Value::UInt(1_633_936_902)));
        assert_eq!(packet.get("mission_id"), Some(&Value::Text("MISSION01".into())));
        let heading = packet.get("platform_heading_angle").and_then(Value::as_f64).unwrap();
        assert!((heading - 360.0).abs() < 1e-9);
        assert!(packet.checksum_valid);
    }

    #[test]
    fn bytes_after_checksum_are_not_read() {
        let mut writer = LocalSetWriter::new();
        writer.u8(65, 17);
        let mut buf = BytesMut::from(writer.finish().as_ref());
        let end = buf.len();
        buf.put_slice(&[0xC8, 0x01, 0x00]);

        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(assembly.result.is_ok());
        assert_eq!(assembly.resume_at, end);
    }

    #[test]
    fn unknown_tag_aborts_at_tag_offset() {
        let buf = raw_packet(7, &[0xC8, 0x01, 0x00]);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::UnknownTag { tag: 200, offset: 17 })
        ));
        assert_eq!(assembly.resume_at, 17);
    }

    #[test]
    fn tag_zero_is_unknown() {
        let buf = raw_packet(7, &[0x00, 0x01, 0x00]);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::UnknownTag { tag: 0, .. })
        ));
    }

    #[test]
    fn item_past_declared_length_is_truncation() {
        // Declared 8 bytes, but the timestamp item alone takes 10.
        let items = [2, 8, 0, 0, 1, 0x7C, 0x6E, 0x3A, 0x8A, 0x00];
        let buf = raw_packet(8, &items);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::TruncatedPacket { offset: 17, limit: 25 })
        ));
        assert_eq!(assembly.resume_at, 17);
    }

    #[test]
    fn declared_length_ending_before_checksum_is_truncation() {
        // Declared length covers the mission id item only.
        let items = [3, 2, b'A', b'B'];
        let buf = raw_packet(4, &items);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::TruncatedPacket { offset: 21, .. })
        ));
        // Items already consumed are rescanned for keys.
        assert_eq!(assembly.resume_at, 17);
    }

    #[test]
    fn buffer_ending_mid_item_is_truncation() {
        let mut writer = LocalSetWriter::new();
        writer.text(3, "MISSION01");
        let buf = writer.finish();
        let cut = &buf[..buf.len() - 8];

        let assembly = assemble(cut, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::TruncatedPacket { .. })
        ));
        assert_eq!(assembly.resume_at, 17);
    }

    #[test]
    fn abort_inside_next_key_resumes_after_header() {
        // The version item swallows the first byte of the following key.
        let mut writer = LocalSetWriter::new();
        writer.text(3, "MISSION01").u8(65, 17);
        let first = writer.finish();
        let mut buf = first[..first.len() - 5].to_vec();
        let next_key = buf.len();
        buf.extend_from_slice(&first);

        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::TruncatedPacket { .. })
        ));
        assert_eq!(assembly.resume_at, 17);
        assert_eq!(misb_klv_frame::find_key(&buf, assembly.resume_at), Some(next_key));
    }

    #[test]
    fn malformed_item_length_aborts() {
        let buf = raw_packet(10, &[3, 0x80, 0x00, 0x00]);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::MalformedLength { offset: 17, .. })
        ));
    }

    #[test]
    fn checksum_with_wrong_length_aborts() {
        let mut buf = BytesMut::new();
        buf.put_slice(&UNIVERSAL_KEY);
        buf.put_u8(5);
        buf.put_slice(&[1, 3, 0x00, 0x00, 0x00]);
        let assembly = assemble(&buf, &DecodeOptions::default());
        assert!(matches!(
            assembly.result,
            Err(DecodeError::MalformedChecksum { length: 3 })
        ));
    }

    #[test]
    fn checksum_mismatch_keeps_packet_by_default() {
        let mut writer = LocalSetWriter::new();
        writer.u8(65, 17);
        let mut buf = BytesMut::from(writer.finish().as_ref());
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;

        let assembly = assemble(&buf, &DecodeOptions::default());
        let packet = assembly.result.unwrap();
        assert!(!packet.checksum_valid);
        assert_eq!(packet.get("uas_lds_version"), Some(&Value::UInt(17)));
    }

    #[test]
    fn checksum_mismatch_drops_in_strict_mode() {
        let mut writer = LocalSetWriter::new();
        writer.u8(65, 17);
        let mut buf = BytesMut::from(writer.finish().as_ref());
        let last = buf.len() - 1;
        buf[last] ^= 0xFF;

        let options = DecodeOptions {
            strict_checksum: true,
            ..DecodeOptions::default()
        };
        let assembly = assemble(&buf, &options);
        assert!(matches!(
            assembly.result,
            Err(DecodeError::ChecksumMismatch { .. })
        ));
        assert_eq!(assembly.resume_at, buf.len());
    }

    #[test]
    fn unsupported_and_misfit_items_are_recorded_without_value() {
        let mut writer = LocalSetWriter::new();
        writer
            .item(48, &[0x01, 0x01, 0x01])
            .u8(5, 0x10)
            .u8(65, 17);
        let buf = writer.finish();

        let packet = assemble(&buf, &DecodeOptions::default()).result.unwrap();
        assert!(packet.contains("security_local_set"));
        assert!(packet.contains("platform_heading_angle"));
        assert_eq!(packet.get("platform_heading_angle"), None);
        assert_eq!(packet.get("uas_lds_version"), Some(&Value::UInt(17)));
    }

    #[test]
    fn long_form_item_length_is_honored() {
        let name = "X".repeat(130);
        let mut writer = LocalSetWriter::new();
        writer.text(3, &name).u8(65, 17);
        let buf = writer.finish();

        let packet = assemble(&buf, &DecodeOptions::default()).result.unwrap();
        assert_eq!(packet.get("mission_id").and_then(Value::as_str), Some(name.as_str()));
        assert_eq!(packet.get("uas_lds_version"), Some(&Value::UInt(17)));
    }
}
