use serde::{Deserialize, Serialize};

/// Controls packet decoding behavior.
///
/// Deserializes from camelCase keys (`removeUndefinedKeys`, `logKeyValues`,
/// `logErrors`, `strictChecksum`); missing keys keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DecodeOptions {
    /// When true, fields without a decoded value are stripped from packets.
    pub remove_undefined_keys: bool,
    /// When true, every decoded field emits a `debug` tracing event.
    pub log_key_values: bool,
    /// When true, every dropped packet emits a `warn` tracing event.
    pub log_errors: bool,
    /// When true, packets whose checksum does not match are dropped.
    pub strict_checksum: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            remove_undefined_keys: true,
            log_key_values: false,
            log_errors: false,
            strict_checksum: false,
        }
    }
}

/// Default read size for [`crate::PacketReader`]: 64 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for [`crate::PacketReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes requested from the underlying stream per read. Zero is treated
    /// as one.
    pub chunk_size: usize,
    /// Options passed to the stream decoder.
    pub options: DecodeOptions,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            options: DecodeOptions::default(),
        }
    }
}
