//! Stream Resynchronizer: decodes a byte stream that arrives in arbitrary chunks.

use bytes::BytesMut;
use misb_klv_frame::find_key;
use tracing::trace;

use crate::batch::{decode, PacketBatch};
use crate::config::DecodeOptions;

/// Incremental decoder for chunked input.
///
/// Holds the bytes of the packet still in progress. Each fed chunk is split at
/// its first universal key: everything before it completes the held tail and is
/// decoded as one buffer, the rest becomes the new tail.
#[derive(Debug)]
pub struct StreamDecoder {
    options: DecodeOptions,
    tail: BytesMut,
    primed: bool,
}

/// Create a [`StreamDecoder`] with the given options.
pub fn create_decoder(options: DecodeOptions) -> StreamDecoder {
    StreamDecoder::new(options)
}

impl StreamDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            tail: BytesMut::new(),
            primed: false,
        }
    }

    /// Feed the next chunk.
    ///
    /// The first chunk is only buffered. Later chunks emit the batch decoded
    /// from the held tail plus the chunk's bytes before its first key; a chunk
    /// without a key extends the tail and emits nothing.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<PacketBatch> {
        if !self.primed {
            self.primed = true;
            self.tail.extend_from_slice(chunk);
            trace!(tail = self.tail.len(), "buffered first chunk");
            return None;
        }

        let Some(key) = find_key(chunk, 0) else {
            self.tail.extend_from_slice(chunk);
            trace!(tail = self.tail.len(), "no key in chunk, extending tail");
            return None;
        };

        self.tail.extend_from_slice(&chunk[..key]);
        trace!(segment = self.tail.len(), key, "resynchronized on key");
        let batch = decode(&self.tail, &self.options);

        self.tail.clear();
        self.tail.extend_from_slice(&chunk[key..]);
        Some(batch)
    }

    /// Decode whatever is still held.
    pub fn finish(self) -> PacketBatch {
        trace!(tail = self.tail.len(), "flushing tail");
        decode(&self.tail, &self.options)
    }

    /// Bytes currently held for the packet in progress.
    pub fn pending(&self) -> usize {
        self.tail.len()
    }

    /// Options this decoder was created with.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}
