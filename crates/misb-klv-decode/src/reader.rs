use std::io::{ErrorKind, Read};

use crate::batch::PacketBatch;
use crate::config::{DecodeOptions, ReaderConfig};
use crate::error::{DecodeError, Result};
use crate::stream::StreamDecoder;

/// Decodes packets from any `Read` stream.
///
/// Reads fixed-size chunks and feeds them to a [`StreamDecoder`]. Each call to
/// [`PacketReader::read_batch`] returns the next non-`None` result of the
/// decoder; at end of stream the held tail is flushed once.
pub struct PacketReader<R> {
    inner: R,
    decoder: Option<StreamDecoder>,
    chunk: Vec<u8>,
    config: ReaderConfig,
}

impl<R: Read> PacketReader<R> {
    /// Create a reader with default configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    /// Create a reader with explicit configuration.
    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self {
            inner,
            decoder: Some(StreamDecoder::new(config.options)),
            chunk: vec![0u8; config.chunk_size.max(1)],
            config,
        }
    }

    /// Read until the decoder emits a batch (blocking).
    ///
    /// Returns `Ok(None)` once the stream has ended and the final batch has
    /// been returned.
    pub fn read_batch(&mut self) -> Result<Option<PacketBatch>> {
        loop {
            let Some(decoder) = self.decoder.as_mut() else {
                return Ok(None);
            };

            let read = match self.inner.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(DecodeError::Io(err)),
            };

            if read == 0 {
                return Ok(self.decoder.take().map(StreamDecoder::finish));
            }

            if let Some(batch) = decoder.feed(&self.chunk[..read]) {
                return Ok(Some(batch));
            }
        }
    }

    /// Read the whole stream and merge every batch.
    pub fn read_to_end(&mut self) -> Result<PacketBatch> {
        let mut total = PacketBatch::default();
        while let Some(batch) = self.read_batch()? {
            total.merge(batch);
        }
        Ok(total)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode options in effect.
    pub fn options(&self) -> &DecodeOptions {
        &self.config.options
    }
}

impl<R: Read> Iterator for PacketReader<R> {
    type Item = Result<PacketBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_batch().transpose()
    }
}
