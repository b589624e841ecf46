//! `tokio_util` codec adapter around [`StreamDecoder`].

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::batch::PacketBatch;
use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::stream::StreamDecoder;

/// Decodes [`PacketBatch`]es from an async byte stream via `FramedRead`.
///
/// Every `decode` call consumes all buffered bytes as one chunk. `decode_eof`
/// flushes the held tail once; later calls yield nothing.
#[derive(Debug)]
pub struct KlvCodec {
    decoder: Option<StreamDecoder>,
}

impl KlvCodec {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            decoder: Some(StreamDecoder::new(options)),
        }
    }
}

impl Default for KlvCodec {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}

impl Decoder for KlvCodec {
    type Item = PacketBatch;
    type Error = DecodeError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let chunk = src.split();
        match self.decoder.as_mut() {
            Some(decoder) => Ok(decoder.feed(&chunk)),
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(batch) = self.decode(src)? {
            return Ok(Some(batch));
        }
        Ok(self.decoder.take().map(StreamDecoder::finish))
    }
}
