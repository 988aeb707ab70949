use crate::compression::compressor::{drain_from, pump_into, Compressor};
use crate::error::CompressionError;
use async_trait::async_trait;
use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use std::io;
use tokio_util::sync::CancellationToken;

const LZ4_FRAME_MAGIC: [u8; 4] = [0x04, 0x22, 0x4d, 0x18];

/// LZ4 frame format. The frame carries its own checksum and end mark, so truncated input is detected.
#[derive(Debug, Clone, Default)]
pub struct Lz4Compressor;

impl Lz4Compressor {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Compressor for Lz4Compressor {
  fn algorithm(&self) -> &'static str {
    "lz4"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    Some(data.starts_with(&LZ4_FRAME_MAGIC))
  }

  async fn compress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    let algorithm = self.algorithm();
    let encoder = pump_into(FrameEncoder::new(Vec::new()), data, algorithm, cancel).await?;
    encoder.finish().map_err(|err| CompressionError::Compress {
      algorithm,
      source: io::Error::new(io::ErrorKind::Other, err),
    })
  }

  async fn decompress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    drain_from(FrameDecoder::new(data), self.algorithm(), cancel).await
  }
}
