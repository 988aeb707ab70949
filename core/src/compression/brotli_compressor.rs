use crate::compression::compressor::{drain_from, pump_into, CompressionLevel, Compressor};
use crate::error::CompressionError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

const BUFFER_SIZE: usize = 4096;
const WINDOW_BITS: u32 = 22;

#[derive(Debug, Clone, Default)]
pub struct BrotliCompressor {
  level: CompressionLevel,
}

impl BrotliCompressor {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }

  fn quality(&self) -> u32 {
    match self.level {
      CompressionLevel::Fastest => 1,
      CompressionLevel::Balanced => 6,
      CompressionLevel::Optimal => 11,
    }
  }
}

#[async_trait]
impl Compressor for BrotliCompressor {
  fn algorithm(&self) -> &'static str {
    "brotli"
  }

  async fn compress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    let writer = brotli::CompressorWriter::new(Vec::new(), BUFFER_SIZE, self.quality(), WINDOW_BITS);
    let writer = pump_into(writer, data, self.algorithm(), cancel).await?;
    // into_inner closes the stream and writes the trailing metadata block
    Ok(writer.into_inner())
  }

  async fn decompress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    drain_from(brotli::Decompressor::new(data, BUFFER_SIZE), self.algorithm(), cancel).await
  }
}
