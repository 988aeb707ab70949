use crate::compression::compressor::{drain_from, pump_into, CompressionLevel, Compressor};
use crate::error::CompressionError;
use async_trait::async_trait;
use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use tokio_util::sync::CancellationToken;

impl From<CompressionLevel> for Compression {
  fn from(level: CompressionLevel) -> Self {
    match level {
      CompressionLevel::Fastest => Compression::fast(),
      CompressionLevel::Balanced => Compression::default(),
      CompressionLevel::Optimal => Compression::best(),
    }
  }
}

/// ID1, ID2 and the deflate method byte of an RFC 1952 member header.
const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

#[derive(Debug, Clone, Default)]
pub struct GzipCompressor {
  level: CompressionLevel,
}

impl GzipCompressor {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }
}

#[async_trait]
impl Compressor for GzipCompressor {
  fn algorithm(&self) -> &'static str {
    "gzip"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    Some(data.starts_with(&GZIP_MAGIC))
  }

  async fn compress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    let algorithm = self.algorithm();
    let encoder = pump_into(GzEncoder::new(Vec::new(), self.level.into()), data, algorithm, cancel).await?;
    encoder
      .finish()
      .map_err(|source| CompressionError::Compress { algorithm, source })
  }

  async fn decompress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    drain_from(GzDecoder::new(data), self.algorithm(), cancel).await
  }
}

/// Raw DEFLATE (RFC 1951) without a container header.
#[derive(Debug, Clone, Default)]
pub struct DeflateCompressor {
  level: CompressionLevel,
}

impl DeflateCompressor {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }
}

#[async_trait]
impl Compressor for DeflateCompressor {
  fn algorithm(&self) -> &'static str {
    "deflate"
  }

  async fn compress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    let algorithm = self.algorithm();
    let encoder = pump_into(DeflateEncoder::new(Vec::new(), self.level.into()), data, algorithm, cancel).await?;
    encoder
      .finish()
      .map_err(|source| CompressionError::Compress { algorithm, source })
  }

  async fn decompress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError> {
    drain_from(DeflateDecoder::new(data), self.algorithm(), cancel).await
  }
}
