use crate::error::CompressionError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io::{Read, Write};
use tokio_util::sync::CancellationToken;

/// Input is fed to, and output drained from, the codec in slices of this size.
pub const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
  #[default]
  Fastest,
  Balanced,
  Optimal,
}

#[async_trait]
pub trait Compressor: Debug + Send + Sync {
  fn algorithm(&self) -> &'static str;

  /// Whether `data` starts with this format's magic bytes.
  ///
  /// `None` means the format carries no marker and only a decompression attempt can tell.
  fn recognizes(&self, _data: &[u8]) -> Option<bool> {
    None
  }

  async fn compress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError>;

  async fn decompress(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, CompressionError>;
}

/// Writes `data` into `writer` chunk by chunk, yielding to the runtime in between.
pub(crate) async fn pump_into<W>(
  mut writer: W,
  data: &[u8],
  algorithm: &'static str,
  cancel: &CancellationToken,
) -> Result<W, CompressionError>
where
  W: Write + Send, {
  for chunk in data.chunks(CHUNK_SIZE) {
    if cancel.is_cancelled() {
      return Err(CompressionError::Cancelled);
    }
    writer
      .write_all(chunk)
      .map_err(|source| CompressionError::Compress { algorithm, source })?;
    tokio::task::yield_now().await;
  }
  if cancel.is_cancelled() {
    return Err(CompressionError::Cancelled);
  }
  Ok(writer)
}

/// Drains `reader` to the end chunk by chunk, yielding to the runtime in between.
pub(crate) async fn drain_from<R>(
  mut reader: R,
  algorithm: &'static str,
  cancel: &CancellationToken,
) -> Result<Vec<u8>, CompressionError>
where
  R: Read + Send, {
  let mut output = Vec::new();
  let mut buffer = vec![0u8; CHUNK_SIZE];
  loop {
    if cancel.is_cancelled() {
      return Err(CompressionError::Cancelled);
    }
    let read = reader
      .read(&mut buffer)
      .map_err(|source| CompressionError::Decompress { algorithm, source })?;
    if read == 0 {
      break;
    }
    output.extend_from_slice(&buffer[..read]);
    tokio::task::yield_now().await;
  }
  Ok(output)
}
