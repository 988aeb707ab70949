use crate::error::EncodingError;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Encoder: Debug + Send + Sync {
  fn encoding(&self) -> &'static str;

  /// Whether `data` only uses this encoding's alphabet.
  fn recognizes(&self, _data: &[u8]) -> Option<bool> {
    None
  }

  async fn encode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError>;

  async fn decode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError>;
}

/// Runs `f` between two cancellation checks.
pub(crate) fn guarded<F>(cancel: &CancellationToken, f: F) -> Result<Vec<u8>, EncodingError>
where
  F: FnOnce() -> Result<Vec<u8>, EncodingError>, {
  if cancel.is_cancelled() {
    return Err(EncodingError::Cancelled);
  }
  let out = f()?;
  if cancel.is_cancelled() {
    return Err(EncodingError::Cancelled);
  }
  Ok(out)
}
