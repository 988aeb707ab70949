use crate::error::EncryptionError;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait Encryptor: Debug + Send + Sync {
  fn algorithm(&self) -> &'static str;

  /// Whether `data` is shaped like an envelope this encryptor can open.
  fn recognizes(&self, _data: &[u8]) -> Option<bool> {
    None
  }

  async fn encrypt(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncryptionError>;

  async fn decrypt(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncryptionError>;
}

pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), EncryptionError> {
  if cancel.is_cancelled() {
    return Err(EncryptionError::Cancelled);
  }
  Ok(())
}
