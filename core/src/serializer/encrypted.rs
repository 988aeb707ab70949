use crate::codec::{DeserializeSink, Serializer};
use crate::encryption::Encryptor;
use crate::error::{EncryptionError, PipelineError, TransformError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Encrypts whatever its inner serializer produces.
#[derive(Debug)]
pub struct EncryptedSerializer {
  inner: Box<dyn Serializer>,
  encryptor: Box<dyn Encryptor>,
}

impl EncryptedSerializer {
  pub fn new(inner: Box<dyn Serializer>, encryptor: Box<dyn Encryptor>) -> Self {
    Self { inner, encryptor }
  }
}

#[async_trait]
impl Serializer for EncryptedSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    let bytes = self.inner.serialize_erased(value, cancel).await?;
    Ok(self.encryptor.encrypt(&bytes, cancel).await?)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    let bytes = self.encryptor.decrypt(&data, cancel).await?;
    self.inner.deserialize_erased(bytes, sink, cancel).await
  }

  /// Input without this layer's marker is handed to the inner serializer unchanged.
  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    if cancel.is_cancelled() {
      return Err(TransformError::Cancelled);
    }
    let bytes = match self.encryptor.recognizes(&data) {
      Some(true) => self.encryptor.decrypt(&data, cancel).await?,
      Some(false) => {
        tracing::trace!("Passing through unencrypted bytes: algorithm = {}", self.encryptor.algorithm());
        data
      }
      None => match self.encryptor.decrypt(&data, cancel).await {
        Ok(bytes) => bytes,
        Err(EncryptionError::Cancelled) => return Err(TransformError::Cancelled),
        Err(err) => {
          tracing::trace!("Passing through unencrypted bytes: algorithm = {}, error = {}", self.encryptor.algorithm(), err);
          data
        }
      },
    };
    self.inner.deserialize_raw_bytes(bytes, cancel).await
  }
}
