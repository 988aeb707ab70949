use crate::codec::{DeserializeSink, Serializer};
use crate::encoding::Encoder;
use crate::error::{EncodingError, PipelineError, TransformError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Text-encodes whatever its inner serializer produces.
#[derive(Debug)]
pub struct EncodedSerializer {
  inner: Box<dyn Serializer>,
  encoder: Box<dyn Encoder>,
}

impl EncodedSerializer {
  pub fn new(inner: Box<dyn Serializer>, encoder: Box<dyn Encoder>) -> Self {
    Self { inner, encoder }
  }
}

#[async_trait]
impl Serializer for EncodedSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    let bytes = self.inner.serialize_erased(value, cancel).await?;
    Ok(self.encoder.encode(&bytes, cancel).await?)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    let bytes = self.encoder.decode(&data, cancel).await?;
    self.inner.deserialize_erased(bytes, sink, cancel).await
  }

  /// Input without this layer's marker is handed to the inner serializer unchanged.
  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    if cancel.is_cancelled() {
      return Err(TransformError::Cancelled);
    }
    let bytes = match self.encoder.recognizes(&data) {
      Some(true) => self.encoder.decode(&data, cancel).await?,
      Some(false) => {
        tracing::trace!("Passing through unencoded bytes: encoding = {}", self.encoder.encoding());
        data
      }
      None => match self.encoder.decode(&data, cancel).await {
        Ok(bytes) => bytes,
        Err(EncodingError::Cancelled) => return Err(TransformError::Cancelled),
        Err(err) => {
          tracing::trace!("Passing through unencoded bytes: encoding = {}, error = {}", self.encoder.encoding(), err);
          data
        }
      },
    };
    self.inner.deserialize_raw_bytes(bytes, cancel).await
  }
}
