use crate::codec::{DeserializeSink, Serializer};
use crate::compression::Compressor;
use crate::error::{CompressionError, PipelineError, TransformError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Compresses whatever its inner serializer produces.
#[derive(Debug)]
pub struct CompressedSerializer {
  inner: Box<dyn Serializer>,
  compressor: Box<dyn Compressor>,
}

impl CompressedSerializer {
  pub fn new(inner: Box<dyn Serializer>, compressor: Box<dyn Compressor>) -> Self {
    Self { inner, compressor }
  }
}

#[async_trait]
impl Serializer for CompressedSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    let bytes = self.inner.serialize_erased(value, cancel).await?;
    Ok(self.compressor.compress(&bytes, cancel).await?)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    let bytes = self.compressor.decompress(&data, cancel).await?;
    self.inner.deserialize_erased(bytes, sink, cancel).await
  }

  /// Input without this layer's marker is handed to the inner serializer unchanged.
  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    if cancel.is_cancelled() {
      return Err(TransformError::Cancelled);
    }
    let bytes = match self.compressor.recognizes(&data) {
      Some(true) => self.compressor.decompress(&data, cancel).await?,
      Some(false) => {
        tracing::trace!("Passing through uncompressed bytes: algorithm = {}", self.compressor.algorithm());
        data
      }
      None => match self.compressor.decompress(&data, cancel).await {
        Ok(bytes) => bytes,
        Err(CompressionError::Cancelled) => return Err(TransformError::Cancelled),
        Err(err) => {
          tracing::trace!("Passing through uncompressed bytes: algorithm = {}, error = {}", self.compressor.algorithm(), err);
          data
        }
      },
    };
    self.inner.deserialize_raw_bytes(bytes, cancel).await
  }
}
