use crate::codec::json::{encode_json, feed_json, JsonOptions};
use crate::codec::serializer::{ensure_not_cancelled, DeserializeSink, Serializer};
use crate::error::{DeserializationError, PipelineError, SerializationError, TransformError};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

/// A codec that reads and writes through async byte streams instead of buffers.
#[async_trait]
pub trait StreamSerializer: Debug + Send + Sync {
  async fn serialize_to_stream(
    &self,
    writer: &mut (dyn AsyncWrite + Send + Unpin),
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError>;

  async fn deserialize_from_stream(
    &self,
    reader: &mut (dyn AsyncRead + Send + Unpin),
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError>;
}

/// Presents a [`StreamSerializer`] as a buffer-oriented [`Serializer`].
#[derive(Debug, Clone)]
pub struct StreamSerializerAdapter {
  stream: Arc<dyn StreamSerializer>,
}

impl StreamSerializerAdapter {
  pub fn new(stream: Arc<dyn StreamSerializer>) -> Self {
    Self { stream }
  }
}

#[async_trait]
impl Serializer for StreamSerializerAdapter {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    ensure_not_cancelled(cancel)?;
    let mut buffer = Vec::new();
    self.stream.serialize_to_stream(&mut buffer, value, cancel).await?;
    Ok(buffer)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    ensure_not_cancelled(cancel)?;
    let mut reader = data.as_slice();
    self.stream.deserialize_from_stream(&mut reader, sink, cancel).await
  }

  async fn deserialize_raw_bytes(&self, data: Vec<u8>, _cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    Ok(data)
  }
}

/// JSON over async streams.
#[derive(Debug, Clone, Default)]
pub struct JsonStreamSerializer {
  options: JsonOptions,
}

impl JsonStreamSerializer {
  pub fn new(options: JsonOptions) -> Self {
    Self { options }
  }
}

#[async_trait]
impl StreamSerializer for JsonStreamSerializer {
  async fn serialize_to_stream(
    &self,
    writer: &mut (dyn AsyncWrite + Send + Unpin),
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    let bytes = encode_json(value, self.options.pretty)?;
    tokio::select! {
      _ = cancel.cancelled() => Err(PipelineError::Cancelled),
      result = async {
        writer.write_all(&bytes).await?;
        writer.flush().await
      } => Ok(result.map_err(SerializationError::from)?),
    }
  }

  async fn deserialize_from_stream(
    &self,
    reader: &mut (dyn AsyncRead + Send + Unpin),
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    let mut buffer = Vec::new();
    tokio::select! {
      _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
      result = reader.read_to_end(&mut buffer) => {
        result.map_err(DeserializationError::from)?;
      }
    }
    Ok(feed_json(&buffer, sink)?)
  }
}
