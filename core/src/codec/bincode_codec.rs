use crate::codec::serializer::{ensure_not_cancelled, DeserializeSink, Serializer};
use crate::error::{DeserializationError, PipelineError, SerializationError, TransformError};
use async_trait::async_trait;
use bincode::Options;
use tokio_util::sync::CancellationToken;

const FORMAT: &str = "bincode";

/// Compact binary codec using bincode's default options (varint integers, little endian).
#[derive(Debug, Clone, Default)]
pub struct BincodeSerializer;

impl BincodeSerializer {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Serializer for BincodeSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    ensure_not_cancelled(cancel)?;
    Ok(
      bincode::DefaultOptions::new()
        .serialize(value)
        .map_err(|err| SerializationError::codec(FORMAT, err))?,
    )
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    ensure_not_cancelled(cancel)?;
    let mut de = bincode::Deserializer::from_slice(&data, bincode::DefaultOptions::new());
    let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
    sink
      .accept(&mut erased)
      .map_err(|err| DeserializationError::codec(FORMAT, err))?;
    Ok(())
  }

  async fn deserialize_raw_bytes(&self, data: Vec<u8>, _cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    Ok(data)
  }
}
