use crate::codec::serializer::{ensure_not_cancelled, DeserializeSink, Serializer};
use crate::error::{DeserializationError, PipelineError, SerializationError, TransformError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

const FORMAT: &str = "msgpack";

/// Options bag for the MessagePack codec.
///
/// `struct_map` writes structs as maps keyed by field name instead of positional arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePackOptions {
  pub struct_map: bool,
}

impl MessagePackOptions {
  pub fn standard() -> Self {
    Self { struct_map: false }
  }

  pub fn with_struct_map(mut self, struct_map: bool) -> Self {
    self.struct_map = struct_map;
    self
  }
}

impl Default for MessagePackOptions {
  fn default() -> Self {
    Self::standard()
  }
}

#[derive(Debug, Clone)]
pub struct MessagePackSerializer {
  options: MessagePackOptions,
}

impl MessagePackSerializer {
  pub fn new(options: MessagePackOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &MessagePackOptions {
    &self.options
  }
}

#[async_trait]
impl Serializer for MessagePackSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    ensure_not_cancelled(cancel)?;
    let result = if self.options.struct_map {
      rmp_serde::to_vec_named(value)
    } else {
      rmp_serde::to_vec(value)
    };
    Ok(result.map_err(|err| SerializationError::codec(FORMAT, err))?)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    ensure_not_cancelled(cancel)?;
    let mut de = rmp_serde::Deserializer::from_read_ref(&data);
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
