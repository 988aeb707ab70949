use crate::codec::serializer::{ensure_not_cancelled, DeserializeSink, Serializer};
use crate::error::{DeserializationError, PipelineError, SerializationError, TransformError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

const FORMAT: &str = "json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
  pub pretty: bool,
}

impl JsonOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_pretty(mut self, pretty: bool) -> Self {
    self.pretty = pretty;
    self
  }
}

#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
  options: JsonOptions,
}

impl JsonSerializer {
  pub fn new(options: JsonOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &JsonOptions {
    &self.options
  }
}

pub(crate) fn encode_json(
  value: &(dyn erased_serde::Serialize + Sync),
  pretty: bool,
) -> Result<Vec<u8>, SerializationError> {
  let result = if pretty {
    serde_json::to_vec_pretty(value)
  } else {
    serde_json::to_vec(value)
  };
  result.map_err(|err| SerializationError::codec(FORMAT, err))
}

pub(crate) fn feed_json(data: &[u8], sink: &mut (dyn DeserializeSink + Send)) -> Result<(), DeserializationError> {
  let mut de = serde_json::Deserializer::from_slice(data);
  {
    let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
    sink
      .accept(&mut erased)
      .map_err(|err| DeserializationError::codec(FORMAT, err))?;
  }
  de.end().map_err(|err| DeserializationError::codec(FORMAT, err))
}

#[async_trait]
impl Serializer for JsonSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    ensure_not_cancelled(cancel)?;
    Ok(encode_json(value, self.options.pretty)?)
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    ensure_not_cancelled(cancel)?;
    Ok(feed_json(&data, sink)?)
  }

  async fn deserialize_raw_bytes(&self, data: Vec<u8>, _cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    Ok(data)
  }
}
