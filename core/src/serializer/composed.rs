use crate::codec::{DeserializeSink, Serializer};
use crate::error::{PipelineError, TransformError};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use tokio_util::sync::CancellationToken;

/// One stage of a composed pipeline, named by its algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
  Codec(String),
  Compression(&'static str),
  Encryption(&'static str),
  Encoding(&'static str),
}

impl Display for Layer {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Layer::Codec(name) => write!(f, "codec({})", name),
      Layer::Compression(name) => write!(f, "compression({})", name),
      Layer::Encryption(name) => write!(f, "encryption({})", name),
      Layer::Encoding(name) => write!(f, "encoding({})", name),
    }
  }
}

/// The product of a pipeline build: the outermost decorator plus the applied layers, innermost first.
#[derive(Debug)]
pub struct ComposedSerializer {
  outer: Box<dyn Serializer>,
  layers: Vec<Layer>,
}

impl ComposedSerializer {
  pub fn new(outer: Box<dyn Serializer>, layers: Vec<Layer>) -> Self {
    Self { outer, layers }
  }

  pub fn layers(&self) -> &[Layer] {
    &self.layers
  }

  pub fn into_inner(self) -> Box<dyn Serializer> {
    self.outer
  }
}

#[async_trait]
impl Serializer for ComposedSerializer {
  async fn serialize_erased(
    &self,
    value: &(dyn erased_serde::Serialize + Sync),
    cancel: &CancellationToken,
  ) -> Result<Vec<u8>, PipelineError> {
    self.outer.serialize_erased(value, cancel).await
  }

  async fn deserialize_erased(
    &self,
    data: Vec<u8>,
    sink: &mut (dyn DeserializeSink + Send),
    cancel: &CancellationToken,
  ) -> Result<(), PipelineError> {
    self.outer.deserialize_erased(data, sink, cancel).await
  }

  async fn deserialize_raw_bytes(&self, data: Vec<u8>, cancel: &CancellationToken) -> Result<Vec<u8>, TransformError> {
    self.outer.deserialize_raw_bytes(data, cancel).await
  }
}

static_assertions::assert_impl_all!(ComposedSerializer: Send, Sync);
