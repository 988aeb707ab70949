use crate::codec::{BincodeSerializer, CodecId, JsonSerializer, MessagePackSerializer, Serializer};
use crate::error::{ConfigurationError, PipelineError};
use crate::pipeline::PipelineConfig;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub type CodecConstructor = Arc<dyn Fn(&PipelineConfig) -> Result<Box<dyn Serializer>, PipelineError> + Send + Sync>;

static GLOBAL_REGISTRY: Lazy<Arc<CodecRegistry>> = Lazy::new(|| Arc::new(CodecRegistry::with_builtins()));

/// Maps codec ids to constructors. Registration is explicit; nothing is discovered at runtime.
#[derive(Clone, Default)]
pub struct CodecRegistry {
  constructors: DashMap<CodecId, CodecConstructor>,
}

impl CodecRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry holding the JSON, MessagePack and bincode codecs.
  pub fn with_builtins() -> Self {
    let registry = Self::new();
    registry.insert(CodecId::Json, |config| {
      Ok(Box::new(JsonSerializer::new(config.json_options().clone())))
    });
    registry.insert(CodecId::MessagePack, |config| {
      let options = config
        .message_pack_options()
        .cloned()
        .ok_or(ConfigurationError::MissingOptions {
          codec: CodecId::MessagePack,
          options: "MessagePackOptions",
        })?;
      Ok(Box::new(MessagePackSerializer::new(options)))
    });
    registry.insert(CodecId::Bincode, |_| Ok(Box::new(BincodeSerializer::new())));
    registry
  }

  /// The process-wide registry, pre-populated with the builtin codecs.
  pub fn global() -> Arc<CodecRegistry> {
    GLOBAL_REGISTRY.clone()
  }

  pub fn register<F>(&self, codec: CodecId, constructor: F) -> Result<(), ConfigurationError>
  where
    F: Fn(&PipelineConfig) -> Result<Box<dyn Serializer>, PipelineError> + Send + Sync + 'static, {
    if let CodecId::Custom(value) = codec {
      CodecId::of_custom(value)?;
    }
    match self.constructors.entry(codec) {
      Entry::Occupied(_) => Err(ConfigurationError::DuplicateCodec(codec)),
      Entry::Vacant(entry) => {
        tracing::debug!("Registering codec: codec_id = {}", codec);
        entry.insert(Arc::new(constructor));
        Ok(())
      }
    }
  }

  pub fn contains(&self, codec: &CodecId) -> bool {
    self.constructors.contains_key(codec)
  }

  pub fn codecs(&self) -> Vec<CodecId> {
    self.constructors.iter().map(|entry| *entry.key()).collect()
  }

  pub fn create(&self, codec: &CodecId, config: &PipelineConfig) -> Result<Box<dyn Serializer>, PipelineError> {
    let constructor = self
      .constructors
      .get(codec)
      .map(|entry| entry.value().clone())
      .ok_or(ConfigurationError::UnregisteredCodec(*codec))?;
    tracing::debug!("Creating codec: codec_id = {}", codec);
    constructor(config)
  }

  fn insert<F>(&self, codec: CodecId, constructor: F)
  where
    F: Fn(&PipelineConfig) -> Result<Box<dyn Serializer>, PipelineError> + Send + Sync + 'static, {
    tracing::debug!("Registering codec: codec_id = {}", codec);
    self.constructors.insert(codec, Arc::new(constructor));
  }
}

impl Debug for CodecRegistry {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CodecRegistry").field("codecs", &self.codecs()).finish()
  }
}
