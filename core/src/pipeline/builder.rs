use crate::codec::{CodecId, JsonOptions, MessagePackOptions, StreamSerializer};
use crate::error::PipelineError;
use crate::key::KeyMaterial;
use crate::pipeline::{
  CodecRegistry, CompressionSelection, EncodingSelection, EncryptionSelection, PipelineConfig, PipelineFactory,
  PipelineOption,
};
use crate::serializer::ComposedSerializer;
use rsa::RsaPrivateKey;
use std::path::Path;
use std::sync::Arc;

/// Fluent front end over [`PipelineOption`] and [`PipelineFactory`].
///
/// ```no_run
/// # async fn demo() -> Result<(), stratum_core_rs::error::PipelineError> {
/// use stratum_core_rs::codec::SerializerExt;
/// use stratum_core_rs::pipeline::{EncodingSelection, PipelineBuilder};
///
/// let pipeline = PipelineBuilder::new()
///   .with_default_configuration()
///   .with_encoding(EncodingSelection::Base64)
///   .build()?;
/// let bytes = pipeline.serialize(&vec![1, 2, 3]).await?;
/// let back: Vec<i32> = pipeline.deserialize(bytes).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
  config: PipelineConfig,
  registry: Arc<CodecRegistry>,
}

impl Default for PipelineBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl PipelineBuilder {
  pub fn new() -> Self {
    Self {
      config: PipelineConfig::default(),
      registry: CodecRegistry::global(),
    }
  }

  pub fn with_option(mut self, option: PipelineOption) -> Self {
    option.apply(&mut self.config);
    self
  }

  pub fn with_options(self, options: impl IntoIterator<Item = PipelineOption>) -> Self {
    options.into_iter().fold(self, |builder, option| builder.with_option(option))
  }

  pub fn with_codec(self, codec: CodecId) -> Self {
    self.with_option(PipelineOption::with_codec(codec))
  }

  pub fn with_stream_serializer<S>(self, stream: S) -> Self
  where
    S: StreamSerializer + 'static, {
    self.with_option(PipelineOption::with_stream_serializer(Arc::new(stream)))
  }

  pub fn with_compression(self, compression: CompressionSelection) -> Self {
    self.with_option(PipelineOption::with_compression(compression))
  }

  pub fn with_encryption(self, encryption: EncryptionSelection) -> Self {
    self.with_option(PipelineOption::with_encryption(encryption))
  }

  pub fn with_encoding(self, encoding: EncodingSelection) -> Self {
    self.with_option(PipelineOption::with_encoding(encoding))
  }

  pub fn with_json_options(self, options: JsonOptions) -> Self {
    self.with_option(PipelineOption::with_json_options(options))
  }

  pub fn with_default_json_options(self) -> Self {
    self.with_option(PipelineOption::with_default_json_options())
  }

  pub fn with_message_pack_options(self, options: MessagePackOptions) -> Self {
    self.with_option(PipelineOption::with_message_pack_options(options))
  }

  pub fn with_default_message_pack_options(self) -> Self {
    self.with_option(PipelineOption::with_default_message_pack_options())
  }

  /// Both PEM files must exist when the pipeline is built.
  pub fn with_keys(self, public: impl AsRef<Path>, private: impl AsRef<Path>) -> Self {
    self.with_option(PipelineOption::with_keys(public, private))
  }

  pub fn with_generated_keys(self, public: impl AsRef<Path>, private: impl AsRef<Path>, bits: usize) -> Self {
    self.with_option(PipelineOption::with_generated_keys(public, private, bits))
  }

  pub fn with_key_pair(self, private: RsaPrivateKey) -> Self {
    self.with_option(PipelineOption::with_key_material(KeyMaterial::InMemory(private)))
  }

  pub fn with_registry(mut self, registry: Arc<CodecRegistry>) -> Self {
    self.registry = registry;
    self
  }

  pub fn with_default_configuration(self) -> Self {
    self.with_options(PipelineOption::default_configuration())
  }

  pub fn config(&self) -> PipelineConfig {
    self.config.clone()
  }

  pub fn build(&self) -> Result<ComposedSerializer, PipelineError> {
    PipelineFactory::new(self.registry.clone()).create(&self.config)
  }
}
