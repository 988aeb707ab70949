use crate::codec::{Serializer, StreamSerializerAdapter};
use crate::error::{ConfigurationError, PipelineError};
use crate::pipeline::{BaseSerializer, CodecRegistry, PipelineConfig};
use crate::serializer::{CompressedSerializer, ComposedSerializer, EncodedSerializer, EncryptedSerializer, Layer};
use std::sync::Arc;

/// Composes a validated [`PipelineConfig`] into a decorator chain.
///
/// The chain is always codec, then compression, then encryption, then encoding on the write
/// path, and the exact mirror on the read path. Absent stages are skipped.
#[derive(Debug, Clone)]
pub struct PipelineFactory {
  registry: Arc<CodecRegistry>,
}

impl Default for PipelineFactory {
  fn default() -> Self {
    Self::new(CodecRegistry::global())
  }
}

impl PipelineFactory {
  pub fn new(registry: Arc<CodecRegistry>) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &Arc<CodecRegistry> {
    &self.registry
  }

  pub fn create(&self, config: &PipelineConfig) -> Result<ComposedSerializer, PipelineError> {
    config.validate()?;
    let mut layers = Vec::with_capacity(4);

    let mut serializer: Box<dyn Serializer> = match config.base() {
      Some(BaseSerializer::Codec(codec)) => {
        let serializer = self.registry.create(codec, config)?;
        layers.push(Layer::Codec(codec.to_string()));
        serializer
      }
      Some(BaseSerializer::Stream(stream)) => {
        tracing::debug!("Adapting stream serializer: stream = {:?}", stream);
        layers.push(Layer::Codec("stream".to_string()));
        Box::new(StreamSerializerAdapter::new(stream.clone()))
      }
      None => return Err(ConfigurationError::MissingBaseSerializer.into()),
    };

    if let Some(compression) = config.compression() {
      let compressor = compression.provider().compressor();
      tracing::debug!("Applying compression: algorithm = {}", compressor.algorithm());
      layers.push(Layer::Compression(compressor.algorithm()));
      serializer = Box::new(CompressedSerializer::new(serializer, compressor));
    }

    if let Some(encryption) = config.encryption() {
      let encryptor = encryption.provider(config.key_material())?.encryptor();
      tracing::debug!("Applying encryption: algorithm = {}", encryptor.algorithm());
      layers.push(Layer::Encryption(encryptor.algorithm()));
      serializer = Box::new(EncryptedSerializer::new(serializer, encryptor));
    }

    if let Some(encoding) = config.encoding() {
      let encoder = encoding.provider().encoder();
      tracing::debug!("Applying encoding: encoding = {}", encoder.encoding());
      layers.push(Layer::Encoding(encoder.encoding()));
      serializer = Box::new(EncodedSerializer::new(serializer, encoder));
    }

    tracing::debug!("Composed pipeline: layers = {:?}", layers);
    Ok(ComposedSerializer::new(serializer, layers))
  }
}
