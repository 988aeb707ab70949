use crate::codec::{CodecId, JsonOptions, MessagePackOptions, StreamSerializer};
use crate::compression::CompressionLevel;
use crate::key::KeyMaterial;
use crate::pipeline::{BaseSerializer, CompressionSelection, EncodingSelection, EncryptionSelection, PipelineConfig};
use std::path::Path;
use std::sync::Arc;

/// A single configuration step, applicable to a [`PipelineConfig`] in sequence.
#[derive(Debug, Clone)]
pub enum PipelineOption {
  SetBase(BaseSerializer),
  SetCompression(CompressionSelection),
  SetEncryption(EncryptionSelection),
  SetEncoding(EncodingSelection),
  SetJsonOptions(JsonOptions),
  SetMessagePackOptions(MessagePackOptions),
  SetKeyMaterial(KeyMaterial),
}

impl PipelineOption {
  pub fn apply(&self, config: &mut PipelineConfig) {
    match self {
      PipelineOption::SetBase(base) => {
        config.set_base(base.clone());
      }
      PipelineOption::SetCompression(compression) => {
        config.set_compression(compression.clone());
      }
      PipelineOption::SetEncryption(encryption) => {
        config.set_encryption(encryption.clone());
      }
      PipelineOption::SetEncoding(encoding) => {
        config.set_encoding(encoding.clone());
      }
      PipelineOption::SetJsonOptions(options) => {
        config.set_json_options(options.clone());
      }
      PipelineOption::SetMessagePackOptions(options) => {
        config.set_message_pack_options(options.clone());
      }
      PipelineOption::SetKeyMaterial(key_material) => {
        config.set_key_material(key_material.clone());
      }
    }
  }

  pub fn with_codec(codec: CodecId) -> PipelineOption {
    PipelineOption::SetBase(BaseSerializer::Codec(codec))
  }

  pub fn with_stream_serializer(stream: Arc<dyn StreamSerializer>) -> PipelineOption {
    PipelineOption::SetBase(BaseSerializer::Stream(stream))
  }

  pub fn with_compression(compression: CompressionSelection) -> PipelineOption {
    PipelineOption::SetCompression(compression)
  }

  pub fn with_encryption(encryption: EncryptionSelection) -> PipelineOption {
    PipelineOption::SetEncryption(encryption)
  }

  pub fn with_encoding(encoding: EncodingSelection) -> PipelineOption {
    PipelineOption::SetEncoding(encoding)
  }

  pub fn with_json_options(options: JsonOptions) -> PipelineOption {
    PipelineOption::SetJsonOptions(options)
  }

  pub fn with_default_json_options() -> PipelineOption {
    PipelineOption::SetJsonOptions(JsonOptions::new().with_pretty(true))
  }

  pub fn with_message_pack_options(options: MessagePackOptions) -> PipelineOption {
    PipelineOption::SetMessagePackOptions(options)
  }

  pub fn with_default_message_pack_options() -> PipelineOption {
    PipelineOption::SetMessagePackOptions(MessagePackOptions::standard().with_struct_map(true))
  }

  pub fn with_keys(public: impl AsRef<Path>, private: impl AsRef<Path>) -> PipelineOption {
    PipelineOption::SetKeyMaterial(KeyMaterial::files(public.as_ref(), private.as_ref()))
  }

  pub fn with_generated_keys(public: impl AsRef<Path>, private: impl AsRef<Path>, bits: usize) -> PipelineOption {
    PipelineOption::SetKeyMaterial(KeyMaterial::generate_if_missing(public.as_ref(), private.as_ref(), bits))
  }

  pub fn with_key_material(key_material: KeyMaterial) -> PipelineOption {
    PipelineOption::SetKeyMaterial(key_material)
  }

  /// Pretty JSON compressed with GZip at its fastest level.
  pub fn default_configuration() -> Vec<PipelineOption> {
    vec![
      Self::with_default_json_options(),
      Self::with_compression(CompressionSelection::Gzip(CompressionLevel::Fastest)),
    ]
  }
}
