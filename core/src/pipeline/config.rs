use crate::codec::{CodecId, JsonOptions, MessagePackOptions};
use crate::error::ConfigurationError;
use crate::key::KeyMaterial;
use crate::pipeline::config_option::PipelineOption;
use crate::pipeline::{BaseSerializer, CompressionSelection, EncodingSelection, EncryptionSelection};

/// Everything a [`PipelineFactory`](crate::pipeline::PipelineFactory) needs to compose a pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
  base: Option<BaseSerializer>,
  compression: Option<CompressionSelection>,
  encryption: Option<EncryptionSelection>,
  encoding: Option<EncodingSelection>,
  json_options: JsonOptions,
  message_pack_options: Option<MessagePackOptions>,
  key_material: Option<KeyMaterial>,
}

impl PipelineConfig {
  pub fn from(options: impl IntoIterator<Item = PipelineOption>) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn base(&self) -> Option<&BaseSerializer> {
    self.base.as_ref()
  }

  pub fn compression(&self) -> Option<&CompressionSelection> {
    self.compression.as_ref()
  }

  pub fn encryption(&self) -> Option<&EncryptionSelection> {
    self.encryption.as_ref()
  }

  pub fn encoding(&self) -> Option<&EncodingSelection> {
    self.encoding.as_ref()
  }

  pub fn json_options(&self) -> &JsonOptions {
    &self.json_options
  }

  pub fn message_pack_options(&self) -> Option<&MessagePackOptions> {
    self.message_pack_options.as_ref()
  }

  pub fn key_material(&self) -> Option<&KeyMaterial> {
    self.key_material.as_ref()
  }

  pub(crate) fn set_base(&mut self, base: BaseSerializer) {
    self.base = Some(base);
  }

  pub(crate) fn set_compression(&mut self, compression: CompressionSelection) {
    self.compression = Some(compression);
  }

  pub(crate) fn set_encryption(&mut self, encryption: EncryptionSelection) {
    self.encryption = Some(encryption);
  }

  pub(crate) fn set_encoding(&mut self, encoding: EncodingSelection) {
    self.encoding = Some(encoding);
  }

  /// Also selects JSON as the base when no base was chosen yet.
  pub(crate) fn set_json_options(&mut self, options: JsonOptions) {
    self.json_options = options;
    if self.base.is_none() {
      self.base = Some(BaseSerializer::Codec(CodecId::Json));
    }
  }

  pub(crate) fn set_message_pack_options(&mut self, options: MessagePackOptions) {
    self.message_pack_options = Some(options);
  }

  pub(crate) fn set_key_material(&mut self, key_material: KeyMaterial) {
    self.key_material = Some(key_material);
  }

  pub fn validate(&self) -> Result<(), ConfigurationError> {
    self.validate_base()?;
    self.validate_text_encoding()
  }

  fn validate_base(&self) -> Result<(), ConfigurationError> {
    match &self.base {
      None => Err(ConfigurationError::MissingBaseSerializer),
      Some(BaseSerializer::Codec(codec)) => match codec.required_options() {
        Some(options) if !self.has_options_for(codec) => Err(ConfigurationError::MissingOptions {
          codec: *codec,
          options,
        }),
        _ => Ok(()),
      },
      Some(BaseSerializer::Stream(_)) => Ok(()),
    }
  }

  /// UTF-8 is an identity check and only holds over a text codec with no binary layer beneath it.
  fn validate_text_encoding(&self) -> Result<(), ConfigurationError> {
    if !matches!(self.encoding, Some(EncodingSelection::Utf8)) {
      return Ok(());
    }
    let binary = match (&self.compression, &self.encryption, &self.base) {
      (Some(_), _, _) => Some("compression".to_string()),
      (None, Some(_), _) => Some("encryption".to_string()),
      (None, None, Some(BaseSerializer::Codec(codec @ (CodecId::MessagePack | CodecId::Bincode)))) => {
        Some(format!("codec {}", codec))
      }
      _ => None,
    };
    match binary {
      Some(layer) => Err(ConfigurationError::TextEncodingOverBinary(layer)),
      None => Ok(()),
    }
  }

  fn has_options_for(&self, codec: &CodecId) -> bool {
    match codec {
      CodecId::MessagePack => self.message_pack_options.is_some(),
      _ => true,
    }
  }
}
