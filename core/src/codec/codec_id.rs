use crate::error::ConfigurationError;
use std::fmt::{Display, Formatter};

/// Custom codec ids must be strictly greater than this value.
pub const CUSTOM_CODEC_ID_FLOOR: u32 = 100;

/// Identifies a base codec in the [`CodecRegistry`](crate::pipeline::CodecRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecId {
  Json,
  MessagePack,
  Bincode,
  Custom(u32),
}

impl CodecId {
  pub fn of_custom(value: u32) -> Result<Self, ConfigurationError> {
    if value <= CUSTOM_CODEC_ID_FLOOR {
      return Err(ConfigurationError::InvalidCodecId(value));
    }
    Ok(CodecId::Custom(value))
  }

  pub fn is_custom(&self) -> bool {
    matches!(self, CodecId::Custom(_))
  }

  /// Name of the options bag this codec cannot be built without, if any.
  pub fn required_options(&self) -> Option<&'static str> {
    match self {
      CodecId::MessagePack => Some("MessagePackOptions"),
      _ => None,
    }
  }
}

impl Display for CodecId {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      CodecId::Json => write!(f, "Json:1"),
      CodecId::MessagePack => write!(f, "MessagePack:2"),
      CodecId::Bincode => write!(f, "Bincode:3"),
      CodecId::Custom(value) => write!(f, "Custom:{}", value),
    }
  }
}

impl From<CodecId> for u32 {
  fn from(id: CodecId) -> Self {
    match id {
      CodecId::Json => 1,
      CodecId::MessagePack => 2,
      CodecId::Bincode => 3,
      CodecId::Custom(value) => value,
    }
  }
}

impl TryFrom<u32> for CodecId {
  type Error = ConfigurationError;

  fn try_from(value: u32) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(CodecId::Json),
      2 => Ok(CodecId::MessagePack),
      3 => Ok(CodecId::Bincode),
      _ => CodecId::of_custom(value),
    }
  }
}
