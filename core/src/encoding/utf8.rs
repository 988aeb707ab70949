use crate::encoding::encoder::{guarded, Encoder};
use crate::error::EncodingError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Passes bytes through unchanged after checking they are valid UTF-8.
///
/// Only meaningful directly over a text codec such as JSON; binary payloads are rejected.
#[derive(Debug, Clone, Default)]
pub struct Utf8Encoder;

impl Utf8Encoder {
  fn validate(&self, data: &[u8], encode: bool) -> Result<Vec<u8>, EncodingError> {
    match std::str::from_utf8(data) {
      Ok(_) => Ok(data.to_vec()),
      Err(err) if encode => Err(EncodingError::Encode {
        encoding: self.encoding(),
        message: err.to_string(),
      }),
      Err(err) => Err(EncodingError::Decode {
        encoding: self.encoding(),
        message: err.to_string(),
      }),
    }
  }
}

#[async_trait]
impl Encoder for Utf8Encoder {
  fn encoding(&self) -> &'static str {
    "utf-8"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    Some(std::str::from_utf8(data).is_ok())
  }

  async fn encode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || self.validate(data, true))
  }

  async fn decode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || self.validate(data, false))
  }
}
