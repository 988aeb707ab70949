use crate::encoding::encoder::{guarded, Encoder};
use crate::error::EncodingError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio_util::sync::CancellationToken;

/// Standard alphabet, padded.
#[derive(Debug, Clone, Default)]
pub struct Base64Encoder;

#[async_trait]
impl Encoder for Base64Encoder {
  fn encoding(&self) -> &'static str {
    "base64"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    let body = data.strip_suffix(b"==").or_else(|| data.strip_suffix(b"=")).unwrap_or(data);
    Some(data.len() % 4 == 0 && body.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'+' || *b == b'/'))
  }

  async fn encode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || Ok(STANDARD.encode(data).into_bytes()))
  }

  async fn decode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || {
      STANDARD.decode(data).map_err(|err| EncodingError::Decode {
        encoding: self.encoding(),
        message: err.to_string(),
      })
    })
  }
}
