use crate::encoding::encoder::{guarded, Encoder};
use crate::error::EncodingError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Upper-case hexadecimal on write; either case is accepted on read.
#[derive(Debug, Clone, Default)]
pub struct HexEncoder;

#[async_trait]
impl Encoder for HexEncoder {
  fn encoding(&self) -> &'static str {
    "hex"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    Some(data.len() % 2 == 0 && data.iter().all(u8::is_ascii_hexdigit))
  }

  async fn encode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || Ok(hex::encode_upper(data).into_bytes()))
  }

  async fn decode(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncodingError> {
    guarded(cancel, || {
      hex::decode(data).map_err(|err| EncodingError::Decode {
        encoding: self.encoding(),
        message: err.to_string(),
      })
    })
  }
}
