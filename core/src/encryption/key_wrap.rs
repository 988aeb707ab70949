use crate::error::EncryptionError;
use crate::key::RsaKeyPair;
use rand::rngs::OsRng;
use rsa::Oaep;
use std::sync::Arc;

/// RSA-OAEP (SHA-256) wrapping of symmetric keys and IVs.
#[derive(Debug, Clone)]
pub struct RsaKeyWrap {
  keys: Arc<RsaKeyPair>,
}

impl RsaKeyWrap {
  pub fn new(keys: Arc<RsaKeyPair>) -> Self {
    Self { keys }
  }

  pub fn wrapped_len(&self) -> usize {
    self.keys.modulus_len()
  }

  pub fn wrap(&self, what: &'static str, secret: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    self
      .keys
      .public_key()
      .encrypt(&mut OsRng, Oaep::new::<sha2::Sha256>(), secret)
      .map_err(|err| EncryptionError::KeyWrap {
        what,
        message: err.to_string(),
      })
  }

  /// Unwraps `wrapped` and checks the result is exactly `expected` bytes long.
  pub fn unwrap(&self, what: &'static str, wrapped: &[u8], expected: usize) -> Result<Vec<u8>, EncryptionError> {
    let secret = self
      .keys
      .private_key()
      .decrypt(Oaep::new::<sha2::Sha256>(), wrapped)
      .map_err(|err| EncryptionError::KeyUnwrap {
        what,
        message: err.to_string(),
      })?;
    if secret.len() != expected {
      return Err(EncryptionError::InvalidKeyLength {
        what,
        expected,
        actual: secret.len(),
      });
    }
    Ok(secret)
  }
}
