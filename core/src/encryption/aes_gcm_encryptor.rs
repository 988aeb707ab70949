use crate::encryption::encryptor::{ensure_not_cancelled, Encryptor};
use crate::encryption::{EnvelopeLayout, RsaKeyWrap};
use crate::error::EncryptionError;
use crate::key::RsaKeyPair;
use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce, Tag};
use aes_gcm::Aes256Gcm;
use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const AES_GCM_KEY_LEN: usize = 32;
pub const AES_GCM_NONCE_LEN: usize = 12;
pub const AES_GCM_TAG_LEN: usize = 16;

/// AES-256-GCM with a fresh key and nonce per message, both RSA-wrapped into the envelope.
#[derive(Debug, Clone)]
pub struct AesGcmEncryptor {
  wrap: RsaKeyWrap,
}

impl AesGcmEncryptor {
  pub fn new(keys: Arc<RsaKeyPair>) -> Self {
    Self {
      wrap: RsaKeyWrap::new(keys),
    }
  }

  pub fn layout(&self) -> EnvelopeLayout {
    EnvelopeLayout::new(self.wrap.wrapped_len(), AES_GCM_TAG_LEN)
  }

  fn seal(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let mut key = [0u8; AES_GCM_KEY_LEN];
    let mut nonce = [0u8; AES_GCM_NONCE_LEN];
    OsRng.fill_bytes(&mut key);
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|err| EncryptionError::Cipher(err.to_string()))?;
    let mut buffer = data.to_vec();
    let tag = cipher
      .encrypt_in_place_detached(Nonce::<Aes256Gcm>::from_slice(&nonce), b"", &mut buffer)
      .map_err(|err| EncryptionError::Cipher(err.to_string()))?;

    let wrapped_key = self.wrap.wrap("key", &key)?;
    let wrapped_nonce = self.wrap.wrap("nonce", &nonce)?;
    Ok(self.layout().assemble(&wrapped_key, &wrapped_nonce, &tag, &buffer))
  }

  fn open(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let parts = self.layout().split(data)?;
    let key = self.wrap.unwrap("key", parts.wrapped_key, AES_GCM_KEY_LEN)?;
    let nonce = self.wrap.unwrap("nonce", parts.wrapped_iv, AES_GCM_NONCE_LEN)?;

    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|err| EncryptionError::Cipher(err.to_string()))?;
    let mut buffer = parts.ciphertext.to_vec();
    cipher
      .decrypt_in_place_detached(
        Nonce::<Aes256Gcm>::from_slice(&nonce),
        b"",
        &mut buffer,
        Tag::<Aes256Gcm>::from_slice(parts.tag),
      )
      .map_err(|err| EncryptionError::Cipher(err.to_string()))?;
    Ok(buffer)
  }
}

#[async_trait]
impl Encryptor for AesGcmEncryptor {
  fn algorithm(&self) -> &'static str {
    "aes-256-gcm"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    let recognized = self
      .layout()
      .split(data)
      .map(|parts| self.wrap.unwrap("key", parts.wrapped_key, AES_GCM_KEY_LEN).is_ok())
      .unwrap_or(false);
    Some(recognized)
  }

  async fn encrypt(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncryptionError> {
    ensure_not_cancelled(cancel)?;
    let sealed = self.seal(data)?;
    ensure_not_cancelled(cancel)?;
    Ok(sealed)
  }

  async fn decrypt(&self, data: &[u8], cancel: &CancellationToken) -> Result<Vec<u8>, EncryptionError> {
    ensure_not_cancelled(cancel)?;
    let opened = self.open(data)?;
    ensure_not_cancelled(cancel)?;
    Ok(opened)
  }
}
