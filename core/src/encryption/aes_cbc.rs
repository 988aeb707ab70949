use crate::encryption::encryptor::{ensure_not_cancelled, Encryptor};
use crate::encryption::{EnvelopeLayout, RsaKeyWrap};
use crate::error::EncryptionError;
use crate::key::RsaKeyPair;
use aes::Aes256;
use async_trait::async_trait;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

pub const AES_CBC_KEY_LEN: usize = 32;
pub const AES_CBC_IV_LEN: usize = 16;

/// AES-256-CBC with PKCS#7 padding and a fresh key and IV per message.
///
/// Unauthenticated: tampering is only detected when it breaks the padding. Prefer
/// [`AesGcmEncryptor`](crate::encryption::AesGcmEncryptor) unless the peer requires CBC.
#[derive(Debug, Clone)]
pub struct AesCbcEncryptor {
  wrap: RsaKeyWrap,
}

impl AesCbcEncryptor {
  pub fn new(keys: Arc<RsaKeyPair>) -> Self {
    Self {
      wrap: RsaKeyWrap::new(keys),
    }
  }

  pub fn layout(&self) -> EnvelopeLayout {
    EnvelopeLayout::new(self.wrap.wrapped_len(), 0)
  }

  fn seal(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let mut key = [0u8; AES_CBC_KEY_LEN];
    let mut iv = [0u8; AES_CBC_IV_LEN];
    OsRng.fill_bytes(&mut key);
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new_from_slices(&key, &iv)
      .map_err(|err| EncryptionError::Cipher(err.to_string()))?
      .encrypt_padded_vec_mut::<Pkcs7>(data);

    let wrapped_key = self.wrap.wrap("key", &key)?;
    let wrapped_iv = self.wrap.wrap("iv", &iv)?;
    Ok(self.layout().assemble(&wrapped_key, &wrapped_iv, &[], &ciphertext))
  }

  fn open(&self, data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let parts = self.layout().split(data)?;
    let key = self.wrap.unwrap("key", parts.wrapped_key, AES_CBC_KEY_LEN)?;
    let iv = self.wrap.unwrap("iv", parts.wrapped_iv, AES_CBC_IV_LEN)?;
    Aes256CbcDec::new_from_slices(&key, &iv)
      .map_err(|err| EncryptionError::Cipher(err.to_string()))?
      .decrypt_padded_vec_mut::<Pkcs7>(parts.ciphertext)
      .map_err(|err| EncryptionError::Cipher(err.to_string()))
  }
}

#[async_trait]
impl Encryptor for AesCbcEncryptor {
  fn algorithm(&self) -> &'static str {
    "aes-256-cbc"
  }

  fn recognizes(&self, data: &[u8]) -> Option<bool> {
    let recognized = self
      .layout()
      .split(data)
      .map(|parts| {
        !parts.ciphertext.is_empty()
          && parts.ciphertext.len() % AES_CBC_IV_LEN == 0
          && self.wrap.unwrap("key", parts.wrapped_key, AES_CBC_KEY_LEN).is_ok()
      })
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
