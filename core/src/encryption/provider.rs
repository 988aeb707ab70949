use crate::encryption::{AesCbcEncryptor, AesGcmEncryptor, Encryptor};
use crate::error::ProviderConstructionError;
use crate::key::{KeyMaterial, RsaKeyPair, RsaKeyProvider};
use std::fmt::Debug;
use std::sync::Arc;

/// Hands out the [`Encryptor`] a pipeline wraps its compressed bytes with.
pub trait EncryptionProvider: Debug + Send + Sync {
  fn encryptor(&self) -> Box<dyn Encryptor>;
}

fn resolve_keys(provider: &'static str, material: &KeyMaterial) -> Result<Arc<RsaKeyPair>, ProviderConstructionError> {
  RsaKeyProvider::resolve(material)
    .map(Arc::new)
    .map_err(|source| ProviderConstructionError::KeyMaterial { provider, source })
}

#[derive(Debug, Clone)]
pub struct AesGcmEncryptionProvider {
  keys: Arc<RsaKeyPair>,
}

impl AesGcmEncryptionProvider {
  pub const NAME: &'static str = "AesGcmEncryptionProvider";

  pub fn new(keys: RsaKeyPair) -> Self {
    Self { keys: Arc::new(keys) }
  }

  pub fn from_key_material(material: &KeyMaterial) -> Result<Self, ProviderConstructionError> {
    Ok(Self {
      keys: resolve_keys(Self::NAME, material)?,
    })
  }
}

impl EncryptionProvider for AesGcmEncryptionProvider {
  fn encryptor(&self) -> Box<dyn Encryptor> {
    Box::new(AesGcmEncryptor::new(self.keys.clone()))
  }
}

#[derive(Debug, Clone)]
pub struct AesCbcEncryptionProvider {
  keys: Arc<RsaKeyPair>,
}

impl AesCbcEncryptionProvider {
  pub const NAME: &'static str = "AesCbcEncryptionProvider";

  pub fn new(keys: RsaKeyPair) -> Self {
    Self { keys: Arc::new(keys) }
  }

  pub fn from_key_material(material: &KeyMaterial) -> Result<Self, ProviderConstructionError> {
    Ok(Self {
      keys: resolve_keys(Self::NAME, material)?,
    })
  }
}

impl EncryptionProvider for AesCbcEncryptionProvider {
  fn encryptor(&self) -> Box<dyn Encryptor> {
    Box::new(AesCbcEncryptor::new(self.keys.clone()))
  }
}
