use crate::error::KeyMaterialError;
use crate::key::{KeyMaterial, RsaKeyPair};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::Path;

pub const DEFAULT_KEY_BITS: usize = 2048;

/// Loads RSA key pairs from PEM files, generating them on request.
///
/// Private keys are read as PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`),
/// public keys as SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`). Generated pairs are
/// written as PKCS#8 and SPKI.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaKeyProvider;

impl RsaKeyProvider {
  pub fn resolve(material: &KeyMaterial) -> Result<RsaKeyPair, KeyMaterialError> {
    match material {
      KeyMaterial::Files { public, private } => Self::load(public, private),
      KeyMaterial::GenerateIfMissing { public, private, bits } => Self::load_or_generate(public, private, *bits),
      KeyMaterial::InMemory(key) => Ok(RsaKeyPair::from_private(key.clone())),
    }
  }

  pub fn load(public: &Path, private: &Path) -> Result<RsaKeyPair, KeyMaterialError> {
    let private_key = Self::read_private(private)?;
    let public_key = Self::read_public(public)?;
    if RsaPublicKey::from(&private_key) != public_key {
      return Err(KeyMaterialError::MismatchedKeyPair);
    }
    Ok(RsaKeyPair::from_private(private_key))
  }

  pub fn load_or_generate(public: &Path, private: &Path, bits: usize) -> Result<RsaKeyPair, KeyMaterialError> {
    match (public.exists(), private.exists()) {
      (true, true) => Self::load(public, private),
      (false, false) => Self::generate(public, private, bits),
      (true, false) => Err(KeyMaterialError::IncompletePair {
        present: public.to_path_buf(),
        missing: private.to_path_buf(),
      }),
      (false, true) => Err(KeyMaterialError::IncompletePair {
        present: private.to_path_buf(),
        missing: public.to_path_buf(),
      }),
    }
  }

  /// Generates a fresh pair and writes both halves, creating parent directories.
  pub fn generate(public: &Path, private: &Path, bits: usize) -> Result<RsaKeyPair, KeyMaterialError> {
    let private_key =
      RsaPrivateKey::new(&mut OsRng, bits).map_err(|err| KeyMaterialError::Generation(err.to_string()))?;
    let pair = RsaKeyPair::from_private(private_key);

    let private_pem = pair
      .private_key()
      .to_pkcs8_pem(LineEnding::LF)
      .map_err(|err| KeyMaterialError::Encoding(err.to_string()))?;
    let public_pem = pair
      .public_key()
      .to_public_key_pem(LineEnding::LF)
      .map_err(|err| KeyMaterialError::Encoding(err.to_string()))?;

    Self::write(private, private_pem.as_bytes())?;
    Self::write(public, public_pem.as_bytes())?;
    tracing::info!(
      bits,
      public = %public.display(),
      private = %private.display(),
      "generated RSA key pair"
    );
    Ok(pair)
  }

  fn read_private(path: &Path) -> Result<RsaPrivateKey, KeyMaterialError> {
    let pem = Self::read(path)?;
    RsaPrivateKey::from_pkcs8_pem(&pem)
      .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
      .map_err(|err| KeyMaterialError::InvalidPrivateKey(err.to_string()))
  }

  fn read_public(path: &Path) -> Result<RsaPublicKey, KeyMaterialError> {
    let pem = Self::read(path)?;
    RsaPublicKey::from_public_key_pem(&pem)
      .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
      .map_err(|err| KeyMaterialError::InvalidPublicKey(err.to_string()))
  }

  fn read(path: &Path) -> Result<String, KeyMaterialError> {
    if !path.exists() {
      return Err(KeyMaterialError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| KeyMaterialError::Io {
      path: path.to_path_buf(),
      source,
    })
  }

  fn write(path: &Path, contents: &[u8]) -> Result<(), KeyMaterialError> {
    let io_error = |source| KeyMaterialError::Io {
      path: path.to_path_buf(),
      source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
  }
}
