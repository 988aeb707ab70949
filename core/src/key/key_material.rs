use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

/// Where an encryption provider obtains its RSA key pair.
#[derive(Clone)]
pub enum KeyMaterial {
  /// Both PEM files must already exist.
  Files { public: PathBuf, private: PathBuf },
  /// Loads both PEM files, or generates and writes a fresh pair when neither exists.
  GenerateIfMissing {
    public: PathBuf,
    private: PathBuf,
    bits: usize,
  },
  InMemory(RsaPrivateKey),
}

impl KeyMaterial {
  pub fn files(public: impl Into<PathBuf>, private: impl Into<PathBuf>) -> Self {
    KeyMaterial::Files {
      public: public.into(),
      private: private.into(),
    }
  }

  pub fn generate_if_missing(public: impl Into<PathBuf>, private: impl Into<PathBuf>, bits: usize) -> Self {
    KeyMaterial::GenerateIfMissing {
      public: public.into(),
      private: private.into(),
      bits,
    }
  }
}

impl Debug for KeyMaterial {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      KeyMaterial::Files { public, private } => f
        .debug_struct("Files")
        .field("public", public)
        .field("private", private)
        .finish(),
      KeyMaterial::GenerateIfMissing { public, private, bits } => f
        .debug_struct("GenerateIfMissing")
        .field("public", public)
        .field("private", private)
        .field("bits", bits)
        .finish(),
      KeyMaterial::InMemory(key) => write!(f, "InMemory({} bits)", key.size() * 8),
    }
  }
}

/// A loaded, mutually consistent RSA key pair.
#[derive(Clone)]
pub struct RsaKeyPair {
  private: RsaPrivateKey,
  public: RsaPublicKey,
}

impl RsaKeyPair {
  pub fn from_private(private: RsaPrivateKey) -> Self {
    let public = RsaPublicKey::from(&private);
    Self { private, public }
  }

  pub fn private_key(&self) -> &RsaPrivateKey {
    &self.private
  }

  pub fn public_key(&self) -> &RsaPublicKey {
    &self.public
  }

  /// Width in bytes of every block the public key produces.
  pub fn modulus_len(&self) -> usize {
    self.public.size()
  }
}

impl Debug for RsaKeyPair {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RsaKeyPair")
      .field("bits", &(self.modulus_len() * 8))
      .finish_non_exhaustive()
  }
}
