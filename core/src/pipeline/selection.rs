use crate::codec::{CodecId, StreamSerializer};
use crate::compression::{
  BrotliCompressionProvider, CompressionLevel, CompressionProvider, DeflateCompressionProvider, GzipCompressionProvider,
  Lz4CompressionProvider,
};
use crate::encoding::{Base64EncodingProvider, EncodingProvider, HexEncodingProvider, Utf8EncodingProvider};
use crate::encryption::{AesCbcEncryptionProvider, AesGcmEncryptionProvider, EncryptionProvider};
use crate::error::ProviderConstructionError;
use crate::key::KeyMaterial;
use std::sync::Arc;

/// The leaf serializer of a pipeline.
#[derive(Debug, Clone)]
pub enum BaseSerializer {
  Codec(CodecId),
  Stream(Arc<dyn StreamSerializer>),
}

#[derive(Debug, Clone)]
pub enum CompressionSelection {
  Gzip(CompressionLevel),
  Deflate(CompressionLevel),
  Brotli(CompressionLevel),
  Lz4,
  Provider(Arc<dyn CompressionProvider>),
}

impl CompressionSelection {
  pub fn provider(&self) -> Arc<dyn CompressionProvider> {
    match self {
      CompressionSelection::Gzip(level) => Arc::new(GzipCompressionProvider::new(*level)),
      CompressionSelection::Deflate(level) => Arc::new(DeflateCompressionProvider::new(*level)),
      CompressionSelection::Brotli(level) => Arc::new(BrotliCompressionProvider::new(*level)),
      CompressionSelection::Lz4 => Arc::new(Lz4CompressionProvider),
      CompressionSelection::Provider(provider) => provider.clone(),
    }
  }
}

#[derive(Debug, Clone)]
pub enum EncryptionSelection {
  AesGcm,
  AesCbc,
  Provider(Arc<dyn EncryptionProvider>),
}

impl EncryptionSelection {
  /// Builtin selections load their key material here, so a missing key file fails the build.
  pub fn provider(
    &self,
    key_material: Option<&KeyMaterial>,
  ) -> Result<Arc<dyn EncryptionProvider>, ProviderConstructionError> {
    match self {
      EncryptionSelection::AesGcm => {
        let material = key_material.ok_or(ProviderConstructionError::MissingKeyMaterial {
          provider: AesGcmEncryptionProvider::NAME,
        })?;
        Ok(Arc::new(AesGcmEncryptionProvider::from_key_material(material)?))
      }
      EncryptionSelection::AesCbc => {
        let material = key_material.ok_or(ProviderConstructionError::MissingKeyMaterial {
          provider: AesCbcEncryptionProvider::NAME,
        })?;
        Ok(Arc::new(AesCbcEncryptionProvider::from_key_material(material)?))
      }
      EncryptionSelection::Provider(provider) => Ok(provider.clone()),
    }
  }
}

#[derive(Debug, Clone)]
pub enum EncodingSelection {
  Base64,
  Hex,
  Utf8,
  Provider(Arc<dyn EncodingProvider>),
}

impl EncodingSelection {
  pub fn provider(&self) -> Arc<dyn EncodingProvider> {
    match self {
      EncodingSelection::Base64 => Arc::new(Base64EncodingProvider),
      EncodingSelection::Hex => Arc::new(HexEncodingProvider),
      EncodingSelection::Utf8 => Arc::new(Utf8EncodingProvider),
      EncodingSelection::Provider(provider) => provider.clone(),
    }
  }
}
