use crate::codec::CodecId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  #[error("no base serializer configured: select a codec or a stream serializer before building")]
  MissingBaseSerializer,
  #[error("codec {codec} requires {options} to be configured")]
  MissingOptions { codec: CodecId, options: &'static str },
  #[error("codec {0} is not registered")]
  UnregisteredCodec(CodecId),
  #[error("codec {0} is already registered")]
  DuplicateCodec(CodecId),
  #[error("invalid codec id: {0}")]
  InvalidCodecId(u32),
  #[error("utf-8 encoding needs text input, but it would be applied over {0}")]
  TextEncodingOverBinary(String),
}

#[derive(Debug, Error)]
pub enum KeyMaterialError {
  #[error("key file not found: {}", .0.display())]
  NotFound(PathBuf),
  #[error("key file {} exists without its counterpart {}", present.display(), missing.display())]
  IncompletePair { present: PathBuf, missing: PathBuf },
  #[error("key file {} could not be accessed: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("invalid private key: {0}")]
  InvalidPrivateKey(String),
  #[error("invalid public key: {0}")]
  InvalidPublicKey(String),
  #[error("public key does not belong to the private key")]
  MismatchedKeyPair,
  #[error("key pair generation failed: {0}")]
  Generation(String),
  #[error("key encoding failed: {0}")]
  Encoding(String),
}

#[derive(Debug, Error)]
pub enum ProviderConstructionError {
  #[error("{provider} requires key material but none was configured")]
  MissingKeyMaterial { provider: &'static str },
  #[error("{provider} could not load its key material: {source}")]
  KeyMaterial {
    provider: &'static str,
    #[source]
    source: KeyMaterialError,
  },
}

#[derive(Debug, Error)]
pub enum SerializationError {
  #[error("{format} serialization failed: {message}")]
  Codec { format: &'static str, message: String },
  #[error("stream write failed: {0}")]
  Io(#[from] std::io::Error),
}

impl SerializationError {
  pub fn codec(format: &'static str, err: impl std::fmt::Display) -> Self {
    SerializationError::Codec {
      format,
      message: err.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum DeserializationError {
  #[error("{format} deserialization failed: {message}")]
  Codec { format: &'static str, message: String },
  #[error("stream read failed: {0}")]
  Io(#[from] std::io::Error),
  #[error("deserializer completed without producing a value")]
  Empty,
}

impl DeserializationError {
  pub fn codec(format: &'static str, err: impl std::fmt::Display) -> Self {
    DeserializationError::Codec {
      format,
      message: err.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum CompressionError {
  #[error("{algorithm} compression failed: {source}")]
  Compress {
    algorithm: &'static str,
    #[source]
    source: std::io::Error,
  },
  #[error("{algorithm} decompression failed: {source}")]
  Decompress {
    algorithm: &'static str,
    #[source]
    source: std::io::Error,
  },
  #[error("compression cancelled")]
  Cancelled,
}

#[derive(Debug, Error)]
pub enum EncryptionError {
  #[error("encrypted payload is {actual} bytes, the envelope needs at least {required}")]
  Truncated { required: usize, actual: usize },
  #[error("wrapping {what} failed: {message}")]
  KeyWrap { what: &'static str, message: String },
  #[error("unwrapping {what} failed: {message}")]
  KeyUnwrap { what: &'static str, message: String },
  #[error("unwrapped {what} is {actual} bytes, expected {expected}")]
  InvalidKeyLength {
    what: &'static str,
    expected: usize,
    actual: usize,
  },
  #[error("cipher failure: {0}")]
  Cipher(String),
  #[error("encryption cancelled")]
  Cancelled,
}

#[derive(Debug, Error)]
pub enum EncodingError {
  #[error("{encoding} decoding failed: {message}")]
  Decode { encoding: &'static str, message: String },
  #[error("{encoding} encoding failed: {message}")]
  Encode { encoding: &'static str, message: String },
  #[error("encoding cancelled")]
  Cancelled,
}

/// Failure of a single decorator-level byte transform.
#[derive(Debug, Error)]
pub enum TransformError {
  #[error(transparent)]
  Compression(#[from] CompressionError),
  #[error(transparent)]
  Encryption(#[from] EncryptionError),
  #[error(transparent)]
  Encoding(#[from] EncodingError),
  #[error("transform cancelled")]
  Cancelled,
}

impl TransformError {
  pub fn is_cancelled(&self) -> bool {
    matches!(
      self,
      TransformError::Cancelled
        | TransformError::Compression(CompressionError::Cancelled)
        | TransformError::Encryption(EncryptionError::Cancelled)
        | TransformError::Encoding(EncodingError::Cancelled)
    )
  }
}

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),
  #[error(transparent)]
  ProviderConstruction(#[from] ProviderConstructionError),
  #[error(transparent)]
  Serialization(#[from] SerializationError),
  #[error(transparent)]
  Deserialization(#[from] DeserializationError),
  #[error(transparent)]
  Compression(#[from] CompressionError),
  #[error(transparent)]
  Encryption(#[from] EncryptionError),
  #[error(transparent)]
  Encoding(#[from] EncodingError),
  #[error("operation cancelled")]
  Cancelled,
}

impl PipelineError {
  pub fn is_cancelled(&self) -> bool {
    matches!(
      self,
      PipelineError::Cancelled
        | PipelineError::Compression(CompressionError::Cancelled)
        | PipelineError::Encryption(EncryptionError::Cancelled)
        | PipelineError::Encoding(EncodingError::Cancelled)
    )
  }
}

impl From<TransformError> for PipelineError {
  fn from(err: TransformError) -> Self {
    match err {
      TransformError::Compression(err) => PipelineError::Compression(err),
      TransformError::Encryption(err) => PipelineError::Encryption(err),
      TransformError::Encoding(err) => PipelineError::Encoding(err),
      TransformError::Cancelled => PipelineError::Cancelled,
    }
  }
}

static_assertions::assert_impl_all!(PipelineError: Send, Sync);
static_assertions::assert_impl_all!(TransformError: Send, Sync);
