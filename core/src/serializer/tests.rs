use super::*;
use crate::codec::{JsonSerializer, Serializer, SerializerExt};
use crate::compression::{CompressionLevel, Compressor, GzipCompressor, Lz4Compressor};
use crate::encoding::{Base64Encoder, Encoder, HexEncoder};
use crate::encryption::AesGcmEncryptor;
use crate::error::{PipelineError, TransformError};
use crate::test_support::{init_tracing, test_key_pair};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
  title: String,
  body: String,
}

fn note() -> Note {
  Note {
    title: "groceries".to_string(),
    body: "milk, eggs, more milk, more eggs".repeat(8),
  }
}

fn json() -> Box<dyn Serializer> {
  Box::new(JsonSerializer::default())
}

fn full_chain(keys: Arc<crate::key::RsaKeyPair>) -> Box<dyn Serializer> {
  let compressed = CompressedSerializer::new(json(), Box::new(GzipCompressor::new(CompressionLevel::Fastest)));
  let encrypted = EncryptedSerializer::new(Box::new(compressed), Box::new(AesGcmEncryptor::new(keys)));
  Box::new(EncodedSerializer::new(Box::new(encrypted), Box::new(Base64Encoder)))
}

#[tokio::test]
async fn test_full_chain_round_trip() {
  init_tracing();
  let chain = full_chain(Arc::new(test_key_pair()));
  let bytes = chain.serialize(&note()).await.unwrap();
  let back: Note = chain.deserialize(bytes).await.unwrap();
  assert_eq!(back, note());
}

#[tokio::test]
async fn test_read_with_swapped_order_fails() {
  let keys = Arc::new(test_key_pair());
  let writer = full_chain(keys.clone());
  let bytes = writer.serialize(&note()).await.unwrap();

  // decompress before decrypting: the outer layers are peeled in the wrong sequence
  let encrypted = EncryptedSerializer::new(json(), Box::new(AesGcmEncryptor::new(keys)));
  let compressed = CompressedSerializer::new(Box::new(encrypted), Box::new(GzipCompressor::default()));
  let reader = EncodedSerializer::new(Box::new(compressed), Box::new(Base64Encoder));

  let err = reader.deserialize::<Note>(bytes).await.unwrap_err();
  assert!(matches!(err, PipelineError::Compression(_)));
}

#[tokio::test]
async fn test_raw_bytes_undo_every_transform() {
  let chain = full_chain(Arc::new(test_key_pair()));
  let cancel = CancellationToken::new();
  let bytes = chain.serialize(&note()).await.unwrap();
  let raw = chain.deserialize_raw_bytes(bytes, &cancel).await.unwrap();
  assert_eq!(raw, serde_json::to_vec(&note()).unwrap());
}

#[tokio::test]
async fn test_raw_bytes_reports_transform_failure() {
  let chain = CompressedSerializer::new(json(), Box::new(GzipCompressor::default()));
  // a gzip member header followed by a deflate block of the reserved type
  let corrupt = vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
  let err = chain
    .deserialize_raw_bytes(corrupt, &CancellationToken::new())
    .await
    .unwrap_err();
  assert!(matches!(err, TransformError::Compression(_)));
  assert!(!err.is_cancelled());
}

#[tokio::test]
async fn test_raw_bytes_pass_through_untransformed_input() {
  let plain = serde_json::to_vec(&note()).unwrap();
  let cancel = CancellationToken::new();

  let gzip = CompressedSerializer::new(json(), Box::new(GzipCompressor::default()));
  assert_eq!(gzip.deserialize_raw_bytes(plain.clone(), &cancel).await.unwrap(), plain);

  let lz4 = CompressedSerializer::new(json(), Box::new(Lz4Compressor::new()));
  assert_eq!(lz4.deserialize_raw_bytes(plain.clone(), &cancel).await.unwrap(), plain);

  let hex = EncodedSerializer::new(json(), Box::new(HexEncoder));
  assert_eq!(hex.deserialize_raw_bytes(plain.clone(), &cancel).await.unwrap(), plain);

  let encrypted = EncryptedSerializer::new(json(), Box::new(AesGcmEncryptor::new(Arc::new(test_key_pair()))));
  assert_eq!(encrypted.deserialize_raw_bytes(plain.clone(), &cancel).await.unwrap(), plain);

  let chain = full_chain(Arc::new(test_key_pair()));
  assert_eq!(chain.deserialize_raw_bytes(plain.clone(), &cancel).await.unwrap(), plain);
}

#[tokio::test]
async fn test_raw_bytes_undo_only_the_transforms_present() {
  let plain = serde_json::to_vec(&note()).unwrap();
  let cancel = CancellationToken::new();
  let compressed = GzipCompressor::default().compress(&plain, &cancel).await.unwrap();

  // gzip output carried through a chain whose encryption and encoding were never applied
  let chain = full_chain(Arc::new(test_key_pair()));
  assert_eq!(chain.deserialize_raw_bytes(compressed, &cancel).await.unwrap(), plain);

  let encoded = Base64Encoder.encode(&plain, &cancel).await.unwrap();
  let chain = full_chain(Arc::new(test_key_pair()));
  assert_eq!(chain.deserialize_raw_bytes(encoded, &cancel).await.unwrap(), plain);
}

#[tokio::test]
async fn test_cancellation_aborts_before_any_output() {
  let chain = CompressedSerializer::new(json(), Box::new(Lz4Compressor::new()));
  let cancel = CancellationToken::new();
  cancel.cancel();
  let err = chain.serialize_with(&note(), &cancel).await.unwrap_err();
  assert!(err.is_cancelled());
  let err = chain.deserialize_raw_bytes(vec![1, 2, 3], &cancel).await.unwrap_err();
  assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_composed_serializer_is_shareable_across_tasks() {
  let composed = Arc::new(ComposedSerializer::new(
    full_chain(Arc::new(test_key_pair())),
    vec![
      Layer::Codec("Json:1".to_string()),
      Layer::Compression("gzip"),
      Layer::Encryption("aes-256-gcm"),
      Layer::Encoding("base64"),
    ],
  ));
  let mut handles = Vec::new();
  for i in 0..8 {
    let composed = composed.clone();
    handles.push(tokio::spawn(async move {
      let value = Note {
        title: format!("note-{}", i),
        body: "x".repeat(i * 100),
      };
      let bytes = composed.serialize(&value).await.unwrap();
      let back: Note = composed.deserialize(bytes).await.unwrap();
      assert_eq!(back, value);
    }));
  }
  for handle in handles {
    handle.await.unwrap();
  }
  assert_eq!(composed.layers().len(), 4);
  assert_eq!(composed.layers()[3].to_string(), "encoding(base64)");
}
