use super::*;
use crate::error::{EncryptionError, KeyMaterialError, ProviderConstructionError};
use crate::key::{KeyMaterial, RsaKeyPair};
use crate::test_support::{init_tracing, test_key_pair, TEST_KEY_BITS};
use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce, Tag};
use aes_gcm::Aes256Gcm;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rsa::{Oaep, RsaPrivateKey};
use rstest::rstest;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const WRAPPED_LEN: usize = TEST_KEY_BITS / 8;

fn keys() -> Arc<RsaKeyPair> {
  Arc::new(test_key_pair())
}

#[rstest]
#[case::gcm(Box::new(AesGcmEncryptor::new(keys())) as Box<dyn Encryptor>)]
#[case::cbc(Box::new(AesCbcEncryptor::new(keys())) as Box<dyn Encryptor>)]
#[tokio::test]
async fn test_encrypt_round_trip(#[case] encryptor: Box<dyn Encryptor>) {
  init_tracing();
  let cancel = CancellationToken::new();
  for plaintext in [Vec::new(), b"x".to_vec(), vec![7u8; 4096 + 3]] {
    let sealed = encryptor.encrypt(&plaintext, &cancel).await.unwrap();
    assert_ne!(sealed, plaintext);
    let opened = encryptor.decrypt(&sealed, &cancel).await.unwrap();
    assert_eq!(opened, plaintext);
  }
}

#[rstest]
#[case::gcm(Box::new(AesGcmEncryptor::new(keys())) as Box<dyn Encryptor>)]
#[case::cbc(Box::new(AesCbcEncryptor::new(keys())) as Box<dyn Encryptor>)]
#[tokio::test]
async fn test_every_message_gets_fresh_key_material(#[case] encryptor: Box<dyn Encryptor>) {
  let cancel = CancellationToken::new();
  let first = encryptor.encrypt(b"same input", &cancel).await.unwrap();
  let second = encryptor.encrypt(b"same input", &cancel).await.unwrap();
  assert_ne!(first, second);
}

#[tokio::test]
async fn test_gcm_envelope_layout_is_bit_exact() {
  let pair = test_key_pair();
  let encryptor = AesGcmEncryptor::new(Arc::new(pair.clone()));
  let plaintext = b"layered pipelines are fun".to_vec();
  let sealed = encryptor.encrypt(&plaintext, &CancellationToken::new()).await.unwrap();

  assert_eq!(sealed.len(), WRAPPED_LEN * 2 + AES_GCM_TAG_LEN + plaintext.len());
  let layout = encryptor.layout();
  assert_eq!(layout, EnvelopeLayout::new(WRAPPED_LEN, AES_GCM_TAG_LEN));

  let parts = layout.split(&sealed).unwrap();
  let key = pair
    .private_key()
    .decrypt(Oaep::new::<sha2::Sha256>(), parts.wrapped_key)
    .unwrap();
  let nonce = pair
    .private_key()
    .decrypt(Oaep::new::<sha2::Sha256>(), parts.wrapped_iv)
    .unwrap();
  assert_eq!(key.len(), AES_GCM_KEY_LEN);
  assert_eq!(nonce.len(), AES_GCM_NONCE_LEN);

  let cipher = Aes256Gcm::new_from_slice(&key).unwrap();
  let mut buffer = parts.ciphertext.to_vec();
  cipher
    .decrypt_in_place_detached(
      Nonce::<Aes256Gcm>::from_slice(&nonce),
      b"",
      &mut buffer,
      Tag::<Aes256Gcm>::from_slice(parts.tag),
    )
    .unwrap();
  assert_eq!(buffer, plaintext);
}

#[tokio::test]
async fn test_cbc_envelope_layout_is_bit_exact() {
  let pair = test_key_pair();
  let encryptor = AesCbcEncryptor::new(Arc::new(pair.clone()));
  let plaintext = [1u8; 20];
  let sealed = encryptor.encrypt(&plaintext, &CancellationToken::new()).await.unwrap();

  // 20 bytes pad up to two blocks, and there is no tag segment
  assert_eq!(sealed.len(), WRAPPED_LEN * 2 + 32);
  let layout = encryptor.layout();
  assert_eq!(layout, EnvelopeLayout::new(WRAPPED_LEN, 0));

  let parts = layout.split(&sealed).unwrap();
  assert!(parts.tag.is_empty());
  assert_eq!(parts.wrapped_key, &sealed[..WRAPPED_LEN]);
  assert_eq!(parts.wrapped_iv, &sealed[WRAPPED_LEN..WRAPPED_LEN * 2]);
  let key = pair
    .private_key()
    .decrypt(Oaep::new::<sha2::Sha256>(), parts.wrapped_key)
    .unwrap();
  let iv = pair
    .private_key()
    .decrypt(Oaep::new::<sha2::Sha256>(), parts.wrapped_iv)
    .unwrap();
  assert_eq!(key.len(), AES_CBC_KEY_LEN);
  assert_eq!(iv.len(), AES_CBC_IV_LEN);

  let opened = cbc::Decryptor::<aes::Aes256>::new_from_slices(&key, &iv)
    .unwrap()
    .decrypt_padded_vec_mut::<Pkcs7>(parts.ciphertext)
    .unwrap();
  assert_eq!(opened, plaintext);
}

#[tokio::test]
async fn test_encryptors_recognize_only_their_own_envelopes() {
  let cancel = CancellationToken::new();
  let gcm = AesGcmEncryptor::new(keys());
  let cbc_encryptor = AesCbcEncryptor::new(keys());
  let sealed_gcm = gcm.encrypt(b"enveloped", &cancel).await.unwrap();
  let sealed_cbc = cbc_encryptor.encrypt(b"enveloped", &cancel).await.unwrap();

  assert_eq!(gcm.recognizes(&sealed_gcm), Some(true));
  assert_eq!(cbc_encryptor.recognizes(&sealed_cbc), Some(true));
  assert_eq!(gcm.recognizes(b"{\"plain\":true}"), Some(false));
  assert_eq!(cbc_encryptor.recognizes(&vec![b'x'; WRAPPED_LEN * 2 + 32]), Some(false));
}

#[tokio::test]
async fn test_tampered_ciphertext_fails_authentication() {
  let encryptor = AesGcmEncryptor::new(keys());
  let cancel = CancellationToken::new();
  let mut sealed = encryptor.encrypt(b"do not touch", &cancel).await.unwrap();
  let last = sealed.len() - 1;
  sealed[last] ^= 0x01;
  let err = encryptor.decrypt(&sealed, &cancel).await.unwrap_err();
  assert!(matches!(err, EncryptionError::Cipher(_)));
}

#[tokio::test]
async fn test_truncated_envelope_is_rejected() {
  let encryptor = AesGcmEncryptor::new(keys());
  let err = encryptor
    .decrypt(&[0u8; 10], &CancellationToken::new())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    EncryptionError::Truncated { required, actual: 10 } if required == WRAPPED_LEN * 2 + AES_GCM_TAG_LEN
  ));
}

#[tokio::test]
async fn test_foreign_key_cannot_unwrap() {
  let cancel = CancellationToken::new();
  let sealed = AesGcmEncryptor::new(keys()).encrypt(b"secret", &cancel).await.unwrap();
  let stranger = RsaKeyPair::from_private(RsaPrivateKey::new(&mut OsRng, TEST_KEY_BITS).unwrap());
  let err = AesGcmEncryptor::new(Arc::new(stranger))
    .decrypt(&sealed, &cancel)
    .await
    .unwrap_err();
  assert!(matches!(err, EncryptionError::KeyUnwrap { what: "key", .. }));
}

#[tokio::test]
async fn test_cancelled_before_encrypt() {
  let cancel = CancellationToken::new();
  cancel.cancel();
  let err = AesCbcEncryptor::new(keys()).encrypt(b"abc", &cancel).await.unwrap_err();
  assert!(matches!(err, EncryptionError::Cancelled));
}

#[test]
fn test_provider_reports_missing_key_files() {
  let dir = tempfile::tempdir().unwrap();
  let material = KeyMaterial::files(dir.path().join("pub.pem"), dir.path().join("priv.pem"));
  let err = AesGcmEncryptionProvider::from_key_material(&material).unwrap_err();
  assert!(matches!(
    err,
    ProviderConstructionError::KeyMaterial {
      provider: AesGcmEncryptionProvider::NAME,
      source: KeyMaterialError::NotFound(_),
    }
  ));
}

#[tokio::test]
async fn test_providers_share_keys_across_encryptors() {
  let provider = AesCbcEncryptionProvider::new(test_key_pair());
  let cancel = CancellationToken::new();
  let sealed = provider.encryptor().encrypt(b"hand-off", &cancel).await.unwrap();
  let opened = provider.encryptor().decrypt(&sealed, &cancel).await.unwrap();
  assert_eq!(opened, b"hand-off");
  assert_eq!(AesGcmEncryptionProvider::new(test_key_pair()).encryptor().algorithm(), "aes-256-gcm");
}
