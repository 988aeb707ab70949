use super::*;
use crate::error::EncodingError;
use rstest::rstest;
use tokio_util::sync::CancellationToken;

#[rstest]
#[case::base64(Box::new(Base64Encoder) as Box<dyn Encoder>, b"hello".to_vec(), b"aGVsbG8=".to_vec())]
#[case::hex(Box::new(HexEncoder) as Box<dyn Encoder>, vec![0xde, 0xad, 0xbe, 0xef], b"DEADBEEF".to_vec())]
#[case::utf8(Box::new(Utf8Encoder) as Box<dyn Encoder>, "grüße".as_bytes().to_vec(), "grüße".as_bytes().to_vec())]
#[tokio::test]
async fn test_encode_known_vectors(#[case] encoder: Box<dyn Encoder>, #[case] input: Vec<u8>, #[case] expected: Vec<u8>) {
  let cancel = CancellationToken::new();
  let encoded = encoder.encode(&input, &cancel).await.unwrap();
  assert_eq!(encoded, expected);
  assert_eq!(encoder.decode(&encoded, &cancel).await.unwrap(), input);
}

#[tokio::test]
async fn test_hex_decode_accepts_lower_case() {
  let decoded = HexEncoder.decode(b"deadbeef", &CancellationToken::new()).await.unwrap();
  assert_eq!(decoded, vec![0xde, 0xad, 0xbe, 0xef]);
}

#[rstest]
#[case::base64(Box::new(Base64Encoder) as Box<dyn Encoder>, b"not base64!".to_vec())]
#[case::hex(Box::new(HexEncoder) as Box<dyn Encoder>, b"ABC".to_vec())]
#[case::utf8(Box::new(Utf8Encoder) as Box<dyn Encoder>, vec![0xff, 0xfe])]
#[tokio::test]
async fn test_decode_rejects_invalid_input(#[case] encoder: Box<dyn Encoder>, #[case] input: Vec<u8>) {
  let err = encoder.decode(&input, &CancellationToken::new()).await.unwrap_err();
  assert!(matches!(err, EncodingError::Decode { .. }));
}

#[tokio::test]
async fn test_utf8_refuses_to_encode_binary() {
  let err = Utf8Encoder.encode(&[0xc3, 0x28], &CancellationToken::new()).await.unwrap_err();
  assert!(matches!(err, EncodingError::Encode { encoding: "utf-8", .. }));
}

#[tokio::test]
async fn test_cancelled_encode() {
  let cancel = CancellationToken::new();
  cancel.cancel();
  let err = Base64Encoder.encode(b"abc", &cancel).await.unwrap_err();
  assert!(matches!(err, EncodingError::Cancelled));
}

#[test]
fn test_providers() {
  assert_eq!(Base64EncodingProvider.encoder().encoding(), "base64");
  assert_eq!(HexEncodingProvider.encoder().encoding(), "hex");
  assert_eq!(Utf8EncodingProvider.encoder().encoding(), "utf-8");
}

#[rstest]
#[case::base64_padded(Box::new(Base64Encoder) as Box<dyn Encoder>, b"aGk=".to_vec(), true)]
#[case::base64_plain_json(Box::new(Base64Encoder) as Box<dyn Encoder>, b"{\"a\":1}".to_vec(), false)]
#[case::base64_bad_length(Box::new(Base64Encoder) as Box<dyn Encoder>, b"abc".to_vec(), false)]
#[case::hex_upper(Box::new(HexEncoder) as Box<dyn Encoder>, b"0AFF".to_vec(), true)]
#[case::hex_odd_length(Box::new(HexEncoder) as Box<dyn Encoder>, b"0AF".to_vec(), false)]
#[case::utf8_binary(Box::new(Utf8Encoder) as Box<dyn Encoder>, vec![0xff, 0x00], false)]
fn test_alphabet_recognition(#[case] encoder: Box<dyn Encoder>, #[case] data: Vec<u8>, #[case] expected: bool) {
  assert_eq!(encoder.recognizes(&data), Some(expected));
}
