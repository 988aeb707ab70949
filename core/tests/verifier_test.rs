use std::sync::Arc;
use stratum_core_rs::shape::Shape;
use stratum_core_rs::codec::CodecId;
use stratum_core_rs::verifier::{CompatibilityVerifier, VerdictCache, VerifierFormat};

#[derive(Shape)]
#[shape(object)]
pub struct Foo {
  #[shape(key = 0)]
  pub first: String,
  pub second: String,
}

#[derive(Shape)]
#[shape(object)]
pub struct Bar {
  #[shape(key = 0)]
  pub first: String,
  #[shape(key = 1)]
  pub second: String,
}

#[test]
fn test_foo_missing_key_names_the_member() {
  let verifier = CompatibilityVerifier::new(Arc::new(VerdictCache::new()));
  let verdict = verifier.is_serializable::<Foo>();
  assert!(!verdict.ok);
  assert!(verdict.reason.contains("second"));
  assert!(!verdict.reason.contains("first"));
  assert_eq!(verifier.is_serializable::<Foo>(), verdict);
}

#[test]
fn test_fully_keyed_bar_passes() {
  let verifier = CompatibilityVerifier::new(Arc::new(VerdictCache::new()));
  assert!(verifier.is_serializable::<Bar>().ok);
}

#[test]
fn test_foo_is_fine_for_the_compact_codec() {
  let format = VerifierFormat::for_codec(CodecId::Bincode).unwrap();
  let verifier = CompatibilityVerifier::new(Arc::new(VerdictCache::new())).with_format(format);
  assert!(verifier.is_serializable::<Foo>().ok);
  assert!(verifier.is_serializable::<Bar>().ok);
}
