use crate::key::RsaKeyPair;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use std::env;
use tracing_subscriber::EnvFilter;

pub(crate) const TEST_KEY_BITS: usize = 1024;

static TEST_KEY: Lazy<RsaPrivateKey> =
  Lazy::new(|| RsaPrivateKey::new(&mut OsRng, TEST_KEY_BITS).expect("failed to generate test key"));

pub(crate) fn test_private_key() -> RsaPrivateKey {
  TEST_KEY.clone()
}

pub(crate) fn test_key_pair() -> RsaKeyPair {
  RsaKeyPair::from_private(test_private_key())
}

pub(crate) fn init_tracing() {
  env::set_var("RUST_LOG", "debug");
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .try_init();
}
