//! Hybrid RSA + AES encryption applied after compression.

mod aes_cbc;
mod aes_gcm_encryptor;
mod encryptor;
mod envelope;
mod key_wrap;
mod provider;

#[cfg(test)]
mod tests;

pub use self::{aes_cbc::*, aes_gcm_encryptor::*, encryptor::*, envelope::*, key_wrap::*, provider::*};
