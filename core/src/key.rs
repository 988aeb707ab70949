//! RSA key material used to wrap per-message symmetric keys.

mod key_material;
mod rsa_key_provider;

#[cfg(test)]
mod tests;

pub use self::{key_material::*, rsa_key_provider::*};
