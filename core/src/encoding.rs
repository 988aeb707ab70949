//! Text encodings applied last on write and first on read.

mod base64_encoder;
mod encoder;
mod hex_encoder;
mod provider;
mod utf8;

#[cfg(test)]
mod tests;

pub use self::{base64_encoder::*, encoder::*, hex_encoder::*, provider::*, utf8::*};
