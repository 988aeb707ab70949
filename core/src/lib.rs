//! Layered serialization: a codec, then optional compression, encryption and text encoding,
//! composed in that fixed order and undone in mirror order on read.

extern crate self as stratum_core_rs;

pub mod codec;
pub mod compression;
pub mod encoding;
pub mod encryption;
pub mod error;
pub mod key;
pub mod pipeline;
pub mod serializer;
pub mod shape;
pub mod verifier;

#[cfg(test)]
mod test_support;
