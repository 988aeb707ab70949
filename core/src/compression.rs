//! Reversible byte compression applied after the codec.

mod brotli_compressor;
mod compressor;
mod flate;
mod lz4;
mod provider;


pub use self::{brotli_compressor::*, compressor::*, flate::*, lz4::*, provider::*};
