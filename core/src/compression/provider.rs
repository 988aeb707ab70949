use crate::compression::{BrotliCompressor, CompressionLevel, Compressor, DeflateCompressor, GzipCompressor, Lz4Compressor};
use std::fmt::Debug;

/// Hands out the [`Compressor`] a pipeline wraps its codec with.
pub trait CompressionProvider: Debug + Send + Sync {
  fn compressor(&self) -> Box<dyn Compressor>;
}

#[derive(Debug, Clone, Default)]
pub struct GzipCompressionProvider {
  level: CompressionLevel,
}

impl GzipCompressionProvider {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }
}

impl CompressionProvider for GzipCompressionProvider {
  fn compressor(&self) -> Box<dyn Compressor> {
    Box::new(GzipCompressor::new(self.level))
  }
}

#[derive(Debug, Clone, Default)]
pub struct DeflateCompressionProvider {
  level: CompressionLevel,
}

impl DeflateCompressionProvider {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }
}

impl CompressionProvider for DeflateCompressionProvider {
  fn compressor(&self) -> Box<dyn Compressor> {
    Box::new(DeflateCompressor::new(self.level))
  }
}

#[derive(Debug, Clone, Default)]
pub struct BrotliCompressionProvider {
  level: CompressionLevel,
}

impl BrotliCompressionProvider {
  pub fn new(level: CompressionLevel) -> Self {
    Self { level }
  }
}

impl CompressionProvider for BrotliCompressionProvider {
  fn compressor(&self) -> Box<dyn Compressor> {
    Box::new(BrotliCompressor::new(self.level))
  }
}

#[derive(Debug, Clone, Default)]
pub struct Lz4CompressionProvider;

impl CompressionProvider for Lz4CompressionProvider {
  fn compressor(&self) -> Box<dyn Compressor> {
    Box::new(Lz4Compressor::new())
  }
}
