use crate::encoding::{Base64Encoder, Encoder, HexEncoder, Utf8Encoder};
use std::fmt::Debug;

pub trait EncodingProvider: Debug + Send + Sync {
  fn encoder(&self) -> Box<dyn Encoder>;
}

#[derive(Debug, Clone, Default)]
pub struct Base64EncodingProvider;

impl EncodingProvider for Base64EncodingProvider {
  fn encoder(&self) -> Box<dyn Encoder> {
    Box::new(Base64Encoder)
  }
}

#[derive(Debug, Clone, Default)]
pub struct HexEncodingProvider;

impl EncodingProvider for HexEncodingProvider {
  fn encoder(&self) -> Box<dyn Encoder> {
    Box::new(HexEncoder)
  }
}

#[derive(Debug, Clone, Default)]
pub struct Utf8EncodingProvider;

impl EncodingProvider for Utf8EncodingProvider {
  fn encoder(&self) -> Box<dyn Encoder> {
    Box::new(Utf8Encoder)
  }
}
