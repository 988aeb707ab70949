//! Decorators that stack byte transforms on top of a base codec.

mod composed;
mod compressed;
mod encoded;
mod encrypted;

#[cfg(test)]
mod tests;

pub use self::{composed::*, compressed::*, encoded::*, encrypted::*};
