//! Checks, ahead of any I/O, whether a type satisfies the object contract of a binary format.

mod compatibility_verifier;
mod rules;
mod verdict;
mod verdict_cache;
mod verifier_format;


pub use self::{compatibility_verifier::*, verdict::*, verdict_cache::*, verifier_format::*};
