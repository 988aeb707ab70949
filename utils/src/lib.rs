//! Utility library shared by the Stratum crates.

pub mod collections;
