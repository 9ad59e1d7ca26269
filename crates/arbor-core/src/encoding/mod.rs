//! Serialization and key encoding.
//!
//! Record bodies use a compact tagged binary format; storage keys use
//! big-endian prefix-partitioned encoding so range scans stay ordered.

pub mod keys;
mod traits;
mod value;

mod edge;
mod vertex;

#[cfg(test)]
mod proptest_tests;

pub use traits::{Decoder, Encoder, FORMAT_VERSION};
pub use value::decode_value;
