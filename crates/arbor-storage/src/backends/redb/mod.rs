//! Redb storage backend.
//!
//! Redb is a pure-Rust embedded database providing ACID transactions over a
//! copy-on-write B-tree. This backend stores all logical tables in a single
//! physical redb table using key prefixing.

mod engine;
mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
