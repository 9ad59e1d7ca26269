//! Concrete storage backend implementations.

mod redb;

pub use redb::{RedbConfig, RedbCursor, RedbEngine, RedbTransaction};
