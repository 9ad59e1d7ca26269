//! [`StorageEngine`] implementation on top of the redb embedded database.

use std::path::Path;

use redb::Database;

use crate::engine::{StorageEngine, StorageError};

use super::transaction::RedbTransaction;

/// Tuning knobs for opening a redb database.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedbConfig {
    /// Page cache size in bytes. `None` leaves redb's default in place.
    pub cache_size: Option<usize>,
}

impl RedbConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the page cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }
}

/// Storage engine backed by a single redb database file.
///
/// redb gives us ACID transactions without a native dependency, which keeps
/// the graph store embeddable. All logical tables share one redb table; see
/// the `tables` module for the key layout.
///
/// ```ignore
/// use arbor_storage::backends::RedbEngine;
///
/// let engine = RedbEngine::open("graph.redb")?;
/// let mut tx = engine.begin_write()?;
/// tx.put("vertices", b"vertex:1", b"...")?;
/// tx.commit()?;
/// ```
pub struct RedbEngine {
    db: Database,
}

impl RedbEngine {
    /// Open the database at `path`, creating it if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the file cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Like [`RedbEngine::open`], with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the file cannot be opened or created.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: RedbConfig,
    ) -> Result<Self, StorageError> {
        let mut builder = Database::builder();

        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = builder.create(path.as_ref()).map_err(|e| StorageError::Open(e.to_string()))?;

        Ok(Self { db })
    }

    /// Open a throwaway in-memory database. Contents vanish on drop.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] when the backend cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;

        Ok(Self { db })
    }
}

impl StorageEngine for RedbEngine {
    type Transaction<'a> = RedbTransaction;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_read(tx))
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_write(tx))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::Transaction;

    #[test]
    fn in_memory_engine_opens_read_transactions() {
        let engine = RedbEngine::in_memory().unwrap();
        let tx = engine.begin_read().unwrap();
        assert!(tx.is_read_only());
    }

    #[test]
    fn config_builder_sets_cache_size() {
        let config = RedbConfig::new().cache_size(10 * 1024 * 1024);
        assert_eq!(config.cache_size, Some(10 * 1024 * 1024));
    }

    #[test]
    fn committed_write_is_visible_to_later_reads() {
        let engine = RedbEngine::in_memory().unwrap();

        let mut tx = engine.begin_write().unwrap();
        tx.put("test", b"key", b"value").unwrap();
        tx.commit().unwrap();

        let tx = engine.begin_read().unwrap();
        let value = tx.get("test", b"key").unwrap();
        assert_eq!(value, Some(b"value".to_vec()));
    }
}
