//! Batched write transactions.
//!
//! Bulk loads and analytics kernels perform far more mutations than fit
//! comfortably in a single write transaction. [`BatchWriter`] wraps an open
//! write transaction and commits it every time a mutation threshold is
//! reached, immediately opening a fresh transaction so callers can keep
//! writing without thinking about transaction boundaries.

use arbor_storage::{StorageEngine, Transaction};
use tracing::debug;

use super::error::{GraphError, GraphResult};

/// Number of recorded mutations after which a batch is committed.
pub const DEFAULT_COMMIT_THRESHOLD: u64 = 4095;

/// A write transaction that commits itself every N mutations.
///
/// The writer always holds exactly one open write transaction. Callers
/// perform writes through [`BatchWriter::tx_mut`], then call
/// [`BatchWriter::record_mutation`] once per logical mutation. When the
/// recorded count reaches the threshold, the current transaction is
/// committed and a new one is opened.
///
/// Call [`BatchWriter::finish`] to commit the final partial batch. Dropping
/// the writer without finishing rolls back any uncommitted mutations;
/// batches committed earlier stay committed.
///
/// # Example
///
/// ```ignore
/// let mut batch = BatchWriter::new(&engine)?;
/// for (source, target) in edges {
///     EdgeStore::create(batch.tx_mut()?, &gen, source, target, |id| {
///         Edge::new(id, source, target)
///     })?;
///     batch.record_mutation()?;
/// }
/// batch.finish()?;
/// ```
pub struct BatchWriter<'e, E: StorageEngine> {
    engine: &'e E,
    tx: Option<E::Transaction<'e>>,
    threshold: u64,
    pending: u64,
    commits: u64,
}

impl<'e, E: StorageEngine> BatchWriter<'e, E> {
    /// Create a batch writer with the default commit threshold.
    ///
    /// Opens the first write transaction immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if a write transaction cannot be started.
    pub fn new(engine: &'e E) -> GraphResult<Self> {
        Self::with_threshold(engine, DEFAULT_COMMIT_THRESHOLD)
    }

    /// Create a batch writer with a custom commit threshold.
    ///
    /// A threshold of zero is rejected; it would commit empty batches
    /// forever.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] if `threshold` is zero, or
    /// a storage error if a write transaction cannot be started.
    pub fn with_threshold(engine: &'e E, threshold: u64) -> GraphResult<Self> {
        if threshold == 0 {
            return Err(GraphError::InvalidParameter {
                param: "threshold",
                message: "commit threshold must be at least 1".to_string(),
            });
        }
        let tx = engine.begin_write()?;
        Ok(Self { engine, tx: Some(tx), threshold, pending: 0, commits: 0 })
    }

    /// Get a reference to the current write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Internal`] if the writer holds no transaction.
    /// This only happens if a previous commit failed partway.
    pub fn tx(&self) -> GraphResult<&E::Transaction<'e>> {
        self.tx
            .as_ref()
            .ok_or_else(|| GraphError::Internal("batch writer has no open transaction".to_string()))
    }

    /// Get a mutable reference to the current write transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Internal`] if the writer holds no transaction.
    pub fn tx_mut(&mut self) -> GraphResult<&mut E::Transaction<'e>> {
        self.tx
            .as_mut()
            .ok_or_else(|| GraphError::Internal("batch writer has no open transaction".to_string()))
    }

    /// Record one logical mutation.
    ///
    /// When the recorded count reaches the threshold, the current
    /// transaction is committed and a fresh one is opened.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit or the reopen fails. On failure the
    /// writer is left without a transaction; the caller should drop it.
    pub fn record_mutation(&mut self) -> GraphResult<()> {
        self.pending += 1;
        if self.pending >= self.threshold {
            self.commit_and_reopen()?;
        }
        Ok(())
    }

    /// Commit the current batch now, regardless of how full it is, and open
    /// a fresh transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit or the reopen fails.
    pub fn force_commit(&mut self) -> GraphResult<()> {
        self.commit_and_reopen()
    }

    /// Commit the final batch and consume the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails. Previously committed batches
    /// are unaffected.
    pub fn finish(mut self) -> GraphResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| GraphError::Internal("batch writer has no open transaction".to_string()))?;
        tx.commit()?;
        self.commits += 1;
        debug!(commits = self.commits, "batch writer finished");
        Ok(())
    }

    /// Number of batches committed so far.
    #[must_use]
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Number of mutations recorded since the last commit.
    #[must_use]
    pub fn pending_mutations(&self) -> u64 {
        self.pending
    }

    /// Commit the held transaction and open a replacement.
    ///
    /// The old transaction must be committed before the new one is opened;
    /// write transactions are serialized by the storage engine.
    fn commit_and_reopen(&mut self) -> GraphResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| GraphError::Internal("batch writer has no open transaction".to_string()))?;
        tx.commit()?;
        self.commits += 1;
        debug!(pending = self.pending, commits = self.commits, "committed write batch");
        self.pending = 0;
        self.tx = Some(self.engine.begin_write()?);
        Ok(())
    }
}
