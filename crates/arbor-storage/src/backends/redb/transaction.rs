//! Redb transaction implementation.
//!
//! This module provides the `RedbTransaction` type which implements the
//! `Transaction` trait for both read-only and read-write transactions.
//!
//! # Memory-Efficient Cursors
//!
//! The cursor implementation uses batched streaming to avoid loading entire
//! tables into memory. Instead of materializing all entries upfront, it loads
//! entries in configurable batches (default 1000 entries), fetching the next
//! batch on demand as the cursor advances.

use std::ops::Bound;

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use crate::engine::{Cursor, CursorResult, KeyValue, StorageError, Transaction};

use super::tables::{decode_key, encode_key, table_end_key, table_start_key, DATA_TABLE};

/// Default batch size for cursor operations.
/// This limits memory usage while maintaining good performance.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// A transaction for the Redb storage engine.
///
/// This type wraps both read-only and read-write Redb transactions,
/// providing a unified interface through the `Transaction` trait.
///
/// Note: We allow the `large_enum_variant` lint here because boxing the
/// `WriteTransaction` would add indirection overhead for every operation,
/// and transactions are typically short-lived.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only transaction.
    Read(ReadTransaction),
    /// A read-write transaction.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Create a new read-only transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Create a new read-write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }
}

impl Transaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let encoded_key = encode_key(table, key);

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => match t.get(encoded_key.as_slice()) {
                    Ok(Some(value)) => Ok(Some(value.value().to_vec())),
                    Ok(None) => Ok(None),
                    Err(e) => Err(StorageError::Internal(e.to_string())),
                },
                // No data table means no data, which is not an error
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => match t.get(encoded_key.as_slice()) {
                    Ok(Some(value)) => Ok(Some(value.value().to_vec())),
                    Ok(None) => Ok(None),
                    Err(e) => Err(StorageError::Internal(e.to_string())),
                },
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }

    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                t.insert(encoded_key.as_slice(), value)
                    .map_err(|e| StorageError::Internal(e.to_string()))?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                match tx.open_table(DATA_TABLE) {
                    Ok(mut t) => match t.remove(encoded_key.as_slice()) {
                        Ok(Some(_)) => Ok(true),
                        Ok(None) => Ok(false),
                        Err(e) => Err(StorageError::Internal(e.to_string())),
                    },
                    // Table doesn't exist, so key definitely doesn't exist
                    Err(redb::TableError::TableDoesNotExist(_)) => Ok(false),
                    Err(e) => Err(StorageError::Internal(e.to_string())),
                }
            }
        }
    }

    fn cursor(&self, table: &str) -> Result<Self::Cursor<'_>, StorageError> {
        Ok(RedbCursor::new(self, table.to_string(), None, None, DEFAULT_BATCH_SIZE))
    }

    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError> {
        let start_owned = bound_to_owned(start);
        let end_owned = bound_to_owned(end);
        Ok(RedbCursor::new(
            self,
            table.to_string(),
            Some(start_owned),
            Some(end_owned),
            DEFAULT_BATCH_SIZE,
        ))
    }

    fn commit(self) -> Result<(), StorageError> {
        match self {
            // Read transactions don't need explicit commit
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        match self {
            // Read transactions just get dropped
            Self::Read(_) => Ok(()),
            Self::Write(tx) => {
                // Ignore abort result - we're rolling back anyway
                drop(tx.abort());
                Ok(())
            }
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

impl RedbTransaction {
    /// Fetch a batch of entries from the table, starting after the given key.
    ///
    /// This is the core method for batched streaming. It fetches up to `batch_size`
    /// entries starting from `after_key` (exclusive) or from the range start if None.
    fn fetch_batch(
        &self,
        table: &str,
        after_key: Option<&[u8]>,
        user_start_bound: &Option<Bound<Vec<u8>>>,
        user_end_bound: &Option<Bound<Vec<u8>>>,
        batch_size: usize,
    ) -> Result<Vec<KeyValue>, StorageError> {
        // Compute the physical range for this table
        let table_start = table_start_key(table);
        let table_end = table_end_key(table);

        // Compute effective start based on after_key or user bounds
        let effective_start: Vec<u8> = if let Some(after) = after_key {
            encode_key(table, after)
        } else {
            match user_start_bound {
                Some(Bound::Included(k) | Bound::Excluded(k)) => encode_key(table, k),
                _ => table_start,
            }
        };

        // Determine if we should skip the first key (for after_key or Excluded bounds)
        let skip_first =
            after_key.is_some() || matches!(user_start_bound, Some(Bound::Excluded(_)));

        // Compute effective end based on user bounds
        let effective_end: Vec<u8> = match user_end_bound {
            Some(Bound::Included(k)) => {
                // We need to include k, so extend one byte past it
                let mut end = encode_key(table, k);
                end.push(0xFF);
                end
            }
            Some(Bound::Excluded(k)) => encode_key(table, k),
            _ => table_end,
        };

        let mut entries: Vec<KeyValue> = Vec::with_capacity(batch_size.min(1024));

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range(effective_start.as_slice()..effective_end.as_slice())
                        .map_err(|e| StorageError::Internal(e.to_string()))?;

                    let mut skipped_first = !skip_first;
                    for result in range {
                        if entries.len() >= batch_size {
                            break;
                        }

                        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
                        if let Some((_, original_key)) = decode_key(k.value()) {
                            // Skip the first entry if needed (for after_key continuation)
                            if !skipped_first {
                                skipped_first = true;
                                continue;
                            }

                            // Check user end bound for Included case
                            if let Some(Bound::Included(end_key)) = user_end_bound {
                                if original_key > end_key.as_slice() {
                                    break;
                                }
                            }

                            entries.push((original_key.to_vec(), v.value().to_vec()));
                        }
                    }
                    Ok(entries)
                }
                // Table doesn't exist yet, return empty result (not an error)
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(Vec::new()),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range(effective_start.as_slice()..effective_end.as_slice())
                        .map_err(|e| StorageError::Internal(e.to_string()))?;

                    let mut skipped_first = !skip_first;
                    for result in range {
                        if entries.len() >= batch_size {
                            break;
                        }

                        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
                        if let Some((_, original_key)) = decode_key(k.value()) {
                            if !skipped_first {
                                skipped_first = true;
                                continue;
                            }

                            if let Some(Bound::Included(end_key)) = user_end_bound {
                                if original_key > end_key.as_slice() {
                                    break;
                                }
                            }

                            entries.push((original_key.to_vec(), v.value().to_vec()));
                        }
                    }
                    Ok(entries)
                }
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(Vec::new()),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }

    /// Fetch the last entry of the range, if any.
    fn fetch_last(
        &self,
        table: &str,
        user_start_bound: &Option<Bound<Vec<u8>>>,
        user_end_bound: &Option<Bound<Vec<u8>>>,
    ) -> Result<Option<KeyValue>, StorageError> {
        let table_start = table_start_key(table);
        let table_end = table_end_key(table);

        let effective_start: Vec<u8> = match user_start_bound {
            Some(Bound::Included(k)) => encode_key(table, k),
            Some(Bound::Excluded(k)) => {
                let mut start = encode_key(table, k);
                start.push(0x00);
                start
            }
            _ => table_start,
        };

        let effective_end: Vec<u8> = match user_end_bound {
            Some(Bound::Included(k)) => {
                let mut end = encode_key(table, k);
                end.push(0xFF);
                end
            }
            Some(Bound::Excluded(k)) => encode_key(table, k),
            _ => table_end,
        };

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range(effective_start.as_slice()..effective_end.as_slice())
                        .map_err(|e| StorageError::Internal(e.to_string()))?;

                    for result in range.rev() {
                        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
                        if let Some((_, original_key)) = decode_key(k.value()) {
                            return Ok(Some((original_key.to_vec(), v.value().to_vec())));
                        }
                    }
                    Ok(None)
                }
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => {
                    let range = t
                        .range(effective_start.as_slice()..effective_end.as_slice())
                        .map_err(|e| StorageError::Internal(e.to_string()))?;

                    for result in range.rev() {
                        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
                        if let Some((_, original_key)) = decode_key(k.value()) {
                            return Ok(Some((original_key.to_vec(), v.value().to_vec())));
                        }
                    }
                    Ok(None)
                }
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }
}

/// Convert a `Bound<&[u8]>` to `Bound<Vec<u8>>`.
fn bound_to_owned(bound: Bound<&[u8]>) -> Bound<Vec<u8>> {
    match bound {
        Bound::Included(b) => Bound::Included(b.to_vec()),
        Bound::Excluded(b) => Bound::Excluded(b.to_vec()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

/// A memory-efficient cursor for iterating over key-value pairs in Redb.
///
/// This implementation uses batched streaming: entries are fetched in batches
/// and the next batch is loaded on demand as the cursor advances. At any time
/// the cursor holds at most `batch_size` entries in memory, so a table with
/// 1M entries uses approximately the same memory as a table with 1K entries.
pub struct RedbCursor<'a> {
    /// Reference to the transaction for fetching additional batches.
    tx: &'a RedbTransaction,
    /// The logical table name.
    table: String,
    /// Current batch of entries.
    batch: Vec<KeyValue>,
    /// Position within the current batch.
    batch_position: Option<usize>,
    /// User's start bound for range queries.
    start_bound: Option<Bound<Vec<u8>>>,
    /// User's end bound for range queries.
    end_bound: Option<Bound<Vec<u8>>>,
    /// Maximum entries per batch.
    batch_size: usize,
    /// Whether there are more entries after the current batch.
    has_more_forward: bool,
    /// Cached current entry for the `current()` method.
    current_entry: Option<KeyValue>,
}

impl<'a> RedbCursor<'a> {
    /// Create a new streaming cursor.
    ///
    /// The cursor starts in an unpositioned state. Call `seek_first()`,
    /// `seek_last()`, or `seek()` to position the cursor before iterating.
    pub(crate) fn new(
        tx: &'a RedbTransaction,
        table: String,
        start_bound: Option<Bound<Vec<u8>>>,
        end_bound: Option<Bound<Vec<u8>>>,
        batch_size: usize,
    ) -> Self {
        Self {
            tx,
            table,
            batch: Vec::new(),
            batch_position: None,
            start_bound,
            end_bound,
            batch_size,
            has_more_forward: true,
            current_entry: None,
        }
    }

    /// Load the first batch of entries.
    fn load_first_batch(&mut self) -> Result<(), StorageError> {
        self.batch = self.tx.fetch_batch(
            &self.table,
            None,
            &self.start_bound,
            &self.end_bound,
            self.batch_size,
        )?;
        self.has_more_forward = self.batch.len() >= self.batch_size;
        Ok(())
    }

    /// Load the next batch, continuing from the last key in the current batch.
    fn load_next_batch(&mut self) -> Result<bool, StorageError> {
        if !self.has_more_forward {
            return Ok(false);
        }

        let after_key = self.batch.last().map(|(k, _)| k.clone());

        let new_batch = self.tx.fetch_batch(
            &self.table,
            after_key.as_deref(),
            &self.start_bound,
            &self.end_bound,
            self.batch_size,
        )?;

        if new_batch.is_empty() {
            self.has_more_forward = false;
            return Ok(false);
        }

        self.has_more_forward = new_batch.len() >= self.batch_size;
        self.batch = new_batch;
        self.batch_position = Some(0);

        Ok(true)
    }

    /// Load a batch starting at or after the given key for seek operations.
    fn load_batch_at_key(&mut self, key: &[u8]) -> Result<(), StorageError> {
        // Tighten the start bound to at least the seek key
        let seek_start = match &self.start_bound {
            Some(Bound::Included(start)) if start.as_slice() > key => {
                Some(Bound::Included(start.clone()))
            }
            Some(Bound::Excluded(start)) if start.as_slice() >= key => {
                Some(Bound::Excluded(start.clone()))
            }
            _ => Some(Bound::Included(key.to_vec())),
        };

        self.batch =
            self.tx.fetch_batch(&self.table, None, &seek_start, &self.end_bound, self.batch_size)?;
        self.has_more_forward = self.batch.len() >= self.batch_size;
        Ok(())
    }

    /// Update the current entry cache from the batch.
    fn update_current(&mut self) {
        self.current_entry = self.batch_position.and_then(|pos| self.batch.get(pos).cloned());
    }
}

impl Cursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        self.load_batch_at_key(key)?;

        // Binary search for the first key >= target
        let pos = self.batch.partition_point(|(k, _)| k.as_slice() < key);

        if pos < self.batch.len() {
            self.batch_position = Some(pos);
            self.update_current();
            Ok(self.current_entry.clone())
        } else if self.has_more_forward && self.load_next_batch()? {
            self.batch_position = Some(0);
            self.update_current();
            Ok(self.current_entry.clone())
        } else {
            self.batch_position = None;
            self.current_entry = None;
            Ok(None)
        }
    }

    fn seek_first(&mut self) -> CursorResult {
        self.load_first_batch()?;

        if self.batch.is_empty() {
            self.batch_position = None;
            self.current_entry = None;
            return Ok(None);
        }

        self.batch_position = Some(0);
        self.update_current();
        Ok(self.current_entry.clone())
    }

    fn seek_last(&mut self) -> CursorResult {
        let last = self.tx.fetch_last(&self.table, &self.start_bound, &self.end_bound)?;

        match last {
            Some(entry) => {
                self.batch = vec![entry];
                self.batch_position = Some(0);
                self.has_more_forward = false;
                self.update_current();
                Ok(self.current_entry.clone())
            }
            None => {
                self.batch.clear();
                self.batch_position = None;
                self.current_entry = None;
                Ok(None)
            }
        }
    }

    fn next(&mut self) -> CursorResult {
        match self.batch_position {
            None => {
                // Not positioned, start from first
                self.seek_first()
            }
            Some(pos) => {
                let next_pos = pos + 1;
                if next_pos < self.batch.len() {
                    // Move within current batch
                    self.batch_position = Some(next_pos);
                    self.update_current();
                    Ok(self.current_entry.clone())
                } else if self.load_next_batch()? {
                    // Moved to next batch
                    self.update_current();
                    Ok(self.current_entry.clone())
                } else {
                    // No more entries
                    self.batch_position = None;
                    self.current_entry = None;
                    Ok(None)
                }
            }
        }
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.current_entry.as_ref().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

// Cursor behavior is covered by the integration tests in tests/redb_tests.rs,
// which exercise the streaming paths against a real transaction.
