//! Redb table definitions and key encoding utilities.
//!
//! Redb requires static table names, so we use a key prefixing strategy to
//! support dynamic "logical" table names within a single physical table.

use redb::TableDefinition;

/// The physical table that stores all key-value pairs.
/// Logical table names are prefixed to keys.
pub const DATA_TABLE: TableDefinition<'static, &[u8], &[u8]> = TableDefinition::new("arbor_data");

/// Separator byte between table name and key in the encoded key.
pub const KEY_SEPARATOR: u8 = 0x00;

/// Encode a logical table name and key into a physical key.
///
/// The format is: `<table_name><separator><key>`
/// This allows us to store multiple logical tables in one physical table.
pub fn encode_key(table: &str, key: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(table.len() + 1 + key.len());
    encoded.extend_from_slice(table.as_bytes());
    encoded.push(KEY_SEPARATOR);
    encoded.extend_from_slice(key);
    encoded
}

/// Decode a physical key into its logical table name and original key.
///
/// Returns `None` if the key is malformed (missing separator).
pub fn decode_key(encoded: &[u8]) -> Option<(&str, &[u8])> {
    let sep_pos = encoded.iter().position(|&b| b == KEY_SEPARATOR)?;
    let table = std::str::from_utf8(&encoded[..sep_pos]).ok()?;
    let key = &encoded[sep_pos + 1..];
    Some((table, key))
}

/// Create the start key for range scans on a logical table.
pub fn table_start_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR);
    key
}

/// Create the end key for range scans on a logical table.
/// This is the first key that would NOT belong to the table.
pub fn table_end_key(table: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + 1);
    key.extend_from_slice(table.as_bytes());
    key.push(KEY_SEPARATOR + 1);
    key
}

/// Well-known table names for graph storage.
pub mod names {
    /// Table for storing vertex data.
    pub const VERTICES: &str = "vertices";

    /// Table for storing edge data.
    pub const EDGES: &str = "edges";

    /// Table for storing outgoing edge indexes (source -> edges).
    pub const EDGES_OUT: &str = "edges_out";

    /// Table for storing incoming edge indexes (target -> edges).
    pub const EDGES_IN: &str = "edges_in";

    /// Table for storing the external vertex ID index (vid -> vertex id).
    pub const VERTEX_IDS: &str = "vertex_ids";
}
