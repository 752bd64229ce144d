//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `(circle_id, id)` | `OrderRecord` | Orders, `orderItems` kept as text |
//! | `menu_items` | `(circle_id, id)` | `MenuItem` | Menu catalog |
//! | `toppings` | `(circle_id, id)` | `Topping` | Topping catalog |
//! | `order_numbers` | `circle_id` | `u64` | Last assigned order number |
//! | `circles` | `id` | `Archivable<Circle>` | Circle directory |
//! | `event_entries` | `(event_name, circle_id)` | `EventRecord` | Event participation |
//!
//! Keys are tuples so one circle is a contiguous key range.

use std::path::Path;
use std::sync::Arc;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::AppError;

/// Scoped table: key = (scope, id), value = JSON; scope is a circle id or an event name
pub(crate) type ScopedTable = TableDefinition<'static, (&'static str, &'static str), &'static [u8]>;

pub(crate) const ORDERS_TABLE: ScopedTable = TableDefinition::new("orders");

pub(crate) const MENU_ITEMS_TABLE: ScopedTable = TableDefinition::new("menu_items");

pub(crate) const TOPPINGS_TABLE: ScopedTable = TableDefinition::new("toppings");

pub(crate) const EVENT_ENTRIES_TABLE: ScopedTable = TableDefinition::new("event_entries");

/// Circle directory: key = circle id, value = JSON
pub(crate) const CIRCLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("circles");

/// Per-circle order number counter: key = circle_id, value = last number
pub(crate) const ORDER_NUMBERS_TABLE: TableDefinition<&str, u64> =
    TableDefinition::new("order_numbers");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::database(err.to_string())
    }
}

/// Stored row with a soft-delete flag
///
/// Rows written without the flag decode as live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Archivable<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(default)]
    pub archived: bool,
}

impl<T> Archivable<T> {
    pub fn live(item: T) -> Self {
        Self {
            item,
            archived: false,
        }
    }

    pub fn archived(item: T) -> Self {
        Self {
            item,
            archived: true,
        }
    }

    /// The item unless archived
    pub fn into_live(self) -> Option<T> {
        (!self.archived).then_some(self.item)
    }
}

/// Order, catalog and directory storage backed by redb
#[derive(Clone)]
pub struct FesStorage {
    db: Arc<Database>,
}

impl std::fmt::Debug for FesStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FesStorage").finish_non_exhaustive()
    }
}

impl FesStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            // Create all tables if they don't exist
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(TOPPINGS_TABLE)?;
            let _ = write_txn.open_table(ORDER_NUMBERS_TABLE)?;
            let _ = write_txn.open_table(CIRCLES_TABLE)?;
            let _ = write_txn.open_table(EVENT_ENTRIES_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    pub(crate) fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// All values whose key starts with `scope` (a circle id, an event name), in key order
    pub(crate) fn scan_prefix<T: DeserializeOwned>(
        &self,
        table: ScopedTable,
        scope: &str,
    ) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;

        let mut values = Vec::new();
        for entry in table.range((scope, "")..)? {
            let (key, value) = entry?;
            if key.value().0 != scope {
                break;
            }
            values.push(serde_json::from_slice(value.value())?);
        }
        Ok(values)
    }

    /// Read one value inside a write transaction
    pub(crate) fn get_in<T: DeserializeOwned>(
        txn: &WriteTransaction,
        table: ScopedTable,
        circle_id: &str,
        id: &str,
    ) -> StorageResult<Option<T>> {
        let table = txn.open_table(table)?;
        let bytes = table.get((circle_id, id))?.map(|guard| guard.value().to_vec());
        bytes
            .map(|b| serde_json::from_slice(&b))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Write one value inside a write transaction
    pub(crate) fn put_in<T: Serialize>(
        txn: &WriteTransaction,
        table: ScopedTable,
        circle_id: &str,
        id: &str,
        value: &T,
    ) -> StorageResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let mut table = txn.open_table(table)?;
        table.insert((circle_id, id), bytes.as_slice())?;
        Ok(())
    }

    /// Increment and return the circle's order number
    pub(crate) fn next_order_number(txn: &WriteTransaction, circle_id: &str) -> StorageResult<u64> {
        let mut table = txn.open_table(ORDER_NUMBERS_TABLE)?;
        let next = table
            .get(circle_id)?
            .map(|guard| guard.value())
            .unwrap_or(0)
            + 1;
        table.insert(circle_id, next)?;
        Ok(next)
    }
}
