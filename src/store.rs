//! Persistence adapter over the embedded redb database
//!
//! The entire link collection is serialized as one JSON array and stored
//! under a single fixed key. Reads are tolerant: an absent key, an
//! unreadable store or malformed JSON all degrade to an empty collection
//! so that the service can always start.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::error;

use crate::error::Result;
use crate::model::LinkRecord;

/// Table holding the serialized link collection
///
/// Key: the fixed storage key below
/// Value: JSON array of link records as a string
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// The single key the collection lives under
const LINKS_KEY: &str = "shortenedUrls";

/// Handle to the embedded database file
pub struct LinkStore {
    db: Database,
}

impl LinkStore {
    /// Opens (or creates) the database file and the links table
    ///
    /// # Arguments
    ///
    /// * `db_path` - File path where the database is stored (e.g. "shortly.db")
    pub fn open(db_path: &str) -> Result<Self> {
        let db = Database::create(db_path)?;

        // Open the table once up front so later read transactions never
        // observe a missing table
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_LINKS)?;
        }
        write_txn.commit()?;

        Ok(LinkStore { db })
    }

    /// Reads the full collection from the store
    ///
    /// Never returns an error to the caller: an absent key yields an empty
    /// collection, and an unreadable store or malformed stored JSON is
    /// logged and discarded.
    pub fn load(&self) -> Vec<LinkRecord> {
        let read_txn = match self.db.begin_read() {
            Ok(txn) => txn,
            Err(err) => {
                error!("failed to open read transaction: {}", err);
                return Vec::new();
            }
        };

        let table = match read_txn.open_table(TABLE_LINKS) {
            Ok(table) => table,
            Err(err) => {
                error!("failed to open links table: {}", err);
                return Vec::new();
            }
        };

        match table.get(LINKS_KEY) {
            Ok(Some(guard)) => match serde_json::from_str::<Vec<LinkRecord>>(guard.value()) {
                Ok(records) => records,
                Err(err) => {
                    error!("discarding malformed stored links: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                error!("failed to read stored links: {}", err);
                Vec::new()
            }
        }
    }

    /// Serializes the full collection and writes it under the fixed key
    ///
    /// An empty collection is a no-op: the key is only ever removed through
    /// [`clear`](Self::clear), never overwritten with an empty array.
    pub fn save(&self, records: &[LinkRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string(records)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LINKS)?;
            table.insert(LINKS_KEY, json.as_str())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Removes the stored key entirely
    pub fn clear(&self) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_LINKS)?;
            table.remove(LINKS_KEY)?;
        }
        write_txn.commit()?;

        Ok(())
    }
}
