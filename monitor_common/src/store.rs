//! Durable set of tracked symbols backed by SQLite.
//!
//! The store is the single source of truth for which symbols survive a restart. It holds
//! one table, `portfolio`, mapping an auto-generated row id to a unique symbol. The
//! uniqueness constraint lives in the schema: a duplicate insert is reported as `false`
//! rather than as an error.
//!
//! Statements run in autocommit mode, so every successful `add`/`remove` is durable
//! immediately. `close` consumes the store, which makes a second close impossible.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, ErrorCode, params};

use crate::error::MonitorError;
use crate::result::Result;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS portfolio (
    ID INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    symbol TEXT UNIQUE
);";

/// Unique-keyed symbol collection.
pub struct SymbolStore {
    conn: Connection,
}

impl SymbolStore {
    /// Opens the database at `path`, creating the parent directory and the table when
    /// they do not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Opens a throwaway store that lives only as long as the value.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Every tracked symbol, in insertion order.
    pub fn list_all(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT symbol FROM portfolio ORDER BY ID;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(MonitorError::from)
    }

    /// Whether `symbol` is tracked.
    pub fn contains(&self, symbol: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT 1 FROM portfolio WHERE symbol = ?1;")?;
        Ok(stmt.exists(params![symbol])?)
    }

    /// Inserts `symbol`. Returns `false` when it is already tracked.
    pub fn add(&self, symbol: &str) -> Result<bool> {
        match self
            .conn
            .execute("INSERT INTO portfolio (symbol) VALUES (?1);", params![symbol])
        {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes `symbol`. Removing an unknown symbol is a no-op.
    pub fn remove(&self, symbol: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM portfolio WHERE symbol = ?1;", params![symbol])?;
        Ok(())
    }

    /// Flushes and releases the database.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| MonitorError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_add_is_reported_not_raised() {
        let store = SymbolStore::open_in_memory().unwrap();
        assert!(store.add("AAA").unwrap());
        assert!(!store.add("AAA").unwrap());
        assert_eq!(store.list_all().unwrap(), vec!["AAA"]);
    }

    #[test]
    fn removing_unknown_symbol_is_a_noop() {
        let store = SymbolStore::open_in_memory().unwrap();
        store.add("AAA").unwrap();
        store.remove("ZZZ").unwrap();
        assert_eq!(store.list_all().unwrap(), vec!["AAA"]);
    }

    #[test]
    fn remove_then_add_keeps_set_consistent() {
        let store = SymbolStore::open_in_memory().unwrap();
        store.add("AAA").unwrap();
        store.add("BBB").unwrap();
        store.remove("AAA").unwrap();
        assert!(!store.contains("AAA").unwrap());
        assert!(store.contains("BBB").unwrap());
        assert!(store.add("AAA").unwrap());
        assert_eq!(store.list_all().unwrap(), vec!["BBB", "AAA"]);
    }

    #[test]
    fn symbols_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db").join("monitor.db");

        let store = SymbolStore::open(&path).unwrap();
        store.add("AAA").unwrap();
        store.add("BBB").unwrap();
        store.remove("AAA").unwrap();
        store.close().unwrap();

        let reopened = SymbolStore::open(&path).unwrap();
        assert_eq!(reopened.list_all().unwrap(), vec!["BBB"]);
    }

    #[test]
    fn open_fails_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SymbolStore::open(dir.path()).is_err());
    }
}
