use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use super::{validate_key, BlobStore};
use crate::error::{StoreError, StoreResult};

/// Blobs as rows of a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    // A panic mid-statement leaves nothing half-written that SQLite would not roll back.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS blobs (
            key          TEXT PRIMARY KEY,
            content_type TEXT NOT NULL,
            bytes        BLOB NOT NULL,
            updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

impl BlobStore for SqliteStore {
    fn get(&self, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let key = validate_key(path)?;
        let bytes = self
            .conn()
            .query_row("SELECT bytes FROM blobs WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(bytes)
    }

    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<()> {
        let key = validate_key(path)?;
        self.conn().execute(
            "INSERT INTO blobs (key, content_type, bytes) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                content_type = excluded.content_type,
                bytes = excluded.bytes,
                updated_at = datetime('now')",
            rusqlite::params![key, content_type, bytes],
        )?;
        Ok(())
    }

    fn delete(&self, path: &str) -> StoreResult<bool> {
        let key = validate_key(path)?;
        let removed = self.conn().execute("DELETE FROM blobs WHERE key = ?1", [key])?;
        Ok(removed > 0)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT key FROM blobs WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let keys = stmt
            .query_map([prefix], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn exists(&self, path: &str) -> StoreResult<bool> {
        let key = validate_key(path)?;
        let found: Option<i64> = self
            .conn()
            .query_row("SELECT 1 FROM blobs WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_store_contract() {
        let store = SqliteStore::in_memory().unwrap();
        super::super::check_contract(&store);
    }

    #[test]
    fn content_type_is_recorded_and_replaced() {
        let store = SqliteStore::in_memory().unwrap();
        store.put("a.txt", b"one", "text/plain").unwrap();
        store.put("a.txt", b"two", "text/markdown").unwrap();
        let ct: String = store
            .conn()
            .query_row("SELECT content_type FROM blobs WHERE key = 'a.txt'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(ct, "text/markdown");
        assert_eq!(store.get("a.txt").unwrap().unwrap(), b"two");
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = crate::store::fs::temp_root("sqlite-file");
        let db = dir.join("content.sqlite");
        {
            let store = SqliteStore::open(&db).unwrap();
            store.put("structure.json", b"{}", "application/json").unwrap();
        }
        let store = SqliteStore::open(&db).unwrap();
        assert!(store.exists("structure.json").unwrap());
        drop(store);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
