//! SQLite Document Store
//!
//! Holds the `users` and `blogs` tables behind a single shared connection.
//! Identities are UUID v4 values stored as text; a blog references its owner
//! through `user_id`, and a user's blog collection is every blog pointing at
//! it.
//!
//! ```sql
//! CREATE TABLE users (
//!     id TEXT PRIMARY KEY,
//!     username TEXT UNIQUE NOT NULL,
//!     name TEXT,
//!     password_hash TEXT NOT NULL,
//!     created_at TEXT NOT NULL
//! );
//! CREATE TABLE blogs (
//!     id TEXT PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     author TEXT,
//!     url TEXT NOT NULL,
//!     likes INTEGER NOT NULL DEFAULT 0,
//!     user_id TEXT REFERENCES users(id),
//!     created_at TEXT NOT NULL
//! );
//! ```

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Errors from the user and blog stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("username already taken")]
    DuplicateUsername,
}

/// Shared handle to the database. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        let db = Self::from_connection(conn)?;
        info!("Opened blog database at {}", path.as_ref().display());
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                name TEXT,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS blogs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT,
                url TEXT NOT NULL,
                likes INTEGER NOT NULL DEFAULT 0,
                user_id TEXT REFERENCES users(id),
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_blogs_user ON blogs(user_id);
            "#,
        )?;

        Ok(())
    }

    /// Run `f` with exclusive access to the connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock();
        f(&conn)
    }
}

/// Parse an identity column inside a row-mapping closure.
pub(crate) fn row_id(column: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_schema_created_in_memory() {
        let db = Database::in_memory().unwrap();
        let tables: Vec<String> = db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .unwrap();

        assert_eq!(tables, vec!["blogs".to_string(), "users".to_string()]);
    }

    #[test]
    fn test_reopen_file_keeps_schema() {
        let temp = NamedTempFile::new().unwrap();
        Database::open(temp.path()).unwrap();
        // Second open must not fail on the existing tables
        Database::open(temp.path()).unwrap();
    }

    #[test]
    fn test_row_id_rejects_garbage() {
        assert!(row_id(0, &Uuid::new_v4().to_string()).is_ok());
        assert!(row_id(0, "5a422aa71b54a676234d17f8").is_err());
    }
}
