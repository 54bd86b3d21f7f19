//! User Storage
//! Mission: Persist user accounts and read them back with their blogs

use crate::blogs::models::BlogSummary;
use crate::db::{row_id, Database, StoreError};
use crate::users::models::{User, UserView};
use chrono::Utc;
use rusqlite::{ffi, params, OptionalExtension, Row};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, name, password_hash, created_at";

/// User storage on top of the shared database
#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    Ok(User {
        id: row_id(0, &id)?,
        username: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new user. The password must already be hashed.
    pub fn create(
        &self,
        username: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: name.map(str::to_string),
            password_hash: password_hash.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, name, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.username,
                    user.name,
                    user.password_hash,
                    user.created_at,
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateUsername
                } else {
                    StoreError::Sqlite(e)
                }
            })?;
            Ok(())
        })?;

        info!("Created user: {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Get user by id
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.db.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id.to_string()],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    /// Get user by username
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.db.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                    params![username],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    /// All users in insertion order, each with the blogs they own.
    pub fn list_with_blogs(&self) -> Result<Vec<UserView>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid"))?;
            let users = stmt
                .query_map([], user_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            let mut stmt = conn.prepare(
                "SELECT user_id, id, title, author, url FROM blogs
                 WHERE user_id IS NOT NULL ORDER BY rowid",
            )?;
            let mut blogs_by_user: HashMap<String, Vec<BlogSummary>> = HashMap::new();
            let rows = stmt.query_map([], |row| {
                let owner: String = row.get(0)?;
                let id: String = row.get(1)?;
                Ok((
                    owner,
                    BlogSummary {
                        id: row_id(1, &id)?.to_string(),
                        title: row.get(2)?,
                        author: row.get(3)?,
                        url: row.get(4)?,
                    },
                ))
            })?;
            for row in rows {
                let (owner, blog) = row?;
                blogs_by_user.entry(owner).or_default().push(blog);
            }

            Ok(users
                .iter()
                .map(|user| {
                    let blogs = blogs_by_user
                        .remove(&user.id.to_string())
                        .unwrap_or_default();
                    UserView::new(user, blogs)
                })
                .collect())
        })
    }

    /// Number of stored users.
    pub fn count(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
