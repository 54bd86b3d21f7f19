//! Blog Storage
//! Mission: Persist blog entries and read them back with their owners

use crate::blogs::models::{Blog, BlogView, NewBlog};
use crate::db::{row_id, Database, StoreError};
use crate::users::models::UserSummary;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};
use uuid::Uuid;

const BLOG_COLUMNS: &str = "id, title, author, url, likes, user_id, created_at";

const VIEW_QUERY: &str = "SELECT b.id, b.title, b.author, b.url, b.likes, u.id, u.username, u.name
     FROM blogs b LEFT JOIN users u ON u.id = b.user_id";

/// Blog storage on top of the shared database
#[derive(Clone)]
pub struct BlogStore {
    db: Database,
}

fn blog_from_row(row: &Row<'_>) -> rusqlite::Result<Blog> {
    let id: String = row.get(0)?;
    let user: Option<String> = row.get(5)?;
    Ok(Blog {
        id: row_id(0, &id)?,
        title: row.get(1)?,
        author: row.get(2)?,
        url: row.get(3)?,
        likes: row.get(4)?,
        user: user.as_deref().map(|u| row_id(5, u)).transpose()?,
        created_at: row.get(6)?,
    })
}

fn view_from_row(row: &Row<'_>) -> rusqlite::Result<BlogView> {
    let id: String = row.get(0)?;
    let owner_id: Option<String> = row.get(5)?;
    let user = match owner_id {
        Some(owner_id) => Some(UserSummary {
            id: row_id(5, &owner_id)?.to_string(),
            username: row.get(6)?,
            name: row.get(7)?,
        }),
        None => None,
    };

    Ok(BlogView {
        id: row_id(0, &id)?.to_string(),
        title: row.get(1)?,
        author: row.get(2)?,
        url: row.get(3)?,
        likes: row.get(4)?,
        user,
    })
}

impl BlogStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a blog. When `owner` is given the blog joins that user's
    /// collection in the same write.
    pub fn create(&self, blog: NewBlog, owner: Option<Uuid>) -> Result<Blog, StoreError> {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
            created_at: Utc::now().to_rfc3339(),
        };

        self.db.with_conn(|conn| {
            conn.execute(
                &format!("INSERT INTO blogs ({BLOG_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                params![
                    blog.id.to_string(),
                    blog.title,
                    blog.author,
                    blog.url,
                    blog.likes,
                    blog.user.map(|u| u.to_string()),
                    blog.created_at,
                ],
            )?;
            Ok(())
        })?;

        info!("Created blog {} ({:?})", blog.id, blog.title);
        Ok(blog)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        self.db.with_conn(|conn| {
            let blog = conn
                .query_row(
                    &format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = ?1"),
                    params![id.to_string()],
                    blog_from_row,
                )
                .optional()?;
            Ok(blog)
        })
    }

    /// One blog with its owner populated.
    pub fn find_view(&self, id: Uuid) -> Result<Option<BlogView>, StoreError> {
        self.db.with_conn(|conn| {
            let view = conn
                .query_row(
                    &format!("{VIEW_QUERY} WHERE b.id = ?1"),
                    params![id.to_string()],
                    view_from_row,
                )
                .optional()?;
            Ok(view)
        })
    }

    /// Every blog in insertion order with owners populated.
    pub fn list_views(&self) -> Result<Vec<BlogView>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{VIEW_QUERY} ORDER BY b.rowid"))?;
            let blogs = stmt
                .query_map([], view_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(blogs)
        })
    }

    /// Replace the writable fields of a blog. Returns `false` when no blog
    /// has that id.
    pub fn update(&self, id: Uuid, fields: &NewBlog) -> Result<bool, StoreError> {
        let changed = self.db.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE blogs SET title = ?2, author = ?3, url = ?4, likes = ?5 WHERE id = ?1",
                params![
                    id.to_string(),
                    fields.title,
                    fields.author,
                    fields.url,
                    fields.likes,
                ],
            )?;
            Ok(changed)
        })?;

        debug!("Updated blog {} ({} row(s))", id, changed);
        Ok(changed > 0)
    }

    /// Remove a blog. Returns `false` when it did not exist.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.db.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM blogs WHERE id = ?1", params![id.to_string()])?;
            Ok(removed)
        })?;

        if removed > 0 {
            info!("Deleted blog {}", id);
        }
        Ok(removed > 0)
    }

    #[cfg(test)]
    pub fn count(&self) -> Result<usize, StoreError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM blogs", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }
}
