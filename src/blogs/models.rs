//! Blog Models

use crate::users::models::UserSummary;
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored blog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<Uuid>, // owning user
    pub created_at: String,
}

/// Blog as returned by the API, with its owner populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<UserSummary>,
}

/// Blog as populated into a user's `blogs` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub id: String,
}

/// The writable fields of a blog, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

fn check_fields(title: Option<&str>, url: Option<&str>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_non_empty("title", title);
    errors.require_non_empty("url", url);
    errors.finish()
}

/// POST /api/blogs body
#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    /// Check required fields and apply the `likes = 0` default.
    pub fn validate(self) -> Result<NewBlog, ValidationErrors> {
        check_fields(self.title.as_deref(), self.url.as_deref())?;

        Ok(NewBlog {
            title: self.title.unwrap_or_default(),
            author: self.author,
            url: self.url.unwrap_or_default(),
            likes: self.likes.unwrap_or(0),
        })
    }
}

/// PUT /api/blogs/:id body. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    /// Overlay this body on `current` and re-check the result.
    pub fn apply_to(self, current: &Blog) -> Result<NewBlog, ValidationErrors> {
        let merged = NewBlog {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            author: self.author.or_else(|| current.author.clone()),
            url: self.url.unwrap_or_else(|| current.url.clone()),
            likes: self.likes.unwrap_or(current.likes),
        };
        check_fields(Some(&merged.title), Some(&merged.url))?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_blog() -> Blog {
        Blog {
            id: Uuid::new_v4(),
            title: "React patterns".to_string(),
            author: Some("Michael Chan".to_string()),
            url: "https://reactpatterns.com/".to_string(),
            likes: 7,
            user: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_likes_default_to_zero() {
        let blog = CreateBlogRequest {
            title: Some("TDD harms architecture".to_string()),
            author: Some("Robert C. Martin".to_string()),
            url: Some("http://blog.cleancoder.com".to_string()),
            likes: None,
        }
        .validate()
        .unwrap();
        assert_eq!(blog.likes, 0);
    }

    #[test]
    fn test_title_and_url_required() {
        let errors = CreateBlogRequest {
            author: Some("Robert C. Martin".to_string()),
            likes: Some(2),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "url"]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = CreateBlogRequest {
            title: Some(String::new()),
            url: Some("http://example.com".to_string()),
            ..Default::default()
        }
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_overlays_only_given_fields() {
        let current = stored_blog();
        let merged = UpdateBlogRequest {
            likes: Some(13),
            ..Default::default()
        }
        .apply_to(&current)
        .unwrap();

        assert_eq!(merged.likes, 13);
        assert_eq!(merged.title, current.title);
        assert_eq!(merged.author, current.author);
        assert_eq!(merged.url, current.url);
    }

    #[test]
    fn test_update_rechecks_constraints() {
        let result = UpdateBlogRequest {
            url: Some("  ".to_string()),
            ..Default::default()
        }
        .apply_to(&stored_blog());
        assert!(result.is_err());
    }

    #[test]
    fn test_update_rejects_non_integer_likes() {
        let result: Result<UpdateBlogRequest, _> =
            serde_json::from_str(r#"{"likes": "thirteen"}"#);
        assert!(result.is_err());
    }
}
