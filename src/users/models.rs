//! User Models

use crate::blogs::models::BlogSummary;
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 3;

/// Stored user account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub created_at: String,
}

/// User as returned by the API, with authored blogs populated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

impl UserView {
    pub fn new(user: &User, blogs: Vec<BlogSummary>) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            name: user.name.clone(),
            blogs,
        }
    }
}

/// Owner of a blog, as populated into blog responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub name: Option<String>,
    pub id: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            id: user.id.to_string(),
        }
    }
}

/// Registration body. Fields are optional so that missing ones are reported
/// as validation failures rather than body parse errors.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A registration that passed format validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_min_length("username", self.username.as_deref(), MIN_USERNAME_LEN);
        errors.require_min_length("password", self.password.as_deref(), MIN_PASSWORD_LEN);
        errors.finish()?;

        Ok(NewUser {
            username: self.username.unwrap_or_default(),
            name: self.name,
            password: self.password.unwrap_or_default(),
        })
    }
}
