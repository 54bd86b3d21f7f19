//! Shared application state

use crate::auth::jwt::TokenService;
use crate::auth::password::PasswordHasher;
use crate::blogs::store::BlogStore;
use crate::config::Config;
use crate::db::{Database, StoreError};
use crate::users::store::UserStore;
use std::sync::Arc;

/// Everything a handler needs. Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub blogs: BlogStore,
    pub tokens: Arc<TokenService>,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService, hasher: PasswordHasher) -> Self {
        Self {
            users: UserStore::new(db.clone()),
            blogs: BlogStore::new(db),
            tokens: Arc::new(tokens),
            hasher,
        }
    }

    /// Open the configured database and wire up the services.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let db = Database::open(&config.database_path)?;
        let tokens = match config.token_ttl {
            Some(ttl) => TokenService::with_ttl(&config.secret, ttl),
            None => TokenService::new(&config.secret),
        };
        Ok(Self::new(db, tokens, PasswordHasher::new(config.bcrypt_cost)))
    }
}
