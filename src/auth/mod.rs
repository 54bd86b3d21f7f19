//! Authentication Module
//! Mission: Password hashing, signed tokens, and bearer-token middleware

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use jwt::TokenService;
pub use middleware::{token_extractor, user_extractor, CurrentUser};
pub use password::PasswordHasher;
