//! Bloglist Backend Library
//!
//! A small REST service for blog entries. Users register, log in for a
//! bearer token, and use it to add and remove their own blogs.
//!
//! Exposes the router and its building blocks for the binary and tests.

pub mod auth;
pub mod blogs;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod users;
pub mod validation;

pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
