//! User accounts: registration and listing

pub mod api;
pub mod models;
pub mod store;

pub use store::UserStore;
