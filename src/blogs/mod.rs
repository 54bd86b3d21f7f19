//! Blog entries and their CRUD endpoints

pub mod api;
pub mod models;
pub mod store;

pub use store::BlogStore;
