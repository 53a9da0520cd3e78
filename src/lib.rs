//! Catalog Sync
//!
//! Client-side synchronization core for a remote book catalog: a local
//! snapshot of the `/api/books` collection kept authoritative by reloading it
//! after every successful create, update or delete.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
