//! Data models for Catalog Sync

pub mod book;
pub mod date;
pub mod draft;

// Re-export commonly used types
pub use book::{render_table, Book, BookId, BookRow, NewBook};
pub use date::format_date;
pub use draft::{DraftField, DraftForm, FieldEdit};
