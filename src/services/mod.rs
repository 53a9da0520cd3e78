//! Synchronization logic between the local view and the remote catalog

pub mod confirm;
pub mod editor;
pub mod sync;

pub use confirm::{AlwaysConfirm, Confirm, StdinConfirm};
pub use editor::{CatalogEditor, Modal};
pub use sync::{RemoveOutcome, ResourceSyncController};
