//! Local snapshot of the remote book collection.
//!
//! Every successful mutation is followed by exactly one full reload instead of
//! a local patch, so the snapshot always mirrors the last successful server
//! response. A failed operation leaves the snapshot as it was and records a
//! single displayable error message; nothing is retried.

use crate::{
    api::BookApi,
    error::{AppError, AppResult},
    models::{Book, BookId, DraftForm},
    services::confirm::{delete_prompt, Confirm},
};

/// Result of a confirmed-or-declined removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The user declined; nothing was sent
    Cancelled,
}

pub struct ResourceSyncController<A> {
    api: A,
    snapshot: Vec<Book>,
    loading: bool,
    submitting: bool,
    error: Option<String>,
}

impl<A: BookApi> ResourceSyncController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            snapshot: Vec::new(),
            loading: false,
            submitting: false,
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Books as of the last successful reload, in server order
    pub fn snapshot(&self) -> &[Book] {
        &self.snapshot
    }

    pub fn find(&self, id: &BookId) -> Option<&Book> {
        self.snapshot.iter().find(|b| b.id.as_ref() == Some(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Latest error message, cleared when the next operation starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The read spinner is hidden while a form is being submitted or an error is shown
    pub fn show_spinner(&self) -> bool {
        self.loading && !self.submitting && self.error.is_none()
    }

    /// Fetch the whole collection and replace the snapshot with it
    pub async fn load_all(&mut self) -> AppResult<&[Book]> {
        self.error = None;
        self.loading = true;
        tracing::debug!("Loading book collection");

        let result = self.api.list().await;
        self.loading = false;

        match result {
            Ok(books) => {
                tracing::debug!(count = books.len(), "Book collection loaded");
                self.snapshot = books;
                Ok(&self.snapshot)
            }
            Err(e) => Err(self.fail("load", as_network_error(e))),
        }
    }

    /// Submit a draft as a new book, then reload
    pub async fn create(&mut self, draft: &DraftForm) -> AppResult<()> {
        self.error = None;
        let payload = match draft.to_new_book() {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail("create", e)),
        };

        self.begin_write();
        if let Err(e) = self.api.create(&payload).await {
            self.end_write();
            return Err(self.fail("create", as_network_error(e)));
        }

        tracing::info!(title = %payload.title, "Book created");
        self.reload_after_write().await;
        Ok(())
    }

    /// Submit the full draft for an existing book, then reload
    pub async fn update(&mut self, id: &BookId, draft: &DraftForm) -> AppResult<()> {
        self.error = None;
        let book = match draft.to_book(id.clone()) {
            Ok(book) => book,
            Err(e) => return Err(self.fail("update", e)),
        };

        self.begin_write();
        if let Err(e) = self.api.update(id, &book).await {
            self.end_write();
            return Err(self.fail("update", e));
        }

        tracing::info!(%id, "Book updated");
        self.reload_after_write().await;
        Ok(())
    }

    /// Ask for confirmation, delete the book, then reload.
    ///
    /// Declining is a no-op: no request, and the current error is left alone.
    pub async fn remove(&mut self, id: &BookId, gate: &dyn Confirm) -> AppResult<RemoveOutcome> {
        let label = self
            .find(id)
            .map(|b| b.title.clone())
            .unwrap_or_else(|| format!("#{}", id));

        if !gate.confirm(&delete_prompt(&label)).await {
            tracing::debug!(%id, "Deletion declined");
            return Ok(RemoveOutcome::Cancelled);
        }

        self.error = None;
        self.begin_write();
        if let Err(e) = self.api.delete(id).await {
            self.end_write();
            return Err(self.fail("delete", e));
        }

        tracing::info!(%id, "Book deleted");
        self.reload_after_write().await;
        Ok(RemoveOutcome::Removed)
    }

    /// Both flags stay up until the request and its reload are done;
    /// `submitting` keeps the read spinner hidden meanwhile.
    fn begin_write(&mut self) {
        self.loading = true;
        self.submitting = true;
    }

    fn end_write(&mut self) {
        self.loading = false;
        self.submitting = false;
    }

    /// The mutation already succeeded; a failed reload only shows up in the error slot.
    async fn reload_after_write(&mut self) {
        let _ = self.load_all().await;
        self.end_write();
    }

    fn fail(&mut self, operation: &str, e: AppError) -> AppError {
        tracing::warn!(operation, error = %e, "Catalog operation failed");
        self.error = Some(e.to_string());
        e
    }
}

/// Reads and creates have no target that can go missing
fn as_network_error(e: AppError) -> AppError {
    match e {
        AppError::NotFound(message) => AppError::Network(message),
        other => other,
    }
}
