//! Insert/edit form state layered over the sync controller.
//!
//! At most one form is open. A successful submit closes it; a failed submit
//! leaves it open with the draft intact and the error surfaced by the
//! controller, so the user can fix the input and retry.

use crate::{
    api::BookApi,
    error::{AppError, AppResult, FieldError},
    models::{Book, BookId, BookRow, DraftForm, FieldEdit},
    services::{
        confirm::Confirm,
        sync::{RemoveOutcome, ResourceSyncController},
    },
};

/// The open form and its staged draft
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Insert(DraftForm),
    Edit(DraftForm),
}

impl Modal {
    pub fn draft(&self) -> &DraftForm {
        match self {
            Modal::Insert(draft) | Modal::Edit(draft) => draft,
        }
    }

    fn draft_mut(&mut self) -> &mut DraftForm {
        match self {
            Modal::Insert(draft) | Modal::Edit(draft) => draft,
        }
    }
}

/// Error for an edit form whose book was never persisted
fn missing_id() -> AppError {
    AppError::Validation(vec![FieldError {
        field: "id".to_string(),
        message: "book has not been saved yet".to_string(),
    }])
}

pub struct CatalogEditor<A> {
    controller: ResourceSyncController<A>,
    modal: Option<Modal>,
}

impl<A: BookApi> CatalogEditor<A> {
    pub fn new(controller: ResourceSyncController<A>) -> Self {
        Self {
            controller,
            modal: None,
        }
    }

    pub fn controller(&self) -> &ResourceSyncController<A> {
        &self.controller
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub async fn refresh(&mut self) -> AppResult<()> {
        self.controller.load_all().await.map(|_| ())
    }

    /// Open the insert form with an empty draft, replacing any open form
    pub fn open_insert(&mut self) {
        self.modal = Some(Modal::Insert(DraftForm::blank()));
    }

    /// Open the edit form with a copy of `book`, replacing any open form
    pub fn open_edit(&mut self, book: &Book) {
        self.modal = Some(Modal::Edit(DraftForm::from_book(book)));
    }

    /// Apply an edit to the open draft. Returns `false` when no form is open.
    pub fn edit_field(&mut self, edit: FieldEdit) -> bool {
        match self.modal.as_mut() {
            Some(modal) => {
                modal.draft_mut().apply(edit);
                true
            }
            None => false,
        }
    }

    /// Discard the open draft
    pub fn close(&mut self) {
        self.modal = None;
    }

    /// Create or update from the open form; closes it only on success
    pub async fn submit(&mut self) -> AppResult<()> {
        let result = match &self.modal {
            None => Err(AppError::Validation(vec![FieldError {
                field: "form".to_string(),
                message: "no form is open".to_string(),
            }])),
            Some(Modal::Insert(draft)) => self.controller.create(draft).await,
            Some(Modal::Edit(draft)) => match &draft.id {
                Some(id) => self.controller.update(id, draft).await,
                None => Err(missing_id()),
            },
        };

        if result.is_ok() {
            self.modal = None;
        }
        result
    }

    pub async fn delete(&mut self, id: &BookId, gate: &dyn Confirm) -> AppResult<RemoveOutcome> {
        self.controller.remove(id, gate).await
    }

    /// Table rows for the current snapshot
    pub fn rows(&self) -> Vec<BookRow> {
        self.controller.snapshot().iter().map(BookRow::from).collect()
    }
}
