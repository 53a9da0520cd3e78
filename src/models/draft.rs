//! Form-bound staging copy of a book.
//!
//! A draft is opened empty for insertion or copied from a selected book for
//! editing. Field edits only touch the draft; nothing reaches the server until
//! the controller submits it.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

use super::book::{Book, BookId, NewBook};
use super::date;
use crate::error::{AppError, AppResult, FieldError};

static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9Xx\- ]*$").unwrap());

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

fn valid_release_date(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() && date::parse_date(value).is_none() {
        return Err(ValidationError::new("date")
            .with_message(Cow::Borrowed("must be a date in YYYY-MM-DD form")));
    }
    Ok(())
}

/// Editable fields of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Isbn,
    ReleaseDate,
    Available,
}

impl DraftField {
    /// Resolve a form field name, including the legacy backend names
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" | "bookName" => Some(DraftField::Title),
            "author" => Some(DraftField::Author),
            "isbn" | "ISBN" => Some(DraftField::Isbn),
            "releaseDate" | "realeaseDate" | "release_date" => Some(DraftField::ReleaseDate),
            "available" => Some(DraftField::Available),
            _ => None,
        }
    }
}

/// A single field edit, consumed by [`DraftForm::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Author(String),
    Isbn(String),
    ReleaseDate(String),
    Available(bool),
}

impl FieldEdit {
    /// Build an edit from a named form input.
    ///
    /// `available` is a checkbox and accepts `true`/`false`, `on`/`off`, `yes`/`no`, `1`/`0`.
    pub fn from_input(name: &str, value: &str) -> AppResult<Self> {
        let field = DraftField::from_name(name).ok_or_else(|| {
            AppError::Validation(vec![FieldError {
                field: name.to_string(),
                message: "unknown field".to_string(),
            }])
        })?;

        Ok(match field {
            DraftField::Title => FieldEdit::Title(value.to_string()),
            DraftField::Author => FieldEdit::Author(value.to_string()),
            DraftField::Isbn => FieldEdit::Isbn(value.to_string()),
            DraftField::ReleaseDate => FieldEdit::ReleaseDate(value.to_string()),
            DraftField::Available => FieldEdit::Available(parse_checkbox(value).ok_or_else(|| {
                AppError::Validation(vec![FieldError {
                    field: "available".to_string(),
                    message: format!("'{}' is not a checkbox value", value),
                }])
            })?),
        })
    }

    pub fn field(&self) -> DraftField {
        match self {
            FieldEdit::Title(_) => DraftField::Title,
            FieldEdit::Author(_) => DraftField::Author,
            FieldEdit::Isbn(_) => DraftField::Isbn,
            FieldEdit::ReleaseDate(_) => DraftField::ReleaseDate,
            FieldEdit::Available(_) => DraftField::Available,
        }
    }
}

fn parse_checkbox(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Staging copy of a book bound to the create/edit form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DraftForm {
    /// Present when editing an existing book; never sent on create
    pub id: Option<BookId>,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
    #[validate(regex(
        path = *ISBN_RE,
        message = "may only contain digits, X, hyphens and spaces"
    ))]
    pub isbn: String,
    /// Kept as text so the form can hold partial input; `YYYY-MM-DD` once valid
    #[validate(custom(function = "valid_release_date"))]
    pub release_date: String,
    pub available: bool,
}

impl DraftForm {
    /// Empty template for the insert form
    pub fn blank() -> Self {
        Self::default()
    }

    /// Copy of an existing book for the edit form
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            release_date: book
                .release_date
                .map(|d| d.format(date::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            available: book.available,
        }
    }

    /// Apply one field edit to the staged copy
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Title(v) => self.title = v,
            FieldEdit::Author(v) => self.author = v,
            FieldEdit::Isbn(v) => self.isbn = v,
            FieldEdit::ReleaseDate(v) => {
                // Unparseable input is kept so validation can report it
                self.release_date = match date::parse_date(&v) {
                    Some(d) => d.format(date::DATE_FORMAT).to_string(),
                    None => v,
                };
            }
            FieldEdit::Available(v) => self.available = v,
        }
    }

    /// Validate and build the create payload. Any identifier on the draft is dropped.
    pub fn to_new_book(&self) -> AppResult<NewBook> {
        self.validate()?;
        Ok(NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            release_date: date::parse_date(&self.release_date),
            available: self.available,
        })
    }

    /// Validate and build the full record submitted on update
    pub fn to_book(&self, id: BookId) -> AppResult<Book> {
        Ok(self.to_new_book()?.with_id(id))
    }
}
