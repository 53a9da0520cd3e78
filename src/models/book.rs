//! Book (catalog entry) model and related types.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::{self, DATE_FORMAT};

/// Server-assigned book identifier.
///
/// Backends disagree on whether ids are numbers or strings; both are kept verbatim
/// so they round-trip unchanged in URLs and request bodies. Equality and hashing
/// go through the textual form, so `5` and `"5"` name the same book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(i64),
    Text(String),
}

impl BookId {
    /// Textual form used in URLs and for comparison
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            BookId::Number(n) => Cow::Owned(n.to_string()),
            BookId::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl PartialEq for BookId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for BookId {}

impl Hash for BookId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookId::Number(n) => write!(f, "{}", n),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => BookId::Number(n),
            Err(_) => BookId::Text(s.to_string()),
        }
    }
}

impl From<i64> for BookId {
    fn from(n: i64) -> Self {
        BookId::Number(n)
    }
}

/// A catalog entry as held by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Absent until the server has persisted the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(default, alias = "bookName")]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "ISBN")]
    pub isbn: String,
    #[serde(
        default,
        alias = "realeaseDate",
        deserialize_with = "date::deserialize_lenient"
    )]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub available: bool,
}

impl Book {
    /// Create payload for this record; the identifier is never part of it
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            release_date: self.release_date,
            available: self.available,
        }
    }
}

/// Create request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub release_date: Option<NaiveDate>,
    pub available: bool,
}

impl NewBook {
    /// Attach a server-assigned identifier
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id: Some(id),
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            release_date: self.release_date,
            available: self.available,
        }
    }
}

/// Display-ready row of the catalog table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub release_date: String,
    pub status: &'static str,
}

impl BookRow {
    pub const HEADERS: [&'static str; 6] =
        ["ID", "Book Name", "Author", "ISBN", "Release Date", "Status"];

    fn cells(&self) -> [&str; 6] {
        [
            &self.id,
            &self.title,
            &self.author,
            &self.isbn,
            &self.release_date,
            self.status,
        ]
    }
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            release_date: book
                .release_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: if book.available {
                "Available"
            } else {
                "Not Available"
            },
        }
    }
}

/// Render rows as a left-aligned plain-text table with a header line
pub fn render_table(rows: &[BookRow]) -> String {
    let mut widths = BookRow::HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(BookRow::HEADERS)];
    lines.extend(rows.iter().map(|row| format_line(row.cells())));
    lines.join("\n")
}
