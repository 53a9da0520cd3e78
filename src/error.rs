//! Error types for Catalog Sync

use reqwest::StatusCode;
use thiserror::Error;

/// A single failing field of a draft, as reported by client-side validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure, undecodable body, or any non-success status
    #[error("{0}")]
    Network(String),

    /// The mutation target no longer exists on the server
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// Map a non-success response status to an operation failure.
    ///
    /// The response body is never consulted; the message only carries the code.
    pub fn from_status(status: StatusCode) -> Self {
        let message = format!("API request failed with status {}", status.as_u16());
        if status == StatusCode::NOT_FOUND {
            AppError::NotFound(message)
        } else {
            AppError::Network(message)
        }
    }

    /// Field-level failures, empty for every other kind of error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AppError::from_status(status),
            None => AppError::Network(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
