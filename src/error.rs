//! Domain error taxonomy for the catalog.
//!
//! Stores never retry and never downgrade a failure: every error keeps its
//! kind until the HTTP layer maps it onto the wire envelope.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use shelfmark_http::error::AppError;
use shelfmark_store::StoreError;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, error: &'static str) -> Self {
        Self { field, error }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "required")
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation { message, details } => AppError::validation(
                details
                    .into_iter()
                    .map(|d| json!({"field": d.field, "error": d.error}))
                    .collect(),
                message,
            ),
            CatalogError::NotFound(entity) => AppError::not_found(format!("{entity} not found")),
            CatalogError::Forbidden(message) => AppError::forbidden(message),
            CatalogError::Conflict(message) => AppError::conflict(message),
            CatalogError::Storage(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}
