use serde_json::{json, Value};
use thiserror::Error;

/// Library-level error type.
/// The presentation layer renders it through `to_body()` and re-prompts on recoverable kinds.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No history to go back to")]
    NoHistory,

    #[error("At least one interest tag is required")]
    EmptyTagSet,

    #[error("An eligibility answer is required")]
    MissingEligibility,

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the UI.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidSelection(_) => "INVALID_SELECTION",
            AppError::NoHistory => "NO_HISTORY",
            AppError::EmptyTagSet => "EMPTY_TAG_SET",
            AppError::MissingEligibility => "MISSING_ELIGIBILITY",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Taxonomy(_) => "TAXONOMY_ERROR",
            AppError::Document(_) => "DOCUMENT_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// User-input errors: the UI keeps its state and asks again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::InvalidSelection(_)
                | AppError::NoHistory
                | AppError::EmptyTagSet
                | AppError::MissingEligibility
        )
    }

    /// Builds the `{"error": {"code", "message"}}` payload shown by the popup.
    pub fn to_body(&self) -> Value {
        let message = match self {
            AppError::InvalidSelection(msg) => msg.clone(),
            AppError::NoHistory => "There is no previous question to return to".to_string(),
            AppError::EmptyTagSet => "Please select at least one interest option.".to_string(),
            AppError::MissingEligibility => {
                "Please select your gender to continue.".to_string()
            }
            AppError::Catalog(msg) => {
                tracing::error!("Catalog error: {msg}");
                "The club catalog could not be loaded".to_string()
            }
            AppError::Taxonomy(msg) => {
                tracing::error!("Taxonomy error: {msg}");
                "The quiz configuration is invalid".to_string()
            }
            AppError::Document(msg) => {
                tracing::error!("Document error: {msg}");
                "Could not read text from the uploaded resume".to_string()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                "A file could not be read".to_string()
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {e}");
                "A data file is not valid JSON".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal error occurred".to_string()
            }
        };

        json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        })
    }
}
