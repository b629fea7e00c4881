//! Error types for the library catalog

use std::path::PathBuf;

use thiserror::Error;

/// Stable numeric codes, one per error family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    MaxBorrowsReached = 11,
    NotBorrowed = 12,
    AlreadyBorrowed = 13,
    BadValue = 18,
    MissingField = 19,
    NoSuchFile = 20,
    IoFailure = 21,
    ParseFailure = 22,
    ConfigFailure = 23,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Not borrowed: {0}")]
    NotBorrowed(String),

    #[error("Already borrowed: {0}")]
    AlreadyBorrowed(String),

    #[error("Maximum loans reached: {0}")]
    MaxLoansReached(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Bad value: {0}")]
    BadValue(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchItem,
            AppError::NotAvailable(_) => ErrorCode::ItemNotAvailable,
            AppError::NotBorrowed(_) => ErrorCode::NotBorrowed,
            AppError::AlreadyBorrowed(_) => ErrorCode::AlreadyBorrowed,
            AppError::MaxLoansReached(_) => ErrorCode::MaxBorrowsReached,
            AppError::Duplicate(_) => ErrorCode::Duplicate,
            AppError::FileNotFound(_) => ErrorCode::NoSuchFile,
            AppError::Io(_) => ErrorCode::IoFailure,
            AppError::Parse(_) => ErrorCode::ParseFailure,
            AppError::MissingField(_) => ErrorCode::MissingField,
            AppError::BadValue(_) => ErrorCode::BadValue,
            AppError::Config(_) => ErrorCode::ConfigFailure,
        }
    }

    /// True for failures of the load/save path, as opposed to refusals of the
    /// in-memory lending workflow.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            AppError::FileNotFound(_)
                | AppError::Io(_)
                | AppError::Parse(_)
                | AppError::MissingField(_)
                | AppError::BadValue(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => AppError::Io(err.into()),
            Category::Syntax | Category::Eof => AppError::Parse(err),
            Category::Data => {
                let message = err.to_string();
                match missing_field_name(&message) {
                    Some(field) => AppError::MissingField(field.to_string()),
                    None => AppError::BadValue(message),
                }
            }
        }
    }
}

/// Extract `title` from serde's "missing field `title`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

/// Result type alias for catalog operations
pub type AppResult<T> = Result<T, AppError>;
