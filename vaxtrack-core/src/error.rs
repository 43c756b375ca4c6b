//! Error types for vaxtrack.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors raised by a [`ProfileStore`](crate::store::ProfileStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid child id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidChildId(String),

    #[error("Import failed: {0}")]
    Import(String),
}

/// Errors that can occur in tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Child not found: {0}")]
    ChildNotFound(String),

    #[error("Unknown milestone '{0}'")]
    MilestoneNotFound(String),

    #[error("'{vaccine}' is not part of the {age_label} milestone")]
    VaccineNotInMilestone { age_label: String, vaccine: String },

    #[error("{}", format_validation(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation(errors: &[ValidationError]) -> String {
    crate::validate::format_error_message(errors)
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
