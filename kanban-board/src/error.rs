//! Error types for the kanban engine

use rusqlite::ErrorCode;
use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Malformed input: empty order list, blank name, duplicate ids
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// A parent or record does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The supplied id set does not match the current siblings of a parent.
    /// Usually a stale client view racing another writer.
    #[error("order for {parent} does not match its current {resource}s (expected {expected}, got {supplied})")]
    InvalidMembership {
        resource: String,
        parent: String,
        expected: usize,
        supplied: usize,
    },

    /// The caller's role does not permit the action
    #[error("permission denied: {action}")]
    Permission { action: String },

    /// A move or association spans two different boards
    #[error("cannot cross boards: {from} -> {to}")]
    CrossScope { from: String, to: String },

    /// The backing store aborted or timed out the transaction
    #[error("transaction failed: {message}")]
    TransactionFailed { message: String },

    /// A uniqueness rule was violated (tag name, email, assignee)
    #[error("{resource} conflict: {message}")]
    Conflict { resource: String, message: String },

    /// A command that needs a caller ran without one
    #[error("no authenticated user for this operation")]
    Unauthenticated,

    /// Unknown "verb noun" operation string
    #[error("unknown operation: {op}")]
    UnknownOperation { op: String },

    /// SQLite error
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Blocking store task panicked or was cancelled
    #[error("store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// How the presentation layer should treat an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// "Please refetch and retry"
    Retry,
    /// Caller lacks rights, or the request crosses boards
    Authorization,
    /// Bad input or missing resource
    Client,
    /// Store or serialization failure
    Internal,
}

impl KanbanError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a permission error
    pub fn permission(action: impl Into<String>) -> Self {
        Self::Permission {
            action: action.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidMembership { .. } | Self::TransactionFailed { .. }
        )
    }

    /// Classify for user-facing presentation
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMembership { .. } | Self::TransactionFailed { .. } => ErrorCategory::Retry,
            Self::Permission { .. } | Self::CrossScope { .. } | Self::Unauthenticated => {
                ErrorCategory::Authorization
            }
            Self::Validation { .. }
            | Self::NotFound { .. }
            | Self::Conflict { .. }
            | Self::UnknownOperation { .. } => ErrorCategory::Client,
            Self::Database(_) | Self::Json(_) | Self::Config(_) | Self::Join(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

impl From<rusqlite::Error> for KanbanError {
    fn from(error: rusqlite::Error) -> Self {
        match &error {
            rusqlite::Error::SqliteFailure(failure, message) => match failure.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => Self::TransactionFailed {
                    message: message.clone().unwrap_or_else(|| failure.to_string()),
                },
                ErrorCode::ConstraintViolation
                    if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
                {
                    Self::Conflict {
                        resource: "record".into(),
                        message: message.clone().unwrap_or_else(|| failure.to_string()),
                    }
                }
                _ => Self::Database(error),
            },
            _ => Self::Database(error),
        }
    }
}
