use thiserror::Error;

pub mod database;
pub mod validation;

pub use database::DatabaseError;
pub use validation::ValidationError;

/// Classification surfaced to callers of the item service
///
/// Stable across wrapping: whatever context a layer adds, `kind()` of the
/// resulting error stays the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Database,
}

/// Internal error type for store and service operations
///
/// Not exposed via API - endpoints must convert to ItemApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Item not found: {id}")]
    NotFound { id: i64 },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Stored data could not be mapped back into a domain value
    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn timeout(operation: &str) -> InternalError {
        InternalError::Database(DatabaseError::Timeout {
            operation: operation.to_string(),
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn not_found(id: i64) -> InternalError {
        InternalError::NotFound { id }
    }

    /// Parse failures come from corrupt rows, so they count as backend failures
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) | Self::Parse { .. } => ErrorKind::Database,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
