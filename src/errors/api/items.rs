use crate::errors::internal::{ErrorKind, InternalError};
use poem_openapi::{ApiResponse, Object, payload::Json};
use std::fmt;

/// Standardized error response for item endpoints
#[derive(Object, Debug)]
pub struct ItemErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Offending request fields, when the error is tied to specific fields
    #[oai(skip_serializing_if_is_empty)]
    pub details: Vec<String>,

    /// HTTP status code
    pub status_code: u16,
}

/// Item operation error types
#[derive(ApiResponse, Debug)]
pub enum ItemApiError {
    /// Request failed validation
    #[oai(status = 400)]
    InvalidInput(Json<ItemErrorResponse>),

    /// Item not found
    #[oai(status = 404)]
    NotFound(Json<ItemErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ItemErrorResponse>),
}

impl ItemApiError {
    /// Create an InvalidInput error
    pub fn invalid_input(message: String, details: Vec<String>) -> Self {
        ItemApiError::InvalidInput(Json(ItemErrorResponse {
            error: "validation_failed".to_string(),
            message,
            details,
            status_code: 400,
        }))
    }

    /// Create a NotFound error
    pub fn not_found() -> Self {
        ItemApiError::NotFound(Json(ItemErrorResponse {
            error: "item_not_found".to_string(),
            message: "Item not found".to_string(),
            details: Vec::new(),
            status_code: 404,
        }))
    }

    /// Create an InternalError
    pub fn internal_server_error() -> Self {
        ItemApiError::InternalError(Json(ItemErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            details: Vec::new(),
            status_code: 500,
        }))
    }

    /// Convert InternalError to ItemApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Validation messages are client-correctable and passed through; anything
    /// from the backend is logged and replaced by a generic message.
    pub fn from_internal_error(err: InternalError) -> Self {
        match (&err, err.kind()) {
            (InternalError::InvalidInput(validation), _) => Self::invalid_input(
                validation.to_string(),
                validation.fields().into_iter().map(str::to_string).collect(),
            ),
            (_, ErrorKind::NotFound) => {
                tracing::debug!("{}", err);
                Self::not_found()
            }
            (_, ErrorKind::InvalidInput) => Self::invalid_input(err.to_string(), Vec::new()),
            (_, ErrorKind::Database) => {
                tracing::error!("Item operation failed: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ItemApiError::InvalidInput(json) => json.0.message.clone(),
            ItemApiError::NotFound(json) => json.0.message.clone(),
            ItemApiError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            ItemApiError::InvalidInput(json) => json.0.status_code,
            ItemApiError::NotFound(json) => json.0.status_code,
            ItemApiError::InternalError(json) => json.0.status_code,
        }
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
