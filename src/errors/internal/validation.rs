use thiserror::Error;

/// Client-correctable input problems
///
/// Every variant names the offending field so callers can report it back
/// without parsing the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid item id: {0} (must be greater than 0)")]
    InvalidId(i64),

    #[error("required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("purchase_price must be 0 or greater (got {0})")]
    NegativePrice(i64),

    #[error("purchase_date must be a valid date in YYYY-MM-DD format (got {0})")]
    InvalidDate(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{0} cannot be null")]
    NullField(&'static str),

    #[error("at least one field (name, brand, or purchase_price) is required for update")]
    NoFieldsToUpdate,
}

impl ValidationError {
    /// Field names this error refers to, empty when it is not field-specific
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::InvalidId(_) => vec!["id"],
            Self::MissingFields(fields) => fields.clone(),
            Self::InvalidCategory(_) => vec!["category"],
            Self::NegativePrice(_) => vec!["purchase_price"],
            Self::InvalidDate(_) => vec!["purchase_date"],
            Self::EmptyField(field) | Self::NullField(field) => vec![field],
            Self::NoFieldsToUpdate => Vec::new(),
        }
    }
}
