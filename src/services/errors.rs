use thiserror::Error;

use crate::forms::FieldViolation;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed one or more field rules; nothing was persisted.
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    /// Requested resource was not found.
    #[error("{0}")]
    NotFound(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
