//! Request-level operations shared by the routes.

use thiserror::Error;

use crate::auth::AuthError;
use crate::export::ExportError;
use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod dashboard;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    /// Failure shown to the user as a single message.
    #[error("{0}")]
    Form(String),

    /// Per-field validation messages.
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::UsernameTaken(_) => {
                ServiceError::Form(err.to_string())
            }
            AuthError::Token(err) => ServiceError::Internal(err.to_string()),
            AuthError::Repository(err) => ServiceError::Internal(err.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.field_errors())
    }
}

impl From<ExportError> for ServiceError {
    fn from(err: ExportError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
