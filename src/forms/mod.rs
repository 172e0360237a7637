//! Form and query-string definitions backing the dashboard routes.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod filters;

/// Inline messages keyed by the offending field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid username")]
    InvalidUsername,
}

impl From<TypeConstraintError> for FormError {
    fn from(_: TypeConstraintError) -> Self {
        FormError::InvalidUsername
    }
}

impl FormError {
    /// Flattens the error into one message per field.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => field_errors(errors),
            FormError::InvalidUsername => {
                FieldErrors::from([("username".to_string(), "Username is required".to_string())])
            }
        }
    }
}

/// Keeps the first message reported for every field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                (field.to_string(), message)
            })
        })
        .collect()
}
