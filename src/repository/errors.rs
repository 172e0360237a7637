use thiserror::Error;

use crate::engine::summary::SummaryError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend rejected the session token (401/403).
    #[error("Not authorized")]
    Unauthorized,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with data outside the agreed shape.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Authentication failures force a sign-out instead of a soft empty result.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, RepositoryError::Unauthorized)
    }

    /// Failures worth retrying without user intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RepositoryError::Timeout(_) | RepositoryError::Transport(_)
        )
    }
}

impl From<SummaryError> for RepositoryError {
    fn from(err: SummaryError) -> Self {
        RepositoryError::ContractViolation(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return RepositoryError::Timeout(err.to_string());
        }

        if matches!(
            err.status(),
            Some(reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN)
        ) {
            return RepositoryError::Unauthorized;
        }

        if err.is_decode() {
            return RepositoryError::ContractViolation(format!("Malformed payload: {err}"));
        }

        if err.is_connect() || err.is_request() || err.is_status() || err.is_body() {
            return RepositoryError::Transport(err.to_string());
        }

        RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
    }
}
