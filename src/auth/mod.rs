//! Sign-in and sign-up collaborators.

use thiserror::Error;

use crate::domain::user::AuthSession;
use crate::repository::errors::RepositoryError;

pub mod demo;
pub mod remote;
pub mod token;

pub use demo::DemoAuthenticator;
pub use remote::RemoteAuthenticator;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Exchanges credentials for an authenticated session.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn login(&self, username: &str, password: &str) -> AuthResult<AuthSession>;

    /// Creates an account; inputs were already validated by the form layer.
    async fn signup(&self, username: &str, password: &str) -> AuthResult<AuthSession>;
}

impl<T: Authenticator> Authenticator for &T {
    async fn login(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        (**self).login(username, password).await
    }

    async fn signup(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        (**self).signup(username, password).await
    }
}
