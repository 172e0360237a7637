//! Sign-in against the backend's `/auth` endpoints.

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, AuthResult, Authenticator};
use crate::domain::user::{AuthSession, User};
use crate::repository::errors::RepositoryError;

#[derive(Serialize)]
struct CredentialsPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: Option<String>,
    user: Option<User>,
}

#[derive(Clone, Debug)]
pub struct RemoteAuthenticator {
    client: Client,
    base_url: Url,
}

impl RemoteAuthenticator {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn post(&self, path: &str, username: &str, password: &str) -> AuthResult<AuthSession> {
        let url = self.base_url.join(path).map_err(|e| {
            RepositoryError::Unexpected(format!("Invalid endpoint {path}: {e}"))
        })?;

        let response = self
            .client
            .post(url)
            .json(&CredentialsPayload { username, password })
            .send()
            .await
            .map_err(RepositoryError::from)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AuthError::InvalidCredentials);
            }
            StatusCode::CONFLICT => return Err(AuthError::UsernameTaken(username.to_string())),
            _ => {}
        }

        let body: AuthResponse = response
            .error_for_status()
            .map_err(RepositoryError::from)?
            .json()
            .await
            .map_err(RepositoryError::from)?;

        match (body.token, body.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(AuthSession { user, token }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

impl Authenticator for RemoteAuthenticator {
    async fn login(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        self.post("auth/login", username, password).await
    }

    async fn signup(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        self.post("auth/signup", username, password).await
    }
}
