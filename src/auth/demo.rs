//! Sign-in against a fixed credential table.

use crate::auth::token::issue_token;
use crate::auth::{AuthError, AuthResult, Authenticator};
use crate::domain::user::{AuthSession, User};
use crate::repository::CredentialReader;

const FALLBACK_ROLE: &str = "User";
const SIGNUP_ROLE: &str = "New User";

pub struct DemoAuthenticator<C> {
    credentials: C,
    secret: String,
    token_ttl_secs: i64,
    accept_any_credentials: bool,
}

impl<C: CredentialReader> DemoAuthenticator<C> {
    pub fn new(credentials: C, secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            credentials,
            secret: secret.to_string(),
            token_ttl_secs,
            accept_any_credentials: false,
        }
    }

    /// Lets any non-empty username/password pair sign in with a generic role.
    pub fn accept_any_credentials(mut self, accept: bool) -> Self {
        self.accept_any_credentials = accept;
        self
    }

    fn session_for(&self, user: User) -> AuthResult<AuthSession> {
        let token = issue_token(&user, &self.secret, self.token_ttl_secs)?;
        Ok(AuthSession { user, token })
    }
}

impl<C: CredentialReader> Authenticator for DemoAuthenticator<C> {
    async fn login(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        if let Some(credential) = self.credentials.find_credential(username) {
            if credential.password == password {
                return self.session_for(credential.to_user());
            }
            return Err(AuthError::InvalidCredentials);
        }

        if self.accept_any_credentials && !username.is_empty() && !password.is_empty() {
            log::warn!("Accepting unknown user {username} in demo mode");
            return self.session_for(User {
                username: username.to_string(),
                role: FALLBACK_ROLE.to_string(),
            });
        }

        Err(AuthError::InvalidCredentials)
    }

    async fn signup(&self, username: &str, _password: &str) -> AuthResult<AuthSession> {
        if self.credentials.find_credential(username).is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        self.session_for(User {
            username: username.to_string(),
            role: SIGNUP_ROLE.to_string(),
        })
    }
}
