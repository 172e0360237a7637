//! Signed-in user extracted from the identity cookie and the stored session.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_session::{Session, SessionExt, SessionInsertError};
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpRequest, web};
use serde::Serialize;

use crate::auth::token::verify_token;
use crate::domain::user::{AuthSession, User};
use crate::models::config::{AuthKind, ServerConfig};
use crate::session::SessionContext;

/// Session key holding the serialized [`AuthSession`].
pub const AUTH_SESSION_KEY: &str = "auth_session";

#[derive(Clone, Debug, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
    #[serde(skip)]
    token: String,
}

impl AuthenticatedUser {
    /// Session context for fetch collaborators acting on behalf of this user.
    pub fn session_context(&self) -> SessionContext {
        SessionContext::restore(AuthSession {
            user: User {
                username: self.username.clone(),
                role: self.role.clone(),
            },
            token: self.token.clone(),
        })
    }

}

impl From<AuthSession> for AuthenticatedUser {
    fn from(session: AuthSession) -> Self {
        Self {
            username: session.user.username,
            role: session.user.role,
            token: session.token,
        }
    }
}

/// Persists the session next to the identity cookie.
pub fn store_auth_session(
    session: &Session,
    auth_session: &AuthSession,
) -> Result<(), SessionInsertError> {
    session.insert(AUTH_SESSION_KEY, auth_session)
}

fn authenticated_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    let identity = req.get_identity().ok()?;
    let username = identity.id().ok()?;

    let stored = req
        .get_session()
        .get::<AuthSession>(AUTH_SESSION_KEY)
        .map_err(|e| log::error!("Failed to read the stored session: {e}"))
        .ok()??;

    if stored.user.username != username {
        log::warn!("Identity {username} does not match the stored session");
        return None;
    }

    if !token_is_valid(req, &stored) {
        req.get_session().purge();
        return None;
    }

    Some(stored.into())
}

/// Demo tokens are signed locally, so their signature and expiry are checked
/// here. Remote tokens are checked by the backend on every fetch.
fn token_is_valid(req: &HttpRequest, stored: &AuthSession) -> bool {
    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        log::error!("Server configuration is not registered; rejecting the session");
        return false;
    };

    if config.auth.kind != AuthKind::Demo {
        return true;
    }

    match verify_token(&stored.token, &config.secret) {
        Ok(claims) if claims.sub == stored.user.username => true,
        Ok(claims) => {
            log::warn!(
                "Token subject {} does not match user {}",
                claims.sub,
                stored.user.username
            );
            false
        }
        Err(err) => {
            log::info!("Session of {} rejected: {err}", stored.user.username);
            false
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            authenticated_user(req)
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Sign in required")),
        )
    }
}
