//! Explicit session context shared by the components that need authentication.
//!
//! The authentication flow is the writer; fetch collaborators read the token and
//! views subscribe to sign-in/sign-out notifications.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::user::{AuthSession, User};

#[derive(Clone, Debug)]
pub struct SessionContext {
    state: Arc<watch::Sender<Option<AuthSession>>>,
}

impl SessionContext {
    /// Context with nobody signed in.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            state: Arc::new(sender),
        }
    }

    /// Context restored from a previously stored session.
    pub fn restore(session: AuthSession) -> Self {
        let (sender, _) = watch::channel(Some(session));
        Self {
            state: Arc::new(sender),
        }
    }

    pub fn sign_in(&self, session: AuthSession) {
        log::info!("User {} signed in", session.user.username);
        self.state.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.state.send_replace(None) {
            log::info!("User {} signed out", previous.user.username);
        }
    }

    /// Drops the session after the backend rejected its token.
    pub fn invalidate(&self) {
        if let Some(previous) = self.state.send_replace(None) {
            log::warn!(
                "Session of {} invalidated by the backend",
                previous.user.username
            );
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().as_ref().map(|session| session.user.clone())
    }

    /// Bearer token attached to outgoing fetches.
    pub fn token(&self) -> Option<String> {
        self.state
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.state.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            user: User {
                username: "admin".to_string(),
                role: "Administrator".to_string(),
            },
            token: "token-1".to_string(),
        }
    }

    #[test]
    fn token_follows_sign_in_and_out() {
        let context = SessionContext::new();
        assert!(!context.is_authenticated());
        assert_eq!(context.token(), None);

        context.sign_in(session());
        assert_eq!(context.token().as_deref(), Some("token-1"));
        assert_eq!(context.user().unwrap().role, "Administrator");

        context.sign_out();
        assert!(context.current().is_none());
    }

    #[tokio::test]
    async fn subscribers_observe_invalidation() {
        let context = SessionContext::restore(session());
        let mut receiver = context.subscribe();
        assert!(receiver.borrow_and_update().is_some());

        let reader = context.clone();
        reader.invalidate();

        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_none());
        assert!(!context.is_authenticated());
    }
}
