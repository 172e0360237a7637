//! In-memory credential table used by the demo sign-in mode.

use crate::domain::user::Credential;
use crate::repository::CredentialReader;

#[derive(Clone, Debug)]
pub struct DemoCredentials {
    credentials: Vec<Credential>,
}

impl DemoCredentials {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Well-known accounts offered on the sign-in page.
    pub fn demo() -> Self {
        Self::new(vec![
            Credential::new("admin", "password123", "Administrator"),
            Credential::new("user", "user123", "User"),
            Credential::new("demo", "demo123", "Demo User"),
            Credential::new("hrms", "hrms2024", "HRMS Admin"),
        ])
    }

    pub fn all(&self) -> &[Credential] {
        &self.credentials
    }
}

impl CredentialReader for DemoCredentials {
    fn find_credential(&self, username: &str) -> Option<Credential> {
        self.credentials
            .iter()
            .find(|credential| credential.username == username)
            .cloned()
    }
}
