use serde::{Deserialize, Serialize};

/// Signed-in dashboard user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub role: String,
}

/// Authenticated session: the user plus the bearer token sent with every fetch.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Entry of a local credential table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl Credential {
    pub fn new(username: &str, password: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}
