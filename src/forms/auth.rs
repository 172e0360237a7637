use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Username;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Sign-in form.
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Account creation form.
pub struct SignupForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Validated credentials ready for the authenticator.
#[derive(Debug)]
pub struct CredentialsPayload {
    pub username: Username,
    pub password: String,
}

impl TryFrom<LoginForm> for CredentialsPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            username: Username::new(form.username)?,
            password: form.password,
        })
    }
}

impl TryFrom<SignupForm> for CredentialsPayload {
    type Error = FormError;

    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            username: Username::new(form.username)?,
            password: form.password,
        })
    }
}
