use crate::auth::Authenticator;
use crate::domain::user::AuthSession;
use crate::forms::auth::{CredentialsPayload, LoginForm, SignupForm};
use crate::services::{ServiceError, ServiceResult};

/// Validates the sign-in form and exchanges the credentials for a session.
pub async fn login<A>(auth: &A, form: LoginForm) -> ServiceResult<AuthSession>
where
    A: Authenticator,
{
    let payload = CredentialsPayload::try_from(form)?;

    auth.login(payload.username.as_str(), &payload.password)
        .await
        .map_err(|err| {
            log::warn!("Sign-in of {} failed: {err}", payload.username);
            ServiceError::from(err)
        })
}

/// Validates the sign-up form before any call to the authenticator.
pub async fn signup<A>(auth: &A, form: SignupForm) -> ServiceResult<AuthSession>
where
    A: Authenticator,
{
    let payload = CredentialsPayload::try_from(form)?;

    auth.signup(payload.username.as_str(), &payload.password)
        .await
        .map_err(|err| {
            log::error!("Sign-up of {} failed: {err}", payload.username);
            ServiceError::from(err)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DemoAuthenticator;
    use crate::repository::mock::MockCredentialStore;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn invalid_forms_never_reach_the_credential_store() {
        let mut store = MockCredentialStore::new();
        store.expect_find_credential().never();
        let auth = DemoAuthenticator::new(store, SECRET, 60);

        let form = SignupForm {
            username: "newcomer".to_string(),
            password: "short".to_string(),
            confirm_password: "shorter".to_string(),
        };
        match signup(&auth, form).await {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.contains_key("password"));
                assert!(errors.contains_key("confirm_password"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(matches!(
            login(&auth, LoginForm::default()).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn rejected_credentials_become_a_form_error() {
        let mut store = MockCredentialStore::new();
        store.expect_find_credential().times(1).returning(|_| None);
        let auth = DemoAuthenticator::new(store, SECRET, 60);

        let form = LoginForm {
            username: "ghost".to_string(),
            password: "secret".to_string(),
        };
        assert!(matches!(
            login(&auth, form).await,
            Err(ServiceError::Form(_))
        ));
    }
}
