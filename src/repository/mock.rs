//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::user::Credential;
use crate::repository::CredentialReader;

mock! {
    pub CredentialStore {}

    impl CredentialReader for CredentialStore {
        fn find_credential(&self, username: &str) -> Option<Credential>;
    }
}
