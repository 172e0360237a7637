use crate::domain::record::TransactionRecord;
use crate::domain::user::Credential;
use crate::engine::summary::StatusSummary;
use crate::repository::errors::RepositoryResult;

pub mod credentials;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
#[cfg(feature = "server")]
pub mod remote;
pub mod synthetic;

/// Source of transaction data for one record kind.
///
/// Both calls must apply the same filter semantics so that displayed counts
/// and displayed rows never diverge.
#[allow(async_fn_in_trait)]
pub trait TransactionReader<R: TransactionRecord> {
    /// Counts per status of every record matching `criteria`.
    async fn fetch_status_summary(
        &self,
        criteria: &R::Criteria,
    ) -> RepositoryResult<StatusSummary<R::Status>>;

    /// Records matching `criteria` and, when given, `status`.
    async fn fetch_transactions(
        &self,
        status: Option<R::Status>,
        criteria: &R::Criteria,
    ) -> RepositoryResult<Vec<R>>;
}

/// Lookup of locally configured sign-in credentials.
pub trait CredentialReader {
    fn find_credential(&self, username: &str) -> Option<Credential>;
}

impl<R, T> TransactionReader<R> for &T
where
    R: TransactionRecord,
    T: TransactionReader<R>,
{
    async fn fetch_status_summary(
        &self,
        criteria: &R::Criteria,
    ) -> RepositoryResult<StatusSummary<R::Status>> {
        (**self).fetch_status_summary(criteria).await
    }

    async fn fetch_transactions(
        &self,
        status: Option<R::Status>,
        criteria: &R::Criteria,
    ) -> RepositoryResult<Vec<R>> {
        (**self).fetch_transactions(status, criteria).await
    }
}
