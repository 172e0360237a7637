#![allow(dead_code)]

use std::time::Duration;

use hrms_dashboard::domain::gems::{GemsCriteria, GemsStatus, GemsTransaction};
use hrms_dashboard::domain::user::{AuthSession, User};
use hrms_dashboard::engine::summary::StatusSummary;
use hrms_dashboard::repository::TransactionReader;
use hrms_dashboard::repository::errors::{RepositoryError, RepositoryResult};
use hrms_dashboard::repository::synthetic::SyntheticReader;
use hrms_dashboard::session::SessionContext;

pub const SEED: u64 = 2024;

pub fn gems(id: usize, status: GemsStatus, event_name: &str, date: &str) -> GemsTransaction {
    GemsTransaction {
        transaction_id: format!("TXN{id:06}"),
        ge_number: format!("GE2024{id:04}"),
        event_id: format!("EVT{id:03}"),
        event_name: event_name.to_string(),
        file_id: format!("FILE{id:03}"),
        pdf_file_name: None,
        json_sent_date: date.to_string(),
        status,
    }
}

pub fn signed_in() -> SessionContext {
    SessionContext::restore(AuthSession {
        user: User {
            username: "hrms".to_string(),
            role: "HRMS Admin".to_string(),
        },
        token: "token".to_string(),
    })
}

/// Synthetic reader whose responses take longer for some criteria.
pub struct DelayedReader {
    pub inner: SyntheticReader<GemsTransaction>,
    pub delay: fn(&GemsCriteria) -> Duration,
}

impl TransactionReader<GemsTransaction> for DelayedReader {
    async fn fetch_status_summary(
        &self,
        criteria: &GemsCriteria,
    ) -> RepositoryResult<StatusSummary<GemsStatus>> {
        tokio::time::sleep((self.delay)(criteria)).await;
        self.inner.fetch_status_summary(criteria).await
    }

    async fn fetch_transactions(
        &self,
        status: Option<GemsStatus>,
        criteria: &GemsCriteria,
    ) -> RepositoryResult<Vec<GemsTransaction>> {
        tokio::time::sleep((self.delay)(criteria)).await;
        self.inner.fetch_transactions(status, criteria).await
    }
}

/// Reader failing every call with the same error.
pub struct FailingReader(pub fn() -> RepositoryError);

impl TransactionReader<GemsTransaction> for FailingReader {
    async fn fetch_status_summary(
        &self,
        _: &GemsCriteria,
    ) -> RepositoryResult<StatusSummary<GemsStatus>> {
        Err((self.0)())
    }

    async fn fetch_transactions(
        &self,
        _: Option<GemsStatus>,
        _: &GemsCriteria,
    ) -> RepositoryResult<Vec<GemsTransaction>> {
        Err((self.0)())
    }
}
