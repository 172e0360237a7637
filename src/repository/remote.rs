//! HTTP client for the transaction backend.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::engine::summary::StatusSummary;
use crate::repository::TransactionReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::session::SessionContext;

/// Attempts per request when the failure is transient.
const MAX_ATTEMPTS: usize = 2;

/// Stats payload returned by `GET /{kind}/stats`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(default)]
    status_counts: HashMap<String, usize>,
    total_transactions: Option<usize>,
}

#[derive(Serialize)]
struct StatusParam<'a> {
    status: &'a str,
}

/// Builds the HTTP client shared by every remote collaborator.
pub fn build_client(timeout: Duration) -> RepositoryResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(RepositoryError::from)
}

/// Parses a base URL, ensuring relative joins land below it.
pub fn parse_base_url(raw: &str) -> RepositoryResult<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized)
        .map_err(|e| RepositoryError::Unexpected(format!("Invalid API base url {raw}: {e}")))
}

/// Fetches transactions from the backend, attaching the session token.
#[derive(Clone, Debug)]
pub struct RemoteTransactionReader {
    client: Client,
    base_url: Url,
    session: SessionContext,
}

impl RemoteTransactionReader {
    pub fn new(client: Client, base_url: Url, session: SessionContext) -> Self {
        Self {
            client,
            base_url,
            session,
        }
    }

    fn get(&self, path: &str) -> RepositoryResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RepositoryError::Unexpected(format!("Invalid endpoint {path}: {e}")))?;
        let request = self.client.get(url);
        Ok(match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> RepositoryResult<T> {
        let mut attempt = 1;
        loop {
            let retry = request.try_clone();
            match self.send_once(request).await {
                Err(err) if err.is_retryable() && attempt < MAX_ATTEMPTS => match retry {
                    Some(next) => {
                        log::warn!("Retrying request after attempt {attempt} failed: {err}");
                        request = next;
                        attempt += 1;
                    }
                    None => return Err(err),
                },
                result => return result,
            }
        }
    }

    async fn send_once<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> RepositoryResult<T> {
        let response = request.send().await?;
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                let err = RepositoryError::from(err);
                if err.is_auth_failure() {
                    self.session.invalidate();
                }
                return Err(err);
            }
        };
        Ok(response.json::<T>().await?)
    }
}

impl<R> TransactionReader<R> for RemoteTransactionReader
where
    R: TransactionRecord,
{
    async fn fetch_status_summary(
        &self,
        criteria: &R::Criteria,
    ) -> RepositoryResult<StatusSummary<R::Status>> {
        let request = self.get(&format!("{}/stats", R::ENDPOINT))?.query(criteria);
        let stats: StatsResponse = self.send(request).await?;

        let summary = StatusSummary::<R::Status>::try_from_counts(&stats.status_counts)?;
        let summary = match stats.total_transactions {
            Some(total) => summary.verify_total(total)?,
            None => summary,
        };
        Ok(summary)
    }

    async fn fetch_transactions(
        &self,
        status: Option<R::Status>,
        criteria: &R::Criteria,
    ) -> RepositoryResult<Vec<R>> {
        let mut request = self
            .get(&format!("{}/transactions", R::ENDPOINT))?
            .query(criteria);
        if let Some(status) = status {
            request = request.query(&StatusParam {
                status: status.as_str(),
            });
        }
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_its_path_when_joined() {
        let base = parse_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(
            base.join("gems/stats").unwrap().as_str(),
            "http://localhost:8080/api/gems/stats"
        );
    }

    #[test]
    fn stats_payload_accepts_missing_total() {
        let stats: StatsResponse =
            serde_json::from_str(r#"{"statusCounts":{"JSON_SENT":3}}"#).unwrap();
        assert_eq!(stats.status_counts.get("JSON_SENT"), Some(&3));
        assert!(stats.total_transactions.is_none());
    }
}
