//! Application-wide choice of data and authentication backends.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::auth::{AuthResult, Authenticator, DemoAuthenticator, RemoteAuthenticator};
use crate::domain::gems::GemsTransaction;
use crate::domain::gpf::GpfTransaction;
use crate::domain::record::TransactionRecord;
use crate::domain::user::AuthSession;
use crate::engine::summary::StatusSummary;
use crate::models::config::{AuthKind, DataSourceKind, ServerConfig};
use crate::repository::TransactionReader;
use crate::repository::credentials::DemoCredentials;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::remote::{RemoteTransactionReader, build_client, parse_base_url};
use crate::repository::synthetic::{SyntheticDataset, SyntheticReader};
use crate::session::SessionContext;

#[derive(Clone, Debug)]
struct Backend {
    client: Client,
    base_url: Url,
}

fn backend(config: &ServerConfig) -> RepositoryResult<Backend> {
    let raw = config.data_source.api_base_url.as_deref().ok_or_else(|| {
        RepositoryError::Unexpected("data_source.api_base_url is not set".to_string())
    })?;
    Ok(Backend {
        client: build_client(Duration::from_secs(config.data_source.request_timeout_secs))?,
        base_url: parse_base_url(raw)?,
    })
}

/// Where dashboard data comes from.
#[derive(Clone, Debug)]
pub enum DataSource {
    Synthetic(SyntheticDataset),
    Remote { client: Client, base_url: Url },
}

impl DataSource {
    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        match config.data_source.kind {
            DataSourceKind::Synthetic => Ok(Self::Synthetic(SyntheticDataset::generate(
                config.data_source.seed,
            ))),
            DataSourceKind::Remote => {
                let Backend { client, base_url } = backend(config)?;
                log::info!("Fetching transactions from {base_url}");
                Ok(Self::Remote { client, base_url })
            }
        }
    }

    pub fn gems(&self, session: SessionContext) -> DashboardReader<GemsTransaction> {
        match self {
            Self::Synthetic(dataset) => DashboardReader::Synthetic(dataset.gems().clone()),
            Self::Remote { client, base_url } => DashboardReader::Remote(
                RemoteTransactionReader::new(client.clone(), base_url.clone(), session),
            ),
        }
    }

    pub fn gpf(&self, session: SessionContext) -> DashboardReader<GpfTransaction> {
        match self {
            Self::Synthetic(dataset) => DashboardReader::Synthetic(dataset.gpf().clone()),
            Self::Remote { client, base_url } => DashboardReader::Remote(
                RemoteTransactionReader::new(client.clone(), base_url.clone(), session),
            ),
        }
    }
}

/// Reader handed to a single request.
pub enum DashboardReader<R> {
    Synthetic(SyntheticReader<R>),
    Remote(RemoteTransactionReader),
}

impl<R: TransactionRecord> TransactionReader<R> for DashboardReader<R> {
    async fn fetch_status_summary(
        &self,
        criteria: &R::Criteria,
    ) -> RepositoryResult<StatusSummary<R::Status>> {
        match self {
            Self::Synthetic(reader) => reader.fetch_status_summary(criteria).await,
            Self::Remote(reader) => {
                TransactionReader::<R>::fetch_status_summary(reader, criteria).await
            }
        }
    }

    async fn fetch_transactions(
        &self,
        status: Option<R::Status>,
        criteria: &R::Criteria,
    ) -> RepositoryResult<Vec<R>> {
        match self {
            Self::Synthetic(reader) => reader.fetch_transactions(status, criteria).await,
            Self::Remote(reader) => {
                TransactionReader::<R>::fetch_transactions(reader, status, criteria).await
            }
        }
    }
}

/// Configured sign-in backend.
pub enum AuthBackend {
    Demo(DemoAuthenticator<DemoCredentials>),
    Remote(RemoteAuthenticator),
}

impl AuthBackend {
    pub fn from_config(config: &ServerConfig) -> RepositoryResult<Self> {
        match config.auth.kind {
            AuthKind::Demo => {
                if config.auth.accept_any_credentials {
                    log::warn!("Demo sign-in accepts any non-empty credentials");
                }
                Ok(Self::Demo(
                    DemoAuthenticator::new(
                        DemoCredentials::demo(),
                        &config.secret,
                        config.auth.token_ttl_secs,
                    )
                    .accept_any_credentials(config.auth.accept_any_credentials),
                ))
            }
            AuthKind::Remote => {
                let Backend { client, base_url } = backend(config)?;
                Ok(Self::Remote(RemoteAuthenticator::new(client, base_url)))
            }
        }
    }
}

impl Authenticator for AuthBackend {
    async fn login(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        match self {
            Self::Demo(auth) => auth.login(username, password).await,
            Self::Remote(auth) => auth.login(username, password).await,
        }
    }

    async fn signup(&self, username: &str, password: &str) -> AuthResult<AuthSession> {
        match self {
            Self::Demo(auth) => auth.signup(username, password).await,
            Self::Remote(auth) => auth.signup(username, password).await,
        }
    }
}
