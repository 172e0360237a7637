//! Traits describing a record kind: its status vocabulary and filter criteria.
//!
//! The query engine, pagination and data sources are written once against
//! these traits and instantiated for GEMS and GPF transactions.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::TypeConstraintError;

/// Closed status vocabulary of a record kind.
pub trait TransactionStatus:
    Copy + Debug + Display + Eq + Ord + Hash + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every status in display order.
    const ALL: &'static [Self];

    /// Wire representation, e.g. `HRMS_REJECTED`.
    fn as_str(self) -> &'static str;

    /// Human readable card title.
    fn label(self) -> &'static str;

    /// Chart colour associated with the status.
    fn color(self) -> &'static str;

    /// Parses the wire representation, rejecting anything outside [`Self::ALL`].
    fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TypeConstraintError::UnknownStatus(value.to_string()))
    }
}

/// Filter constraints for one record kind.
///
/// Every absent constraint matches everything; present constraints are
/// combined with logical AND.
pub trait RecordCriteria<R>:
    Clone + Debug + Default + PartialEq + Serialize + Send + Sync + 'static
{
    /// Returns `true` when the record satisfies every present constraint.
    fn matches(&self, record: &R) -> bool;

    /// Returns `true` when no constraint is present.
    fn is_empty(&self) -> bool;
}

/// A transaction row shown on one of the dashboards.
pub trait TransactionRecord:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Status: TransactionStatus;
    type Criteria: RecordCriteria<Self>;

    /// Path segment used by the backend API and the dashboard routes.
    const ENDPOINT: &'static str;
    /// Dashboard title.
    const TITLE: &'static str;

    fn status(&self) -> Self::Status;
}
