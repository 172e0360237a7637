//! Filtering, aggregation and status-selection engine shared by every dashboard.
//!
//! The engine is pure: it only reads the record collection owned by a data
//! source and produces derived views.

pub mod filter;
pub mod query;
pub mod summary;

pub use filter::{DateRange, filter, matches};
pub use query::{QueryOutcome, StatusSelection, query};
pub use summary::{StatusSummary, SummaryError, aggregate};
