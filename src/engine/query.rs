use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::engine::filter::filter;
use crate::engine::summary::{StatusSummary, aggregate};

/// Currently selected status card; `None` means "all transactions".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSelection<S>(Option<S>);

impl<S: TransactionStatus> StatusSelection<S> {
    pub fn all() -> Self {
        Self(None)
    }

    pub fn of(status: Option<S>) -> Self {
        Self(status)
    }

    pub fn get(&self) -> Option<S> {
        self.0
    }

    pub fn is_selected(&self, status: Option<S>) -> bool {
        self.0 == status
    }

    /// Selection after clicking `status`: clicking the selected card clears it.
    pub fn toggled(self, status: Option<S>) -> Self {
        if self.0 == status {
            Self(None)
        } else {
            Self(status)
        }
    }

    /// Applies [`Self::toggled`] in place and returns the new selection.
    pub fn toggle(&mut self, status: Option<S>) -> Option<S> {
        *self = self.toggled(status);
        self.0
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<S: TransactionStatus> Default for StatusSelection<S> {
    fn default() -> Self {
        Self::all()
    }
}

/// Result of one query cycle.
#[derive(Clone, Debug)]
pub struct QueryOutcome<R: TransactionRecord> {
    /// Counts over every record matching the criteria, regardless of selection.
    pub summary: StatusSummary<R::Status>,
    /// Records matching the criteria and the selected status.
    pub visible: Vec<R>,
}

/// Filters `records` by `criteria`, summarises the scoped set and narrows it
/// to `selected` when a status is selected.
pub fn query<R: TransactionRecord>(
    records: &[R],
    selected: Option<R::Status>,
    criteria: &R::Criteria,
) -> QueryOutcome<R> {
    let scoped: Vec<&R> = filter(records, criteria).collect();

    let summary = aggregate(scoped.iter().copied());

    let visible = scoped
        .into_iter()
        .filter(|record| selected.is_none_or(|status| record.status() == status))
        .cloned()
        .collect();

    QueryOutcome { summary, visible }
}
