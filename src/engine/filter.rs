//! Record inclusion predicates.
//!
//! Text criteria match as case-insensitive substrings, date criteria as an
//! inclusive range over `YYYY-MM-DD` dates. A record whose date cannot be
//! parsed never satisfies a bounded range but is unaffected by an unbounded one.

use crate::domain::gems::{GemsCriteria, GemsTransaction};
use crate::domain::gpf::{GpfCriteria, GpfTransaction};
use crate::domain::record::{RecordCriteria, TransactionRecord};
use crate::domain::types::{IsoDate, TextFilter};

/// Returns `true` when `record` satisfies every constraint present in `criteria`.
pub fn matches<R: TransactionRecord>(record: &R, criteria: &R::Criteria) -> bool {
    criteria.matches(record)
}

/// Iterates over the records matching `criteria`, preserving order.
pub fn filter<'a, R: TransactionRecord>(
    records: &'a [R],
    criteria: &'a R::Criteria,
) -> impl Iterator<Item = &'a R> + 'a {
    records.iter().filter(move |record| criteria.matches(*record))
}

/// Case-insensitive substring test; an absent needle matches everything.
pub fn text_matches(field: &str, needle: Option<&TextFilter>) -> bool {
    match needle {
        Some(needle) => field
            .to_lowercase()
            .contains(&needle.as_str().to_lowercase()),
        None => true,
    }
}

/// Inclusive date range with optional bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<IsoDate>,
    pub to: Option<IsoDate>,
}

impl DateRange {
    pub fn new(from: Option<IsoDate>, to: Option<IsoDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Tests a raw record date against the range.
    pub fn contains(&self, raw_date: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Ok(date) = IsoDate::parse(raw_date) else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

impl RecordCriteria<GemsTransaction> for GemsCriteria {
    fn matches(&self, record: &GemsTransaction) -> bool {
        text_matches(&record.ge_number, self.ge_number.as_ref())
            && text_matches(&record.event_name, self.event_name.as_ref())
            && DateRange::new(self.from_date, self.to_date).contains(&record.json_sent_date)
    }

    fn is_empty(&self) -> bool {
        self.ge_number.is_none()
            && self.event_name.is_none()
            && self.from_date.is_none()
            && self.to_date.is_none()
    }
}

impl RecordCriteria<GpfTransaction> for GpfCriteria {
    fn matches(&self, record: &GpfTransaction) -> bool {
        text_matches(&record.kgid, self.kgid.as_ref())
            && DateRange::new(self.from_date, self.to_date).contains(&record.json_sent_date)
    }

    fn is_empty(&self) -> bool {
        self.kgid.is_none() && self.from_date.is_none() && self.to_date.is_none()
    }
}
