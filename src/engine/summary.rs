//! Count-by-status summaries.

use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::domain::record::{TransactionRecord, TransactionStatus};

/// Violations of the closed status vocabulary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("status `{0}` is not part of the record kind's vocabulary")]
    UnknownStatus(String),

    #[error("reported total {reported} does not match counted total {counted}")]
    TotalMismatch { reported: usize, counted: usize },
}

/// Count of records per status. Every status of the vocabulary is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSummary<S: TransactionStatus> {
    counts: BTreeMap<S, usize>,
}

impl<S: TransactionStatus> StatusSummary<S> {
    /// Summary with every status initialised to zero.
    pub fn empty() -> Self {
        Self {
            counts: S::ALL.iter().map(|status| (*status, 0)).collect(),
        }
    }

    pub fn get(&self, status: S) -> usize {
        self.counts.get(&status).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates in the vocabulary's declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }

    fn increment(&mut self, status: S) {
        *self.counts.entry(status).or_default() += 1;
    }

    /// Builds a summary from a wire payload keyed by status name.
    ///
    /// Missing statuses count as zero; foreign keys are rejected.
    pub fn try_from_counts(counts: &HashMap<String, usize>) -> Result<Self, SummaryError> {
        let mut summary = Self::empty();
        for (key, count) in counts {
            let status =
                S::parse(key).map_err(|_| SummaryError::UnknownStatus(key.clone()))?;
            summary.counts.insert(status, *count);
        }
        Ok(summary)
    }

    /// Checks a total reported alongside the counts.
    pub fn verify_total(self, reported: usize) -> Result<Self, SummaryError> {
        let counted = self.total();
        if counted == reported {
            Ok(self)
        } else {
            Err(SummaryError::TotalMismatch { reported, counted })
        }
    }
}

impl<S: TransactionStatus> Default for StatusSummary<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: TransactionStatus> Serialize for StatusSummary<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (status, count) in &self.counts {
            map.serialize_entry(status.as_str(), count)?;
        }
        map.end()
    }
}

/// Reduces records into a count-by-status summary.
pub fn aggregate<'a, R, I>(records: I) -> StatusSummary<R::Status>
where
    R: TransactionRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut summary = StatusSummary::empty();
    for record in records {
        summary.increment(record.status());
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gpf::{GpfStatus, GpfTransaction};

    fn gpf(id: usize, status: GpfStatus) -> GpfTransaction {
        GpfTransaction {
            transaction_id: format!("GPF{id:06}"),
            gpf_id: "GPF00001".to_string(),
            kgid: "KG0000001".to_string(),
            name: "Name".to_string(),
            date_of_birth: "1970-01-01".to_string(),
            joining_date: "1995-01-01".to_string(),
            policy_no: None,
            policy_start_date: None,
            json_sent_date: "2024-01-01".to_string(),
            status,
        }
    }

    #[test]
    fn empty_collection_has_every_status_at_zero() {
        let summary = aggregate::<GpfTransaction, _>(&[]);
        assert_eq!(summary.iter().count(), GpfStatus::ALL.len());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn totals_equal_collection_size() {
        let records = vec![
            gpf(1, GpfStatus::JsonSent),
            gpf(2, GpfStatus::HrmsRejected),
            gpf(3, GpfStatus::HrmsRejected),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.total(), records.len());
        assert_eq!(summary.get(GpfStatus::HrmsRejected), 2);
        assert_eq!(summary.get(GpfStatus::HrmsReceived), 0);
    }

    #[test]
    fn wire_counts_reject_foreign_statuses() {
        let mut counts = HashMap::new();
        counts.insert("JSON_SENT".to_string(), 4);
        counts.insert("PDF_SENT".to_string(), 1);
        let result = StatusSummary::<GpfStatus>::try_from_counts(&counts);
        assert_eq!(result, Err(SummaryError::UnknownStatus("PDF_SENT".to_string())));
    }

    #[test]
    fn wire_counts_fill_missing_statuses_and_check_total() {
        let mut counts = HashMap::new();
        counts.insert("HRMS_RECEIVED".to_string(), 7);
        let summary = StatusSummary::<GpfStatus>::try_from_counts(&counts).unwrap();
        assert_eq!(summary.get(GpfStatus::JsonSent), 0);
        assert!(summary.clone().verify_total(7).is_ok());
        assert_eq!(
            summary.verify_total(8),
            Err(SummaryError::TotalMismatch {
                reported: 8,
                counted: 7
            })
        );
    }

    #[test]
    fn serializes_in_vocabulary_order() {
        let records = vec![gpf(1, GpfStatus::HrmsReceived)];
        let json = serde_json::to_string(&aggregate(&records)).unwrap();
        assert_eq!(
            json,
            r#"{"JSON_SENT":0,"HRMS_RECEIVED":1,"HRMS_REJECTED":0}"#
        );
    }
}
