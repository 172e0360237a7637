//! Dashboard query strings: filter fields, selected status and page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::gems::{GemsCriteria, GemsTransaction};
use crate::domain::gpf::{GpfCriteria, GpfTransaction};
use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::domain::types::{IsoDate, TextFilter};
use crate::forms::FieldErrors;

const INVALID_DATE: &str = "Expected a date in YYYY-MM-DD format";
const UNKNOWN_STATUS: &str = "Unknown status";

/// Parsed dashboard request.
#[derive(Debug)]
pub struct FilterInput<R: TransactionRecord> {
    pub criteria: R::Criteria,
    pub status: Option<R::Status>,
    pub page: usize,
    /// Inputs that could not be applied; their constraint is left out.
    pub errors: FieldErrors,
}

/// Raw query string of a dashboard page.
pub trait FilterQuery: Clone + Default + Serialize + DeserializeOwned {
    type Record: TransactionRecord;

    fn status(&self) -> Option<&str>;

    fn set_status(&mut self, status: Option<&str>);

    fn set_page(&mut self, page: Option<usize>);

    fn page(&self) -> Option<usize>;

    /// Builds criteria from the filter fields, recording per-field errors.
    fn criteria(&self, errors: &mut FieldErrors) -> <Self::Record as TransactionRecord>::Criteria;

    fn parse(&self) -> FilterInput<Self::Record> {
        let mut errors = FieldErrors::new();
        let criteria = self.criteria(&mut errors);

        let status = match self.status().map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                match <<Self::Record as TransactionRecord>::Status as TransactionStatus>::parse(raw)
                {
                    Ok(status) => Some(status),
                    Err(_) => {
                        errors.insert("status".to_string(), UNKNOWN_STATUS.to_string());
                        None
                    }
                }
            }
        };

        FilterInput {
            criteria,
            status,
            page: self.page().unwrap_or(1).max(1),
            errors,
        }
    }

    /// Same filters with another status and the first page.
    fn with_status(&self, status: Option<&str>) -> Self {
        let mut query = self.clone();
        query.set_status(status);
        query.set_page(None);
        query
    }

    /// Filters only, for export links.
    fn without_page(&self) -> Self {
        let mut query = self.clone();
        query.set_page(None);
        query
    }
}

fn date_field(raw: Option<&str>, field: &str, errors: &mut FieldErrors) -> Option<IsoDate> {
    match IsoDate::from_input(raw) {
        Ok(date) => date,
        Err(_) => {
            errors.insert(field.to_string(), INVALID_DATE.to_string());
            None
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GemsFilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl FilterQuery for GemsFilterQuery {
    type Record = GemsTransaction;

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(str::to_string);
    }

    fn set_page(&mut self, page: Option<usize>) {
        self.page = page;
    }

    fn page(&self) -> Option<usize> {
        self.page
    }

    fn criteria(&self, errors: &mut FieldErrors) -> GemsCriteria {
        GemsCriteria {
            ge_number: TextFilter::from_input(self.ge_number.as_deref()),
            event_name: TextFilter::from_input(self.event_name.as_deref()),
            from_date: date_field(self.from_date.as_deref(), "fromDate", errors),
            to_date: date_field(self.to_date.as_deref(), "toDate", errors),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpfFilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kgid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
}

impl FilterQuery for GpfFilterQuery {
    type Record = GpfTransaction;

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(str::to_string);
    }

    fn set_page(&mut self, page: Option<usize>) {
        self.page = page;
    }

    fn page(&self) -> Option<usize> {
        self.page
    }

    fn criteria(&self, errors: &mut FieldErrors) -> GpfCriteria {
        GpfCriteria {
            kgid: TextFilter::from_input(self.kgid.as_deref()),
            from_date: date_field(self.from_date.as_deref(), "fromDate", errors),
            to_date: date_field(self.to_date.as_deref(), "toDate", errors),
        }
    }
}
