use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::domain::types::{IsoDate, TextFilter};

/// Processing stage of a GEMS transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GemsStatus {
    JsonSent,
    PdfSent,
    HrmsReceived,
    HrmsRejected,
    DdoReceived,
    DdoRejected,
}

impl TransactionStatus for GemsStatus {
    const ALL: &'static [Self] = &[
        GemsStatus::JsonSent,
        GemsStatus::PdfSent,
        GemsStatus::HrmsReceived,
        GemsStatus::HrmsRejected,
        GemsStatus::DdoReceived,
        GemsStatus::DdoRejected,
    ];

    fn as_str(self) -> &'static str {
        match self {
            GemsStatus::JsonSent => "JSON_SENT",
            GemsStatus::PdfSent => "PDF_SENT",
            GemsStatus::HrmsReceived => "HRMS_RECEIVED",
            GemsStatus::HrmsRejected => "HRMS_REJECTED",
            GemsStatus::DdoReceived => "DDO_RECEIVED",
            GemsStatus::DdoRejected => "DDO_REJECTED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            GemsStatus::JsonSent => "JSON Sent",
            GemsStatus::PdfSent => "PDF Sent",
            GemsStatus::HrmsReceived => "HRMS Received",
            GemsStatus::HrmsRejected => "HRMS Rejection",
            GemsStatus::DdoReceived => "DDO Received",
            GemsStatus::DdoRejected => "DDO Rejected",
        }
    }

    fn color(self) -> &'static str {
        match self {
            GemsStatus::JsonSent => "#3B82F6",
            GemsStatus::PdfSent => "#0EA5E9",
            GemsStatus::HrmsReceived => "#22C55E",
            GemsStatus::HrmsRejected => "#EF4444",
            GemsStatus::DdoReceived => "#84CC16",
            GemsStatus::DdoRejected => "#F97316",
        }
    }
}

impl Display for GemsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GemsTransaction {
    #[serde(alias = "TRANSACTION_ID")]
    pub transaction_id: String,
    #[serde(alias = "GE_NUMBER")]
    pub ge_number: String,
    #[serde(alias = "EVENT_ID")]
    pub event_id: String,
    #[serde(alias = "EVENT_NAME")]
    pub event_name: String,
    #[serde(alias = "FILE_ID")]
    pub file_id: String,
    #[serde(alias = "PDF_FILE_NAME", default)]
    pub pdf_file_name: Option<String>,
    #[serde(alias = "JSONSENTDATE")]
    pub json_sent_date: String,
    pub status: GemsStatus,
}

impl TransactionRecord for GemsTransaction {
    type Status = GemsStatus;
    type Criteria = GemsCriteria;

    const ENDPOINT: &'static str = "gems";
    const TITLE: &'static str = "GEMS";

    fn status(&self) -> GemsStatus {
        self.status
    }
}

/// Filters available on the GEMS dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GemsCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ge_number: Option<TextFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<TextFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<IsoDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<IsoDate>,
}

impl GemsCriteria {
    pub fn ge_number(mut self, value: &str) -> Self {
        self.ge_number = TextFilter::from_input(Some(value));
        self
    }

    pub fn event_name(mut self, value: &str) -> Self {
        self.event_name = TextFilter::from_input(Some(value));
        self
    }

    pub fn between(mut self, from: Option<IsoDate>, to: Option<IsoDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }
}
