use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::domain::types::{IsoDate, TextFilter};

/// Processing stage of a GPF transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GpfStatus {
    JsonSent,
    HrmsReceived,
    HrmsRejected,
}

impl TransactionStatus for GpfStatus {
    const ALL: &'static [Self] = &[
        GpfStatus::JsonSent,
        GpfStatus::HrmsReceived,
        GpfStatus::HrmsRejected,
    ];

    fn as_str(self) -> &'static str {
        match self {
            GpfStatus::JsonSent => "JSON_SENT",
            GpfStatus::HrmsReceived => "HRMS_RECEIVED",
            GpfStatus::HrmsRejected => "HRMS_REJECTED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            GpfStatus::JsonSent => "JSON Sent",
            GpfStatus::HrmsReceived => "HRMS Acceptance",
            GpfStatus::HrmsRejected => "HRMS Rejection",
        }
    }

    fn color(self) -> &'static str {
        match self {
            GpfStatus::JsonSent => "#3B82F6",
            GpfStatus::HrmsReceived => "#0EA5E9",
            GpfStatus::HrmsRejected => "#EF4444",
        }
    }
}

impl Display for GpfStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GpfTransaction {
    #[serde(alias = "TRANSACTION_ID")]
    pub transaction_id: String,
    #[serde(alias = "GPF_ID")]
    pub gpf_id: String,
    #[serde(alias = "KGID")]
    pub kgid: String,
    #[serde(alias = "NAME")]
    pub name: String,
    #[serde(alias = "DATE_OF_BIRTH")]
    pub date_of_birth: String,
    #[serde(alias = "JOINING_DATE")]
    pub joining_date: String,
    #[serde(alias = "POLICY_NO", default)]
    pub policy_no: Option<String>,
    #[serde(alias = "POLICY_START_DATE", default)]
    pub policy_start_date: Option<String>,
    #[serde(alias = "JSON_SENT_DATE")]
    pub json_sent_date: String,
    pub status: GpfStatus,
}

impl TransactionRecord for GpfTransaction {
    type Status = GpfStatus;
    type Criteria = GpfCriteria;

    const ENDPOINT: &'static str = "gpf";
    const TITLE: &'static str = "GPF";

    fn status(&self) -> GpfStatus {
        self.status
    }
}

/// Filters available on the GPF dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpfCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kgid: Option<TextFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<IsoDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<IsoDate>,
}

impl GpfCriteria {
    pub fn kgid(mut self, value: &str) -> Self {
        self.kgid = TextFilter::from_input(Some(value));
        self
    }

    pub fn between(mut self, from: Option<IsoDate>, to: Option<IsoDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }
}
