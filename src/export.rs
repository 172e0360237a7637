//! CSV export of the rows currently visible on a dashboard.

use serde::Serialize;
use thiserror::Error;

use crate::domain::record::TransactionRecord;

/// Notice shown instead of a download when nothing is visible.
pub const EMPTY_EXPORT_NOTICE: &str = "No data to download.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer could not be flushed: {0}")]
    Flush(String),
}

/// File name offered for the download, e.g. `gems_transactions.csv`.
pub fn export_file_name<R: TransactionRecord>() -> String {
    format!("{}_transactions.csv", R::ENDPOINT)
}

/// Serializes `records` as CSV with a header row of wire field names.
///
/// Returns `Ok(None)` when there is nothing to export. Absent optional
/// fields become empty cells.
pub fn export_csv<T: Serialize>(records: &[T]) -> Result<Option<Vec<u8>>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(Some(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gems::{GemsStatus, GemsTransaction};
    use crate::domain::gpf::GpfTransaction;

    fn gems(id: &str, pdf: Option<&str>) -> GemsTransaction {
        GemsTransaction {
            transaction_id: id.to_string(),
            ge_number: "GE20240001".to_string(),
            event_id: "EVT001".to_string(),
            event_name: "Promotion".to_string(),
            file_id: "FILE001".to_string(),
            pdf_file_name: pdf.map(str::to_string),
            json_sent_date: "2024-03-01".to_string(),
            status: GemsStatus::HrmsRejected,
        }
    }

    #[test]
    fn nothing_to_export_yields_no_file() {
        let rows: Vec<GemsTransaction> = Vec::new();
        assert!(export_csv(&rows).unwrap().is_none());
    }

    #[test]
    fn header_uses_wire_names_and_missing_fields_are_blank() {
        let rows = vec![gems("TXN000001", None), gems("TXN000002", Some("a.pdf"))];
        let bytes = export_csv(&rows).unwrap().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "transactionId,geNumber,eventId,eventName,fileId,pdfFileName,jsonSentDate,status"
        );
        assert_eq!(
            lines[1],
            "TXN000001,GE20240001,EVT001,Promotion,FILE001,,2024-03-01,HRMS_REJECTED"
        );
        assert!(lines[2].contains(",a.pdf,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn file_names_follow_the_record_kind() {
        assert_eq!(export_file_name::<GemsTransaction>(), "gems_transactions.csv");
        assert_eq!(export_file_name::<GpfTransaction>(), "gpf_transactions.csv");
    }
}
