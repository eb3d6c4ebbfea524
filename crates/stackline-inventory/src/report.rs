//! Inventory report payloads.
//!
//! The reporting service answers a request window with a flat list of rows:
//!
//! ```json
//! {
//!   "request": { "type": "INVENTORY", "fromDate": 20190112, "toDate": 20190115,
//!                "views": ["category", "season"] },
//!   "data": { "records": [ { "category": "Shirt", "totalunits": 25, "season": "aw18" } ],
//!             "columns": ["sum(totalUnits) as totalUnits", "category", "season"] },
//!   "error": false
//! }
//! ```
//!
//! `views` and `columns` are carried for the caller and never interpreted here.

use serde::{Deserialize, Serialize};
use stackline_core::{CoreResult, Label, MonthRangeLabeler};

use crate::error::{InventoryError, InventoryResult};
use crate::types::Record;

/// The request half of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Request type, e.g. `"INVENTORY"`.
    #[serde(rename = "type", default)]
    pub report_type: String,

    /// Window start as `YYYYMMDD`.
    pub from_date: u32,

    /// Window end as `YYYYMMDD`.
    pub to_date: u32,

    /// Attribute names the caller reports on.
    #[serde(default)]
    pub views: Vec<String>,
}

impl ReportRequest {
    /// Labels this request's window.
    pub fn label(&self, labeler: &MonthRangeLabeler) -> CoreResult<Label> {
        labeler.label_compact(self.from_date, self.to_date)
    }
}

/// The data half of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Flat inventory rows.
    #[serde(default)]
    pub records: Vec<Record>,

    /// Column descriptions from the reporting query.
    #[serde(default)]
    pub columns: Vec<String>,
}

/// A full report payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    /// What was asked for.
    pub request: ReportRequest,

    /// What came back.
    #[serde(default)]
    pub data: ReportData,

    /// Set by the reporting service when the query failed.
    #[serde(default)]
    pub error: bool,
}

impl InventoryReport {
    /// Parses a report from JSON text.
    pub fn from_json(json: &str) -> InventoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rejects a report the service flagged as failed.
    ///
    /// A flagged report is never treated as an empty one.
    pub fn ensure_ok(&self) -> InventoryResult<()> {
        if self.error {
            return Err(InventoryError::ReportFlagged {
                report_type: self.request.report_type.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "request": {
            "type": "INVENTORY",
            "fromDate": 20190112,
            "toDate": 20190115,
            "views": ["category", "colorgroup", "season"]
        },
        "data": {
            "records": [
                { "colorgroup": "Prussian Blue", "totalunits": 25, "category": "Shirt" },
                { "colorgroup": "Prussian Blue", "totalunits": 25, "category": "T-Shirt" }
            ],
            "columns": ["sum(totalUnits) as totalUnits", "category", "colorgroup"]
        },
        "error": false
    }"#;

    #[test]
    fn test_parse_payload() {
        let report = InventoryReport::from_json(PAYLOAD).unwrap();
        assert_eq!(report.request.report_type, "INVENTORY");
        assert_eq!(report.request.from_date, 20190112);
        assert_eq!(report.request.views, ["category", "colorgroup", "season"]);
        assert_eq!(report.data.records.len(), 2);
        assert_eq!(report.data.columns.len(), 3);
        assert!(report.ensure_ok().is_ok());
    }

    #[test]
    fn test_request_label() {
        let report = InventoryReport::from_json(PAYLOAD).unwrap();
        let label = report.request.label(&MonthRangeLabeler::default()).unwrap();
        assert_eq!(label.as_str(), "Jan");
    }

    #[test]
    fn test_flagged_report_is_rejected() {
        let mut report = InventoryReport::from_json(PAYLOAD).unwrap();
        report.error = true;
        assert!(matches!(
            report.ensure_ok(),
            Err(InventoryError::ReportFlagged { .. })
        ));
    }

    #[test]
    fn test_malformed_payload() {
        let err = InventoryReport::from_json(r#"{ "request": { "fromDate": "soon" } }"#).unwrap_err();
        assert!(matches!(err, InventoryError::Json(_)));
    }

    #[test]
    fn test_missing_data_is_empty() {
        let report = InventoryReport::from_json(
            r#"{ "request": { "type": "INVENTORY", "fromDate": 20190101, "toDate": 20190301 } }"#,
        )
        .unwrap();
        assert!(report.data.records.is_empty());
        assert!(report.request.views.is_empty());
    }
}
