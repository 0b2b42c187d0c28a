//! Reconciliation report and its presentation forms

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::matching::MatchOutcome;
use crate::types::*;

/// Final result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Ledger entries considered after date filtering
    pub total_processed: usize,
    pub matched: usize,
    /// Unmatched ledger entries plus unmatched statement lines
    pub unmatched: usize,
    /// Sum of absolute amount differences over matched pairs
    pub discrepancies: BigDecimal,
    #[serde(rename = "umatched_system")]
    pub unmatched_ledger: Vec<LedgerEntry>,
    /// Unmatched statement lines per feed label; feeds with none are absent
    #[serde(rename = "unmatched_by_bank")]
    pub unmatched_by_feed: BTreeMap<String, Vec<StatementEntry>>,
    #[serde(default)]
    pub ambiguous: Vec<AmbiguousMatch>,
    #[serde(default)]
    pub warnings: Vec<RowWarning>,
}

impl ReconciliationReport {
    /// Aggregate a matching outcome and the parse warnings of the run
    pub fn from_outcome(outcome: MatchOutcome, warnings: Vec<RowWarning>) -> Self {
        let unmatched = outcome.unmatched_ledger.len() + outcome.unmatched_statements.len();

        let unmatched_by_feed = outcome.unmatched_statements.into_iter().fold(
            BTreeMap::<String, Vec<StatementEntry>>::new(),
            |mut groups, entry| {
                groups.entry(entry.feed.clone()).or_default().push(entry);
                groups
            },
        );

        Self {
            total_processed: outcome.total_processed,
            matched: outcome.matched,
            unmatched,
            discrepancies: outcome.discrepancies,
            unmatched_ledger: outcome.unmatched_ledger,
            unmatched_by_feed,
            ambiguous: outcome.ambiguous,
            warnings,
        }
    }

    /// Statement lines left unmatched across all feeds
    pub fn unmatched_statement_count(&self) -> usize {
        self.unmatched_by_feed.values().map(Vec::len).sum()
    }

    /// True when every record on both sides found a partner at the same amount
    pub fn is_fully_reconciled(&self) -> bool {
        self.unmatched == 0 && self.discrepancies == BigDecimal::from(0)
    }
}

impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reconciliation Summary")?;
        writeln!(f, "-----------------------")?;
        writeln!(f, "Total transactions processed: {}", self.total_processed)?;
        writeln!(f, "Total matched transactions: {}", self.matched)?;
        writeln!(f, "Total unmatched transactions: {}", self.unmatched)?;
        writeln!(
            f,
            "Total discrepancies: {}",
            self.discrepancies.round(2).with_scale(2)
        )?;

        writeln!(f)?;
        writeln!(f, "Unmatched System Transactions:")?;
        for entry in &self.unmatched_ledger {
            writeln!(
                f,
                "  {} {} {} {}",
                entry.id, entry.amount, entry.kind, entry.timestamp
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Unmatched By Bank Transactions:")?;
        for (feed, entries) in &self.unmatched_by_feed {
            writeln!(f, "{}", feed)?;
            for entry in entries {
                writeln!(f, "  {} {} {} {}", entry.id, entry.amount, entry.kind, entry.date)?;
            }
        }

        if !self.ambiguous.is_empty() {
            writeln!(f)?;
            writeln!(f, "Ambiguous Matches:")?;
            for item in &self.ambiguous {
                writeln!(
                    f,
                    "  {} in [{}], matched {}",
                    item.identifier,
                    item.feeds.join(", "),
                    item.chosen_feed
                )?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  {}", warning)?;
            }
        }

        Ok(())
    }
}

/// Plain-text summary for terminal output
pub fn render_summary(report: &ReconciliationReport) -> String {
    report.to_string()
}

/// JSON envelope returned by the upload service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<ReconciliationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(report: ReconciliationReport) -> Self {
        Self {
            success: true,
            data: Some(report),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl From<ReconcileResult<ReconciliationReport>> for ApiResponse {
    fn from(result: ReconcileResult<ReconciliationReport>) -> Self {
        match result {
            Ok(report) => ApiResponse::success(report),
            Err(err) => ApiResponse::failure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn statement(id: &str, feed: &str) -> StatementEntry {
        StatementEntry::from_signed(
            id.to_string(),
            BigDecimal::from(5),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            feed.to_string(),
        )
    }

    fn outcome(statements: Vec<StatementEntry>) -> MatchOutcome {
        MatchOutcome {
            total_processed: 2,
            matched: 2,
            discrepancies: BigDecimal::from(50),
            unmatched_ledger: Vec::new(),
            unmatched_statements: statements,
            ambiguous: Vec::new(),
        }
    }

    #[test]
    fn test_grouping_by_feed() {
        let report = ReconciliationReport::from_outcome(
            outcome(vec![
                statement("B1", "BCA"),
                statement("B2", "BNI"),
                statement("B3", "BCA"),
            ]),
            Vec::new(),
        );

        assert_eq!(report.unmatched, 3);
        assert_eq!(report.unmatched_statement_count(), 3);
        assert_eq!(report.unmatched_by_feed.len(), 2);
        let bca: Vec<&str> = report.unmatched_by_feed["BCA"]
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(bca, vec!["B1", "B3"]);
    }

    #[test]
    fn test_no_empty_feed_groups() {
        let report = ReconciliationReport::from_outcome(outcome(Vec::new()), Vec::new());
        assert!(report.unmatched_by_feed.is_empty());
        assert_eq!(report.unmatched, 0);
        assert!(!report.is_fully_reconciled());
    }

    #[test]
    fn test_json_field_names() {
        let report =
            ReconciliationReport::from_outcome(outcome(vec![statement("B1", "BCA")]), Vec::new());
        let value = serde_json::to_value(ApiResponse::success(report)).unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        let data = &value["data"];
        assert_eq!(data["total_processed"], 2);
        assert_eq!(data["unmatched"], 1);
        assert!(data["umatched_system"].is_array());
        let line = &data["unmatched_by_bank"]["BCA"][0];
        assert_eq!(line["unique_identifier"], "B1");
        assert_eq!(line["type"], "DEBIT");
        assert_eq!(line["bank"], "BCA");
    }

    #[test]
    fn test_failure_envelope() {
        let response: ApiResponse =
            Err(ReconcileError::Validation("end_date cannot be before start_date".into())).into();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert!(value["data"].is_null());
        assert_eq!(
            value["error"],
            "Validation error: end_date cannot be before start_date"
        );
    }

    #[test]
    fn test_summary_text() {
        let report =
            ReconciliationReport::from_outcome(outcome(vec![statement("B1", "BCA")]), Vec::new());
        let text = render_summary(&report);

        assert!(text.starts_with("Reconciliation Summary\n"));
        assert!(text.contains("Total transactions processed: 2\n"));
        assert!(text.contains("Total discrepancies: 50.00\n"));
        assert!(text.contains("BCA\n  B1 5 DEBIT 2024-01-01\n"));
        assert!(!text.contains("Warnings:"));
    }
}
