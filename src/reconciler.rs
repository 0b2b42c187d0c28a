//! Reconciliation run orchestrator: parse, filter, match, aggregate

use std::path::Path;

use crate::config::ReconcileConfig;
use crate::filter::{filter_by_date, DateRange};
use crate::matching::MatchingEngine;
use crate::parser::{parse_ledger_path, parse_statement_path, Parsed};
use crate::report::ReconciliationReport;
use crate::traits::*;
use crate::types::*;

/// Drives a full reconciliation run with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
    engine: MatchingEngine,
}

impl Reconciler {
    /// Create a reconciler with the given configuration
    pub fn new(config: ReconcileConfig) -> Self {
        Self {
            config,
            engine: MatchingEngine::new(),
        }
    }

    /// Configuration this reconciler parses and filters with
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Parse `YYYY-MM-DD` bounds using the configured boundary mode
    pub fn date_range(&self, start: &str, end: &str) -> ReconcileResult<DateRange> {
        DateRange::parse(start, end, self.config.boundary)
    }

    /// Reconcile already-parsed records within `range`.
    ///
    /// Warnings from both sides are carried into the report, including those
    /// of rows the date filter later dropped.
    pub fn reconcile(
        &self,
        ledger: Parsed<LedgerEntry>,
        statements: Parsed<StatementEntry>,
        range: &DateRange,
    ) -> ReconciliationReport {
        let mut warnings = ledger.warnings;
        warnings.extend(statements.warnings);

        let ledger = filter_by_date(ledger.records, range);
        let statements = filter_by_date(statements.records, range);

        let outcome = self.engine.match_entries(ledger, statements);
        let report = ReconciliationReport::from_outcome(outcome, warnings);

        log::info!(
            "reconciliation finished: processed={} matched={} unmatched={} discrepancies={}",
            report.total_processed,
            report.matched,
            report.unmatched,
            report.discrepancies
        );
        report
    }

    /// Reconcile a ledger file against one or more statement files
    pub fn reconcile_files<P: AsRef<Path>>(
        &self,
        ledger_path: impl AsRef<Path>,
        statement_paths: &[P],
        start: &str,
        end: &str,
    ) -> ReconcileResult<ReconciliationReport> {
        let range = self.date_range(start, end)?;
        let ledger = parse_ledger_path(ledger_path, &self.config)?;
        let statements: Parsed<StatementEntry> = statement_paths
            .iter()
            .map(|path| parse_statement_path(path, &self.config))
            .collect::<ReconcileResult<Vec<_>>>()?
            .into_iter()
            .collect();

        Ok(self.reconcile(ledger, statements, &range))
    }

    /// Load records from `source` and reconcile them within `range`
    pub async fn run<S>(&self, source: &S, range: &DateRange) -> ReconcileResult<ReconciliationReport>
    where
        S: RecordSource + ?Sized,
    {
        let ledger = source.ledger_entries().await?;
        let statements = source.statement_entries().await?;
        log::debug!(
            "loaded {} ledger entries and {} statement lines",
            ledger.len(),
            statements.len()
        );

        Ok(self.reconcile(ledger, statements, range))
    }
}
