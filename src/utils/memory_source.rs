//! In-memory record source for testing and embedding

use async_trait::async_trait;

use crate::config::ReconcileConfig;
use crate::parser::{parse_ledger, parse_statements, Parsed};
use crate::traits::*;
use crate::types::*;

/// Record source over records already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    ledger: Parsed<LedgerEntry>,
    statements: Parsed<StatementEntry>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw CSV content: one ledger buffer and `(feed label, content)` pairs
    pub fn from_csv(
        ledger_csv: &str,
        feeds: &[(&str, &str)],
        config: &ReconcileConfig,
    ) -> ReconcileResult<Self> {
        let ledger = parse_ledger(ledger_csv.as_bytes(), "system", config)?;
        let statements: Parsed<StatementEntry> = feeds
            .iter()
            .map(|(label, content)| parse_statements(content.as_bytes(), label, config))
            .collect::<ReconcileResult<Vec<_>>>()?
            .into_iter()
            .collect();

        Ok(Self { ledger, statements })
    }

    /// Add ledger entries that carry no parse warnings
    pub fn with_ledger(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.ledger.merge(Parsed::new(entries));
        self
    }

    /// Add statement lines that carry no parse warnings
    pub fn with_statements(mut self, entries: Vec<StatementEntry>) -> Self {
        self.statements.merge(Parsed::new(entries));
        self
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn ledger_entries(&self) -> ReconcileResult<Parsed<LedgerEntry>> {
        Ok(self.ledger.clone())
    }

    async fn statement_entries(&self) -> ReconcileResult<Parsed<StatementEntry>> {
        Ok(self.statements.clone())
    }
}
