//! Record source backed by CSV files on disk

use async_trait::async_trait;
use std::path::PathBuf;

use crate::config::ReconcileConfig;
use crate::parser::{parse_ledger_path, parse_statement_path, Parsed};
use crate::traits::*;
use crate::types::*;

/// One ledger file plus any number of statement files.
///
/// Each statement file is labelled from its own file name.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    ledger_path: PathBuf,
    statement_paths: Vec<PathBuf>,
    config: ReconcileConfig,
}

impl CsvFileSource {
    pub fn new(ledger_path: impl Into<PathBuf>, config: ReconcileConfig) -> Self {
        Self {
            ledger_path: ledger_path.into(),
            statement_paths: Vec::new(),
            config,
        }
    }

    /// Add a statement feed file
    pub fn statement(mut self, path: impl Into<PathBuf>) -> Self {
        self.statement_paths.push(path.into());
        self
    }

    pub fn statements<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.statement_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn statement_paths(&self) -> &[PathBuf] {
        &self.statement_paths
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn ledger_entries(&self) -> ReconcileResult<Parsed<LedgerEntry>> {
        parse_ledger_path(&self.ledger_path, &self.config)
    }

    async fn statement_entries(&self) -> ReconcileResult<Parsed<StatementEntry>> {
        let feeds = self
            .statement_paths
            .iter()
            .map(|path| parse_statement_path(path, &self.config))
            .collect::<ReconcileResult<Vec<_>>>()?;

        Ok(feeds.into_iter().collect())
    }
}
