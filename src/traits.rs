//! Traits for record capabilities and ingestion abstraction

use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};

use crate::parser::Parsed;
use crate::types::*;

/// Anything that can be placed on a timeline for date-range filtering
pub trait Dated {
    /// Point in time used for range membership
    fn timestamp(&self) -> NaiveDateTime;
}

impl Dated for LedgerEntry {
    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Dated for StatementEntry {
    /// Statement lines carry no time of day, so they sit at midnight
    fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

/// Ingestion abstraction for a reconciliation run
///
/// This trait lets the reconciler work with any origin of records (files on
/// disk, uploaded buffers, in-memory fixtures) by implementing these methods.
/// Statement entries from every feed are returned already merged.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load the system ledger
    async fn ledger_entries(&self) -> ReconcileResult<Parsed<LedgerEntry>>;

    /// Load and merge all statement feeds
    async fn statement_entries(&self) -> ReconcileResult<Parsed<StatementEntry>>;
}
