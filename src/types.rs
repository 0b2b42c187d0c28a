//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction as reported by its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Money leaving the account
    Debit,
    /// Money entering the account
    Credit,
}

impl EntryType {
    /// Kind of a bank statement line, derived from the sign of its raw amount
    pub fn from_signed_amount(amount: &BigDecimal) -> Self {
        if *amount < BigDecimal::from(0) {
            EntryType::Credit
        } else {
            EntryType::Debit
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::Debit => f.write_str("DEBIT"),
            EntryType::Credit => f.write_str("CREDIT"),
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBIT" => Ok(EntryType::Debit),
            "CREDIT" => Ok(EntryType::Credit),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// Internal ("system") transaction taken from the ledger export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier, unique within the ledger
    #[serde(rename = "trx_id")]
    pub id: String,
    /// Signed amount as recorded by the system
    pub amount: BigDecimal,
    /// DEBIT or CREDIT
    #[serde(rename = "type")]
    pub kind: EntryType,
    /// Date and time the transaction was booked
    #[serde(rename = "transaction_time")]
    pub timestamp: NaiveDateTime,
}

impl LedgerEntry {
    /// Create a new ledger entry
    pub fn new(id: String, amount: BigDecimal, kind: EntryType, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            amount,
            kind,
            timestamp,
        }
    }

    /// Amount as a non-negative magnitude, the only form used for matching
    pub fn magnitude(&self) -> BigDecimal {
        self.amount.abs()
    }
}

/// Bank statement line taken from one statement feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Identifier, unique within a single feed only
    #[serde(rename = "unique_identifier")]
    pub id: String,
    /// Non-negative magnitude of the raw amount
    pub amount: BigDecimal,
    /// Derived from the sign of the raw amount
    #[serde(rename = "type")]
    pub kind: EntryType,
    /// Value date, day granularity
    pub date: NaiveDate,
    /// Label of the feed this line came from
    #[serde(rename = "bank")]
    pub feed: String,
}

impl StatementEntry {
    /// Build a statement entry from a raw signed amount.
    ///
    /// The sign decides the kind (negative is CREDIT) and is then dropped.
    pub fn from_signed(id: String, raw_amount: BigDecimal, date: NaiveDate, feed: String) -> Self {
        let kind = EntryType::from_signed_amount(&raw_amount);
        Self {
            id,
            amount: raw_amount.abs(),
            kind,
            date,
            feed,
        }
    }
}

/// A row-level problem found while parsing a feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    /// Feed label or file the row came from
    pub source: String,
    /// 1-based line number in the input, header included
    pub line: u64,
    /// Column name of the offending field
    pub field: String,
    /// Raw text of the field
    pub value: String,
    /// Why the field was rejected
    pub reason: String,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line {}: invalid {} '{}': {}",
            self.source, self.line, self.field, self.value, self.reason
        )
    }
}

/// A ledger entry whose identifier was found in more than one statement line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousMatch {
    /// The shared identifier
    pub identifier: String,
    /// Feed label of every candidate, in arrival order
    pub feeds: Vec<String>,
    /// Feed label of the candidate that was consumed
    pub chosen_feed: String,
}

/// Errors that can occur during a reconciliation run
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid row: {0}")]
    Row(RowWarning),
}

impl From<csv::Error> for ReconcileError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => ReconcileError::Io(io),
                other => ReconcileError::Format(format!("{:?}", other)),
            }
        } else {
            ReconcileError::Format(err.to_string())
        }
    }
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
