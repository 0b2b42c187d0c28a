//! Run configuration

use serde::{Deserialize, Serialize};

/// How records sitting exactly on a range bound are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// `start <= t <= end`
    #[default]
    Inclusive,
    /// `start < t < end`, drops records at midnight of the start day
    Exclusive,
}

/// What to do with a row whose fields fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Keep the row with the bad field zeroed, and record a warning
    #[default]
    Lenient,
    /// Drop the row and record a warning
    Skip,
    /// Abort the run on the first bad field
    Strict,
}

/// Options for a reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// How the date range treats its start and end instants
    pub boundary: BoundaryMode,
    /// What to do with rows that fail to parse
    pub row_policy: RowPolicy,
    /// chrono format of the ledger timestamp column
    pub ledger_timestamp_format: String,
    /// chrono format of the statement date column
    pub statement_date_format: String,
}

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryMode::default(),
            row_policy: RowPolicy::default(),
            ledger_timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            statement_date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ReconcileConfig {
    /// Use `boundary` for date filtering
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Use `row_policy` for malformed rows
    pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
        self.row_policy = row_policy;
        self
    }
}
