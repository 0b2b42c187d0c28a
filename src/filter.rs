//! Date range filtering shared by every record shape

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::{BoundaryMode, DEFAULT_DATE_FORMAT};
use crate::traits::Dated;
use crate::types::*;

/// Reconciliation window from the first instant of `start` to the last second of `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub boundary: BoundaryMode,
}

impl DateRange {
    /// Build a range covering `start` 00:00:00 through `end` 23:59:59
    pub fn new(start: NaiveDate, end: NaiveDate, boundary: BoundaryMode) -> ReconcileResult<Self> {
        if end < start {
            return Err(ReconcileError::Validation(
                "end_date cannot be before start_date".to_string(),
            ));
        }

        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| ReconcileError::Validation("invalid end of day".to_string()))?;

        Ok(Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(end_of_day),
            boundary,
        })
    }

    /// Parse `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str, boundary: BoundaryMode) -> ReconcileResult<Self> {
        let start = NaiveDate::parse_from_str(start.trim(), DEFAULT_DATE_FORMAT).map_err(|_| {
            ReconcileError::Validation("invalid start_date format: use YYYY-MM-DD".to_string())
        })?;
        let end = NaiveDate::parse_from_str(end.trim(), DEFAULT_DATE_FORMAT).map_err(|_| {
            ReconcileError::Validation("invalid end_date format: use YYYY-MM-DD".to_string())
        })?;

        Self::new(start, end, boundary)
    }

    /// Whether a point in time falls inside the range
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        match self.boundary {
            BoundaryMode::Inclusive => self.start <= at && at <= self.end,
            BoundaryMode::Exclusive => self.start < at && at < self.end,
        }
    }
}

/// Keep the records whose timestamp lies inside `range`, preserving order
pub fn filter_by_date<T: Dated>(entries: Vec<T>, range: &DateRange) -> Vec<T> {
    let before = entries.len();
    let kept: Vec<T> = entries
        .into_iter()
        .filter(|entry| range.contains(entry.timestamp()))
        .collect();

    log::debug!(
        "date filter kept {} of {} records ({} .. {})",
        kept.len(),
        before,
        range.start,
        range.end
    );
    kept
}
