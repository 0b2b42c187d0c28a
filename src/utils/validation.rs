//! Validation utilities for ingestion input

use crate::config::BoundaryMode;
use crate::filter::DateRange;
use crate::types::*;

/// Validate user supplied `start_date` and `end_date` and build the range
pub fn validate_date_range(
    start_date: &str,
    end_date: &str,
    boundary: BoundaryMode,
) -> ReconcileResult<DateRange> {
    if start_date.trim().is_empty() || end_date.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "both start_date and end_date are required".to_string(),
        ));
    }

    DateRange::parse(start_date, end_date, boundary)
}

/// Validate that an uploaded feed is a CSV file
pub fn validate_feed_file_name(file_name: &str) -> ReconcileResult<()> {
    if file_name.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "file name cannot be empty".to_string(),
        ));
    }

    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(ReconcileError::Validation(format!(
            "invalid file type: '{}' is not a .csv file",
            file_name
        )));
    }

    Ok(())
}
