//! Bank statement feed parsing

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{feed_label, parse_amount, read_rows, Parsed};
use crate::config::ReconcileConfig;
use crate::types::*;

/// Parse statement rows: `unique_identifier, amount, date`.
///
/// Every entry is tagged with `feed`. Amounts are stored as magnitudes and
/// the sign becomes the entry kind.
pub fn parse_statements<R: Read>(
    reader: R,
    feed: &str,
    config: &ReconcileConfig,
) -> ReconcileResult<Parsed<StatementEntry>> {
    let format = config.statement_date_format.as_str();

    read_rows(reader, feed, config.row_policy, |row| {
        let id = row.text(0).to_string();
        let raw_amount = row.parse_or(1, "amount", BigDecimal::from(0), parse_amount)?;
        let date = row.parse_or(2, "date", NaiveDate::MIN, |raw| {
            NaiveDate::parse_from_str(raw, format).map_err(|e| e.to_string())
        })?;

        Ok(StatementEntry::from_signed(
            id,
            raw_amount,
            date,
            feed.to_string(),
        ))
    })
}

/// Parse a statement file from disk, labelling it from its file name
pub fn parse_statement_path(
    path: impl AsRef<Path>,
    config: &ReconcileConfig,
) -> ReconcileResult<Parsed<StatementEntry>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_statements(BufReader::new(file), &feed_label(path), config)
}
