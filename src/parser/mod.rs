//! Record parser turning tabular feeds into typed entries
//!
//! Every feed is CSV with a header row, which is discarded. Row-level field
//! failures are handled according to [`RowPolicy`]; only I/O failures and
//! undecodable CSV abort a parse outright.

pub mod ledger;
pub mod statement;

pub use ledger::*;
pub use statement::*;

use bigdecimal::BigDecimal;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::config::{ReconcileConfig, RowPolicy};
use crate::types::*;

/// Largest accepted number of fractional digits (or trailing zeros) in an amount
pub const MAX_AMOUNT_SCALE: i64 = 18;

/// Records parsed from one or more feeds, with any row-level warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parsed<T> {
    /// Parsed entries in input order
    pub records: Vec<T>,
    /// Row-level problems met while parsing
    pub warnings: Vec<RowWarning>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T> Parsed<T> {
    /// Wrap records that carry no warnings
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    /// Append another parse result, keeping its record order
    pub fn merge(&mut self, other: Parsed<T>) {
        self.records.extend(other.records);
        self.warnings.extend(other.warnings);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were parsed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> FromIterator<Parsed<T>> for Parsed<T> {
    fn from_iter<I: IntoIterator<Item = Parsed<T>>>(iter: I) -> Self {
        iter.into_iter().fold(Parsed::default(), |mut acc, part| {
            acc.merge(part);
            acc
        })
    }
}

/// Which record shape a feed holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordShape {
    /// id, amount, type, timestamp
    Ledger,
    /// id, amount, date
    Statement,
}

/// Output of [`parse_path`], one variant per shape
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecords {
    Ledger(Parsed<LedgerEntry>),
    Statement(Parsed<StatementEntry>),
}

/// Parse a feed file of the given shape
pub fn parse_path(
    path: impl AsRef<Path>,
    shape: RecordShape,
    config: &ReconcileConfig,
) -> ReconcileResult<ParsedRecords> {
    match shape {
        RecordShape::Ledger => parse_ledger_path(path, config).map(ParsedRecords::Ledger),
        RecordShape::Statement => {
            parse_statement_path(path, config).map(ParsedRecords::Statement)
        }
    }
}

/// Derive the feed label from a file name.
///
/// Directory and extension are stripped; when the stem contains `_`, the last
/// segment is the label, otherwise the whole stem.
pub fn feed_label(path: impl AsRef<Path>) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match stem.rsplit_once('_') {
        Some((_, last)) => last.to_string(),
        None => stem,
    }
}

/// Field access for one data row, applying the row policy on failures
pub(crate) struct RowFields<'a> {
    source: &'a str,
    line: u64,
    record: &'a StringRecord,
    policy: RowPolicy,
    warnings: Vec<RowWarning>,
}

impl<'a> RowFields<'a> {
    fn new(source: &'a str, record: &'a StringRecord, policy: RowPolicy) -> Self {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        Self {
            source,
            line,
            record,
            policy,
            warnings: Vec::new(),
        }
    }

    /// Raw text of a column, empty when the row is short
    pub(crate) fn text(&self, index: usize) -> &'a str {
        self.record.get(index).unwrap_or("")
    }

    /// Parse a column, substituting `zero` when it is missing or invalid
    pub(crate) fn parse_or<T>(
        &mut self,
        index: usize,
        field: &str,
        zero: T,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> ReconcileResult<T> {
        let result = match self.record.get(index) {
            Some(raw) => parse(raw.trim()),
            None => Err("missing column".to_string()),
        };

        match result {
            Ok(value) => Ok(value),
            Err(reason) => {
                let value = self.text(index).to_string();
                self.reject(field, value, reason)?;
                Ok(zero)
            }
        }
    }

    /// Flag a row whose column count differs from the header
    fn check_width(&mut self, expected: usize) -> ReconcileResult<()> {
        let found = self.record.len();
        if found == expected {
            return Ok(());
        }

        let value = self.record.iter().collect::<Vec<_>>().join(",");
        self.reject(
            "row",
            value,
            format!("expected {} columns, found {}", expected, found),
        )
    }

    /// Record a warning, or fail outright under the strict policy
    fn reject(&mut self, field: &str, value: String, reason: String) -> ReconcileResult<()> {
        let warning = RowWarning {
            source: self.source.to_string(),
            line: self.line,
            field: field.to_string(),
            value,
            reason,
        };
        if self.policy == RowPolicy::Strict {
            return Err(ReconcileError::Row(warning));
        }
        log::warn!("{}", warning);
        self.warnings.push(warning);
        Ok(())
    }
}

/// Parse a decimal amount, refusing exponents that would make arithmetic
/// on it allocate without bound
pub(crate) fn parse_amount(raw: &str) -> Result<BigDecimal, String> {
    let amount = BigDecimal::from_str(raw).map_err(|e| e.to_string())?;
    let (_, scale) = amount.as_bigint_and_exponent();
    if scale.abs() > MAX_AMOUNT_SCALE {
        return Err(format!(
            "amount scale {} outside -{max}..={max}",
            scale,
            max = MAX_AMOUNT_SCALE
        ));
    }
    Ok(amount)
}

/// Decode every data row of a CSV input with `build`.
///
/// The header row is discarded and fixes the expected row width. A row of a
/// different width is a row-level problem handled by the row policy rather
/// than a format error.
pub(crate) fn read_rows<R, T, F>(
    reader: R,
    source: &str,
    policy: RowPolicy,
    mut build: F,
) -> ReconcileResult<Parsed<T>>
where
    R: Read,
    F: FnMut(&mut RowFields<'_>) -> ReconcileResult<T>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let width = rdr.headers()?.len();

    let mut parsed = Parsed::default();
    for result in rdr.records() {
        let record = result?;
        let mut fields = RowFields::new(source, &record, policy);
        fields.check_width(width)?;
        let entry = build(&mut fields)?;

        let row_ok = fields.warnings.is_empty();
        parsed.warnings.append(&mut fields.warnings);
        if row_ok || policy != RowPolicy::Skip {
            parsed.records.push(entry);
        }
    }

    log::debug!(
        "parsed {} rows from {} ({} warnings)",
        parsed.records.len(),
        source,
        parsed.warnings.len()
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_label_from_upload_name() {
        assert_eq!(feed_label("./uploads/bank_20240102_BCA.csv"), "BCA");
        assert_eq!(feed_label("./uploads/bank.csv"), "bank");
        assert_eq!(feed_label("mandiri"), "mandiri");
        assert_eq!(feed_label("/tmp/statements/bank_BNI.txt"), "BNI");
    }

    #[test]
    fn test_parsed_merge_keeps_order() {
        let merged: Parsed<u32> = vec![Parsed::new(vec![1, 2]), Parsed::new(vec![3])]
            .into_iter()
            .collect();
        assert_eq!(merged.records, vec![1, 2, 3]);
        assert!(merged.warnings.is_empty());
    }
}
