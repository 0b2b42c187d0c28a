//! System ledger feed parsing

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use super::{parse_amount, read_rows, Parsed};
use crate::config::ReconcileConfig;
use crate::types::*;

/// Parse ledger rows: `trx_id, amount, type, transaction_time`
pub fn parse_ledger<R: Read>(
    reader: R,
    source: &str,
    config: &ReconcileConfig,
) -> ReconcileResult<Parsed<LedgerEntry>> {
    let format = config.ledger_timestamp_format.as_str();

    read_rows(reader, source, config.row_policy, |row| {
        let id = row.text(0).to_string();
        let amount = row.parse_or(1, "amount", BigDecimal::from(0), parse_amount)?;
        let kind = row.parse_or(2, "type", EntryType::Debit, EntryType::from_str)?;
        let timestamp = row.parse_or(3, "transaction_time", NaiveDateTime::MIN, |raw| {
            NaiveDateTime::parse_from_str(raw, format).map_err(|e| e.to_string())
        })?;

        Ok(LedgerEntry::new(id, amount, kind, timestamp))
    })
}

/// Parse a ledger file from disk
pub fn parse_ledger_path(
    path: impl AsRef<Path>,
    config: &ReconcileConfig,
) -> ReconcileResult<Parsed<LedgerEntry>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_ledger(BufReader::new(file), &path.to_string_lossy(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RowPolicy;
    use chrono::NaiveDate;

    const LEDGER: &str = "trxID,amount,type,transactionTime\n\
        T1,100.00,DEBIT,2024-01-01 10:00:00\n\
        T2,-200.50,CREDIT,2024-01-02 14:00:00\n";

    #[test]
    fn test_parse_ledger_rows() {
        let parsed = parse_ledger(LEDGER.as_bytes(), "system", &ReconcileConfig::default()).unwrap();

        assert_eq!(parsed.len(), 2);
        assert!(parsed.warnings.is_empty());

        let second = &parsed.records[1];
        assert_eq!(second.id, "T2");
        assert_eq!(second.amount, BigDecimal::from_str("-200.50").unwrap());
        assert_eq!(second.kind, EntryType::Credit);
        assert_eq!(
            second.timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_bad_fields_are_zeroed_with_warnings() {
        let input = "id,amount,type,time\nT1,abc,DEBIT,yesterday\n";
        let parsed = parse_ledger(input.as_bytes(), "system", &ReconcileConfig::default()).unwrap();

        assert_eq!(parsed.len(), 1);
        let entry = &parsed.records[0];
        assert_eq!(entry.amount, BigDecimal::from(0));
        assert_eq!(entry.timestamp, NaiveDateTime::MIN);

        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(parsed.warnings[0].field, "amount");
        assert_eq!(parsed.warnings[0].line, 2);
        assert_eq!(parsed.warnings[1].field, "transaction_time");
    }

    #[test]
    fn test_short_row_is_a_warning() {
        let input = "id,amount,type,time\nT1,10\n";
        let parsed = parse_ledger(input.as_bytes(), "system", &ReconcileConfig::default()).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.warnings.len(), 3);
        assert_eq!(parsed.warnings[0].field, "row");
        assert_eq!(parsed.warnings[0].reason, "expected 4 columns, found 2");
        assert_eq!(parsed.warnings[1].reason, "missing column");
    }

    #[test]
    fn test_extra_columns_are_a_warning() {
        let input = "id,amount,type,time\nT1,100,DEBIT,2024-01-01 10:00:00,junk\n";
        let parsed = parse_ledger(input.as_bytes(), "system", &ReconcileConfig::default()).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.records[0].amount, BigDecimal::from(100));
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].line, 2);
        assert_eq!(parsed.warnings[0].field, "row");
        assert_eq!(parsed.warnings[0].value, "T1,100,DEBIT,2024-01-01 10:00:00,junk");
        assert_eq!(parsed.warnings[0].reason, "expected 4 columns, found 5");

        let skip = ReconcileConfig::default().with_row_policy(RowPolicy::Skip);
        assert!(parse_ledger(input.as_bytes(), "system", &skip).unwrap().is_empty());

        let strict = ReconcileConfig::default().with_row_policy(RowPolicy::Strict);
        match parse_ledger(input.as_bytes(), "system", &strict) {
            Err(ReconcileError::Row(warning)) => assert_eq!(warning.field, "row"),
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn test_extreme_exponent_amount_is_rejected() {
        let input = "id,amount,type,time\n\
            T1,1e-2000000000,DEBIT,2024-01-01 10:00:00\n\
            T2,1e2000000000,DEBIT,2024-01-01 11:00:00\n\
            T3,1.5e3,DEBIT,2024-01-01 12:00:00\n";
        let parsed = parse_ledger(input.as_bytes(), "system", &ReconcileConfig::default()).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.records[0].amount, BigDecimal::from(0));
        assert_eq!(parsed.records[1].amount, BigDecimal::from(0));
        assert_eq!(parsed.records[2].amount, BigDecimal::from(1500));
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed.warnings.iter().all(|w| w.field == "amount"));
        assert!(parsed.warnings[0].reason.starts_with("amount scale 2000000000"));

        let strict = ReconcileConfig::default().with_row_policy(RowPolicy::Strict);
        let result = parse_ledger(input.as_bytes(), "system", &strict);
        assert!(matches!(result, Err(ReconcileError::Row(_))));
    }

    #[test]
    fn test_skip_policy_drops_bad_rows() {
        let input = "id,amount,type,time\nT1,abc,DEBIT,2024-01-01 10:00:00\nT2,5,DEBIT,2024-01-01 11:00:00\n";
        let config = ReconcileConfig::default().with_row_policy(RowPolicy::Skip);
        let parsed = parse_ledger(input.as_bytes(), "system", &config).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.records[0].id, "T2");
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_strict_policy_aborts() {
        let input = "id,amount,type,time\nT1,abc,DEBIT,2024-01-01 10:00:00\n";
        let config = ReconcileConfig::default().with_row_policy(RowPolicy::Strict);
        let result = parse_ledger(input.as_bytes(), "system", &config);

        match result {
            Err(ReconcileError::Row(warning)) => assert_eq!(warning.field, "amount"),
            other => panic!("expected row error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_input() {
        let parsed = parse_ledger("id,amount,type,time\n".as_bytes(), "system", &ReconcileConfig::default())
            .unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = parse_ledger_path("/nonexistent/system.csv", &ReconcileConfig::default());
        assert!(matches!(result, Err(ReconcileError::Io(_))));
    }
}
