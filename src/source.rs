use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::models::{CardRow, CheckingRow};

/// Capability for pulling one period's raw account activity.
///
/// Implementations must return rows sorted ascending by posting date; the
/// classifier reads the latest date off the last row of each set.
pub trait TransactionSource {
    fn pull_checking(&self, month: u32, year: i32) -> Result<Vec<CheckingRow>>;
    fn pull_credit_card(&self, month: u32, year: i32) -> Result<Vec<CardRow>>;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_pull(account: &'static str, reason: impl Into<String>) -> TrackerError {
    TrackerError::DataPull {
        account,
        reason: reason.into(),
    }
}

pub fn parse_date_mdy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

fn open_reader(path: &Path, account: &'static str) -> Result<csv::Reader<BufReader<File>>> {
    if !path.exists() {
        return Err(data_pull(
            account,
            format!("missing export file {}", path.display()),
        ));
    }
    let file = File::open(path)?;
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file)))
}

fn column_index(
    headers: &csv::StringRecord,
    account: &'static str,
    name: &str,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| data_pull(account, format!("column \"{name}\" not found in export")))
}

fn field_date(
    record: &csv::StringRecord,
    idx: usize,
    account: &'static str,
    column: &str,
) -> Result<NaiveDate> {
    let raw = record.get(idx).unwrap_or("");
    parse_date_mdy(raw)
        .ok_or_else(|| data_pull(account, format!("unexpected value in \"{column}\": \"{raw}\"")))
}

fn field_amount(
    record: &csv::StringRecord,
    idx: usize,
    account: &'static str,
) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    parse_amount(raw)
        .ok_or_else(|| data_pull(account, format!("unexpected value in \"Amount\": \"{raw}\"")))
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Flat-file source
// ---------------------------------------------------------------------------

/// Reads Chase-style CSV exports dropped under
/// `{root}/{year}/{MM}_Transaction_Data/`.
pub struct FlatFileSource {
    root: PathBuf,
}

impl FlatFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn period_file(&self, prefix: &str, month: u32, year: i32) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(format!("{month:02}_Transaction_Data"))
            .join(format!("{prefix}_{month:02}.csv"))
    }
}

impl TransactionSource for FlatFileSource {
    fn pull_checking(&self, month: u32, year: i32) -> Result<Vec<CheckingRow>> {
        const ACCOUNT: &str = "checking account";
        let path = self.period_file("checking", month, year);
        let mut rdr = open_reader(&path, ACCOUNT)?;

        let headers = rdr.headers()?.clone();
        let idx_details = column_index(&headers, ACCOUNT, "Details")?;
        let idx_date = column_index(&headers, ACCOUNT, "Posting Date")?;
        let idx_desc = column_index(&headers, ACCOUNT, "Description")?;
        let idx_amount = column_index(&headers, ACCOUNT, "Amount")?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            rows.push(CheckingRow {
                details: record.get(idx_details).unwrap_or("").trim().to_string(),
                posting_date: field_date(&record, idx_date, ACCOUNT, "Posting Date")?,
                description: record.get(idx_desc).unwrap_or("").trim().to_string(),
                amount: field_amount(&record, idx_amount, ACCOUNT)?,
            });
        }
        rows.sort_by_key(|r| r.posting_date);
        Ok(rows)
    }

    fn pull_credit_card(&self, month: u32, year: i32) -> Result<Vec<CardRow>> {
        const ACCOUNT: &str = "credit card";
        let path = self.period_file("credit_card", month, year);
        let mut rdr = open_reader(&path, ACCOUNT)?;

        let headers = rdr.headers()?.clone();
        let idx_type = column_index(&headers, ACCOUNT, "Type")?;
        let idx_date = column_index(&headers, ACCOUNT, "Post Date")?;
        let idx_desc = column_index(&headers, ACCOUNT, "Description")?;
        let idx_amount = column_index(&headers, ACCOUNT, "Amount")?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if is_blank(&record) {
                continue;
            }
            rows.push(CardRow {
                card_type: record.get(idx_type).unwrap_or("").trim().to_string(),
                posting_date: field_date(&record, idx_date, ACCOUNT, "Post Date")?,
                description: record.get(idx_desc).unwrap_or("").trim().to_string(),
                amount: field_amount(&record, idx_amount, ACCOUNT)?,
            });
        }
        rows.sort_by_key(|r| r.posting_date);
        Ok(rows)
    }
}

#[cfg(test)]
pub mod testutil {
    use super::*;
    use crate::models::{CardRow, CheckingRow};

    /// In-memory source for classifier and tracker tests. Rows are handed
    /// back as given, so fixtures must already be date-sorted.
    #[derive(Default)]
    pub struct StubSource {
        pub checking: Vec<CheckingRow>,
        pub card: Vec<CardRow>,
    }

    impl TransactionSource for StubSource {
        fn pull_checking(&self, _month: u32, _year: i32) -> Result<Vec<CheckingRow>> {
            Ok(self.checking.clone())
        }

        fn pull_credit_card(&self, _month: u32, _year: i32) -> Result<Vec<CardRow>> {
            Ok(self.card.clone())
        }
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn checking(details: &str, date: NaiveDate, desc: &str, amount: f64) -> CheckingRow {
        CheckingRow {
            details: details.to_string(),
            posting_date: date,
            description: desc.to_string(),
            amount,
        }
    }

    pub fn card(card_type: &str, date: NaiveDate, desc: &str, amount: f64) -> CardRow {
        CardRow {
            card_type: card_type.to_string(),
            posting_date: date,
            description: desc.to_string(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_source_file(root: &Path, year: i32, month: u32, name: &str, content: &str) {
        let dir = root
            .join(year.to_string())
            .join(format!("{month:02}_Transaction_Data"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    const CHECKING_HEADER: &str =
        "Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #\n";
    const CARD_HEADER: &str =
        "Transaction Date,Post Date,Description,Category,Type,Amount,Memo\n";

    #[test]
    fn test_parse_date_mdy() {
        assert_eq!(
            parse_date_mdy("07/05/2026"),
            NaiveDate::from_ymd_opt(2026, 7, 5)
        );
        assert_eq!(parse_date_mdy("02/30/2026"), None);
        assert_eq!(parse_date_mdy("2026-07-05"), None);
        assert_eq!(parse_date_mdy("garbage"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("-42.50"), Some(-42.5));
        assert_eq!(parse_amount("$500.00"), Some(500.0));
        assert_eq!(parse_amount("(50.00)"), Some(-50.0));
        assert_eq!(parse_amount("not_a_number"), None);
    }

    #[test]
    fn test_pull_checking_parses_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{CHECKING_HEADER}\
             DEBIT,07/10/2026,AMAZON MKTPL,-20.00,ACH_DEBIT,980.00,\n\
             CREDIT,07/01/2026,ACME CORP PAYROLL,2000.00,ACH_CREDIT,1000.00,\n"
        );
        write_source_file(dir.path(), 2026, 7, "checking_07.csv", &content);

        let source = FlatFileSource::new(dir.path());
        let rows = source.pull_checking(7, 2026).unwrap();
        assert_eq!(rows.len(), 2);
        // Sorted ascending even though the export listed newest first
        assert_eq!(rows[0].description, "ACME CORP PAYROLL");
        assert_eq!(rows[0].details, "CREDIT");
        assert_eq!(rows[1].amount, -20.0);
    }

    #[test]
    fn test_pull_credit_card_reads_post_date() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{CARD_HEADER}\
             07/03/2026,07/04/2026,KROGER #123,Groceries,Sale,-55.20,\n\
             07/05/2026,07/06/2026,Payment Thank You - Web,,Payment,600.00,\n"
        );
        write_source_file(dir.path(), 2026, 7, "credit_card_07.csv", &content);

        let source = FlatFileSource::new(dir.path());
        let rows = source.pull_credit_card(7, 2026).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].posting_date, NaiveDate::from_ymd_opt(2026, 7, 4).unwrap());
        assert_eq!(rows[0].card_type, "Sale");
        assert_eq!(rows[1].card_type, "Payment");
    }

    #[test]
    fn test_missing_file_is_a_data_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FlatFileSource::new(dir.path());
        let err = source.pull_checking(7, 2026).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::DataPull { account: "checking account", .. }
        ));
    }

    #[test]
    fn test_missing_column_is_a_data_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let content = "Posting Date,Description,Amount\n07/10/2026,AMAZON,-20.00\n";
        write_source_file(dir.path(), 2026, 7, "checking_07.csv", content);

        let source = FlatFileSource::new(dir.path());
        let err = source.pull_checking(7, 2026).unwrap_err();
        match err {
            TrackerError::DataPull { reason, .. } => assert!(reason.contains("Details")),
            other => panic!("expected DataPull, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_is_a_data_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{CHECKING_HEADER}DEBIT,not-a-date,AMAZON,-20.00,ACH_DEBIT,980.00,\n"
        );
        write_source_file(dir.path(), 2026, 7, "checking_07.csv", &content);

        let source = FlatFileSource::new(dir.path());
        let err = source.pull_checking(7, 2026).unwrap_err();
        match err {
            TrackerError::DataPull { reason, .. } => assert!(reason.contains("Posting Date")),
            other => panic!("expected DataPull, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_amount_is_a_data_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{CHECKING_HEADER}DEBIT,07/10/2026,AMAZON,twenty,ACH_DEBIT,980.00,\n"
        );
        write_source_file(dir.path(), 2026, 7, "checking_07.csv", &content);

        let source = FlatFileSource::new(dir.path());
        let err = source.pull_checking(7, 2026).unwrap_err();
        match err {
            TrackerError::DataPull { reason, .. } => assert!(reason.contains("Amount")),
            other => panic!("expected DataPull, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{CHECKING_HEADER}\
             DEBIT,07/10/2026,AMAZON MKTPL,-20.00,ACH_DEBIT,980.00,\n\
             ,,,,,,\n"
        );
        write_source_file(dir.path(), 2026, 7, "checking_07.csv", &content);

        let source = FlatFileSource::new(dir.path());
        let rows = source.pull_checking(7, 2026).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
