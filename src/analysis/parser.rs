// src/analysis/parser.rs
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read statement: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid amount '{0}'")]
    Amount(String),

    #[error("{0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub posted: Option<NaiveDate>,
    pub description: String,
    /// Always non-negative.
    pub amount: f64,
    pub category: Option<String>,
}

/// Reads the transactions out of a statement file.
///
/// Only CSV statements yield transactions. PDFs are rejected, anything else
/// must at least be readable as text.
pub fn parse_statement(path: &Path) -> Result<Vec<Transaction>, ParseError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    if extension.as_deref() == Some("pdf") {
        return Err(ParseError::Unsupported("PDF parsing not yet implemented"));
    }

    let content = fs::read_to_string(path)?;
    let transactions = match extension.as_deref() {
        Some("csv") => parse_csv(&content)?,
        _ => Vec::new(),
    };

    tracing::debug!(count = transactions.len(), "parsed transactions");
    Ok(transactions)
}

/// Expects date, description and amount in the first three columns.
pub fn parse_csv(content: &str) -> Result<Vec<Transaction>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    tracing::debug!(?headers, "csv headers");

    let mut transactions = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 3 {
            continue;
        }

        let date = record.get(0).unwrap_or("").to_string();
        let description = record.get(1).unwrap_or("").to_string();
        let amount = parse_amount(record.get(2).unwrap_or("0"))?;

        // Repeated header rows and zero-value lines carry no spending.
        let lowered = description.to_lowercase();
        if lowered.contains("description") || lowered.contains("transaction") || amount == 0.0 {
            continue;
        }

        transactions.push(Transaction {
            posted: parse_date(&date),
            date,
            description,
            amount: amount.abs(),
            category: None,
        });
    }

    Ok(transactions)
}

/// Strips `$` and `,`; `(12.50)` is read as `-12.50`.
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let cleaned = raw
        .replace('$', "")
        .replace(',', "")
        .replace('(', "-")
        .replace(')', "");

    match cleaned.trim().parse::<f64>() {
        // f64 parsing also accepts "NaN" and "inf".
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ParseError::Amount(raw.to_string())),
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn amounts_are_cleaned() {
        assert_eq!(parse_amount("$1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_amount("(12.50)").unwrap(), -12.5);
        assert_eq!(parse_amount(" 7 ").unwrap(), 7.0);
        assert!(matches!(parse_amount("n/a"), Err(ParseError::Amount(_))));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        for raw in ["NaN", "nan", "$nan", "inf", "-Infinity"] {
            assert!(
                matches!(parse_amount(raw), Err(ParseError::Amount(_))),
                "{} should not parse",
                raw
            );
        }

        let content = "Date,Description,Amount\n2024-01-02,Coffee,4.50\n2024-01-03,Pizza,NaN\n";
        assert!(matches!(parse_csv(content), Err(ParseError::Amount(_))));
    }

    #[test]
    fn dates_in_common_bank_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("01/15/2024"), expected);
        assert_eq!(parse_date("01/15/24"), expected);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn csv_rows_are_filtered_and_normalized() {
        let content = "Date,Description,Amount\n\
                       2024-01-02,STARBUCKS #123 SEATTLE,(4.75)\n\
                       2024-01-03,Transaction fee reversal,1.00\n\
                       2024-01-04,Refund,0\n\
                       2024-01-05,short\n\
                       2024-01-06,Shell Oil 5512,\"$1,040.10\"\n";

        let transactions = parse_csv(content).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].description, "STARBUCKS #123 SEATTLE");
        assert_eq!(transactions[0].amount, 4.75);
        assert_eq!(transactions[0].posted, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(transactions[1].amount, 1040.10);
    }

    #[test]
    fn bad_amount_fails_the_whole_file() {
        let content = "Date,Description,Amount\n2024-01-02,Coffee,abc\n";
        assert!(matches!(parse_csv(content), Err(ParseError::Amount(_))));
    }

    #[test]
    fn pdf_is_rejected_without_reading() {
        let err = parse_statement(Path::new("/does/not/matter.PDF")).unwrap_err();
        assert_eq!(err.to_string(), "PDF parsing not yet implemented");
    }

    #[test]
    fn binary_spreadsheet_is_a_read_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(&[0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00, 0x9f]).unwrap();

        assert!(matches!(parse_statement(file.path()), Err(ParseError::Io(_))));
    }
}
