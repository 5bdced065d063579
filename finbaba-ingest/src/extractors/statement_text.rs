//! Best-effort scanner for statement text (plain text or text rendered
//! from a PDF).
//!
//! Looks for `MM/DD/YYYY <description> <amount>` runs anywhere in a line;
//! a line may hold zero or more of them. This is a heuristic, not a layout
//! parser: columns like running balances or reference numbers that sit
//! between the description and the amount end up in the description, and
//! the first amount after the description is the one that counts.
//!
//! Expected text rows:
//!   06/01/2025 Coffee Shop -$4.50
//!   06/02/2025 PAYROLL ACME INC $2,450.00 06/03/2025 Netflix -15.99

use chrono::NaiveDate;
use finbaba_core::{Polarity, Transaction};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::Extractor;
use crate::error::IngestError;
use crate::format::StatementFormat;

const TRANSACTION_PATTERN: &str = r"(\d{1,2}/\d{1,2}/\d{4})\s+(.+?)\s+(-?\$?[\d,]+\.\d{2})";

static TRANSACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRANSACTION_PATTERN).expect("transaction regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct StatementTextExtractor;

impl StatementTextExtractor {
    /// Scan already-decoded statement text
    pub fn extract_text(text: &str) -> Result<Vec<Transaction>, IngestError> {
        let mut out = Vec::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            for caps in TRANSACTION_RE.captures_iter(line) {
                let date = match NaiveDate::parse_from_str(&caps[1], "%m/%d/%Y") {
                    Ok(d) => d,
                    Err(_) => {
                        skipped += 1;
                        continue;
                    }
                };

                let amount: f64 = match caps[3].replace(['$', ','], "").parse() {
                    Ok(a) => a,
                    Err(_) => {
                        skipped += 1;
                        continue;
                    }
                };

                match Transaction::new(date, &caps[2], amount, Polarity::from_sign(amount)) {
                    Some(txn) => out.push(txn),
                    None => skipped += 1,
                }
            }
        }

        debug!(
            "Parsed {} statement-text transactions ({} matches skipped)",
            out.len(),
            skipped
        );
        Ok(out)
    }
}

impl Extractor for StatementTextExtractor {
    fn format(&self) -> StatementFormat {
        StatementFormat::StatementText
    }

    fn extract(&self, input: &[u8]) -> Result<Vec<Transaction>, IngestError> {
        let text = std::str::from_utf8(input)
            .map_err(|e| IngestError::unreadable(StatementFormat::StatementText, e))?;
        Self::extract_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finbaba_core::Category;

    #[test]
    fn test_parses_single_line() {
        let txns = StatementTextExtractor::extract_text("06/01/2025 Coffee Shop -$4.50").unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount(), 4.5);
        assert_eq!(txns[0].polarity(), Polarity::Debit);
        assert_eq!(txns[0].category(), Category::FoodAndDining);
        assert_eq!(txns[0].description(), "Coffee Shop");
    }

    #[test]
    fn test_multiple_matches_per_line_and_noise() {
        let text = r#"
ACME BANK - Statement Period 06/01/2025 to 06/30/2025
Page 1 of 2
  06/02/2025   PAYROLL ACME INC   $2,450.00   06/03/2025 Netflix -15.99
Account summary: nothing here
06/31/2025 Bad Date -3.00
"#;
        let txns = StatementTextExtractor::extract_text(text).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount(), 2450.0);
        assert_eq!(txns[0].polarity(), Polarity::Credit);
        assert_eq!(txns[1].description(), "Netflix");
        assert_eq!(txns[1].category(), Category::Entertainment);
        assert!(txns.iter().all(|t| t.amount() >= 0.0));
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(TRANSACTION_RE.is_match("06/01/2025 Coffee Shop -$4.50"));
        assert!(!TRANSACTION_RE.is_match("Statement Period 06/01/2025 to 06/30/2025"));
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let err = StatementTextExtractor.extract(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, IngestError::UnreadableInput { .. }));
    }
}
