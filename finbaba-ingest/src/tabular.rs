//! Shared row mapping for tabular statements (CSV and spreadsheets).
//!
//! Banks name their columns differently, so each logical field has an
//! ordered alias list. Aliases are compared case-insensitively and tried in
//! the order given; the first alias with a non-empty cell wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use finbaba_core::{Polarity, Transaction};
use std::collections::HashMap;

pub const DATE_ALIASES: &[&str] = &["date", "transaction date", "posted date", "post date"];

pub const DESCRIPTION_ALIASES: &[&str] = &["description", "merchant", "payee", "details"];

pub const AMOUNT_ALIASES: &[&str] = &["amount", "debit", "credit"];

pub const TYPE_ALIASES: &[&str] = &["type", "transaction type"];

/// Date formats tried in order. Two-digit years come first because `%Y`
/// would also accept "25" as the year 25.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Header row resolved to column indexes
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn new<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut columns = HashMap::new();
        for (i, name) in headers.into_iter().enumerate() {
            // first occurrence wins on duplicate headers
            columns.entry(name.trim().to_lowercase()).or_insert(i);
        }
        Self { columns }
    }

    /// True when at least one alias of each required field is present
    pub fn has_required_columns(&self) -> bool {
        [DATE_ALIASES, DESCRIPTION_ALIASES, AMOUNT_ALIASES]
            .iter()
            .all(|aliases| aliases.iter().any(|a| self.columns.contains_key(*a)))
    }

    fn field<'c>(&self, cells: &[&'c str], aliases: &[&'static str]) -> Option<(&'static str, &'c str)> {
        aliases.iter().find_map(|alias| {
            let idx = *self.columns.get(*alias)?;
            let value: &'c str = cells.get(idx).copied()?.trim();
            (!value.is_empty()).then_some((*alias, value))
        })
    }

    /// First amount alias holding a parseable, non-zero value
    fn amount(&self, cells: &[&str]) -> Option<(&'static str, f64)> {
        AMOUNT_ALIASES.iter().find_map(|alias| {
            let idx = *self.columns.get(*alias)?;
            let amount = parse_amount(cells.get(idx)?)?;
            (amount != 0.0).then_some((*alias, amount))
        })
    }

    /// Map one data row to a canonical transaction, or `None` to skip it.
    pub fn row_to_transaction(&self, cells: &[&str]) -> Option<Transaction> {
        let (_, date_raw) = self.field(cells, DATE_ALIASES)?;
        let date = parse_date(date_raw)?;
        let (_, description) = self.field(cells, DESCRIPTION_ALIASES)?;
        let (amount_column, amount) = self.amount(cells)?;

        let polarity = self
            .field(cells, TYPE_ALIASES)
            .and_then(|(_, label)| Polarity::from_label(label))
            .or_else(|| match amount_column {
                "debit" => Some(Polarity::Debit),
                "credit" => Some(Polarity::Credit),
                _ => None,
            })
            .unwrap_or_else(|| Polarity::from_sign(amount));

        Transaction::new(date, description, amount, polarity)
    }
}

/// Parse an amount cell, handling currency symbols, thousands separators
/// and accounting-style parentheses.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' ', '"'], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned.parse::<f64>().ok().filter(|a| a.is_finite())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_matches('"');

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
