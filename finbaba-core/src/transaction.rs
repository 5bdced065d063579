//! Canonical transaction record every statement extractor converges on

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{classify, Category};

/// Whether a transaction increases (credit) or decreases (debit) the balance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl Polarity {
    /// Parse a statement "type" cell. Unknown labels yield `None` so the
    /// caller can fall back to sign inference.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "credit" | "cr" | "deposit" | "income" => Some(Polarity::Credit),
            "debit" | "dr" | "withdrawal" | "expense" => Some(Polarity::Debit),
            _ => None,
        }
    }

    /// Positive amounts are credits, everything else is a debit
    pub fn from_sign(amount: f64) -> Self {
        if amount > 0.0 {
            Polarity::Credit
        } else {
            Polarity::Debit
        }
    }
}

/// A single statement line after normalization.
///
/// Immutable once built: `amount` is always a positive finite magnitude,
/// the sign lives in `polarity`, and `category` is assigned exactly once.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    /// Date of the transaction (YYYY-MM-DD)
    date: NaiveDate,
    /// Trimmed description with quote characters removed
    description: String,
    /// Magnitude, never negative
    amount: f64,
    #[serde(rename = "type")]
    polarity: Polarity,
    category: Category,
}

impl Transaction {
    /// Build a canonical transaction, classifying the description.
    ///
    /// Returns `None` for rows that must be dropped: an empty description
    /// (after cleaning), a non-finite amount, or a zero amount.
    pub fn new(
        date: NaiveDate,
        description: &str,
        amount: f64,
        polarity: Polarity,
    ) -> Option<Self> {
        let description = clean_description(description);
        if description.is_empty() || !amount.is_finite() || amount == 0.0 {
            return None;
        }

        let category = classify(&description);
        Some(Self {
            date,
            description,
            amount: amount.abs(),
            polarity,
            category,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_credit(&self) -> bool {
        self.polarity == Polarity::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.polarity == Polarity::Debit
    }

    /// Credit positive, debit negative
    pub fn signed_amount(&self) -> f64 {
        match self.polarity {
            Polarity::Credit => self.amount,
            Polarity::Debit => -self.amount,
        }
    }
}

fn clean_description(raw: &str) -> String {
    raw.replace(['"', '\''], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    #[test]
    fn test_transaction_creation() {
        let txn = Transaction::new(day(), "  \"Grocery Store\" ", -150.0, Polarity::Debit).unwrap();
        assert_eq!(txn.description(), "Grocery Store");
        assert_eq!(txn.amount(), 150.0);
        assert_eq!(txn.category(), Category::FoodAndDining);
        assert!(txn.is_debit());
        assert_eq!(txn.signed_amount(), -150.0);
    }

    #[test]
    fn test_rejects_unusable_rows() {
        assert!(Transaction::new(day(), "   ", 10.0, Polarity::Debit).is_none());
        assert!(Transaction::new(day(), "\"\"", 10.0, Polarity::Debit).is_none());
        assert!(Transaction::new(day(), "Coffee", f64::NAN, Polarity::Debit).is_none());
        assert!(Transaction::new(day(), "Coffee", f64::INFINITY, Polarity::Debit).is_none());
        assert!(Transaction::new(day(), "Coffee", 0.0, Polarity::Debit).is_none());
    }

    #[test]
    fn test_polarity_labels() {
        assert_eq!(Polarity::from_label("CREDIT"), Some(Polarity::Credit));
        assert_eq!(Polarity::from_label(" dr "), Some(Polarity::Debit));
        assert_eq!(Polarity::from_label("Withdrawal"), Some(Polarity::Debit));
        assert_eq!(Polarity::from_label("pending"), None);
        assert_eq!(Polarity::from_sign(5200.0), Polarity::Credit);
        assert_eq!(Polarity::from_sign(-4.5), Polarity::Debit);
    }

    #[test]
    fn test_serialized_shape() {
        let txn = Transaction::new(day(), "Salary", 5200.0, Polarity::Credit).unwrap();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2025-06-03");
        assert_eq!(json["type"], "credit");
        assert_eq!(json["category"], "Other");
        assert_eq!(json["amount"], 5200.0);
    }
}
