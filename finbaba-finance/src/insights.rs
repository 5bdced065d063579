//! Textual observations generated from aggregate totals

use finbaba_core::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of total expenses above which dining triggers a recommendation
pub const DINING_SHARE_THRESHOLD: f64 = 0.20;

/// Fraction of dining spend proposed as a saving
pub const DINING_CUT: f64 = 0.15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightKind {
    #[serde(rename = "savings_rate")]
    SavingsRate,
    #[serde(rename = "top_category")]
    TopCategory,
    #[serde(rename = "recommendation")]
    Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    /// False when the figure behind the message could not be computed
    pub available: bool,
}

impl Insight {
    fn new(kind: InsightKind, message: String, available: bool) -> Self {
        Self {
            kind,
            message,
            available,
        }
    }
}

/// Savings rate in percent. With zero income the rate is reported as 0 and
/// flagged unavailable instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsRate {
    pub rate: f64,
    pub available: bool,
}

impl SavingsRate {
    pub fn compute(income: f64, expenses: f64) -> Self {
        if income == 0.0 {
            return Self {
                rate: 0.0,
                available: false,
            };
        }
        Self {
            rate: (income - expenses) / income * 100.0,
            available: true,
        }
    }
}

pub(crate) fn savings_rate_insight(income: f64, expenses: f64) -> Insight {
    let savings = SavingsRate::compute(income, expenses);
    let message = if savings.available {
        format!(
            "Your savings rate is {:.1}%. You're saving ${:.2} per month.",
            savings.rate,
            income - expenses
        )
    } else {
        format!(
            "Savings rate unavailable: no income found in this statement (reported as {:.1}%).",
            savings.rate
        )
    };
    Insight::new(InsightKind::SavingsRate, message, savings.available)
}

/// Highest category total; ties keep the earliest category in map order.
pub(crate) fn top_category_insight(totals: &BTreeMap<Category, f64>) -> Insight {
    let mut top: Option<(Category, f64)> = None;
    for (&category, &total) in totals {
        match top {
            Some((_, best)) if total <= best => {}
            _ => top = Some((category, total)),
        }
    }

    let (category, total) = top.unwrap_or((Category::FoodAndDining, 0.0));
    Insight::new(
        InsightKind::TopCategory,
        format!(
            "Your highest spending category is {} at ${:.2}.",
            category, total
        ),
        total > 0.0,
    )
}

pub(crate) fn dining_recommendation(
    totals: &BTreeMap<Category, f64>,
    expenses: f64,
) -> Option<Insight> {
    let dining = totals.get(&Category::FoodAndDining).copied().unwrap_or(0.0);
    if dining > expenses * DINING_SHARE_THRESHOLD {
        Some(Insight::new(
            InsightKind::Recommendation,
            format!(
                "Consider reducing dining expenses by 15% to save an additional ${:.2}/month.",
                dining * DINING_CUT
            ),
            true,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(Category, f64)]) -> BTreeMap<Category, f64> {
        let mut map: BTreeMap<Category, f64> = Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        for (category, amount) in entries {
            map.insert(*category, *amount);
        }
        map
    }

    #[test]
    fn test_savings_rate() {
        let rate = SavingsRate::compute(5200.0, 150.0);
        assert!(rate.available);
        assert!((rate.rate - 97.115).abs() < 0.01);

        let insight = savings_rate_insight(5200.0, 150.0);
        assert_eq!(
            insight.message,
            "Your savings rate is 97.1%. You're saving $5050.00 per month."
        );
    }

    #[test]
    fn test_zero_income_is_not_a_division() {
        let rate = SavingsRate::compute(0.0, 320.0);
        assert_eq!(rate.rate, 0.0);
        assert!(!rate.available);

        let insight = savings_rate_insight(0.0, 320.0);
        assert!(!insight.available);
        assert!(insight.message.contains("0.0%"));
        assert!(!insight.message.contains("NaN"));
        assert!(!insight.message.contains("inf"));
    }

    #[test]
    fn test_top_category_tie_keeps_first() {
        let map = totals(&[(Category::Shopping, 80.0), (Category::Transportation, 80.0)]);
        let insight = top_category_insight(&map);
        assert_eq!(
            insight.message,
            "Your highest spending category is Transportation at $80.00."
        );
    }

    #[test]
    fn test_dining_recommendation_threshold() {
        let map = totals(&[(Category::FoodAndDining, 200.0)]);
        let rec = dining_recommendation(&map, 1000.0);
        assert!(rec.is_none(), "exactly 20% should not trigger");

        let rec = dining_recommendation(&map, 900.0).unwrap();
        assert_eq!(rec.kind, InsightKind::Recommendation);
        assert_eq!(
            rec.message,
            "Consider reducing dining expenses by 15% to save an additional $30.00/month."
        );
    }
}
