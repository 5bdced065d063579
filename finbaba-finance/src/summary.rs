//! Financial summary aggregation.
//!
//! `aggregate` is a pure fold over a transaction batch. A new upload builds
//! a new summary from scratch; nothing here is patched incrementally.
//!
//! Known limitation: the monthly trend only reports the fixed Jan..Jun
//! window. Transactions dated Jul..Dec still count toward the totals and
//! category sums but do not appear in `monthlyTrend`.

use chrono::NaiveDate;
use finbaba_core::{Category, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::insights::{
    dining_recommendation, savings_rate_insight, top_category_insight, Insight,
};

/// Month labels reported in the trend series, in order
pub const TREND_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTrend {
    pub month: String,
    pub income: f64,
    pub spending: f64,
}

/// Dashboard summary for one statement upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Income minus spending
    pub total_balance: f64,
    /// Sum of credit amounts
    pub monthly_income: f64,
    /// Sum of debit amounts
    pub monthly_spending: f64,
    /// Debit totals per category; always holds all seven categories
    pub category_totals: BTreeMap<Category, f64>,
    pub monthly_trend: Vec<MonthlyTrend>,
    pub insights: Vec<Insight>,
}

/// Fold a transaction batch into a [`FinancialSummary`].
pub fn aggregate(transactions: &[Transaction]) -> FinancialSummary {
    let mut category_totals: BTreeMap<Category, f64> =
        Category::ALL.iter().map(|c| (*c, 0.0)).collect();
    let mut income = 0.0;
    let mut expenses = 0.0;

    for txn in transactions {
        if txn.is_credit() {
            income += txn.amount();
        } else {
            expenses += txn.amount();
            *category_totals.entry(txn.category()).or_insert(0.0) += txn.amount();
        }
    }

    let monthly_trend = monthly_trend(transactions);

    let mut insights = vec![
        savings_rate_insight(income, expenses),
        top_category_insight(&category_totals),
    ];
    if let Some(rec) = dining_recommendation(&category_totals, expenses) {
        insights.push(rec);
    }

    debug!(
        transactions = transactions.len(),
        income, expenses, "aggregated statement"
    );

    FinancialSummary {
        total_balance: income - expenses,
        monthly_income: income,
        monthly_spending: expenses,
        category_totals,
        monthly_trend,
        insights,
    }
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Group by short month name, then project onto [`TREND_MONTHS`].
fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    let mut by_month: HashMap<String, (f64, f64)> = HashMap::new();
    for txn in transactions {
        let entry = by_month.entry(month_label(txn.date())).or_insert((0.0, 0.0));
        if txn.is_credit() {
            entry.0 += txn.amount();
        } else {
            entry.1 += txn.amount();
        }
    }

    TREND_MONTHS
        .iter()
        .map(|month| {
            let (income, spending) = by_month.get(*month).copied().unwrap_or((0.0, 0.0));
            MonthlyTrend {
                month: month.to_string(),
                income,
                spending,
            }
        })
        .collect()
}
