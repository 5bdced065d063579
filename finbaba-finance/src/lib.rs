//! finbaba-finance: folds a transaction batch into the dashboard summary

pub mod insights;
pub mod summary;

pub use insights::{Insight, InsightKind, SavingsRate};
pub use summary::{aggregate, FinancialSummary, MonthlyTrend, TREND_MONTHS};
