//! finbaba-core: canonical transaction types, keyword categorizer and savings goals

pub mod category;
pub mod goals;
pub mod transaction;

pub use category::{classify, Category, KEYWORD_TABLE};
pub use goals::{GoalError, SavingsGoal};
pub use transaction::{Polarity, Transaction};
