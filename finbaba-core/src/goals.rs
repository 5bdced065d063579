//! User-authored savings goals.
//!
//! Goals are not derived from statements; they ride along in the user's
//! record and only ever change through [`SavingsGoal::update_progress`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GoalError {
    #[error("Invalid goal target: {0}")]
    InvalidTarget(f64),

    #[error("Invalid progress amount: {0}")]
    InvalidAmount(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: u64,
    pub name: String,
    pub target: f64,
    /// Saved so far, never above `target`
    pub current: f64,
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        target: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, GoalError> {
        if !target.is_finite() || target < 0.0 {
            return Err(GoalError::InvalidTarget(target));
        }
        Ok(Self {
            id,
            name: name.into(),
            target,
            current: 0.0,
            deadline,
        })
    }

    /// Set the saved amount, clamped to `[0, target]`.
    pub fn update_progress(&mut self, amount: f64) -> Result<&Self, GoalError> {
        if !amount.is_finite() {
            return Err(GoalError::InvalidAmount(amount));
        }
        self.current = amount.min(self.target).max(0.0);
        Ok(self)
    }

    /// Percentage of the target reached (0 for a zero target)
    pub fn progress_pct(&self) -> f64 {
        if self.target == 0.0 {
            0.0
        } else {
            self.current / self.target * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.target > 0.0 && self.current >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_starts_empty() {
        let goal = SavingsGoal::new(1, "Emergency fund", 5000.0, None).unwrap();
        assert_eq!(goal.current, 0.0);
        assert_eq!(goal.progress_pct(), 0.0);
        assert!(!goal.is_complete());
    }

    #[test]
    fn test_progress_is_clamped_to_target() {
        let mut goal = SavingsGoal::new(1, "Laptop", 1200.0, None).unwrap();
        goal.update_progress(300.0).unwrap();
        assert_eq!(goal.current, 300.0);
        assert_eq!(goal.progress_pct(), 25.0);

        goal.update_progress(5000.0).unwrap();
        assert_eq!(goal.current, 1200.0);
        assert!(goal.is_complete());

        goal.update_progress(-20.0).unwrap();
        assert_eq!(goal.current, 0.0);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert_eq!(
            SavingsGoal::new(1, "Bad", f64::NAN, None).unwrap_err().to_string(),
            "Invalid goal target: NaN"
        );
        let mut goal = SavingsGoal::new(2, "Trip", 800.0, None).unwrap();
        assert!(goal.update_progress(f64::INFINITY).is_err());
        assert_eq!(goal.current, 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31);
        let goal = SavingsGoal::new(1718000000000, "Vacation", 3000.0, deadline).unwrap();
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["id"], 1718000000000u64);
        assert_eq!(json["deadline"], "2025-12-31");
        assert_eq!(json["current"], 0.0);
    }
}
