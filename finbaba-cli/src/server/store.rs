//! In-memory per-user data: the latest statement upload and savings goals.
//!
//! Nothing is persisted; restarting the server starts from an empty store.

use chrono::{NaiveDate, Utc};
use finbaba_core::{GoalError, SavingsGoal};
use finbaba_ingest::Ingested;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct UserRecord {
    /// Latest upload; a new upload replaces it wholesale
    pub statement: Option<Ingested>,
    pub savings_goals: Vec<SavingsGoal>,
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
    last_goal_id: Mutex<u64>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new upload for the user, dropping the previous one.
    /// Savings goals are kept.
    pub fn replace_statement(&self, user_id: &str, data: Ingested) {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        users.entry(user_id.to_string()).or_default().statement = Some(data);
    }

    pub fn get(&self, user_id: &str) -> Option<UserRecord> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(user_id).cloned()
    }

    pub fn add_goal(
        &self,
        user_id: &str,
        name: &str,
        target: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<SavingsGoal, GoalError> {
        let goal = SavingsGoal::new(self.next_goal_id(), name, target, deadline)?;
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        users
            .entry(user_id.to_string())
            .or_default()
            .savings_goals
            .push(goal.clone());
        Ok(goal)
    }

    /// Returns `Ok(None)` when the user or goal does not exist.
    pub fn update_goal(
        &self,
        user_id: &str,
        goal_id: u64,
        amount: f64,
    ) -> Result<Option<SavingsGoal>, GoalError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        let Some(goal) = users
            .get_mut(user_id)
            .and_then(|u| u.savings_goals.iter_mut().find(|g| g.id == goal_id))
        else {
            return Ok(None);
        };
        goal.update_progress(amount)?;
        Ok(Some(goal.clone()))
    }

    /// Millisecond timestamp, bumped so ids never repeat within a store
    fn next_goal_id(&self) -> u64 {
        let mut last = self.last_goal_id.lock().unwrap_or_else(PoisonError::into_inner);
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        *last = now.max(*last + 1);
        *last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finbaba_ingest::{ingest, StatementFormat};

    fn upload(csv: &str) -> Ingested {
        ingest(csv.as_bytes(), StatementFormat::Csv).unwrap()
    }

    #[test]
    fn test_upload_replaces_previous_statement() {
        let store = UserStore::new();
        store.replace_statement("alice", upload("Date,Description,Amount\n2025-01-01,Salary,100\n"));
        store.replace_statement("alice", upload("Date,Description,Amount\n2025-01-02,Hulu,-8\n"));

        let record = store.get("alice").unwrap();
        let statement = record.statement.unwrap();
        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.summary.monthly_income, 0.0);
        assert_eq!(statement.summary.monthly_spending, 8.0);
        assert!(store.get("bob").is_none());
    }

    #[test]
    fn test_goals_survive_new_upload() {
        let store = UserStore::new();
        let goal = store.add_goal("alice", "Bike", 600.0, None).unwrap();
        store.replace_statement("alice", upload("Date,Description,Amount\n2025-01-01,Salary,100\n"));

        let record = store.get("alice").unwrap();
        assert_eq!(record.savings_goals, vec![goal]);
    }

    #[test]
    fn test_goal_ids_are_unique() {
        let store = UserStore::new();
        let a = store.add_goal("alice", "A", 10.0, None).unwrap();
        let b = store.add_goal("alice", "B", 10.0, None).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_update_goal_clamps_and_reports_missing() {
        let store = UserStore::new();
        let goal = store.add_goal("alice", "Trip", 1000.0, None).unwrap();

        let updated = store.update_goal("alice", goal.id, 1500.0).unwrap().unwrap();
        assert_eq!(updated.current, 1000.0);
        assert_eq!(store.get("alice").unwrap().savings_goals[0].current, 1000.0);

        assert!(store.update_goal("alice", goal.id + 1, 5.0).unwrap().is_none());
        assert!(store.update_goal("bob", goal.id, 5.0).unwrap().is_none());
        assert!(store.update_goal("alice", goal.id, f64::NAN).is_err());
    }
}
