//! Savings service
//!
//! One goal per user: setting a new goal replaces the previous one and its
//! contributions.

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, SavingsGoal, SavingsProgress, UserId};
use crate::storage::Storage;

pub struct SavingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SavingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Start a new goal of `target` by `target_date`
    pub fn set_goal(
        &self,
        user: UserId,
        target: Money,
        target_date: NaiveDate,
        today: NaiveDate,
    ) -> TallyResult<SavingsGoal> {
        if !target.is_positive() {
            return Err(TallyError::Validation(
                "Savings target must be greater than zero".into(),
            ));
        }
        if target_date < today {
            return Err(TallyError::Validation(format!(
                "Target date {} is in the past",
                target_date
            )));
        }

        let goal = SavingsGoal::new(user, target, target_date);
        self.storage.savings.replace_for_user(goal.clone())?;
        self.storage.savings.save()?;
        tracing::info!(user = %user, target = %target, by = %target_date, "set savings goal");
        Ok(goal)
    }

    /// Add money to the active goal
    pub fn contribute(&self, user: UserId, amount: Money, today: NaiveDate) -> TallyResult<SavingsGoal> {
        if !amount.is_positive() {
            return Err(TallyError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let mut goal = self.active(user)?;
        goal.contribute(amount, today);
        self.storage.savings.upsert(goal.clone())?;
        self.storage.savings.save()?;
        Ok(goal)
    }

    pub fn progress(&self, user: UserId, today: NaiveDate) -> TallyResult<(SavingsGoal, SavingsProgress)> {
        let goal = self.active(user)?;
        let progress = goal.progress(today);
        Ok((goal, progress))
    }

    /// Remove the user's goals
    pub fn clear(&self, user: UserId) -> TallyResult<()> {
        if self.storage.savings.remove_for_user(user)? == 0 {
            return Err(TallyError::savings_goal_not_found(format!("user {}", user)));
        }
        self.storage.savings.save()
    }

    fn active(&self, user: UserId) -> TallyResult<SavingsGoal> {
        self.storage
            .savings
            .active_for_user(user)?
            .ok_or_else(|| TallyError::savings_goal_not_found(format!("user {}", user)))
    }
}
