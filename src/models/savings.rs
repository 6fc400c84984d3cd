//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SavingsGoalId, UserId};
use super::money::Money;

/// Money put towards a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub amount: Money,
    pub date: NaiveDate,
}

/// A target amount to save by a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: SavingsGoalId,
    pub user_id: UserId,
    pub target_amount: Money,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(user_id: UserId, target_amount: Money, target_date: NaiveDate) -> Self {
        Self {
            id: SavingsGoalId::new(),
            user_id,
            target_amount,
            target_date,
            contributions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn contribute(&mut self, amount: Money, date: NaiveDate) {
        self.contributions.push(Contribution { amount, date });
    }

    pub fn saved(&self) -> Money {
        self.contributions.iter().map(|c| c.amount).sum()
    }

    pub fn progress(&self, today: NaiveDate) -> SavingsProgress {
        let saved = self.saved();
        let remaining = (self.target_amount - saved).non_negative();
        SavingsProgress {
            saved,
            target: self.target_amount,
            remaining,
            reached: remaining.is_zero(),
            days_left: (self.target_date - today).num_days(),
        }
    }
}

/// Derived state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsProgress {
    pub saved: Money,
    pub target: Money,
    pub remaining: Money,
    pub reached: bool,
    /// Days until the target date; negative once it has passed
    pub days_left: i64,
}

impl SavingsProgress {
    /// Saved fraction of the target, capped at 1
    pub fn fraction(&self) -> f64 {
        if !self.target.is_positive() {
            return 1.0;
        }
        (self.saved.as_f64() / self.target.as_f64()).clamp(0.0, 1.0)
    }
}
