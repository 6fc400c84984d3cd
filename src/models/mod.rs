//! Core data models for tally
//!
//! Money, identifiers, the closed category set, transactions with their stored
//! timestamps, reporting periods, savings goals, registered users and the
//! prediction contract.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod prediction;
pub mod savings;
pub mod timestamp;
pub mod transaction;
pub mod user;

pub use category::{CategoryTag, ExpenseCategory, UnknownCategory, INCOME_LABEL};
pub use ids::{SavingsGoalId, TransactionId, UserId};
pub use money::{Money, MoneyParseError};
pub use period::{PeriodWindow, ReportPeriod};
pub use prediction::{PredictedBudget, PredictionRequest, PredictionResponse};
pub use savings::{Contribution, SavingsGoal, SavingsProgress};
pub use timestamp::{MonthKey, Timestamp};
pub use transaction::{Transaction, TransactionKind};
pub use user::{User, MAX_USERNAME_LEN};
