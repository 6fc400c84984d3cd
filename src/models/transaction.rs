//! Transaction model
//!
//! A transaction is either income or a categorized expense. Stored rows are
//! read leniently: a malformed date or amount never prevents the ledger from
//! loading, it only keeps the row out of aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategoryTag, ExpenseCategory, INCOME_LABEL};
use super::ids::{TransactionId, UserId};
use super::money::{self, Money};
use super::timestamp::Timestamp;

/// Income or expense, with the category an expense carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense { category: ExpenseCategory },
}

impl TransactionKind {
    pub fn expense(tag: CategoryTag) -> Self {
        Self::Expense {
            category: ExpenseCategory::Known(tag),
        }
    }
}

/// A single dated income or expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub user_id: UserId,

    /// Non-negative amount; defective stored values read as zero
    #[serde(with = "money::lenient", default)]
    pub amount: Money,

    pub date: Timestamp,

    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn income(user_id: UserId, amount: Money, date: Timestamp) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            amount,
            date,
            kind: TransactionKind::Income,
        }
    }

    pub fn expense(user_id: UserId, amount: Money, category: CategoryTag, date: Timestamp) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            amount,
            date,
            kind: TransactionKind::expense(category),
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    /// Expense category, `None` for income
    pub fn category(&self) -> Option<&ExpenseCategory> {
        match &self.kind {
            TransactionKind::Income => None,
            TransactionKind::Expense { category } => Some(category),
        }
    }

    /// Category column text; income rows show the "Income" pseudo-category
    pub fn category_label(&self) -> &str {
        match &self.kind {
            TransactionKind::Income => INCOME_LABEL,
            TransactionKind::Expense { category } => category.label(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id,
            self.date,
            self.category_label(),
            self.amount
        )
    }
}
