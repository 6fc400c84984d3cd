//! Period totals
//!
//! Income, expense and balance for a set of transactions. The yearly view
//! reports income through a configurable [`YearlyIncomePolicy`]; by default it
//! annualizes the most recent income record instead of summing the year.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::filter::filter_by_period;
use crate::models::{Money, ReportPeriod, Transaction};

/// How the Yearly period derives its income figure
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum YearlyIncomePolicy {
    /// Most recent income record × 12
    #[default]
    AnnualizeLatest,
    /// Sum of the income rows dated inside the year
    SumOfPeriod,
}

impl fmt::Display for YearlyIncomePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnnualizeLatest => write!(f, "annualize latest income (x12)"),
            Self::SumOfPeriod => write!(f, "sum of income in the year"),
        }
    }
}

/// Income, expense and their difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodTotals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

impl PeriodTotals {
    fn new(income: Money, expense: Money) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Sum income and expense rows of an already-filtered subset
pub fn totals<'a, I>(subset: I) -> PeriodTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = subset
        .into_iter()
        .fold((Money::zero(), Money::zero()), |(income, expense), txn| {
            if txn.is_income() {
                (income + txn.amount, expense)
            } else {
                (income, expense + txn.amount)
            }
        });
    PeriodTotals::new(income, expense)
}

/// Totals for `period` around `now`, applying the yearly income policy.
///
/// `transactions` is the user's full snapshot: annualization looks at income
/// history outside the window.
pub fn period_totals(
    transactions: &[Transaction],
    period: ReportPeriod,
    now: NaiveDateTime,
    policy: YearlyIncomePolicy,
) -> PeriodTotals {
    let subset = filter_by_period(transactions, period, now);
    let plain = totals(subset);

    match (period, policy) {
        (ReportPeriod::Yearly, YearlyIncomePolicy::AnnualizeLatest) => {
            let income = latest_income(transactions)
                .map(|txn| txn.amount * 12)
                .unwrap_or_default();
            PeriodTotals::new(income, plain.expense)
        }
        _ => plain,
    }
}

/// The most recent income record with a valid date
pub fn latest_income(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.is_income() && txn.date.is_valid())
        .max_by(|a, b| a.date.chronological_cmp(&b.date))
}
