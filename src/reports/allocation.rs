//! Allocation Report
//!
//! Compares a stored budget prediction with what was actually spent in the
//! current month.

use chrono::NaiveDateTime;

use super::filter::filter_by_period;
use crate::display::report::{format_percentage, separator};
use crate::models::{CategoryTag, Money, PeriodWindow, PredictedBudget, ReportPeriod, Transaction};

/// Predicted vs. actual for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRow {
    pub category: CategoryTag,
    pub predicted: Money,
    pub actual: Money,
    /// `predicted - actual`; negative when overspent
    pub remaining: Money,
}

impl AllocationRow {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Fraction of the prediction already spent, in percent
    pub fn used_percentage(&self) -> f64 {
        if self.predicted.is_zero() {
            if self.actual.is_zero() {
                0.0
            } else {
                100.0
            }
        } else {
            self.actual.as_f64() / self.predicted.as_f64() * 100.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub window: PeriodWindow,
    pub income_used: Money,
    pub rows: Vec<AllocationRow>,
}

impl AllocationReport {
    /// Compare `budget` with the expenses of the month containing `now`
    pub fn generate(budget: &PredictedBudget, transactions: &[Transaction], now: NaiveDateTime) -> Self {
        let window = ReportPeriod::Monthly.window(now);
        let mut actual = [Money::zero(); 7];

        for txn in filter_by_period(transactions, ReportPeriod::Monthly, now) {
            if let Some(tag) = txn.category().and_then(|c| c.tag()) {
                actual[tag.index()] += txn.amount;
            }
        }

        let rows = CategoryTag::ALL
            .iter()
            .map(|&category| {
                let predicted = budget.allocation(category);
                let actual = actual[category.index()];
                AllocationRow {
                    category,
                    predicted,
                    actual,
                    remaining: predicted - actual,
                }
            })
            .collect();

        Self {
            window,
            income_used: budget.income_used,
            rows,
        }
    }

    pub fn total_predicted(&self) -> Money {
        self.rows.iter().map(|r| r.predicted).sum()
    }

    pub fn total_actual(&self) -> Money {
        self.rows.iter().map(|r| r.actual).sum()
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Predicted Budget: {}\n", self.window));
        output.push_str(&format!(
            "Based on income of {}\n",
            self.income_used.format_with_symbol(currency)
        ));
        output.push_str(&separator(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>7}\n",
            "Category", "Predicted", "Actual", "Remaining", "Used"
        ));
        output.push_str(&separator(70));
        output.push('\n');

        for row in &self.rows {
            let flag = if row.is_overspent() { " !" } else { "" };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>12} {:>7}{}\n",
                row.category.label(),
                row.predicted.format_with_symbol(currency),
                row.actual.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency),
                format_percentage(row.used_percentage()),
                flag
            ));
        }

        output.push_str(&separator(70));
        output.push('\n');
        let total_predicted = self.total_predicted();
        let total_actual = self.total_actual();
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            total_predicted.format_with_symbol(currency),
            total_actual.format_with_symbol(currency),
            (total_predicted - total_actual).format_with_symbol(currency)
        ));

        output
    }
}
