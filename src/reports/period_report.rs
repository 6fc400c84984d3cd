//! Period Report
//!
//! Totals and the expense breakdown for one reporting period.

use chrono::NaiveDateTime;
use std::io::Write;

use super::filter::filter_window;
use super::rollup::{charted_total, is_empty_chart, rollup, CategorySummary};
use super::totals::{period_totals, PeriodTotals, YearlyIncomePolicy};
use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::TallyResult;
use crate::models::{PeriodWindow, ReportPeriod, Transaction};

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Summary of one period
#[derive(Debug, Clone)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub window: PeriodWindow,
    pub policy: YearlyIncomePolicy,
    pub totals: PeriodTotals,
    /// Expense breakdown, largest first; a lone placeholder when empty
    pub categories: Vec<CategorySummary>,
    /// Number of dated transactions inside the window
    pub transaction_count: usize,
}

impl PeriodReport {
    /// Generate the report for the period containing `now`
    pub fn generate(
        transactions: &[Transaction],
        period: ReportPeriod,
        now: NaiveDateTime,
        policy: YearlyIncomePolicy,
    ) -> Self {
        let window = period.window(now);
        let subset = filter_window(transactions, &window);

        Self {
            period,
            window,
            policy,
            totals: period_totals(transactions, period, now, policy),
            categories: rollup(subset.iter().copied()),
            transaction_count: subset.len(),
        }
    }

    pub fn has_expenses(&self) -> bool {
        !is_empty_chart(&self.categories)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} Report: {}\n", self.period, self.window));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let income_note = match (self.period, self.policy) {
            (ReportPeriod::Yearly, YearlyIncomePolicy::AnnualizeLatest) => " (latest income x 12)",
            _ => "",
        };
        output.push_str(&format!(
            "Income:       {:>14}{}\n",
            self.totals.income.format_with_symbol(currency),
            income_note
        ));
        output.push_str(&format!(
            "Expenses:     {:>14}\n",
            self.totals.expense.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Balance:      {:>14}\n",
            self.totals.balance.format_with_symbol(currency)
        ));
        output.push_str(&format!("Transactions: {:>14}\n\n", self.transaction_count));

        if !self.has_expenses() {
            output.push_str("No expenses recorded in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>14} {:>7}  {}\n",
            "Category", "Amount", "Share", "Chart"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        let largest = self
            .categories
            .iter()
            .map(|c| c.share)
            .fold(0.0_f64, f64::max);

        for summary in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>14} {:>7}  {}\n",
                summary.label(),
                summary.amount.format_with_symbol(currency),
                format_percentage(summary.share * 100.0),
                format_bar(summary.share, largest, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "TOTAL",
            charted_total(&self.categories).format_with_symbol(currency)
        ));

        output
    }

    /// Export the breakdown to CSV; the placeholder slice is never written
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let start = self.window.first_day().to_string();
        let end = self.window.last_day().to_string();
        let period = self.period.label();

        csv.write_record(["Period", "Start Date", "End Date", "Category", "Amount", "Share"])?;

        for summary in self.categories.iter().filter(|s| !s.is_placeholder()) {
            let amount = summary.amount.to_decimal_string();
            let share = format!("{:.4}", summary.share);
            csv.write_record([period, start.as_str(), end.as_str(), summary.label(), amount.as_str(), share.as_str()])?;
        }

        for (label, amount) in [
            ("INCOME", self.totals.income),
            ("EXPENSES", self.totals.expense),
            ("BALANCE", self.totals.balance),
        ] {
            let amount = amount.to_decimal_string();
            csv.write_record([period, start.as_str(), end.as_str(), label, amount.as_str(), ""])?;
        }

        csv.flush()?;
        Ok(())
    }
}
