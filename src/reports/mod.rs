//! Aggregation and reports
//!
//! The aggregation core (`filter`, `rollup`, `totals`, `pivot`) is a set of
//! pure functions over an in-memory transaction snapshot. The report types
//! layered on top format that output for the terminal and for CSV.

pub mod allocation;
pub mod filter;
pub mod history;
pub mod period_report;
pub mod pivot;
pub mod rollup;
pub mod totals;

pub use allocation::{AllocationReport, AllocationRow};
pub use filter::{filter_by_period, filter_window};
pub use history::history;
pub use period_report::PeriodReport;
pub use pivot::{pivot, to_csv, write_csv, MonthlyExportRow, EXPORT_HEADER};
pub use rollup::{charted_total, is_empty_chart, rollup, CategorySummary, Slice, NO_DATA_LABEL};
pub use totals::{latest_income, period_totals, totals, PeriodTotals, YearlyIncomePolicy};
