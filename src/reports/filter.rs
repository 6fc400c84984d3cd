//! Period filter
//!
//! Selects the transactions whose parsed date falls inside a period window.
//! Rows with malformed dates are never included and never cause an error.

use chrono::NaiveDateTime;

use crate::models::{PeriodWindow, ReportPeriod, Transaction};

/// Transactions dated inside the `period` window that contains `now`
pub fn filter_by_period(
    transactions: &[Transaction],
    period: ReportPeriod,
    now: NaiveDateTime,
) -> Vec<&Transaction> {
    filter_window(transactions, &period.window(now))
}

/// Transactions dated inside `window` (both ends inclusive)
pub fn filter_window<'a>(transactions: &'a [Transaction], window: &PeriodWindow) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| match txn.date.local() {
            Some(moment) => window.contains(moment),
            None => {
                tracing::warn!(id = %txn.id, raw = txn.date.raw(), "excluding transaction with malformed date");
                false
            }
        })
        .collect()
}
