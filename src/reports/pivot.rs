//! Monthly export pivot
//!
//! Reshapes per-transaction rows into one row per calendar month, with income
//! and one column per expense category.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::TallyResult;
use crate::models::{CategoryTag, Money, MonthKey, Transaction, TransactionKind, UserId};

/// Fixed header of the monthly export
pub const EXPORT_HEADER: [&str; 10] = [
    "user_id",
    "Month",
    "Income",
    "Bills",
    "Food",
    "Entertainment",
    "Transportation",
    "Personal Spending",
    "Healthcare",
    "Savings",
];

/// One calendar month of a user's activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyExportRow {
    pub user_id: UserId,
    pub month: MonthKey,
    pub income: Money,
    /// Indexed by [`CategoryTag::index`]
    categories: [Money; 7],
}

impl MonthlyExportRow {
    fn new(user_id: UserId, month: MonthKey) -> Self {
        Self {
            user_id,
            month,
            income: Money::zero(),
            categories: [Money::zero(); 7],
        }
    }

    pub fn category(&self, tag: CategoryTag) -> Money {
        self.categories[tag.index()]
    }

    pub fn total_expense(&self) -> Money {
        self.categories.iter().sum()
    }

    fn record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(EXPORT_HEADER.len());
        record.push(self.user_id.to_string());
        record.push(self.month.to_string());
        record.push(self.income.to_decimal_string());
        record.extend(
            CategoryTag::EXPORT_ORDER
                .iter()
                .map(|tag| self.category(*tag).to_decimal_string()),
        );
        record
    }
}

/// Bucket income and expense rows by calendar month, ascending
pub fn pivot(income: &[Transaction], expenses: &[Transaction]) -> Vec<MonthlyExportRow> {
    let mut months: BTreeMap<MonthKey, MonthlyExportRow> = BTreeMap::new();

    for txn in income.iter().chain(expenses) {
        let Some(month) = txn.date.month_key() else {
            tracing::warn!(id = %txn.id, raw = txn.date.raw(), "skipping export row with malformed date");
            continue;
        };
        let row = months
            .entry(month)
            .or_insert_with(|| MonthlyExportRow::new(txn.user_id, month));

        match &txn.kind {
            TransactionKind::Income => row.income += txn.amount,
            TransactionKind::Expense { category } => match category.tag() {
                Some(tag) => row.categories[tag.index()] += txn.amount,
                None => {
                    tracing::warn!(id = %txn.id, category = category.label(), "skipping export amount with unrecognized category");
                }
            },
        }
    }

    months.into_values().collect()
}

/// Write rows as CSV, header first
pub fn write_csv<W: Write>(rows: &[MonthlyExportRow], writer: W) -> TallyResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(EXPORT_HEADER)?;
    for row in rows {
        csv.write_record(row.record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Render rows as a CSV string
pub fn to_csv(rows: &[MonthlyExportRow]) -> TallyResult<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| crate::error::TallyError::Export(e.to_string()))
}
