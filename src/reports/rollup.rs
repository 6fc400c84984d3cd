//! Category rollup
//!
//! Folds expenses into one summary per category for the chart renderer. An
//! empty result is replaced by a single placeholder slice so the renderer
//! always has something to draw; callers must not add it to real totals.

use std::collections::BTreeMap;

use crate::models::{CategoryTag, Money, Transaction};

/// Label shown for the placeholder slice
pub const NO_DATA_LABEL: &str = "No Data";

/// What a chart slice stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Category(CategoryTag),
    /// Synthetic entry emitted when there is nothing to chart
    NoData,
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub slice: Slice,
    pub amount: Money,
    /// Fraction of all grouped expense amounts (0.0–1.0)
    pub share: f64,
}

impl CategorySummary {
    fn placeholder() -> Self {
        Self {
            slice: Slice::NoData,
            amount: Money::from_units(1, 0),
            share: 1.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.slice == Slice::NoData
    }

    pub fn category(&self) -> Option<CategoryTag> {
        match self.slice {
            Slice::Category(tag) => Some(tag),
            Slice::NoData => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.slice {
            Slice::Category(tag) => tag.label(),
            Slice::NoData => NO_DATA_LABEL,
        }
    }
}

/// Group expenses by category and compute each category's share.
///
/// Income rows are ignored and unrecognized categories are skipped with a
/// warning. Summaries are ordered by amount, largest first, ties in category
/// order. No expenses at all yields exactly one placeholder summary.
pub fn rollup<'a, I>(transactions: I) -> Vec<CategorySummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut sums: BTreeMap<CategoryTag, Money> = BTreeMap::new();

    for txn in transactions {
        let Some(category) = txn.category() else {
            continue;
        };
        match category.tag() {
            Some(tag) => *sums.entry(tag).or_default() += txn.amount,
            None => {
                tracing::warn!(id = %txn.id, category = category.label(), "skipping expense with unrecognized category");
            }
        }
    }

    if sums.is_empty() {
        return vec![CategorySummary::placeholder()];
    }

    let total: Money = sums.values().sum();
    let mut summaries: Vec<CategorySummary> = sums
        .into_iter()
        .map(|(tag, amount)| CategorySummary {
            slice: Slice::Category(tag),
            amount,
            share: if total.is_zero() {
                0.0
            } else {
                amount.as_f64() / total.as_f64()
            },
        })
        .collect();

    // stable sort keeps category order among equal amounts
    summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
    summaries
}

/// Sum of real (non-placeholder) slices
pub fn charted_total(summaries: &[CategorySummary]) -> Money {
    summaries
        .iter()
        .filter(|s| !s.is_placeholder())
        .map(|s| s.amount)
        .sum()
}

/// Whether the rollup has nothing real to show
pub fn is_empty_chart(summaries: &[CategorySummary]) -> bool {
    summaries.iter().all(CategorySummary::is_placeholder)
}
