//! Transaction history for one period, newest first

use chrono::NaiveDateTime;

use super::filter::filter_by_period;
use crate::models::{ReportPeriod, Transaction};

/// Period subset sorted newest first, optionally narrowed by a case-insensitive
/// match on the category label ("Income" for income rows)
pub fn history<'a>(
    transactions: &'a [Transaction],
    period: ReportPeriod,
    now: NaiveDateTime,
    search: Option<&str>,
) -> Vec<&'a Transaction> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<&Transaction> = filter_by_period(transactions, period, now)
        .into_iter()
        .filter(|txn| match &needle {
            Some(needle) => txn.category_label().to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    rows.sort_by(|a, b| b.date.chronological_cmp(&a.date));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTag, Money, Timestamp, UserId};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn sample() -> Vec<Transaction> {
        let user = UserId::new(1);
        vec![
            Transaction::expense(user, Money::from_units(12, 0), CategoryTag::Food, Timestamp::parse("2024-06-02T12:00:00")),
            Transaction::income(user, Money::from_units(900, 0), Timestamp::parse("2024-06-01T08:00:00")),
            Transaction::expense(user, Money::from_units(30, 0), CategoryTag::PersonalSpending, Timestamp::parse("2024-06-14T20:00:00")),
            Transaction::expense(user, Money::from_units(8, 0), CategoryTag::Food, Timestamp::parse("2024-05-31T23:00:00")),
        ]
    }

    #[test]
    fn test_newest_first() {
        let rows = sample();
        let listed = history(&rows, ReportPeriod::Monthly, at("2024-06-15T09:00:00"), None);
        let dates: Vec<_> = listed.iter().map(|t| t.date.raw()).collect();
        assert_eq!(
            dates,
            vec!["2024-06-14T20:00:00", "2024-06-02T12:00:00", "2024-06-01T08:00:00"]
        );
    }

    #[test]
    fn test_search_by_category_label() {
        let rows = sample();
        let now = at("2024-06-15T09:00:00");

        let food = history(&rows, ReportPeriod::Yearly, now, Some("FOOD"));
        assert_eq!(food.len(), 2);

        let personal = history(&rows, ReportPeriod::Yearly, now, Some("personal"));
        assert_eq!(personal.len(), 1);

        let income = history(&rows, ReportPeriod::Yearly, now, Some("inc"));
        assert_eq!(income.len(), 1);
        assert!(income[0].is_income());

        let blank = history(&rows, ReportPeriod::Yearly, now, Some("  "));
        assert_eq!(blank.len(), 4);
    }
}
