//! Reporting periods
//!
//! A [`ReportPeriod`] is a selector anchored to "now": the current day, the
//! current Sunday-to-Saturday week, the current month or the current year. Its
//! [`PeriodWindow`] is inclusive at both ends and ends on the last millisecond
//! of its last day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting period selector
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Daily,
        ReportPeriod::Weekly,
        ReportPeriod::Monthly,
        ReportPeriod::Yearly,
    ];

    /// The window of this period that contains `now`
    pub fn window(&self, now: NaiveDateTime) -> PeriodWindow {
        let today = now.date();
        let (first_day, last_day) = match self {
            Self::Daily => (today, today),
            Self::Weekly => {
                let sunday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
                (sunday, sunday + Duration::days(6))
            }
            Self::Monthly => {
                let first = today - Duration::days(i64::from(today.day0()));
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX);
                (first, last)
            }
            Self::Yearly => {
                let first = today - Duration::days(i64::from(today.ordinal0()));
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(NaiveDate::MAX);
                (first, last)
            }
        };

        PeriodWindow {
            start: first_day.and_time(NaiveTime::MIN),
            end: end_of_day(last_day),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PeriodParseError(wanted.to_string()))
    }
}

/// Inclusive time window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PeriodWindow {
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_day() == self.last_day() {
            write!(f, "{}", self.first_day().format("%Y-%m-%d"))
        } else {
            write!(
                f,
                "{} to {}",
                self.first_day().format("%Y-%m-%d"),
                self.last_day().format("%Y-%m-%d")
            )
        }
    }
}

/// 23:59:59.999 on the given day
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid period '{}' (expected daily, weekly, monthly or yearly)",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}
