//! Stored transaction timestamps
//!
//! Dates are persisted as ISO-8601 text. A [`Timestamp`] keeps that text
//! verbatim (so a malformed value survives a load/save cycle untouched) next to
//! its local-calendar interpretation, which is `None` when the text does not
//! parse. Aggregation only ever looks at the parsed value.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Layouts accepted for timestamps without an explicit offset
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    local: Option<NaiveDateTime>,
}

impl Timestamp {
    /// Interpret stored text; never fails, malformed text yields an unparsed stamp
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let local = parse_local(&raw);
        Self { raw, local }
    }

    /// Stamp a local date-time, stored with millisecond precision
    pub fn from_local(local: NaiveDateTime) -> Self {
        Self {
            raw: local.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            local: Some(local),
        }
    }

    /// Stamp the start of a local calendar day
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_local(date.and_time(NaiveTime::MIN))
    }

    pub fn now() -> Self {
        Self::from_local(Local::now().naive_local())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed local date-time, `None` for malformed text
    pub fn local(&self) -> Option<NaiveDateTime> {
        self.local
    }

    pub fn is_valid(&self) -> bool {
        self.local.is_some()
    }

    /// Calendar month bucket of the stored text (its `YYYY-MM` prefix,
    /// ignoring surrounding whitespace).
    ///
    /// Only available for parseable stamps.
    pub fn month_key(&self) -> Option<MonthKey> {
        self.local?;
        MonthKey::parse(self.raw.trim().get(..7)?)
    }

    /// Chronological order; malformed stamps sort before every valid one
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.local
            .cmp(&other.local)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Timestamp {}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<Timestamp> for String {
    fn from(stamp: Timestamp) -> Self {
        stamp.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.local {
            Some(local) => write!(f, "{}", local.format("%Y-%m-%d %H:%M")),
            None => write!(f, "invalid date ({})", self.raw),
        }
    }
}

fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// A calendar month, rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse `YYYY-MM`
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_parse_naive_forms() {
        assert_eq!(
            Timestamp::parse("2024-06-15T23:59:59.999").local(),
            Some(at("2024-06-15T23:59:59.999"))
        );
        assert_eq!(
            Timestamp::parse("2024-06-15 08:30:00").local(),
            Some(at("2024-06-15T08:30:00"))
        );
        assert_eq!(
            Timestamp::parse("2024-06-15").local(),
            Some(at("2024-06-15T00:00:00"))
        );
    }

    #[test]
    fn test_parse_with_offset_converts_to_local() {
        let stamp = Timestamp::parse("2024-06-15T10:00:00.000Z");
        let expected = DateTime::parse_from_rfc3339("2024-06-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(stamp.local(), Some(expected));
    }

    #[test]
    fn test_malformed_is_kept_but_unparsed() {
        let stamp = Timestamp::parse("yesterday-ish");
        assert!(!stamp.is_valid());
        assert_eq!(stamp.raw(), "yesterday-ish");
        assert_eq!(stamp.month_key(), None);
        assert!(!Timestamp::parse("").is_valid());
        assert!(!Timestamp::parse("2024-02-30").is_valid());
    }

    #[test]
    fn test_month_key_uses_stored_prefix() {
        let stamp = Timestamp::parse("2024-01-10T12:00:00");
        assert_eq!(stamp.month_key(), MonthKey::new(2024, 1));
        assert_eq!(stamp.month_key().unwrap().to_string(), "2024-01");
    }

    #[test]
    fn test_padded_text_keeps_month_key() {
        let stamp = Timestamp::parse(" 2024-06-01\t");
        assert!(stamp.is_valid());
        assert_eq!(stamp.raw(), " 2024-06-01\t");
        assert_eq!(stamp.month_key(), MonthKey::new(2024, 6));
    }

    #[test]
    fn test_from_local_round_trips() {
        let stamp = Timestamp::from_local(at("2024-03-01T09:05:07.250"));
        assert_eq!(stamp.raw(), "2024-03-01T09:05:07.250");
        assert_eq!(Timestamp::parse(stamp.raw()).local(), stamp.local());
    }

    #[test]
    fn test_serde_keeps_raw_text() {
        let stamp: Timestamp = serde_json::from_str("\"not a date\"").unwrap();
        assert_eq!(serde_json::to_string(&stamp).unwrap(), "\"not a date\"");
    }

    #[test]
    fn test_month_key_parse() {
        assert_eq!(MonthKey::parse("2024-13"), None);
        assert_eq!(MonthKey::parse("24-01"), None);
        assert!(MonthKey::new(2024, 2).unwrap() < MonthKey::new(2024, 10).unwrap());
    }
}
