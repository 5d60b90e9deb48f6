//! Calendar periods
//!
//! [`Month`] is the aggregation key for monthly rollups. [`Period`] is a date
//! range used to scope reports and to count owner pay cycles.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, ordered chronologically
///
/// Always a month chrono can represent, so its first and last days exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "MonthParts", try_from = "MonthParts")]
pub struct Month {
    first: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl From<Month> for MonthParts {
    fn from(m: Month) -> Self {
        Self {
            year: m.year(),
            month: m.month(),
        }
    }
}

impl TryFrom<MonthParts> for Month {
    type Error = PeriodParseError;

    fn try_from(parts: MonthParts) -> Result<Self, Self::Error> {
        Month::checked(parts.year, parts.month)
    }
}

impl Month {
    /// Create a month, returning `None` when `month` is outside 1-12 or the
    /// year is outside the supported calendar
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    fn checked(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Self::new(year, month).ok_or(PeriodParseError::YearOutOfRange(year))
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        // Only the calendar's final month has no successor
        self.next()
            .and_then(|next| next.first.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The following month, or `None` past the end of the calendar
    pub fn next(&self) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// The preceding month, or `None` before the start of the calendar
    pub fn prev(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// Every month from `self` through `end`, inclusive; empty if `end` is earlier
    pub fn through(self, end: Month) -> impl Iterator<Item = Month> {
        std::iter::successors(Some(self), Month::next).take_while(move |m| *m <= end)
    }

    /// Parse a month string in "YYYY-MM" form
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::checked(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// A reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// A single calendar month (e.g., "2025-01")
    Month(Month),

    /// A full calendar year (e.g., "2025")
    Year(i32),

    /// Custom inclusive date range
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    pub fn month(year: i32, month: u32) -> Option<Self> {
        Month::new(year, month).map(Self::Month)
    }

    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom { start, end }
    }

    /// January 1st of `as_of`'s year through `as_of`
    pub fn year_to_date(as_of: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(as_of.year(), 1, 1).unwrap_or(as_of);
        Self::Custom { start, end: as_of }
    }

    /// A full calendar year, if the calendar covers it
    pub fn year(year: i32) -> Option<Self> {
        Month::new(year, 1).and(Month::new(year, 12)).map(|_| Self::Year(year))
    }

    /// First day of the period
    ///
    /// A `Year` outside the calendar clamps to the calendar's nearest end.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Month(m) => m.first_day(),
            Self::Year(year) => Month::new(*year, 1)
                .map(|m| m.first_day())
                .unwrap_or_else(|| calendar_end(*year)),
            Self::Custom { start, .. } => *start,
        }
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Month(m) => m.last_day(),
            Self::Year(year) => Month::new(*year, 12)
                .map(|m| m.last_day())
                .unwrap_or_else(|| calendar_end(*year)),
            Self::Custom { end, .. } => *end,
        }
    }

    /// Number of elapsed days, counting both ends; zero for an inverted range
    pub fn days(&self) -> i64 {
        let span = (self.end_date() - self.start_date()).num_days() + 1;
        span.max(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Yearly: "2025"
    /// - Custom: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Ok(Self::Custom { start, end });
        }

        if s.contains('-') {
            return Month::parse(s).map(Self::Month);
        }

        let year = s
            .parse::<i32>()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::year(year).ok_or(PeriodParseError::YearOutOfRange(year))
    }
}

fn calendar_end(year: i32) -> NaiveDate {
    if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month(m) => write!(f, "{}", m),
            Self::Year(year) => write!(f, "{:04}", year),
            Self::Custom { start, end } => {
                write!(
                    f,
                    "{}..{}",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                )
            }
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.last_day(), date(2024, 12, 31));
    }

    #[test]
    fn test_month_navigation() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1));
        assert_eq!(dec.next().and_then(|m| m.prev()), Some(dec));
        assert_eq!(Month::of(date(2024, 2, 29)), Month::new(2024, 2).unwrap());
    }

    #[test]
    fn test_month_through() {
        let nov = Month::new(2023, 11).unwrap();
        let feb = Month::new(2024, 2).unwrap();
        let months: Vec<String> = nov.through(feb).map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

        assert_eq!(feb.through(nov).count(), 0);
    }

    #[test]
    fn test_month_rejects_out_of_range() {
        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 13).is_none());
        assert_eq!(Month::parse("2024-13"), Err(PeriodParseError::InvalidMonth(13)));
        assert!(Month::new(300000, 1).is_none());
        assert_eq!(
            Month::parse("300000-01"),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
    }

    #[test]
    fn test_year_outside_calendar_is_rejected() {
        assert_eq!(
            Period::parse("300000"),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
        assert!(Period::year(-300000).is_none());

        // Constructed directly, it stays usable without panicking
        let far = Period::Year(300000);
        assert_eq!(far.start_date(), NaiveDate::MAX);
        assert_eq!(far.days(), 1);
    }

    #[test]
    fn test_last_month_of_calendar() {
        let last = Month::of(NaiveDate::MAX);
        assert_eq!(last.next(), None);
        assert_eq!(last.last_day(), NaiveDate::MAX);
        assert_eq!(last.through(last).count(), 1);
    }

    #[test]
    fn test_period_days() {
        assert_eq!(Period::month(2024, 1).unwrap().days(), 31);
        assert_eq!(Period::Year(2024).days(), 366);
        assert_eq!(Period::custom(date(2024, 1, 1), date(2024, 1, 14)).days(), 14);
        assert_eq!(Period::custom(date(2024, 1, 5), date(2024, 1, 1)).days(), 0);
    }

    #[test]
    fn test_year_to_date() {
        let ytd = Period::year_to_date(date(2024, 3, 10));
        assert_eq!(ytd.start_date(), date(2024, 1, 1));
        assert_eq!(ytd.end_date(), date(2024, 3, 10));
        assert!(ytd.contains(date(2024, 2, 1)));
        assert!(!ytd.contains(date(2023, 12, 31)));
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(Period::parse("2025-01").unwrap(), Period::month(2025, 1).unwrap());
        assert_eq!(Period::parse("2025").unwrap(), Period::Year(2025));
        assert_eq!(
            Period::parse("2025-01-01..2025-01-15").unwrap(),
            Period::custom(date(2025, 1, 1), date(2025, 1, 15))
        );
        assert!(Period::parse("january").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::month(2025, 1).unwrap().to_string(), "2025-01");
        assert_eq!(Period::Year(2025).to_string(), "2025");
    }

    #[test]
    fn test_serialization() {
        let period = Period::month(2025, 1).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains(r#""year":2025,"month":1"#));
        let deserialized: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);

        let bad = r#"{"type":"Month","value":{"year":2025,"month":13}}"#;
        assert!(serde_json::from_str::<Period>(bad).is_err());
    }
}
