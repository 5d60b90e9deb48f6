//! Recurring expense model
//!
//! Supports mixed billing cadences. Each [`Frequency`] carries its own
//! normalization factor, so adding a cadence means adding a variant and its
//! `occurrences_per_year`; nothing else needs to special-case it.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Billing cadence of a recurring expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [Self::Weekly, Self::Monthly, Self::Quarterly, Self::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annual => "Annual",
        }
    }

    /// Case-insensitive match against the canonical names ("Yearly" is an alias of Annual)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("yearly") {
            return Some(Self::Annual);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
    }

    /// Billing events in a year
    pub const fn occurrences_per_year(&self) -> i64 {
        match self {
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }

    /// Normalize one billing amount to its equivalent monthly cost
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        amount.scale(self.occurrences_per_year(), 12)
    }

    /// Total billed over a year
    pub fn annual_equivalent(&self, amount: Money) -> Money {
        amount * self.occurrences_per_year()
    }

    /// Whether this cadence is pinned to a calendar month and so needs a due month
    pub const fn requires_due_month(&self) -> bool {
        matches!(self, Self::Quarterly | Self::Annual)
    }

    /// Whether a bill anchored at `due_month` falls due in `target`
    ///
    /// Cadences that bill at least monthly are always due. Anchored cadences
    /// without a due month are never due.
    pub fn is_due_in(&self, due_month: Option<DueMonth>, target: DueMonth) -> bool {
        match self {
            Self::Weekly | Self::Monthly => true,
            Self::Annual => due_month == Some(target),
            Self::Quarterly => due_month.is_some_and(|anchor| {
                (i32::from(target.number()) - i32::from(anchor.number())).rem_euclid(3) == 0
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month of the year, 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DueMonth(u8);

impl DueMonth {
    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    /// The month of the year `date` falls in
    pub fn of(date: NaiveDate) -> Self {
        // chrono months are always 1-12
        Self(date.month() as u8)
    }

    pub const fn number(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }

    /// Accepts "3", "03", "March", "march" or "Mar"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::new(n);
        }
        MONTH_NAMES
            .iter()
            .position(|name| {
                name.eq_ignore_ascii_case(s) || (s.len() == 3 && name[..3].eq_ignore_ascii_case(s))
            })
            .and_then(|idx| Self::new(idx as u8 + 1))
    }

    pub fn names() -> &'static [&'static str; 12] {
        &MONTH_NAMES
    }
}

impl TryFrom<u8> for DueMonth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("month must be 1-12, got {}", value))
    }
}

impl From<DueMonth> for u8 {
    fn from(month: DueMonth) -> Self {
        month.0
    }
}

impl fmt::Display for DueMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recurring business cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub vendor: String,
    pub frequency: Frequency,
    pub amount: Money,
    /// Present iff `frequency.requires_due_month()`
    pub due_month: Option<DueMonth>,
    #[serde(default)]
    pub notes: String,
}

impl RecurringExpense {
    /// A cost billed every month
    pub fn monthly(vendor: impl Into<String>, amount: Money) -> Self {
        Self {
            vendor: vendor.into(),
            frequency: Frequency::Monthly,
            amount,
            due_month: None,
            notes: String::new(),
        }
    }

    /// A cost billed once a year in `due_month`
    pub fn annual(vendor: impl Into<String>, amount: Money, due_month: DueMonth) -> Self {
        Self {
            vendor: vendor.into(),
            frequency: Frequency::Annual,
            amount,
            due_month: Some(due_month),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn monthly_equivalent(&self) -> Money {
        self.frequency.monthly_equivalent(self.amount)
    }

    pub fn annual_equivalent(&self) -> Money {
        self.frequency.annual_equivalent(self.amount)
    }

    pub fn is_due_in(&self, target: DueMonth) -> bool {
        self.frequency.is_due_in(self.due_month, target)
    }
}
