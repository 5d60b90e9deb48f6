//! Savings suggestions for recurring costs
//!
//! Advisory only. Nothing here feeds back into the cost totals, so the
//! heuristics can change freely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{DueMonth, Frequency, Money, RecurringExpense};

/// Tunables for the prepay suggestion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsHeuristics {
    /// Assumed discount for paying a monthly vendor annually
    #[serde(default = "default_annual_discount_rate")]
    pub annual_discount_rate: f64,

    /// A prepay suggestion must save strictly more than this per year
    #[serde(default = "default_min_annual_savings")]
    pub min_annual_savings: Money,
}

fn default_annual_discount_rate() -> f64 {
    0.10
}

fn default_min_annual_savings() -> Money {
    Money::from_dollars(50)
}

impl Default for SavingsHeuristics {
    fn default() -> Self {
        Self {
            annual_discount_rate: default_annual_discount_rate(),
            min_annual_savings: default_min_annual_savings(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionKind {
    /// Several vendors already bill on the same cadence and month
    SharedBillingDate,
    /// Vendors on one cadence bill in different months and could be aligned
    ConsolidateBillingMonths,
    /// A monthly vendor that would likely be cheaper billed annually
    PrepayAnnually,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsSuggestion {
    pub kind: SuggestionKind,
    pub frequency: Frequency,
    pub vendors: Vec<String>,
    pub months: Vec<DueMonth>,
    pub estimated_annual_savings: Option<Money>,
    pub message: String,
}

/// Every suggestion for `expenses`, grouped suggestions first
pub fn suggest(expenses: &[RecurringExpense], heuristics: &SavingsHeuristics) -> Vec<SavingsSuggestion> {
    let mut suggestions = billing_groups(expenses);
    suggestions.extend(prepay_candidates(expenses, heuristics));

    debug!(count = suggestions.len(), "Generated savings suggestions");
    suggestions
}

/// Shared-date and consolidation candidates among month-anchored cadences
fn billing_groups(expenses: &[RecurringExpense]) -> Vec<SavingsSuggestion> {
    let mut suggestions = Vec::new();

    for frequency in Frequency::ALL.into_iter().filter(Frequency::requires_due_month) {
        let mut by_month: BTreeMap<DueMonth, Vec<&str>> = BTreeMap::new();
        for expense in expenses.iter().filter(|e| e.frequency == frequency) {
            if let Some(month) = expense.due_month {
                by_month.entry(month).or_default().push(expense.vendor.as_str());
            }
        }

        for (month, vendors) in by_month.iter().filter(|(_, v)| v.len() >= 2) {
            suggestions.push(SavingsSuggestion {
                kind: SuggestionKind::SharedBillingDate,
                frequency,
                vendors: vendors.iter().map(|v| v.to_string()).collect(),
                months: vec![*month],
                estimated_annual_savings: None,
                message: format!(
                    "{} {} bills are all due in {}; review them together",
                    vendors.len(),
                    frequency.as_str().to_lowercase(),
                    month
                ),
            });
        }

        if by_month.len() >= 2 {
            let months: Vec<DueMonth> = by_month.keys().copied().collect();
            let vendors: Vec<String> = by_month
                .values()
                .flatten()
                .map(|v| v.to_string())
                .collect();
            suggestions.push(SavingsSuggestion {
                kind: SuggestionKind::ConsolidateBillingMonths,
                frequency,
                message: format!(
                    "{} {} bills are spread over {} months; aligning renewals would cut billing events",
                    vendors.len(),
                    frequency.as_str().to_lowercase(),
                    months.len()
                ),
                vendors,
                months,
                estimated_annual_savings: None,
            });
        }
    }

    suggestions
}

/// Monthly vendors whose estimated annual-billing discount clears the threshold
fn prepay_candidates(
    expenses: &[RecurringExpense],
    heuristics: &SavingsHeuristics,
) -> Vec<SavingsSuggestion> {
    expenses
        .iter()
        .filter(|e| e.frequency == Frequency::Monthly)
        .filter_map(|e| {
            let savings = e.annual_equivalent().apply_rate(heuristics.annual_discount_rate);
            (savings > heuristics.min_annual_savings).then(|| SavingsSuggestion {
                kind: SuggestionKind::PrepayAnnually,
                frequency: e.frequency,
                vendors: vec![e.vendor.clone()],
                months: Vec::new(),
                estimated_annual_savings: Some(savings),
                message: format!(
                    "Consider annual billing for {} to save about {}/year",
                    e.vendor, savings
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(n: u8) -> DueMonth {
        DueMonth::new(n).unwrap()
    }

    fn sample() -> Vec<RecurringExpense> {
        vec![
            RecurringExpense::monthly("Adobe", Money::from_dollars(99)),
            RecurringExpense::annual("Microsoft", Money::from_dollars(1200), month(1)),
            RecurringExpense::monthly("AWS", Money::from_dollars(50)),
            RecurringExpense::annual("Insurance", Money::from_dollars(2400), month(1)),
        ]
    }

    #[test]
    fn test_shared_billing_date() {
        let suggestions = suggest(&sample(), &SavingsHeuristics::default());
        let shared: Vec<_> = suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::SharedBillingDate)
            .collect();

        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].vendors, vec!["Microsoft", "Insurance"]);
        assert_eq!(shared[0].months, vec![month(1)]);
    }

    #[test]
    fn test_prepay_threshold() {
        let suggestions = suggest(&sample(), &SavingsHeuristics::default());
        let prepay: Vec<_> = suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::PrepayAnnually)
            .collect();

        // Adobe: 99 * 12 * 10% = 118.80; AWS: 50 * 12 * 10% = 60
        assert_eq!(prepay.len(), 2);
        assert_eq!(prepay[0].estimated_annual_savings, Some(Money::from_cents(11880)));

        let strict = SavingsHeuristics {
            annual_discount_rate: 0.10,
            min_annual_savings: Money::from_dollars(60),
        };
        let prepay = prepay_candidates(&sample(), &strict);
        assert_eq!(prepay.len(), 1);
        assert_eq!(prepay[0].vendors, vec!["Adobe"]);
    }

    #[test]
    fn test_consolidation_across_months() {
        let expenses = vec![
            RecurringExpense::annual("Domain", Money::from_dollars(20), month(3)),
            RecurringExpense::annual("Insurance", Money::from_dollars(2400), month(9)),
        ];
        let suggestions = suggest(&expenses, &SavingsHeuristics::default());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::ConsolidateBillingMonths);
        assert_eq!(suggestions[0].months, vec![month(3), month(9)]);
    }

    #[test]
    fn test_suggestions_do_not_touch_inputs() {
        let expenses = sample();
        let before = expenses.clone();
        let _ = suggest(&expenses, &SavingsHeuristics::default());
        assert_eq!(expenses, before);
    }

    #[test]
    fn test_nothing_to_suggest() {
        let expenses = vec![RecurringExpense::monthly("Domain", Money::from_dollars(2))];
        assert!(suggest(&expenses, &SavingsHeuristics::default()).is_empty());
    }
}
