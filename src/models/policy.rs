//! Income allocation policy
//!
//! An immutable bundle of parameters handed to the allocation calculator.
//! The only way to obtain one is through [`AllocationPolicy::new`] (or serde,
//! which routes through the same checks), so the calculator can rely on
//! rates in [0, 1] and a non-zero pay interval.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Money;

/// Reasons a policy is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("owner pay amount must be positive, got {0}")]
    NonPositiveOwnerPay(Money),

    #[error("owner pay interval must be at least one day")]
    ZeroInterval,
}

/// Raw, unchecked policy fields as they appear in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyFields {
    pub tax_rate: f64,
    pub owner_pay_amount: Money,
    pub owner_pay_interval_days: u32,
    pub reinvestment_rate: f64,
}

/// How income is split between tax, owner pay, reinvestment and cushion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyFields", into = "PolicyFields")]
pub struct AllocationPolicy {
    tax_rate: f64,
    owner_pay_amount: Money,
    owner_pay_interval_days: u32,
    reinvestment_rate: f64,
}

impl AllocationPolicy {
    pub const DEFAULT_TAX_RATE: f64 = 0.40;
    pub const DEFAULT_OWNER_PAY: Money = Money::from_dollars(3000);
    pub const DEFAULT_INTERVAL_DAYS: u32 = 14;
    pub const DEFAULT_REINVESTMENT_RATE: f64 = 0.20;

    pub fn new(
        tax_rate: f64,
        owner_pay_amount: Money,
        owner_pay_interval_days: u32,
        reinvestment_rate: f64,
    ) -> Result<Self, PolicyError> {
        check_rate("tax rate", tax_rate)?;
        check_rate("reinvestment rate", reinvestment_rate)?;
        if !owner_pay_amount.is_positive() {
            return Err(PolicyError::NonPositiveOwnerPay(owner_pay_amount));
        }
        if owner_pay_interval_days == 0 {
            return Err(PolicyError::ZeroInterval);
        }

        Ok(Self {
            tax_rate,
            owner_pay_amount,
            owner_pay_interval_days,
            reinvestment_rate,
        })
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn owner_pay_amount(&self) -> Money {
        self.owner_pay_amount
    }

    pub fn owner_pay_interval_days(&self) -> u32 {
        self.owner_pay_interval_days
    }

    pub fn reinvestment_rate(&self) -> f64 {
        self.reinvestment_rate
    }

    /// Copy of this policy with a different tax rate
    pub fn with_tax_rate(&self, tax_rate: f64) -> Result<Self, PolicyError> {
        Self::new(
            tax_rate,
            self.owner_pay_amount,
            self.owner_pay_interval_days,
            self.reinvestment_rate,
        )
    }

    /// Copy of this policy with a different owner pay schedule
    pub fn with_owner_pay(&self, amount: Money, interval_days: u32) -> Result<Self, PolicyError> {
        Self::new(self.tax_rate, amount, interval_days, self.reinvestment_rate)
    }

    /// Copy of this policy with a different reinvestment rate
    pub fn with_reinvestment_rate(&self, reinvestment_rate: f64) -> Result<Self, PolicyError> {
        Self::new(
            self.tax_rate,
            self.owner_pay_amount,
            self.owner_pay_interval_days,
            reinvestment_rate,
        )
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Self::DEFAULT_TAX_RATE,
            owner_pay_amount: Self::DEFAULT_OWNER_PAY,
            owner_pay_interval_days: Self::DEFAULT_INTERVAL_DAYS,
            reinvestment_rate: Self::DEFAULT_REINVESTMENT_RATE,
        }
    }
}

impl TryFrom<PolicyFields> for AllocationPolicy {
    type Error = PolicyError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.tax_rate,
            fields.owner_pay_amount,
            fields.owner_pay_interval_days,
            fields.reinvestment_rate,
        )
    }
}

impl From<AllocationPolicy> for PolicyFields {
    fn from(policy: AllocationPolicy) -> Self {
        Self {
            tax_rate: policy.tax_rate,
            owner_pay_amount: policy.owner_pay_amount,
            owner_pay_interval_days: policy.owner_pay_interval_days,
            reinvestment_rate: policy.reinvestment_rate,
        }
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::RateOutOfRange { name, value })
    }
}
