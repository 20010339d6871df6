//! Fixed-point money with two decimal places.
//!
//! Amounts are stored as whole cents so that accrual never drifts. Every
//! operation that could go below zero is checked, and division truncates
//! instead of rounding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{TutorError, TutorResult};

pub const MESSAGE_CONSTRAINTS: &str = "Money-related fields should be formatted with a decimal point '.' \
    as a separator between the dollars and cents, and adhere to the following constraints:\n\
    1. Money-related fields should only contain numbers and at most one decimal point.\n\
    2. Money-related fields should not start or end with a decimal point \
    and should have at most two decimal places.";

const CENTS_PER_UNIT: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn checked_add(self, other: Money) -> TutorResult<Money> {
        self.cents
            .checked_add(other.cents)
            .map(Money::from_cents)
            .ok_or_else(|| TutorError::validation("Amount is too large"))
    }

    /// Subtracts `other`, returning `None` if the result would be negative.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.cents.checked_sub(other.cents).map(Money::from_cents)
    }

    pub fn times(self, count: u64) -> TutorResult<Money> {
        self.cents
            .checked_mul(count)
            .map(Money::from_cents)
            .ok_or_else(|| TutorError::validation("Amount is too large"))
    }

    /// Prorates an hourly amount over `minutes`, truncating to the cent.
    pub fn per_minutes(self, minutes: u64) -> TutorResult<Money> {
        self.cents
            .checked_mul(minutes)
            .map(|total| Money::from_cents(total / 60))
            .ok_or_else(|| TutorError::validation("Amount is too large"))
    }
}

impl FromStr for Money {
    type Err = TutorError;

    fn from_str(value: &str) -> TutorResult<Self> {
        if value.is_empty() {
            return Ok(Money::ZERO);
        }

        let (units, fraction) = match value.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (value, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        let has_decimal_point = value.contains('.');
        if units.is_empty()
            || !all_digits(units)
            || !all_digits(fraction)
            || (has_decimal_point && !(1..=2).contains(&fraction.len()))
        {
            return Err(TutorError::validation(MESSAGE_CONSTRAINTS));
        }

        let units: u64 = units
            .parse()
            .map_err(|_| TutorError::validation("Amount is too large"))?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or(0) * 10,
            _ => fraction.parse::<u64>().unwrap_or(0),
        };

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|total| total.checked_add(cents))
            .map(Money::from_cents)
            .ok_or_else(|| TutorError::validation("Amount is too large"))
    }
}

impl TryFrom<String> for Money {
    type Error = TutorError;

    fn try_from(value: String) -> TutorResult<Self> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }
}
