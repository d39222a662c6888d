use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::KhataError;

/// Minor units (paisa) per major unit (rupee).
pub const MINOR_PER_MAJOR: i64 = 100;

/// An amount of money as an integer number of paisa.
///
/// Sums and comparisons happen on the integer; [`Decimal`] is only used when
/// converting user input in ([`Money::from_major`]) and display values out
/// ([`Money::to_major`]).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero rupees.
    pub const ZERO: Money = Money(0);

    /// Money from a count of paisa.
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Money from whole rupees.
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * MINOR_PER_MAJOR)
    }

    /// The amount in paisa.
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Convert a decimal rupee amount, rounding to the nearest paisa
    /// (half away from zero). Negative amounts are allowed.
    pub fn from_major(major: Decimal) -> Result<Self, KhataError> {
        let scaled = major
            .checked_mul(dec!(100))
            .ok_or_else(|| KhataError::amount("amount", "out of range"))?;
        round_to_minor(scaled).ok_or_else(|| KhataError::amount("amount", "out of range"))
    }

    /// Like [`Money::from_major`] for contexts that require a non-negative
    /// amount; `field` names the input in the error.
    pub fn from_major_non_negative(major: Decimal, field: &str) -> Result<Self, KhataError> {
        if major.is_sign_negative() && !major.is_zero() {
            return Err(KhataError::amount(field, "must not be negative"));
        }
        Self::from_major(major).map_err(|_| KhataError::amount(field, "out of range"))
    }

    /// Convert a floating-point rupee amount coming from a form widget.
    pub fn from_major_f64(major: f64) -> Result<Self, KhataError> {
        if !major.is_finite() {
            return Err(KhataError::amount("amount", "must be a finite number"));
        }
        let value = Decimal::try_from(major)
            .map_err(|_| KhataError::amount("amount", "out of range"))?;
        Self::from_major(value)
    }

    /// Parse a rupee amount typed by the user, e.g. `"1234.5"`.
    pub fn from_major_str(input: &str) -> Result<Self, KhataError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(KhataError::amount("amount", "must not be empty"));
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|_| KhataError::amount("amount", format!("'{trimmed}' is not a number")))?;
        Self::from_major(value)
    }

    /// The amount in rupees. Exact: no rounding takes place.
    pub fn to_major(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// True for exactly zero paisa.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True for amounts above zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// True for amounts below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value. Saturates at `i64::MAX` paisa for the most negative amount.
    pub fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Addition that returns `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtraction that returns `None` on overflow.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Sum an iterator of amounts, failing instead of wrapping on overflow.
    pub fn checked_sum<I>(amounts: I, context: &'static str) -> Result<Money, KhataError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
            .ok_or(KhataError::Overflow { context })
    }
}

/// Round a decimal paisa value to a whole paisa, half away from zero.
/// `None` when the result does not fit.
pub(crate) fn round_to_minor(value: Decimal) -> Option<Money> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .map(Money)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_major())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
