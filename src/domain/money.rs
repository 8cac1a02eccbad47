use crate::error::{Result, VendingError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary amount in minor currency units.
///
/// Every amount the machine handles (prices, coin values, revenue, change) is
/// an integer count of minor units. Major/minor formatting only happens at the
/// edges, through [`Cents::parse`] and the `Display` impl.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Self = Self(0);

    pub fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Converts an amount in major units into minor units, rounding half to
    /// even at the minor-unit boundary.
    pub fn from_major(major: Decimal) -> Result<Self> {
        if major.is_sign_negative() {
            return Err(VendingError::InvalidArgument(format!(
                "amount must not be negative: {major}"
            )));
        }
        major
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|minor| minor.round())
            .and_then(|minor| minor.to_u64())
            .map(Self)
            .ok_or_else(|| VendingError::InvalidArgument(format!("amount out of range: {major}")))
    }

    /// Parses `"major.minor"`, `"major,minor"` or `"major"` into minor units.
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().replace(',', ".");
        if normalized.is_empty() {
            return Err(VendingError::InvalidArgument(
                "amount must not be empty".to_string(),
            ));
        }
        let major = Decimal::from_str(&normalized).map_err(|_| {
            VendingError::InvalidArgument(format!("not a monetary amount: {}", input.trim()))
        })?;
        Self::from_major(major)
    }
}

impl FromStr for Cents {
    type Err = VendingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Cents {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
