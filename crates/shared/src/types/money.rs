//! Fixed-precision amounts: sale money, price per kilogram and weight.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! These types wrap `rust_decimal::Decimal` and convert losslessly to the
//! scaled integers the analytical store aggregates over.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept for sale amounts.
pub const MONEY_SCALE: u32 = 2;

/// Fractional digits kept for price per kilogram.
pub const PRICE_SCALE: u32 = 4;

/// Fractional digits of a weight expressed in kilograms (micro-kilogram units).
pub const WEIGHT_SCALE: u32 = 6;

/// Rescales a decimal already rounded to `scale` and returns its mantissa.
fn to_units(value: Decimal, scale: u32) -> Option<i64> {
    let mut scaled = value;
    scaled.rescale(scale);
    i64::try_from(scaled.mantissa()).ok()
}

/// A sale amount rounded to two fractional digits.
///
/// Rounding is banker's rounding (half to even).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new amount, rounding to [`MONEY_SCALE`] digits.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        let mut amount =
            amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
        amount.rescale(MONEY_SCALE);
        Self(amount)
    }

    /// Creates an amount from integer cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Creates a zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the amount in integer cents, or `None` if it does not fit.
    #[must_use]
    pub fn to_cents(self) -> Option<i64> {
        to_units(self.0, MONEY_SCALE)
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

/// Price of one kilogram of product, kept at [`PRICE_SCALE`] digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new price, rounding to [`PRICE_SCALE`] digits.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven))
    }

    /// Creates a price from ten-thousandths.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::new(units, PRICE_SCALE).normalize())
    }

    /// Returns the price in ten-thousandths, or `None` if it does not fit.
    #[must_use]
    pub fn to_units(self) -> Option<i64> {
        to_units(self.0, PRICE_SCALE)
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns true if the price cannot be used as a divisor.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.0))
    }
}

/// A weight in kilograms, derived from amount / price per kilogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(Decimal);

impl Kilograms {
    /// Creates a weight from micro-kilograms.
    #[must_use]
    pub fn from_micros(micros: i64) -> Self {
        Self(Decimal::new(micros, WEIGHT_SCALE).normalize())
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Kilograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.3} kg", self.0))
    }
}
