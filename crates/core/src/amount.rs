//! Amount - strictly positive decimal for ledger movements
//!
//! Every debit, credit and transfer in Minibank moves an `Amount`.
//! Zero and negative values are rejected when the amount is built,
//! so the ledger operations never have to re-check them.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when building an amount or a balance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("Amount must be positive: {0}")]
    NotPositive(Decimal),

    #[error("Value is not representable as a decimal: {0}")]
    NotRepresentable(f64),

    #[error("Invalid decimal literal: {0}")]
    Parse(String),
}

/// A strictly positive decimal amount.
///
/// # Invariant
/// The inner value is always > 0. This is enforced by the constructors.
///
/// # Example
/// ```
/// use minibank_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(500, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(500, 0));
///
/// // Zero and negative amounts are rejected
/// assert!(Amount::new(Decimal::ZERO).is_err());
/// assert!("-10".parse::<Amount>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error if the value is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            Err(AmountError::NotPositive(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an Amount of whole units (`Amount::from_units(100)` is 100).
    pub fn from_units(units: i64) -> Result<Self, AmountError> {
        Self::new(Decimal::from(units))
    }

    /// Create an Amount from a binary float, see [`decimal_from_f64`].
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        Self::new(decimal_from_f64(value)?)
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

/// Convert a binary float to the nearest short decimal.
///
/// `Decimal::from_f64` drops the binary expansion tail, so `1000.12345`
/// stays `1000.12345` instead of `1000.1234500000000480213202536106109619140625`.
/// NaN, infinities and values beyond the decimal range are rejected.
pub fn decimal_from_f64(value: f64) -> Result<Decimal, AmountError> {
    if !value.is_finite() {
        return Err(AmountError::NotRepresentable(value));
    }
    Decimal::from_f64(value).ok_or(AmountError::NotRepresentable(value))
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|e| AmountError::Parse(e.to_string()))?;
        Self::new(value)
    }
}
