//! Fixed-point token amounts
//!
//! On-chain quantities are integers scaled by the token's decimal precision.
//! Conversion between the human decimal form and the integer form is exact
//! and never goes through floating point.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while converting between decimal and fixed-point forms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative")]
    Negative,

    #[error("unexpected character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("malformed amount: {0}")]
    Malformed(String),

    #[error("amount has more fractional digits than the token's {decimals} decimals")]
    TooManyDecimals { decimals: u8 },

    #[error("invalid integer quantity: {0}")]
    InvalidQuantity(String),
}

/// Token quantity in its smallest on-chain unit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPointAmount(BigUint);

impl FixedPointAmount {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Parse a JSON-RPC style hex quantity (`0x1a`)
    pub fn from_hex_quantity(quantity: &str) -> Result<Self, UnitsError> {
        let digits = quantity
            .strip_prefix("0x")
            .or_else(|| quantity.strip_prefix("0X"))
            .ok_or_else(|| UnitsError::InvalidQuantity(quantity.to_string()))?;

        if digits.is_empty() {
            return Err(UnitsError::InvalidQuantity(quantity.to_string()));
        }

        BigUint::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| UnitsError::InvalidQuantity(quantity.to_string()))
    }
}

impl From<u64> for FixedPointAmount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for FixedPointAmount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for FixedPointAmount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FixedPointAmount {
    type Err = UnitsError;

    /// Accepts base-10 integers or `0x` hex quantities
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            return Self::from_hex_quantity(s);
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UnitsError::InvalidQuantity(s.to_string()));
        }
        BigUint::from_str_radix(s, 10)
            .map(Self)
            .map_err(|_| UnitsError::InvalidQuantity(s.to_string()))
    }
}

impl Serialize for FixedPointAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for FixedPointAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn scale(decimals: u8) -> BigUint {
    BigUint::from(10u32).pow(u32::from(decimals))
}

/// Convert a human decimal amount (`"1.5"`) to fixed point with `decimals`
/// places (`1500000000000000000` for 18).
///
/// Fractional digits beyond `decimals` are accepted only when they are all
/// zero; anything else would lose precision and is rejected.
pub fn parse_units(amount: &str, decimals: u8) -> Result<FixedPointAmount, UnitsError> {
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }
    if amount.starts_with('-') {
        return Err(UnitsError::Negative);
    }

    let mut parts = amount.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(UnitsError::Malformed(amount.to_string()));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Malformed(amount.to_string()));
    }

    if let Some(c) = whole
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(UnitsError::InvalidCharacter(c));
    }

    let places = usize::from(decimals);
    let fraction = if fraction.len() > places {
        let (kept, excess) = fraction.split_at(places);
        if excess.bytes().any(|b| b != b'0') {
            return Err(UnitsError::TooManyDecimals { decimals });
        }
        kept
    } else {
        fraction
    };

    let whole_value = if whole.is_empty() {
        BigUint::zero()
    } else {
        BigUint::from_str_radix(whole, 10)
            .map_err(|_| UnitsError::Malformed(amount.to_string()))?
    };

    let padded = format!("{:0<width$}", fraction, width = places);
    let fraction_value = if padded.is_empty() {
        BigUint::zero()
    } else {
        BigUint::from_str_radix(&padded, 10)
            .map_err(|_| UnitsError::Malformed(amount.to_string()))?
    };

    Ok(FixedPointAmount(whole_value * scale(decimals) + fraction_value))
}

/// Format a fixed-point amount back to canonical decimal form.
///
/// Always keeps at least one fractional digit and strips trailing zeros:
/// `3000000000` with 6 decimals becomes `"3000.0"`.
pub fn format_units(value: &FixedPointAmount, decimals: u8) -> String {
    let places = usize::from(decimals);
    let digits = format!("{:0>width$}", value.0.to_string(), width = places + 1);
    let (whole, fraction) = digits.split_at(digits.len() - places);

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, fraction)
    }
}
