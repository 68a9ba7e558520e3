//! # Fixed-Point Price
//!
//! A [`Price`] is an unsigned 256-bit magnitude scaled by the decimals of the
//! asset pair it belongs to. Prices never pass through floating point.
//!
//! Rounding is always round-half-to-even and is applied through
//! [`div_round_half_even`] so every subsystem rounds identically.

use primitive_types::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Largest supported fixed-point scale (for prices and raw quotes).
pub const MAX_DECIMALS: u8 = 36;

/// Fixed-point price magnitude.
///
/// On the wire a price is always 32 big-endian bytes, regardless of value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(U256);

impl Price {
    /// Create a price from a raw scaled magnitude.
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Zero price.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Scaled magnitude.
    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Fixed-width big-endian encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_big_endian(&bytes))
    }

    /// Midpoint of two prices, rounded half-to-even.
    pub fn midpoint(a: Price, b: Price) -> Price {
        let sum = U512::from(a.0) + U512::from(b.0);
        let (half, rem) = sum.div_mod(U512::from(2u8));
        let rounded = if !rem.is_zero() && half.bit(0) {
            half + U512::one()
        } else {
            half
        };
        // The midpoint of two U256 values always fits in a U256.
        Price(U256::try_from(rounded).unwrap_or(U256::MAX))
    }

    /// Render the price as a decimal string with `decimals` fractional digits.
    pub fn format_fixed(&self, decimals: u8) -> String {
        if decimals == 0 {
            return self.0.to_string();
        }
        let digits = self.0.to_string();
        let decimals = decimals as usize;
        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
        format!("{int_part}.{frac_part}")
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Price {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_be_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; 32]>::deserialize(deserializer)?;
        Ok(Self::from_be_bytes(bytes))
    }
}

/// `10^exp` as a 512-bit integer.
///
/// Callers bound `exp` by [`MAX_DECIMALS`]-derived limits, far below the
/// 154 digits a `U512` can hold.
pub fn pow10(exp: u32) -> U512 {
    U512::exp10(exp as usize)
}

/// Divide `num / den` rounding half-to-even.
///
/// Returns `None` on division by zero.
pub fn div_round_half_even(num: U512, den: U512) -> Option<U512> {
    if den.is_zero() {
        return None;
    }
    let (quotient, remainder) = num.div_mod(den);
    // remainder < den, so compare remainder against den - remainder to avoid
    // doubling a value that may sit near the top of the range.
    let upper = den - remainder;
    match remainder.cmp(&upper) {
        Ordering::Less => Some(quotient),
        Ordering::Greater => quotient.checked_add(U512::one()),
        Ordering::Equal if quotient.bit(0) => quotient.checked_add(U512::one()),
        Ordering::Equal => Some(quotient),
    }
}
