//! # Fixed Decimal
//!
//! Exact decimal number `mantissa / 10^scale` used for raw venue quotes.
//! Venue clients hand quotes over as decimal strings; parsing them here keeps
//! floating point out of the pipeline entirely.

use crate::errors::TypeError;
use crate::price::{Price, MAX_DECIMALS};
use primitive_types::U256;
use std::fmt;
use std::str::FromStr;

/// Exact non-negative decimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedDecimal {
    mantissa: U256,
    scale: u8,
}

impl FixedDecimal {
    pub fn new(mantissa: U256, scale: u8) -> Result<Self, TypeError> {
        if scale > MAX_DECIMALS {
            return Err(TypeError::ScaleTooLarge {
                scale: scale as u32,
                max: MAX_DECIMALS,
            });
        }
        Ok(Self { mantissa, scale })
    }

    /// Reinterpret a fixed-point price as a decimal with the given scale.
    pub fn from_price(price: Price, decimals: u8) -> Result<Self, TypeError> {
        Self::new(price.value(), decimals)
    }

    pub fn mantissa(&self) -> U256 {
        self.mantissa
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

impl FromStr for FixedDecimal {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidDecimal(s.to_string());
        let trimmed = s.trim();
        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_part.len() > MAX_DECIMALS as usize {
            return Err(TypeError::ScaleTooLarge {
                scale: frac_part.len() as u32,
                max: MAX_DECIMALS,
            });
        }

        let digits = format!("{int_part}{frac_part}");
        let mantissa = U256::from_dec_str(&digits).map_err(|_| TypeError::Overflow)?;
        Self::new(mantissa, frac_part.len() as u8)
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Price::new(self.mantissa).format_fixed(self.scale))
    }
}
