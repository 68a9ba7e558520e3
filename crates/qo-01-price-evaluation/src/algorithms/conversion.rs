//! Conversion-path arithmetic
//!
//! A venue price is kept as an exact fraction `num / den` of 512-bit
//! integers through inversion and normalization. It is rounded half-to-even
//! exactly once, when scaled to the target decimals, so the result does not
//! depend on the order of intermediate steps.

use shared_types::{div_round_half_even, pow10, FixedDecimal, Price, U256, U512};

/// Exact non-negative rational
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ratio {
    num: U512,
    den: U512,
}

impl Ratio {
    fn from_decimal(value: &FixedDecimal) -> Self {
        Self {
            num: U512::from(value.mantissa()),
            den: pow10(value.scale() as u32),
        }
    }

    /// Reciprocal; `None` for zero.
    fn invert(self) -> Option<Self> {
        if self.num.is_zero() {
            return None;
        }
        Some(Self {
            num: self.den,
            den: self.num,
        })
    }

    fn mul_fixed(self, price: Price, decimals: u8) -> Option<Self> {
        Some(Self {
            num: self.num.checked_mul(U512::from(price.value()))?,
            den: self.den.checked_mul(pow10(decimals as u32))?,
        })
    }

    /// Scale to `decimals` and round half-to-even.
    fn to_price(self, decimals: u8) -> Option<Price> {
        let scaled = self.num.checked_mul(pow10(decimals as u32))?;
        let rounded = div_round_half_even(scaled, self.den)?;
        U256::try_from(rounded).ok().map(Price::new)
    }
}

/// Normalization input: the referenced pair's current price and its scale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalizer {
    pub price: Price,
    pub decimals: u8,
}

/// Compute one venue's price for a pair at `decimals`.
///
/// ```text
/// venuePrice = invert ? 1/quote : quote
/// venuePrice = normalizer ? venuePrice × normalizer : venuePrice
/// ```
///
/// Returns `None` when the venue is unusable: zero quote, zero normalizer,
/// arithmetic overflow, or a result that rounds to zero.
pub fn venue_price(
    quote: &FixedDecimal,
    invert: bool,
    normalizer: Option<Normalizer>,
    decimals: u8,
) -> Option<Price> {
    if quote.is_zero() {
        return None;
    }

    let mut ratio = Ratio::from_decimal(quote);
    if invert {
        ratio = ratio.invert()?;
    }
    if let Some(normalizer) = normalizer {
        if normalizer.price.is_zero() {
            return None;
        }
        ratio = ratio.mul_fixed(normalizer.price, normalizer.decimals)?;
    }

    let price = ratio.to_price(decimals)?;
    if price.is_zero() {
        return None;
    }
    Some(price)
}
