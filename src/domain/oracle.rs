//! Oracle price inputs and the derived market-price triple.

use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// A single oracle observation for one token: a price and its confidence
/// band, both in quote units of the oracle's reference currency.
///
/// `price` must be strictly positive; `confidence` must be non-negative
/// and is typically below the price.  Mock sources may report a zero
/// confidence.
///
/// # Examples
///
/// ```
/// use helm_amm::domain::OraclePrice;
/// use helm_amm::math::Decimal;
///
/// let p = OraclePrice::new(Decimal::from(100u64), Decimal::from(1u64));
/// assert!(p.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePrice {
    price: Decimal,
    confidence: Decimal,
}

impl OraclePrice {
    /// Creates a new `OraclePrice`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `price` is not
    /// strictly positive or `confidence` is negative.
    pub fn new(price: Decimal, confidence: Decimal) -> Result<Self> {
        if !price.is_positive() {
            return Err(AmmError::InvalidConfiguration(
                "oracle price must be positive",
            ));
        }
        if confidence.is_negative() {
            return Err(AmmError::InvalidConfiguration(
                "oracle confidence must be non-negative",
            ));
        }
        Ok(Self { price, confidence })
    }

    /// Creates an `OraclePrice` with zero confidence, as mock sources do.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `price` is not
    /// strictly positive.
    pub fn without_confidence(price: Decimal) -> Result<Self> {
        Self::new(price, Decimal::zero())
    }

    /// Returns the reported price.
    #[must_use]
    pub const fn price(&self) -> &Decimal {
        &self.price
    }

    /// Returns the reported confidence band.
    #[must_use]
    pub const fn confidence(&self) -> &Decimal {
        &self.confidence
    }
}

/// The market price of the base token in quote-token units, with its
/// confidence-adjusted bounds:
///
/// ```text
/// mid  = base.price / quote.price
/// high = (base.price + base.confidence) / (quote.price − quote.confidence)
/// low  = (base.price − base.confidence) / (quote.price + quote.confidence)
/// ```
///
/// When either oracle side is missing the triple is *undefined*: all three
/// fields are absent.  A bound whose formula leaves the positive domain
/// (for example a confidence wider than the price) is individually absent,
/// and consumers fall back to `mid`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketPriceTriple {
    mid: Option<Decimal>,
    low: Option<Decimal>,
    high: Option<Decimal>,
}

impl MarketPriceTriple {
    /// Returns the undefined triple (no oracle data).
    #[must_use]
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Builds a triple from a known mid price with no confidence bounds.
    #[must_use]
    pub fn from_mid(mid: Decimal) -> Self {
        Self {
            mid: Some(mid),
            low: None,
            high: None,
        }
    }

    /// Builds a triple with explicit bounds, for callers that source the
    /// three prices independently.
    #[must_use]
    pub const fn from_parts(mid: Option<Decimal>, low: Option<Decimal>, high: Option<Decimal>) -> Self {
        Self { mid, low, high }
    }

    /// Derives the triple from the two oracle observations.
    ///
    /// Returns the undefined triple when either side is missing.
    #[must_use]
    pub fn from_oracle(base: Option<&OraclePrice>, quote: Option<&OraclePrice>) -> Self {
        let (Some(base), Some(quote)) = (base, quote) else {
            return Self::undefined();
        };

        let mid = base
            .price()
            .div(quote.price(), Rounding::HalfEven)
            .ok();

        let high_den = quote.price() - quote.confidence();
        let high = if high_den.is_positive() {
            (base.price() + base.confidence())
                .div(&high_den, Rounding::HalfEven)
                .ok()
        } else {
            None
        };

        let low_num = base.price() - base.confidence();
        let low = if low_num.is_negative() {
            None
        } else {
            low_num
                .div(&(quote.price() + quote.confidence()), Rounding::HalfEven)
                .ok()
        };

        Self { mid, low, high }
    }

    /// Returns `true` if no market price is available.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        self.mid.is_none()
    }

    /// Returns the mid price, if defined.
    #[must_use]
    pub const fn mid(&self) -> Option<&Decimal> {
        self.mid.as_ref()
    }

    /// Returns the low bound, if defined.
    #[must_use]
    pub const fn low(&self) -> Option<&Decimal> {
        self.low.as_ref()
    }

    /// Returns the high bound, if defined.
    #[must_use]
    pub const fn high(&self) -> Option<&Decimal> {
        self.high.as_ref()
    }
}
