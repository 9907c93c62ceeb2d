//! Token decimal places.

use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// Maximum allowed decimal places.
const MAX_DECIMALS: u8 = 18;

/// Represents the number of base-10 places between a token's on-chain
/// integer representation and its human-readable value.
///
/// Valid range is `0..=18`, matching the common blockchain standard.
/// Construction is validated: values above 18 are rejected.
///
/// # Examples
///
/// ```
/// use helm_amm::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals` as a [`Decimal`].
    #[must_use]
    pub fn factor(&self) -> Decimal {
        Decimal::from(10u64.pow(u32::from(self.0)))
    }

    /// Converts a human-readable amount to on-chain integer scale.
    ///
    /// The factor is a power of ten below the internal precision, so the
    /// scaling is exact.
    #[must_use]
    pub fn scale_up(&self, human: &Decimal) -> Decimal {
        human.mul(&self.factor(), Rounding::Floor)
    }

    /// Converts an on-chain-scale value back to human scale.
    ///
    /// Exact for integer pool amounts; a value with deep fractional
    /// digits loses at most one ULP to the floor.
    #[must_use]
    pub fn scale_down(&self, raw: &Decimal) -> Decimal {
        // factor() is never zero, so the division cannot fail.
        raw.div(&self.factor(), Rounding::Floor)
            .unwrap_or_else(|_| Decimal::zero())
    }
}
