//! Trade direction relative to the pool's base/quote orientation.

use super::Address;
use crate::error::{AmmError, Result};

/// Which side of the pool the trader is selling.
///
/// Derived from the `(from, to)` mints of a quote request against the
/// pool's `(base, quote)` mints; any other combination is rejected.
///
/// # Examples
///
/// ```
/// use helm_amm::domain::{Address, SwapDirection};
///
/// let base = Address::from_bytes([1u8; 32]);
/// let quote = Address::from_bytes([2u8; 32]);
/// let dir = SwapDirection::resolve(base, quote, base, quote);
/// assert_eq!(dir, Ok(SwapDirection::SellBase));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    /// The trader pays base tokens and receives quote tokens.
    SellBase,
    /// The trader pays quote tokens and receives base tokens.
    SellQuote,
}

impl SwapDirection {
    /// Resolves the direction of a `(from, to)` mint pair against a
    /// pool's `(base, quote)` mints.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTokenPair`] if the pair does not match
    /// the pool in either orientation.
    pub fn resolve(from: Address, to: Address, base: Address, quote: Address) -> Result<Self> {
        if from == base && to == quote {
            Ok(Self::SellBase)
        } else if from == quote && to == base {
            Ok(Self::SellQuote)
        } else {
            Err(AmmError::InvalidTokenPair)
        }
    }

    /// Returns the opposite direction.
    ///
    /// Used by the inverse-quote path, which prices a desired output by
    /// walking the curve in the reversed orientation.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::SellBase => Self::SellQuote,
            Self::SellQuote => Self::SellBase,
        }
    }

    /// Returns `true` if this is [`SwapDirection::SellBase`].
    #[must_use]
    pub const fn is_sell_base(&self) -> bool {
        matches!(self, Self::SellBase)
    }
}

impl TryFrom<u8> for SwapDirection {
    type Error = AmmError;

    fn try_from(tag: u8) -> core::result::Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::SellBase),
            1 => Ok(Self::SellQuote),
            _ => Err(AmmError::InvalidSwapDirection),
        }
    }
}
