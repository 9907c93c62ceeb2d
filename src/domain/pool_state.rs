//! Pool reserve and share-supply snapshot.

use super::SwapDirection;
use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// Integer reserves and share supplies at the on-chain scale.
///
/// `target_*_reserve` express the inventory ratio the pool wants to hold;
/// current reserves drift around them as trades execute.  Share supplies
/// are per side: base depositors and quote depositors hold separate share
/// mints.
///
/// All fields are plain integers because this is an input-only snapshot:
/// the pricing core never mutates pool state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoolState {
    /// Current base-token reserve.
    pub base_reserve: u64,
    /// Current quote-token reserve.
    pub quote_reserve: u64,
    /// Base-side inventory target.
    pub target_base_reserve: u64,
    /// Quote-side inventory target.
    pub target_quote_reserve: u64,
    /// Outstanding base-side shares.
    pub base_supply: u64,
    /// Outstanding quote-side shares.
    pub quote_supply: u64,
}

impl PoolState {
    /// Checks the invariants of an operational pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if either inventory
    /// target is zero.
    pub const fn validate(&self) -> Result<()> {
        if self.target_base_reserve == 0 || self.target_quote_reserve == 0 {
            return Err(AmmError::InvalidConfiguration(
                "inventory targets must be positive",
            ));
        }
        Ok(())
    }

    /// Returns `(in_side, out_side)` current reserves for a direction.
    #[must_use]
    pub const fn reserves(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::SellBase => (self.base_reserve, self.quote_reserve),
            SwapDirection::SellQuote => (self.quote_reserve, self.base_reserve),
        }
    }

    /// Returns `(in_side, out_side)` inventory targets for a direction.
    #[must_use]
    pub const fn targets(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::SellBase => (self.target_base_reserve, self.target_quote_reserve),
            SwapDirection::SellQuote => (self.target_quote_reserve, self.target_base_reserve),
        }
    }

    /// Total value locked at the given per-token prices.
    #[must_use]
    pub fn tvl(&self, base_price: &Decimal, quote_price: &Decimal) -> Decimal {
        let base_value = Decimal::from(self.base_reserve).mul(base_price, Rounding::HalfEven);
        let quote_value = Decimal::from(self.quote_reserve).mul(quote_price, Rounding::HalfEven);
        base_value + quote_value
    }
}
