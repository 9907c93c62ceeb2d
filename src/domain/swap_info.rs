//! Pool descriptor consumed by the quote engine.

use super::{Address, Decimals, PoolState, SwapConfig, SwapDirection, SwapType};
use crate::error::Result;
use crate::math::{Decimal, Rounding};

/// Everything the pricing core needs to know about one pool: the curve
/// family, the token mints and their decimals, the reserve snapshot, and
/// the pricing configuration.
///
/// `SwapInfo` is input-only.  The core never mutates it and creates no
/// state of its own, so a single descriptor may be shared across any
/// number of concurrent quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapInfo {
    /// Curve family tag.
    pub swap_type: SwapType,
    /// Pool configuration account.
    pub config_key: Address,
    /// Base token mint.
    pub mint_base: Address,
    /// Quote token mint.
    pub mint_quote: Address,
    /// Base token decimals.
    pub mint_base_decimals: Decimals,
    /// Quote token decimals.
    pub mint_quote_decimals: Decimals,
    /// Reserve and share-supply snapshot.
    pub pool_state: PoolState,
    /// Pricing parameters.
    pub swap_config: SwapConfig,
}

impl SwapInfo {
    /// Checks the pool descriptor invariants.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolState::validate`] and [`SwapConfig::validate`]
    /// failures.
    pub const fn validate(&self) -> Result<()> {
        if let Err(e) = self.pool_state.validate() {
            return Err(e);
        }
        self.swap_config.validate(self.swap_type)
    }

    /// Resolves the trade direction of a `(from, to)` mint pair against
    /// this pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTokenPair`](crate::error::AmmError) if
    /// the pair does not match the pool in either orientation.
    pub fn resolve_direction(&self, from: Address, to: Address) -> Result<SwapDirection> {
        SwapDirection::resolve(from, to, self.mint_base, self.mint_quote)
    }

    /// Returns `(from, to)` token decimals for a direction.
    #[must_use]
    pub const fn decimals(&self, direction: SwapDirection) -> (Decimals, Decimals) {
        match direction {
            SwapDirection::SellBase => (self.mint_base_decimals, self.mint_quote_decimals),
            SwapDirection::SellQuote => (self.mint_quote_decimals, self.mint_base_decimals),
        }
    }

    /// Rescales a human-scale market price to pool-integer scale:
    /// `P_pool = P · 10^(quote_decimals − base_decimals)`.
    ///
    /// Exponent differences are at most 18, so the shift is a single
    /// rounded division at worst.
    #[must_use]
    pub fn normalize_market_price(&self, price: &Decimal) -> Decimal {
        let base = u32::from(self.mint_base_decimals.get());
        let quote = u32::from(self.mint_quote_decimals.get());
        if quote >= base {
            price.mul(&Decimal::from(10u64.pow(quote - base)), Rounding::HalfEven)
        } else {
            price
                .div(&Decimal::from(10u64.pow(base - quote)), Rounding::HalfEven)
                .unwrap_or_else(|_| Decimal::zero())
        }
    }

    /// Returns the static stable price at pool-integer scale:
    /// `10^(quote_decimals − base_decimals)`.
    ///
    /// This is the pool-scale representation of a 1:1 peg.
    #[must_use]
    pub fn stable_price(&self) -> Decimal {
        self.normalize_market_price(&Decimal::one())
    }
}
