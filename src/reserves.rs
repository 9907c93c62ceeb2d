//! Reserve analytics: normalization, virtual liquidity, post-trade
//! projections, the sufficiency predicate, and the withdrawal split.
//!
//! Reserves are analysed at pool-integer scale in [`Decimal`] space so a
//! hypothetical trade may push a side negative without wrapping; the
//! sufficiency predicate then fails that side's strict inequality.

use crate::domain::{PoolState, SwapDirection};
use crate::error::Result;
use crate::math::{Decimal, Rounding};

/// Current reserves projected onto the target ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReserves {
    /// Base-side normalized reserve.
    pub base: Decimal,
    /// Quote-side normalized reserve.
    pub quote: Decimal,
}

impl NormalizedReserves {
    /// Returns `(in_side, out_side)` views for a direction.
    #[must_use]
    pub fn oriented(&self, direction: SwapDirection) -> (&Decimal, &Decimal) {
        match direction {
            SwapDirection::SellBase => (&self.base, &self.quote),
            SwapDirection::SellQuote => (&self.quote, &self.base),
        }
    }
}

/// Projects current reserves onto the target ratio while preserving TVL
/// at the given market price:
///
/// ```text
/// coef = (base·P + quote) / (target_base·P + target_quote)
/// normalized_base  = coef · target_base
/// normalized_quote = coef · target_quote
/// ```
///
/// # Errors
///
/// Returns [`AmmError::DomainError`](crate::error::AmmError) if both
/// targets are zero (the projection denominator vanishes).
pub fn normalized_reserves(state: &PoolState, price: &Decimal) -> Result<NormalizedReserves> {
    let target_base = Decimal::from(state.target_base_reserve);
    let target_quote = Decimal::from(state.target_quote_reserve);

    let tvl = Decimal::from(state.base_reserve).mul(price, Rounding::HalfEven)
        + Decimal::from(state.quote_reserve);
    let target_tvl = target_base.mul(price, Rounding::HalfEven) + target_quote.clone();
    let coef = tvl.div(&target_tvl, Rounding::HalfEven)?;

    Ok(NormalizedReserves {
        base: coef.mul(&target_base, Rounding::HalfEven),
        quote: coef.mul(&target_quote, Rounding::HalfEven),
    })
}

/// Virtual reserves: the configured fraction of normalized reserves.
///
/// Virtual liquidity is added to the normal-curve inputs only; it never
/// participates in reserve-sufficiency checks and is never quoted for
/// stable pools.
#[must_use]
pub fn virtual_reserves(normalized: &NormalizedReserves, percentage: u8) -> NormalizedReserves {
    let fraction = Decimal::from(u64::from(percentage))
        .div(&Decimal::from(100u64), Rounding::Floor)
        .unwrap_or_else(|_| Decimal::zero());
    NormalizedReserves {
        base: normalized.base.mul(&fraction, Rounding::Floor),
        quote: normalized.quote.mul(&fraction, Rounding::Floor),
    }
}

/// Reserves after a hypothetical trade, in signed [`Decimal`] space.
///
/// For [`SwapDirection::SellBase`] the base side gains `amount_in` and
/// the quote side loses `amount_out`; the mirror for
/// [`SwapDirection::SellQuote`].  A side may go negative; callers decide
/// what that means.
#[must_use]
pub fn reserves_after_swap(
    state: &PoolState,
    direction: SwapDirection,
    amount_in: &Decimal,
    amount_out: &Decimal,
) -> (Decimal, Decimal) {
    let base = Decimal::from(state.base_reserve);
    let quote = Decimal::from(state.quote_reserve);
    match direction {
        SwapDirection::SellBase => (&base + amount_in, &quote - amount_out),
        SwapDirection::SellQuote => (&base - amount_out, &quote + amount_in),
    }
}

/// The reserve-sufficiency predicate.
///
/// After the hypothetical trade, both sides must stay strictly above the
/// configured fraction of the re-normalized post-trade reserves:
///
/// ```text
/// base_after  > normalized_base_after  · limit / 100
/// quote_after > normalized_quote_after · limit / 100
/// ```
///
/// The strict inequality makes a fully drained side insufficient even at
/// a zero limit.
///
/// # Errors
///
/// Propagates [`normalized_reserves`] failures.
pub fn has_sufficient_reserve(
    state: &PoolState,
    limit_percentage: u8,
    direction: SwapDirection,
    amount_in: &Decimal,
    amount_out: &Decimal,
    price: &Decimal,
) -> Result<bool> {
    let (base_after, quote_after) = reserves_after_swap(state, direction, amount_in, amount_out);

    let post_state = PoolState {
        base_reserve: base_after.try_floor_u64().unwrap_or(0),
        quote_reserve: quote_after.try_floor_u64().unwrap_or(0),
        ..*state
    };
    let normalized = normalized_reserves(&post_state, price)?;

    let limit = Decimal::from(u64::from(limit_percentage))
        .div(&Decimal::from(100u64), Rounding::Floor)?;
    let base_floor = normalized.base.mul(&limit, Rounding::Floor);
    let quote_floor = normalized.quote.mul(&limit, Rounding::Floor);

    Ok(base_after > base_floor && quote_after > quote_floor)
}

/// Per-token withdrawal amounts for a pair of share balances.
///
/// The side whose `reserve / target` ratio is smaller (the *low* side)
/// pays out proportionally to its share of the side supply.  The other
/// side pays the target-ratio equivalent of the low side plus a residual
/// valued at the overall share-to-TVL ratio:
///
/// ```text
/// low_amount        = low.reserve · low.share / low.supply
/// high_base         = low.reserve · high.target / low.target
/// high_amount_base  = high_base · high.share / high.supply
/// share_tvl_ratio   = Σ share·price / Σ supply·price
/// high_amount       = high_amount_base + (high.reserve − high_base) · share_tvl_ratio
/// ```
///
/// Returns `(base_amount, quote_amount)` at pool-integer scale.
///
/// # Errors
///
/// Returns [`AmmError::DomainError`](crate::error::AmmError) if a side
/// supply is zero while its share is withdrawn, or if both supplies are
/// worthless at the given prices.
pub fn withdrawal_from_shares(
    state: &PoolState,
    base_share: u64,
    quote_share: u64,
    base_price: &Decimal,
    quote_price: &Decimal,
) -> Result<(Decimal, Decimal)> {
    struct Side {
        reserve: Decimal,
        target: Decimal,
        share: Decimal,
        supply: Decimal,
        price: Decimal,
    }

    let base = Side {
        reserve: Decimal::from(state.base_reserve),
        target: Decimal::from(state.target_base_reserve),
        share: Decimal::from(base_share),
        supply: Decimal::from(state.base_supply),
        price: base_price.clone(),
    };
    let quote = Side {
        reserve: Decimal::from(state.quote_reserve),
        target: Decimal::from(state.target_quote_reserve),
        share: Decimal::from(quote_share),
        supply: Decimal::from(state.quote_supply),
        price: quote_price.clone(),
    };

    // The low side is the one that drifted below its target ratio.
    // Cross-multiplied to avoid an early rounded division.
    let base_is_low = base.reserve.mul(&quote.target, Rounding::HalfEven)
        <= quote.reserve.mul(&base.target, Rounding::HalfEven);
    let (low, high) = if base_is_low {
        (&base, &quote)
    } else {
        (&quote, &base)
    };

    let low_amount = low
        .reserve
        .mul(&low.share, Rounding::Floor)
        .div(&low.supply, Rounding::Floor)?;

    let high_base = low
        .reserve
        .mul(&high.target, Rounding::Floor)
        .div(&low.target, Rounding::Floor)?;
    let high_amount_base = high_base
        .mul(&high.share, Rounding::Floor)
        .div(&high.supply, Rounding::Floor)?;

    let share_value = low.share.mul(&low.price, Rounding::Floor)
        + high.share.mul(&high.price, Rounding::Floor);
    let supply_value = low.supply.mul(&low.price, Rounding::Floor)
        + high.supply.mul(&high.price, Rounding::Floor);
    let share_tvl_ratio = share_value.div(&supply_value, Rounding::Floor)?;

    let residual = (&high.reserve - &high_base).mul(&share_tvl_ratio, Rounding::Floor);
    let high_amount = high_amount_base + residual;

    if base_is_low {
        Ok((low_amount, high_amount))
    } else {
        Ok((high_amount, low_amount))
    }
}
