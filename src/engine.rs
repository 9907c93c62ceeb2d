//! Quote engine: the public pricing entry points.
//!
//! [`quote_swap_out`] and [`quote_swap_in`] compose the curve kernels,
//! the reserve analytics, and the decimal arithmetic into full quotes:
//!
//! 1. parse and scale the request,
//! 2. resolve the trade direction against the pool mints,
//! 3. pick the market price (adverse confidence bound when enabled),
//! 4. dispatch to the curve family,
//! 5. apply trade fees and the slippage bound,
//! 6. run the reserve-sufficiency check,
//! 7. render a [`SwapResult`] of decimal strings at human scale.
//!
//! The engine is pure: identical inputs produce byte-identical results,
//! and nothing here performs I/O, keeps state, or reads clocks.
//!
//! # Price selection
//!
//! With `enable_confidence_interval` on, the pool defends itself by
//! pricing each direction at the bound that pays the trader less: the
//! *low* bound when the trader sells base (the pool buys base cheap) and
//! the *high* bound when the trader sells quote (the pool sells base
//! dear, via the reciprocal).  With the interval off, or when a bound is
//! unavailable, `mid` is used.

use crate::curve::{normal, stable};
use crate::domain::{
    Decimals, MarketPriceTriple, PoolState, SwapConfig, SwapDirection, SwapInfo, SwapResult,
    SwapType, TokenDescriptor,
};
use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding, FRACTIONAL_DIGITS};
use crate::reserves::{
    has_sufficient_reserve, normalized_reserves, virtual_reserves, NormalizedReserves,
};

/// Per-token withdrawal amounts, as decimal strings at human scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalAmounts {
    /// Base-token amount.
    pub base_amount: String,
    /// Quote-token amount.
    pub quote_amount: String,
}

/// Minimum share amounts for a deposit, at share-integer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinDepositShares {
    /// Minimum base-side shares the deposit must mint.
    pub min_base_share: u64,
    /// Minimum quote-side shares the deposit must mint.
    pub min_quote_share: u64,
}

/// Outcome of a curve call at pool-integer scale.
struct CurveOutcome {
    amount: Decimal,
    price_impact: Decimal,
}

/// Parses a human-scale amount string.
///
/// `Ok(None)` means "no quote": the input was empty or the literal NaN
/// marker that floating front-ends forward for missing values.
fn parse_amount(input: &str) -> Result<Option<Decimal>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "NaN" {
        return Ok(None);
    }
    let amount = Decimal::parse(trimmed)?;
    if amount.is_negative() {
        return Err(AmmError::InvalidAmount("amount must be non-negative"));
    }
    Ok(Some(amount))
}

/// Picks the human-scale market price for a direction.
///
/// Returns `None` when the market triple is undefined.
fn select_market_price<'a>(
    config: &SwapConfig,
    market: &'a MarketPriceTriple,
    direction: SwapDirection,
) -> Option<&'a Decimal> {
    let mid = market.mid()?;
    if !config.enable_confidence_interval {
        return Some(mid);
    }
    match direction {
        SwapDirection::SellBase => Some(market.low().unwrap_or(mid)),
        SwapDirection::SellQuote => Some(market.high().unwrap_or(mid)),
    }
}

/// Quantizes a value down to `decimals` fractional digits.
fn quantize_floor(value: &Decimal, decimals: Decimals) -> Decimal {
    decimals.scale_down(&decimals.scale_up(value).floor())
}

/// Orients a pool-scale base/quote price for the kernel direction.
fn orient_price(pool_scale_price: &Decimal, direction: SwapDirection) -> Result<Decimal> {
    match direction {
        SwapDirection::SellBase => Ok(pool_scale_price.clone()),
        SwapDirection::SellQuote => pool_scale_price.reciprocal(Rounding::HalfEven),
    }
}

/// Normal-curve reserve inputs: normalized reserves plus the configured
/// virtual fraction, both at pool-integer scale.
fn normal_curve_reserves(
    state: &PoolState,
    config: &SwapConfig,
    pool_scale_price: &Decimal,
) -> Result<NormalizedReserves> {
    let normalized = normalized_reserves(state, pool_scale_price)?;
    let virt = virtual_reserves(&normalized, config.virtual_reserve_percentage);
    Ok(NormalizedReserves {
        base: &normalized.base + &virt.base,
        quote: &normalized.quote + &virt.quote,
    })
}

/// Forward curve dispatch: output for a positive pool-scale input.
fn curve_forward(
    pool: &SwapInfo,
    direction: SwapDirection,
    pool_scale_price: &Decimal,
    amount_in: &Decimal,
) -> Result<CurveOutcome> {
    match pool.swap_type {
        SwapType::Normal => {
            let reserves = normal_curve_reserves(&pool.pool_state, &pool.swap_config, pool_scale_price)?;
            let (reserve_in, reserve_out) = reserves.oriented(direction);
            let (target_in, target_out) = pool.pool_state.targets(direction);
            let price = orient_price(pool_scale_price, direction)?;
            let quote = normal::forward_out(
                reserve_in,
                reserve_out,
                &Decimal::from(target_in),
                &Decimal::from(target_out),
                &price,
                amount_in,
            )?;
            Ok(CurveOutcome {
                amount: quote.amount_out,
                price_impact: quote.price_impact,
            })
        }
        SwapType::Stable => {
            let (reserve_in, reserve_out) = pool.pool_state.reserves(direction);
            let price = orient_price(&pool.stable_price(), direction)?;
            let quote = stable::forward_out(
                &Decimal::from(reserve_in),
                &Decimal::from(reserve_out),
                &price,
                &pool.swap_config.slope_decimal(),
                amount_in,
            )?;
            Ok(CurveOutcome {
                amount: quote.amount_out,
                price_impact: quote.price_impact,
            })
        }
    }
}

/// Inverse curve dispatch: required input for a desired pool-scale
/// output, priced in the reversed orientation.
fn curve_inverse(
    pool: &SwapInfo,
    direction: SwapDirection,
    pool_scale_price: &Decimal,
    amount_out: &Decimal,
) -> Result<CurveOutcome> {
    let reversed = direction.reversed();
    match pool.swap_type {
        SwapType::Normal => {
            let reserves = normal_curve_reserves(&pool.pool_state, &pool.swap_config, pool_scale_price)?;
            let (reserve_in, reserve_out) = reserves.oriented(reversed);
            let (target_in, target_out) = pool.pool_state.targets(reversed);
            let price = orient_price(pool_scale_price, reversed)?;
            let inverse = normal::inverse_in(
                reserve_in,
                reserve_out,
                &Decimal::from(target_in),
                &Decimal::from(target_out),
                &price,
                amount_out,
            )?;
            Ok(CurveOutcome {
                amount: inverse.amount_in,
                price_impact: inverse.price_impact,
            })
        }
        SwapType::Stable => {
            let (reserve_in, reserve_out) = pool.pool_state.reserves(reversed);
            let price = orient_price(&pool.stable_price(), reversed)?;
            let inverse = stable::inverse_in(
                &Decimal::from(reserve_in),
                &Decimal::from(reserve_out),
                &price,
                &pool.swap_config.slope_decimal(),
                amount_out,
            )?;
            Ok(CurveOutcome {
                amount: inverse.amount_in,
                price_impact: inverse.price_impact,
            })
        }
    }
}

/// Slippage multiplier `(100 − pct) / 100`, floored.
fn slippage_fraction(max_slippage_pct: f64) -> Result<Decimal> {
    if !max_slippage_pct.is_finite() || !(0.0..=100.0).contains(&max_slippage_pct) {
        return Err(AmmError::InvalidConfiguration(
            "slippage percentage must be in [0, 100]",
        ));
    }
    let pct = Decimal::try_from_f64(max_slippage_pct)?;
    (Decimal::from(100u64) - pct).div(&Decimal::from(100u64), Rounding::Floor)
}

/// The max-swap guard: `true` when the scaled input exceeds the
/// configured percentage of the in-side reserve.  A zero setting
/// disables the guard.
fn exceeds_max_swap(pool: &SwapInfo, direction: SwapDirection, amount_in: &Decimal) -> bool {
    let pct = pool.swap_config.max_swap_percentage;
    if pct == 0 {
        return false;
    }
    let (reserve_in, _) = pool.pool_state.reserves(direction);
    let cap = Decimal::from(reserve_in)
        .mul(&Decimal::from(u64::from(pct)), Rounding::Floor)
        .div(&Decimal::from(100u64), Rounding::Floor)
        .unwrap_or_else(|_| Decimal::zero());
    *amount_in > cap
}

/// Sufficiency check for a quoted trade, at the mid market price.
///
/// The pool retains the trade fee minus the admin share, so the out-side
/// drain is `gross_out − admin_fee`.
fn quoted_trade_is_sufficient(
    pool: &SwapInfo,
    direction: SwapDirection,
    market: &MarketPriceTriple,
    amount_in_scaled: &Decimal,
    drain_scaled: &Decimal,
) -> Result<bool> {
    let Some(mid) = market.mid() else {
        return Err(AmmError::OracleUnavailable);
    };
    has_sufficient_reserve(
        &pool.pool_state,
        pool.swap_config.min_reserve_limit_percentage,
        direction,
        amount_in_scaled,
        drain_scaled,
        &pool.normalize_market_price(mid),
    )
}

/// Quotes the output for a given input amount.
///
/// Returns the empty result when no amount or no market price is
/// available, the zero result for a zero amount, and an
/// insufficient-liquidity result when the pool cannot pay at all.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] for negative or malformed amounts.
/// - [`AmmError::InvalidTokenPair`] if `from`/`to` do not match the pool.
/// - Configuration, arithmetic, and internal-invariant failures
///   propagate unchanged.
pub fn quote_swap_out(
    pool: &SwapInfo,
    from: &TokenDescriptor,
    to: &TokenDescriptor,
    amount_in: &str,
    max_slippage_pct: f64,
    market: &MarketPriceTriple,
) -> Result<SwapResult> {
    let Some(amount) = parse_amount(amount_in)? else {
        return Ok(SwapResult::empty());
    };
    if amount.is_zero() {
        return Ok(SwapResult::zero());
    }

    pool.validate()?;
    let direction = pool.resolve_direction(from.mint_id(), to.mint_id())?;
    let Some(selected) = select_market_price(&pool.swap_config, market, direction) else {
        return Ok(SwapResult::empty());
    };

    let (from_decimals, to_decimals) = pool.decimals(direction);
    let amount_in_scaled = from_decimals.scale_up(&amount).floor();
    let pool_scale_price = pool.normalize_market_price(selected);

    let outcome = match curve_forward(pool, direction, &pool_scale_price, &amount_in_scaled) {
        Ok(outcome) => outcome,
        Err(AmmError::InsufficientLiquidity) => return Ok(SwapResult::insufficient()),
        Err(e) => return Err(e),
    };

    let gross_raw = outcome.amount.floor();
    let gross = to_decimals.scale_down(&gross_raw);
    let fee_keep = Decimal::one() - pool.swap_config.trade_fee_fraction();
    let net = quantize_floor(&gross.mul(&fee_keep, Rounding::Floor), to_decimals);
    let fee = &gross - &net;
    let with_slippage = quantize_floor(
        &net.mul(&slippage_fraction(max_slippage_pct)?, Rounding::Floor),
        to_decimals,
    );

    let admin_fee = fee.mul(
        &pool.swap_config.admin_trade_fee_fraction(),
        Rounding::Floor,
    );
    let drain_scaled = &gross_raw - &to_decimals.scale_up(&admin_fee).floor();
    let sufficient = !exceeds_max_swap(pool, direction, &amount_in_scaled)
        && quoted_trade_is_sufficient(pool, direction, market, &amount_in_scaled, &drain_scaled)?;

    Ok(SwapResult::new(
        amount.to_string_with_scale(from_decimals.get(), Rounding::HalfEven),
        net.to_string_with_scale(to_decimals.get(), Rounding::Floor),
        with_slippage.to_string_with_scale(to_decimals.get(), Rounding::Floor),
        fee.to_string_with_scale(to_decimals.get(), Rounding::Ceil),
        outcome
            .price_impact
            .to_string_with_scale(FRACTIONAL_DIGITS as u8, Rounding::HalfEven),
        !sufficient,
    ))
}

/// Quotes the input required to receive a desired output amount.
///
/// The desired output is grossed up by the trade fee, the curve is
/// walked in the reversed orientation, and the required input is rounded
/// up so the quoted input always covers the desired output.
///
/// # Errors
///
/// Same taxonomy as [`quote_swap_out`].
pub fn quote_swap_in(
    pool: &SwapInfo,
    from: &TokenDescriptor,
    to: &TokenDescriptor,
    amount_out: &str,
    max_slippage_pct: f64,
    market: &MarketPriceTriple,
) -> Result<SwapResult> {
    let Some(desired) = parse_amount(amount_out)? else {
        return Ok(SwapResult::empty());
    };
    if desired.is_zero() {
        return Ok(SwapResult::zero());
    }

    pool.validate()?;
    let direction = pool.resolve_direction(from.mint_id(), to.mint_id())?;
    let Some(selected) = select_market_price(&pool.swap_config, market, direction) else {
        return Ok(SwapResult::empty());
    };

    let (from_decimals, to_decimals) = pool.decimals(direction);
    let desired_quantized = quantize_floor(&desired, to_decimals);

    // Gross the output up by the fee: gross = out · den / (den − num).
    let config = &pool.swap_config;
    let fee_complement = Decimal::from(config.trade_fee_den - config.trade_fee_num);
    let gross = desired_quantized
        .mul(&Decimal::from(config.trade_fee_den), Rounding::Ceil)
        .div(&fee_complement, Rounding::Ceil)?;
    let gross_raw = to_decimals.scale_up(&gross).ceil();

    let pool_scale_price = pool.normalize_market_price(selected);
    let outcome = match curve_inverse(pool, direction, &pool_scale_price, &gross_raw) {
        Ok(outcome) => outcome,
        Err(AmmError::InsufficientLiquidity) => return Ok(SwapResult::insufficient()),
        Err(e) => return Err(e),
    };

    let required_raw = outcome.amount.ceil();
    let required = from_decimals.scale_down(&required_raw);
    let fee = &gross - &desired_quantized;
    let with_slippage = quantize_floor(
        &desired_quantized.mul(&slippage_fraction(max_slippage_pct)?, Rounding::Floor),
        to_decimals,
    );

    let admin_fee = fee.mul(&config.admin_trade_fee_fraction(), Rounding::Floor);
    let drain_scaled = &gross_raw - &to_decimals.scale_up(&admin_fee).floor();
    let sufficient = !exceeds_max_swap(pool, direction, &required_raw)
        && quoted_trade_is_sufficient(pool, direction, market, &required_raw, &drain_scaled)?;

    Ok(SwapResult::new(
        required.to_string_with_scale(from_decimals.get(), Rounding::Ceil),
        desired_quantized.to_string_with_scale(to_decimals.get(), Rounding::Floor),
        with_slippage.to_string_with_scale(to_decimals.get(), Rounding::Floor),
        fee.to_string_with_scale(to_decimals.get(), Rounding::Ceil),
        outcome
            .price_impact
            .to_string_with_scale(FRACTIONAL_DIGITS as u8, Rounding::HalfEven),
        !sufficient,
    ))
}

/// Computes per-token withdrawal amounts for a pair of share balances.
///
/// # Errors
///
/// - [`AmmError::OracleUnavailable`] if either token price is absent.
/// - Propagates the analytics failures (zero share supply, worthless
///   supplies).
pub fn calculate_withdrawal_from_shares(
    base_share: u64,
    quote_share: u64,
    base_token: &TokenDescriptor,
    quote_token: &TokenDescriptor,
    base_price: Option<&Decimal>,
    quote_price: Option<&Decimal>,
    pool_state: &PoolState,
) -> Result<WithdrawalAmounts> {
    let (Some(base_price), Some(quote_price)) = (base_price, quote_price) else {
        return Err(AmmError::OracleUnavailable);
    };

    let (base_raw, quote_raw) = crate::reserves::withdrawal_from_shares(
        pool_state,
        base_share,
        quote_share,
        base_price,
        quote_price,
    )?;

    Ok(WithdrawalAmounts {
        base_amount: base_token
            .decimals()
            .scale_down(&base_raw.floor())
            .to_string_with_scale(base_token.decimals().get(), Rounding::Floor),
        quote_amount: quote_token
            .decimals()
            .scale_down(&quote_raw.floor())
            .to_string_with_scale(quote_token.decimals().get(), Rounding::Floor),
    })
}

/// Computes the minimum shares a deposit must mint, per side.
///
/// Shares are proportional to `side_supply / side_reserve`, where the
/// reserve is the normalized reserve at the market price for normal
/// pools and the raw reserve for stable pools (the stable ratio is
/// preserved exactly).  A side with no outstanding supply mints the raw
/// scaled amount.  `min_coefficient` scales the result down as the
/// caller's slippage guard.
///
/// # Errors
///
/// - [`AmmError::OracleUnavailable`] if a normal pool has no market mid.
/// - [`AmmError::InvalidAmount`] for malformed amount strings.
/// - [`AmmError::InvalidConfiguration`] if `min_coefficient` is outside
///   `[0, 1]`.
pub fn calculate_min_shares_for_deposit(
    pool: &SwapInfo,
    base_amount: &str,
    quote_amount: &str,
    market: &MarketPriceTriple,
    min_coefficient: f64,
) -> Result<MinDepositShares> {
    if !min_coefficient.is_finite() || !(0.0..=1.0).contains(&min_coefficient) {
        return Err(AmmError::InvalidConfiguration(
            "min coefficient must be in [0, 1]",
        ));
    }
    pool.validate()?;

    let base = parse_amount(base_amount)?.unwrap_or_else(Decimal::zero);
    let quote = parse_amount(quote_amount)?.unwrap_or_else(Decimal::zero);
    let base_scaled = pool.mint_base_decimals.scale_up(&base).floor();
    let quote_scaled = pool.mint_quote_decimals.scale_up(&quote).floor();

    // Deposit legs are valued against the market-price projection for
    // normal pools and against the raw reserves for stable pools.
    let state = &pool.pool_state;
    let (base_reserve, quote_reserve) = match pool.swap_type {
        SwapType::Normal => {
            let Some(mid) = market.mid() else {
                return Err(AmmError::OracleUnavailable);
            };
            let normalized = normalized_reserves(state, &pool.normalize_market_price(mid))?;
            (normalized.base, normalized.quote)
        }
        SwapType::Stable => (
            Decimal::from(state.base_reserve),
            Decimal::from(state.quote_reserve),
        ),
    };

    let coefficient = Decimal::try_from_f64(min_coefficient)?;
    let share_for = |amount: &Decimal, supply: u64, reserve: &Decimal| -> Result<u64> {
        if amount.is_zero() {
            return Ok(0);
        }
        let proportional = if supply == 0 {
            amount.clone()
        } else {
            amount
                .mul(&Decimal::from(supply), Rounding::Floor)
                .div(reserve, Rounding::Floor)?
        };
        proportional
            .mul(&coefficient, Rounding::Floor)
            .floor()
            .try_floor_u64()
    };

    Ok(MinDepositShares {
        min_base_share: share_for(&base_scaled, state.base_supply, &base_reserve)?,
        min_quote_share: share_for(&quote_scaled, state.quote_supply, &quote_reserve)?,
    })
}

/// Checks whether a trade of the given scaled amounts would keep both
/// reserves above the pool's minimum reserve limit.
///
/// # Errors
///
/// - [`AmmError::OracleUnavailable`] if the market mid is absent.
/// - Propagates descriptor validation failures.
pub fn check_sufficient_reserve(
    pool: &SwapInfo,
    amount_in_scaled: u64,
    amount_out_scaled: u64,
    direction: SwapDirection,
    market: &MarketPriceTriple,
) -> Result<bool> {
    pool.validate()?;
    let Some(mid) = market.mid() else {
        return Err(AmmError::OracleUnavailable);
    };
    has_sufficient_reserve(
        &pool.pool_state,
        pool.swap_config.min_reserve_limit_percentage,
        direction,
        &Decimal::from(amount_in_scaled),
        &Decimal::from(amount_out_scaled),
        &pool.normalize_market_price(mid),
    )
}
