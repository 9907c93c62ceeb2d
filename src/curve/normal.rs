//! Oracle-anchored logarithmic curve ("normal" swap).
//!
//! Given in-side reserve `a`, out-side reserve `b`, inventory targets
//! `A`/`B`, and the normalized market price `P`, selling `m` units of the
//! in-side token yields:
//!
//! ```text
//! output = b − b · (a / (a + m))^(P · A / B)
//! ```
//!
//! The curve is anchored so that the marginal price at `m → 0` equals
//! `P · (b/a) · (A/B)`; callers pass reserves projected onto the target
//! ratio, which pins that marginal price to `P` itself.
//!
//! # Rounding sites
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | `a / (a + m)` | Ceil |
//! | `P · A / B` | Floor |
//! | `b · core^exp` (amount the pool keeps) | Ceil |
//!
//! The real-number power is evaluated in IEEE-754 doubles with
//! [`FLOAT_ROUND_UP_EPSILON`] added to the result.  This is a deliberate
//! approximation: the epsilon absorbs downward float error, and the
//! ceil-multiplication plus the linear-bound check in [`forward_out`]
//! together re-establish the conservative bound.  A rational `exp·ln`
//! power to full precision would be stricter but must keep the
//! ceil-after-epsilon behaviour for cross-implementation agreement.
//!
//! A second Taylor-style estimator ([`approximate_out`]) tightens the
//! result when the closed form rounds away too much; the combined output
//! is `max(approximation, closed form)`, still bounded by the linear
//! output at the marginal price.

use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// Additive epsilon applied after the IEEE-754 `powf`, compensating the
/// at-most-one-ulp downward error of a double-precision power.
pub const FLOAT_ROUND_UP_EPSILON: f64 = 6e-17;

/// A priced outcome from the normal curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalQuote {
    /// Curve output at pool-integer scale (not yet fee-adjusted).
    pub amount_out: Decimal,
    /// Relative deviation of the executed price from the marginal price.
    pub price_impact: Decimal,
}

/// A priced inverse outcome from the normal curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalInverse {
    /// Required input at pool-integer scale.
    pub amount_in: Decimal,
    /// Relative deviation of the executed price from the marginal price.
    pub price_impact: Decimal,
}

/// The curve exponent `P · A / B`, floored.
fn curve_exponent(price: &Decimal, target_in: &Decimal, target_out: &Decimal) -> Result<Decimal> {
    price
        .mul(target_in, Rounding::Floor)
        .div(target_out, Rounding::Floor)
}

/// Closed-form curve shift shared by the forward and inverse paths.
///
/// `amount_in` is signed: the inverse path walks the curve backwards with
/// a negative amount and receives a negative result (the negated required
/// input).
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if the shifted in-side
/// reserve is not positive, which means the requested output exceeds what
/// the curve can pay.
fn shift_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    exponent: &Decimal,
    amount_in: &Decimal,
) -> Result<Decimal> {
    let shifted = reserve_in + amount_in;
    if !shifted.is_positive() {
        return Err(AmmError::InsufficientLiquidity);
    }

    let core = reserve_in.div(&shifted, Rounding::Ceil)?;
    let power = core.to_f64_lossy().powf(exponent.to_f64_lossy()) + FLOAT_ROUND_UP_EPSILON;
    if !power.is_finite() {
        // Only reachable when the inverse walk blows the kept fraction
        // past the float range; the request is unpayable.
        return Err(AmmError::InsufficientLiquidity);
    }
    let kept_fraction = Decimal::try_from_f64(power)?;
    let kept = reserve_out.mul(&kept_fraction, Rounding::Ceil);
    Ok(reserve_out - &kept)
}

/// The linear output at the marginal price: `m · (b/a) · P · (A/B)`.
///
/// Every curve output is bounded above by this quantity; the bound is
/// checked after combining the closed form with the approximation.
pub fn linear_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    target_in: &Decimal,
    target_out: &Decimal,
    price: &Decimal,
    amount_in: &Decimal,
) -> Result<Decimal> {
    amount_in
        .mul(reserve_out, Rounding::Floor)
        .div(reserve_in, Rounding::Floor)?
        .mul(price, Rounding::Floor)
        .mul(target_in, Rounding::Floor)
        .div(target_out, Rounding::Floor)
}

/// Taylor-style lower-bound estimator for the forward output.
///
/// Returns `None` when the bound is not usable: the skip condition is an
/// explicit absent value, never the integer zero, because zero is a
/// legitimate output for dust-sized trades.
///
/// # Errors
///
/// Returns [`AmmError::InternalInvariant`] if the estimator exceeds the
/// linear bound, which indicates a defect rather than a market condition.
fn approximate_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    exponent: &Decimal,
    linear: &Decimal,
    amount_in: &Decimal,
) -> Result<Option<Decimal>> {
    let exponent_ceil = exponent.ceil();
    let Ok(exponent_ceil_int) = exponent_ceil.try_floor_u64() else {
        return Ok(None);
    };

    // Outside this regime the first-order expansion has no spare margin.
    let spread = amount_in.mul(&exponent_ceil, Rounding::Ceil);
    if *reserve_in <= spread || *reserve_out <= *amount_in {
        return Ok(None);
    }

    let shifted = reserve_in + amount_in;
    let core_high = reserve_in
        .div(&shifted, Rounding::Ceil)?
        .powi(exponent_ceil_int, Rounding::Ceil);
    let core_low = (reserve_in - &spread).div(reserve_in, Rounding::Floor)?;
    let ratio = core_high.div(&core_low, Rounding::Ceil)?;

    let diff = (ratio - Decimal::one()).mul(&(reserve_out - linear), Rounding::Ceil);
    if linear.abs() <= diff {
        return Ok(None);
    }

    let approx = (linear - &diff).floor();
    if approx > *linear {
        return Err(AmmError::InternalInvariant(
            "approximation exceeded the linear bound",
        ));
    }
    Ok(Some(approx))
}

/// Quotes the forward output for `amount_in > 0`.
///
/// Combines the closed form with the approximation when the latter is
/// available, clamps dust-negative results to zero, and verifies the
/// conservative bound `output ≤ linear_out`.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if the curve cannot pay.
/// - [`AmmError::InternalInvariant`] if a post-condition fails; callers
///   must treat this as fatal.
pub fn forward_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    target_in: &Decimal,
    target_out: &Decimal,
    price: &Decimal,
    amount_in: &Decimal,
) -> Result<NormalQuote> {
    let exponent = curve_exponent(price, target_in, target_out)?;
    let closed = shift_out(reserve_in, reserve_out, &exponent, amount_in)?;
    let linear = linear_out(
        reserve_in, reserve_out, target_in, target_out, price, amount_in,
    )?;

    let combined = match approximate_out(reserve_in, reserve_out, &exponent, &linear, amount_in)? {
        Some(approx) => approx.max(closed),
        None => closed,
    };
    if combined > linear {
        return Err(AmmError::InternalInvariant(
            "curve output exceeded the linear bound",
        ));
    }
    let amount_out = if combined.is_negative() {
        Decimal::zero()
    } else {
        combined
    };

    let price_impact = relative_impact(
        reserve_in, reserve_out, target_in, target_out, price, amount_in, &amount_out,
    )?;
    Ok(NormalQuote {
        amount_out,
        price_impact,
    })
}

/// Quotes the required input for a desired output.
///
/// Callers supply the *reversed* orientation: `reserve_in` is the reserve
/// of the token the trader receives, and `price` is the reciprocal
/// market price.  The curve is walked backwards with a negative amount;
/// the shared core reports an infeasible request (output not payable) as
/// [`AmmError::InsufficientLiquidity`].
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if the desired output exceeds
///   what the curve can pay.
pub fn inverse_in(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    target_in: &Decimal,
    target_out: &Decimal,
    price: &Decimal,
    amount_out: &Decimal,
) -> Result<NormalInverse> {
    let exponent = curve_exponent(price, target_in, target_out)?;
    let negated = -amount_out;
    let shifted_back = shift_out(reserve_in, reserve_out, &exponent, &negated)?;

    let required = -&shifted_back;
    let amount_in = if required.is_negative() {
        Decimal::zero()
    } else {
        required
    };

    let price_impact = relative_impact(
        reserve_in, reserve_out, target_in, target_out, price, &negated, &shifted_back,
    )?;
    Ok(NormalInverse {
        amount_in,
        price_impact,
    })
}

/// Price impact: `|marginal − executed| / executed`.
///
/// A zero trade has no impact.  A positive trade whose output rounds to
/// zero reports an impact of 1, the saturated stand-in for an unbounded
/// deviation.
fn relative_impact(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    target_in: &Decimal,
    target_out: &Decimal,
    price: &Decimal,
    amount_in: &Decimal,
    amount_out: &Decimal,
) -> Result<Decimal> {
    if amount_in.is_zero() {
        return Ok(Decimal::zero());
    }
    if amount_out.is_zero() {
        return Ok(Decimal::one());
    }

    let marginal = price
        .mul(reserve_out, Rounding::HalfEven)
        .div(reserve_in, Rounding::HalfEven)?
        .mul(target_in, Rounding::HalfEven)
        .div(target_out, Rounding::HalfEven)?;
    let executed = amount_out.div(amount_in, Rounding::HalfEven)?;
    (&marginal - &executed).abs().div(&executed, Rounding::HalfEven)
}
