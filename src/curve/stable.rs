//! Flat stable-swap curve for pegged pairs.
//!
//! The curve blends a constant-sum and a constant-product invariant
//! through the slope `s ∈ (0, 1]`: `s → 0` is perfectly flat, `s = 1` is
//! geometric.  Pricing proceeds in two steps:
//!
//! 1. Solve for the **balanced point** on the current invariant surface —
//!    the reserves whose ratio equals the static peg price `p`.  With
//!    in-side reserve `a` and out-side reserve `b` the balanced in-side
//!    reserve is the positive root of `α·x² + β·x + γ = 0` where
//!
//!    ```text
//!    α  = (2 − s) · p
//!    −β = (1 − s) · (p·a + b)
//!    −γ = s · a · b
//!    ```
//!
//! 2. Shift along the curve anchored at that point:
//!
//!    ```text
//!    multiplicand = b + balanced_b · (1 − s) / s
//!    multiplier   = 1 − num / den
//!    num          = (1 − s) · balanced_a + s · a
//!    den          = (1 − s) · balanced_a + s · (a + m)
//!    output       = ⌊ multiplicand · multiplier ⌋
//!    ```
//!
//! A non-positive `den` means the requested inverse output exceeds what
//! the curve can pay; it surfaces as
//! [`AmmError::InsufficientLiquidity`], never as a sentinel value.
//!
//! # Rounding sites
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | discriminant square root | Ceil |
//! | balanced-point division | Ceil |
//! | `(1 − s) · balanced_b` and `/ s` | Floor |
//! | `num / den` | Floor |
//! | final output | Floor to integer |

use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// A priced outcome from the stable curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableQuote {
    /// Curve output at pool-integer scale (not yet fee-adjusted).
    pub amount_out: Decimal,
    /// Relative deviation of the executed price from the flat price.
    pub price_impact: Decimal,
}

/// A priced inverse outcome from the stable curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableInverse {
    /// Required input at pool-integer scale.
    pub amount_in: Decimal,
    /// Relative deviation of the executed price from the flat price.
    pub price_impact: Decimal,
}

/// Solves for the balanced reserves on the current invariant surface.
///
/// Returns `(balanced_in, balanced_out)` with
/// `balanced_out = balanced_in · price`.
///
/// # Errors
///
/// Returns [`AmmError::DomainError`] if `price` is zero (the quadratic
/// degenerates).
pub fn balanced_reserves(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    price: &Decimal,
    slope: &Decimal,
) -> Result<(Decimal, Decimal)> {
    let one = Decimal::one();
    let two = Decimal::from(2u64);
    let one_minus_s = &one - slope;

    let alpha = (&two - slope).mul(price, Rounding::HalfEven);
    let neg_beta = one_minus_s.mul(
        &(price.mul(reserve_in, Rounding::HalfEven) + reserve_out.clone()),
        Rounding::HalfEven,
    );
    let neg_gamma = slope
        .mul(reserve_in, Rounding::HalfEven)
        .mul(reserve_out, Rounding::HalfEven);

    let discriminant = neg_beta.mul(&neg_beta, Rounding::HalfEven)
        + Decimal::from(4u64)
            .mul(&alpha, Rounding::HalfEven)
            .mul(&neg_gamma, Rounding::HalfEven);
    let root = discriminant.sqrt(Rounding::Ceil)?;

    let balanced_in =
        (neg_beta + root).div(&two.mul(&alpha, Rounding::HalfEven), Rounding::Ceil)?;
    let balanced_out = balanced_in.mul(price, Rounding::Floor);
    Ok((balanced_in, balanced_out))
}

/// Curve shift shared by the forward and inverse paths.
///
/// `amount_in` is signed: the inverse path walks the curve backwards with
/// a negative amount and receives a negative result (the negated required
/// input).
fn shift_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    balanced_in: &Decimal,
    balanced_out: &Decimal,
    slope: &Decimal,
    amount_in: &Decimal,
) -> Result<Decimal> {
    let one_minus_s = &Decimal::one() - slope;

    let multiplicand = reserve_out
        + &balanced_out
            .mul(&one_minus_s, Rounding::Floor)
            .div(slope, Rounding::Floor)?;

    let anchored = one_minus_s.mul(balanced_in, Rounding::Floor);
    let num = &anchored + &slope.mul(reserve_in, Rounding::Floor);
    let den = &anchored + &slope.mul(&(reserve_in + amount_in), Rounding::Floor);
    if !den.is_positive() {
        return Err(AmmError::InsufficientLiquidity);
    }

    let multiplier = Decimal::one() - num.div(&den, Rounding::Floor)?;
    Ok(multiplicand.mul(&multiplier, Rounding::Floor).floor())
}

/// The flat marginal price of the anchored curve:
/// `(b + balanced_b·(1−s)/s) / (a + balanced_a·(1−s)/s)`.
fn flat_price(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    balanced_in: &Decimal,
    balanced_out: &Decimal,
    slope: &Decimal,
) -> Result<Decimal> {
    let one_minus_s = &Decimal::one() - slope;
    let shifted_out = reserve_out
        + &balanced_out
            .mul(&one_minus_s, Rounding::HalfEven)
            .div(slope, Rounding::HalfEven)?;
    let shifted_in = reserve_in
        + &balanced_in
            .mul(&one_minus_s, Rounding::HalfEven)
            .div(slope, Rounding::HalfEven)?;
    shifted_out.div(&shifted_in, Rounding::HalfEven)
}

/// Price impact: `|flat − executed| / executed`, with the same saturation
/// rules as the normal curve.
fn relative_impact(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    balanced_in: &Decimal,
    balanced_out: &Decimal,
    slope: &Decimal,
    amount_in: &Decimal,
    amount_out: &Decimal,
) -> Result<Decimal> {
    if amount_in.is_zero() {
        return Ok(Decimal::zero());
    }
    if amount_out.is_zero() {
        return Ok(Decimal::one());
    }

    let flat = flat_price(reserve_in, reserve_out, balanced_in, balanced_out, slope)?;
    let executed = amount_out.div(amount_in, Rounding::HalfEven)?;
    (&flat - &executed).abs().div(&executed, Rounding::HalfEven)
}

/// Quotes the forward output for `amount_in > 0`.
///
/// # Errors
///
/// - [`AmmError::DomainError`] if the slope or price degenerates the
///   balanced-point quadratic.
pub fn forward_out(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    price: &Decimal,
    slope: &Decimal,
    amount_in: &Decimal,
) -> Result<StableQuote> {
    let (balanced_in, balanced_out) = balanced_reserves(reserve_in, reserve_out, price, slope)?;
    let shifted = shift_out(
        reserve_in,
        reserve_out,
        &balanced_in,
        &balanced_out,
        slope,
        amount_in,
    )?;
    let amount_out = if shifted.is_negative() {
        Decimal::zero()
    } else {
        shifted
    };

    let price_impact = relative_impact(
        reserve_in,
        reserve_out,
        &balanced_in,
        &balanced_out,
        slope,
        amount_in,
        &amount_out,
    )?;
    Ok(StableQuote {
        amount_out,
        price_impact,
    })
}

/// Quotes the required input for a desired output.
///
/// Callers supply the *reversed* orientation: `reserve_in` is the reserve
/// of the token the trader receives, and `price` is the reciprocal peg
/// price.
///
/// # Errors
///
/// Returns [`AmmError::InsufficientLiquidity`] if the desired output
/// exceeds what the curve can pay.
pub fn inverse_in(
    reserve_in: &Decimal,
    reserve_out: &Decimal,
    price: &Decimal,
    slope: &Decimal,
    amount_out: &Decimal,
) -> Result<StableInverse> {
    let (balanced_in, balanced_out) = balanced_reserves(reserve_in, reserve_out, price, slope)?;
    let negated = -amount_out;
    let shifted_back = shift_out(
        reserve_in,
        reserve_out,
        &balanced_in,
        &balanced_out,
        slope,
        &negated,
    )?;

    let required = -&shifted_back;
    let amount_in = if required.is_negative() {
        Decimal::zero()
    } else {
        required
    };

    let price_impact = relative_impact(
        reserve_in,
        reserve_out,
        &balanced_in,
        &balanced_out,
        slope,
        &negated,
        &shifted_back,
    )?;
    Ok(StableInverse {
        amount_in,
        price_impact,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(v: u64) -> Decimal {
        Decimal::from(v)
    }

    fn half() -> Decimal {
        Decimal::from_wad(500_000_000_000_000_000)
    }

    // -- Balanced point -------------------------------------------------------

    #[test]
    fn balanced_pool_is_its_own_balanced_point() {
        let Ok((bal_in, bal_out)) =
            balanced_reserves(&dec(1_000_000), &dec(1_000_000), &Decimal::one(), &half())
        else {
            panic!("expected Ok");
        };
        assert_eq!(bal_in.try_floor_u64(), Ok(1_000_000));
        assert_eq!(bal_out.try_floor_u64(), Ok(1_000_000));
    }

    #[test]
    fn imbalanced_pool_balances_between_reserves() {
        let Ok((bal_in, bal_out)) =
            balanced_reserves(&dec(800_000), &dec(1_200_000), &Decimal::one(), &half())
        else {
            panic!("expected Ok");
        };
        assert!(bal_in > dec(800_000));
        assert!(bal_in < dec(1_200_000));
        // At unit peg the balanced sides agree up to rounding.
        let gap = (&bal_out - &bal_in).abs();
        assert!(gap < Decimal::one());
    }

    #[test]
    fn balanced_point_scales_with_price() {
        let two = Decimal::from(2u64);
        let Ok((bal_in, bal_out)) =
            balanced_reserves(&dec(1_000_000), &dec(2_000_000), &two, &half())
        else {
            panic!("expected Ok");
        };
        let ratio = bal_out.div(&bal_in, Rounding::HalfEven);
        let Ok(ratio) = ratio else {
            panic!("expected Ok");
        };
        assert!((&ratio - &two).abs() < Decimal::one());
    }

    // -- Forward output -------------------------------------------------------

    #[test]
    fn balanced_small_trade_near_peg() {
        let Ok(quote) = forward_out(
            &dec(1_000_000_000_000),
            &dec(1_000_000_000_000),
            &Decimal::one(),
            &half(),
            &dec(100_000_000),
        ) else {
            panic!("expected Ok");
        };
        // multiplicand = 2e12, multiplier = 5e7 / 1.00005e12.
        assert_eq!(quote.amount_out.try_floor_u64(), Ok(99_995_000));
        let Ok(threshold) = Decimal::parse("0.001") else {
            panic!("valid decimal");
        };
        assert!(quote.price_impact < threshold);
    }

    #[test]
    fn flatter_slope_pays_closer_to_peg() {
        let steep = forward_out(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &Decimal::one(),
            &dec(100_000),
        );
        let flat = forward_out(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &Decimal::from_wad(10_000_000_000_000_000),
            &dec(100_000),
        );
        let (Ok(steep), Ok(flat)) = (steep, flat) else {
            panic!("expected Ok");
        };
        assert!(flat.amount_out > steep.amount_out);
        assert!(flat.price_impact < steep.price_impact);
    }

    #[test]
    fn unit_slope_reduces_to_geometric_curve() {
        // s = 1: output = b·m/(a+m).
        let Ok(quote) = forward_out(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &Decimal::one(),
            &dec(100),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.amount_out.try_floor_u64(), Ok(99));
    }

    #[test]
    fn output_is_integer_floored() {
        let Ok(quote) = forward_out(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &half(),
            &dec(333),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.amount_out, quote.amount_out.floor());
    }

    #[test]
    fn zero_amount_is_zero_output_and_impact() {
        let Ok(quote) = forward_out(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &half(),
            &Decimal::zero(),
        ) else {
            panic!("expected Ok");
        };
        assert!(quote.amount_out.is_zero());
        assert!(quote.price_impact.is_zero());
    }

    // -- Inverse --------------------------------------------------------------

    #[test]
    fn inverse_recovers_forward_input() {
        let a = dec(1_000_000);
        let b = dec(1_000_000);
        let p = Decimal::one();
        let s = half();
        let Ok(forward) = forward_out(&a, &b, &p, &s, &dec(100_000)) else {
            panic!("expected Ok");
        };
        let Ok(inverse) = inverse_in(&b, &a, &p, &s, &forward.amount_out) else {
            panic!("expected Ok");
        };
        let Ok(required) = inverse.amount_in.try_floor_u64() else {
            panic!("expected integer");
        };
        assert!(
            (99_998..=100_002).contains(&required),
            "required = {required}"
        );
    }

    #[test]
    fn inverse_beyond_capacity_is_insufficient_liquidity() {
        // den = (1−s)·bal + s·(a − out) goes non-positive at out = 3e6.
        let r = inverse_in(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &half(),
            &dec(3_000_000),
        );
        assert_eq!(r, Err(AmmError::InsufficientLiquidity));
    }

    #[test]
    fn inverse_charges_more_than_output_at_peg() {
        let Ok(inverse) = inverse_in(
            &dec(1_000_000),
            &dec(1_000_000),
            &Decimal::one(),
            &half(),
            &dec(50_000),
        ) else {
            panic!("expected Ok");
        };
        assert!(inverse.amount_in >= dec(50_000));
    }
}
