//! Property-based tests using `proptest` for quoting invariants.
//!
//! Covers the universal quoting properties:
//!
//! 1. **Non-negativity** — outputs, fees, and price impact are `≥ 0`.
//! 2. **Conservative bound** — curve output never beats the linear
//!    output at the marginal price.
//! 3. **Fee reassembly** — `net + fee` equals the gross output exactly
//!    at final string precision.
//! 4. **Zero input** — a `"0"` amount yields the zero result.
//! 5. **Inverse round trip** — paying the quoted input buys at least the
//!    desired output.
//! 6. **Sufficiency monotonicity** — shrinking a passing trade cannot
//!    make it fail.
//! 7. **Determinism** — identical inputs give byte-identical results.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::curve::normal;
use crate::domain::{
    Address, Decimals, MarketPriceTriple, PoolState, SwapConfig, SwapDirection, SwapInfo,
    SwapResult, SwapType, TokenDescriptor,
};
use crate::engine::{check_sufficient_reserve, quote_swap_in, quote_swap_out};
use crate::math::{Decimal, Rounding};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn decimals6() -> Decimals {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    d
}

fn base_token() -> TokenDescriptor {
    TokenDescriptor::new(
        "BASE",
        Address::from_bytes([1u8; 32]),
        decimals6(),
        Address::from_bytes([11u8; 32]),
    )
}

fn quote_token() -> TokenDescriptor {
    TokenDescriptor::new(
        "QUOTE",
        Address::from_bytes([2u8; 32]),
        decimals6(),
        Address::from_bytes([12u8; 32]),
    )
}

fn normal_pool(base_reserve: u64, quote_reserve: u64, fee_num: u64) -> SwapInfo {
    SwapInfo {
        swap_type: SwapType::Normal,
        config_key: Address::zero(),
        mint_base: base_token().mint_id(),
        mint_quote: quote_token().mint_id(),
        mint_base_decimals: decimals6(),
        mint_quote_decimals: decimals6(),
        pool_state: PoolState {
            base_reserve,
            quote_reserve,
            target_base_reserve: 1_000_000_000_000,
            target_quote_reserve: 2_000_000_000_000,
            base_supply: 1_000_000_000_000,
            quote_supply: 2_000_000_000_000,
        },
        swap_config: SwapConfig {
            trade_fee_num: fee_num,
            trade_fee_den: 10_000,
            ..SwapConfig::default()
        },
    }
}

fn stable_pool(reserve: u64) -> SwapInfo {
    SwapInfo {
        swap_type: SwapType::Stable,
        config_key: Address::zero(),
        mint_base: base_token().mint_id(),
        mint_quote: quote_token().mint_id(),
        mint_base_decimals: decimals6(),
        mint_quote_decimals: decimals6(),
        pool_state: PoolState {
            base_reserve: reserve,
            quote_reserve: reserve,
            target_base_reserve: reserve,
            target_quote_reserve: reserve,
            base_supply: reserve,
            quote_supply: reserve,
        },
        swap_config: SwapConfig {
            slope: crate::domain::WAD / 2,
            ..SwapConfig::default()
        },
    }
}

fn parse(s: &str) -> Decimal {
    let Ok(d) = Decimal::parse(s) else {
        panic!("valid decimal: {s}");
    };
    d
}

/// Reserves drifted around the 1e12 / 2e12 targets.
fn reserve_strategy() -> impl Strategy<Value = (u64, u64)> {
    (
        800_000_000_000_u64..1_200_000_000_000,
        1_600_000_000_000_u64..2_400_000_000_000,
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn quote_fields_are_non_negative(
        (base_reserve, quote_reserve) in reserve_strategy(),
        amount in 1_u64..1_000_000,
        price in 1_u64..100,
    ) {
        let pool = normal_pool(base_reserve, quote_reserve, 30);
        let market = MarketPriceTriple::from_mid(Decimal::from(price));
        let result = quote_swap_out(
            &pool,
            &base_token(),
            &quote_token(),
            &amount.to_string(),
            1.0,
            &market,
        );
        prop_assert!(result.is_ok());
        let Ok(result) = result else { unreachable!() };
        prop_assert!(!parse(result.amount_out()).is_negative());
        prop_assert!(!parse(result.fee()).is_negative());
        prop_assert!(!parse(result.price_impact()).is_negative());
        prop_assert!(!parse(result.amount_out_with_slippage()).is_negative());
    }

    #[test]
    fn curve_output_never_beats_linear_bound(
        reserve_in in 800_000_000_000_u64..1_200_000_000_000,
        amount in 1_000_000_u64..100_000_000_000,
        price in 1_u64..50,
    ) {
        // Kernel-level check on target-ratio reserves.
        let a = Decimal::from(reserve_in);
        let b = Decimal::from(reserve_in * 2);
        let ta = Decimal::from(1_000_000_000_000_u64);
        let tb = Decimal::from(2_000_000_000_000_u64);
        let p = Decimal::from(price);
        let m = Decimal::from(amount);

        let quote = normal::forward_out(&a, &b, &ta, &tb, &p, &m);
        prop_assert!(quote.is_ok());
        let Ok(quote) = quote else { unreachable!() };
        let linear = normal::linear_out(&a, &b, &ta, &tb, &p, &m);
        prop_assert!(linear.is_ok());
        let Ok(linear) = linear else { unreachable!() };
        prop_assert!(quote.amount_out <= linear);
    }

    #[test]
    fn fee_reassembles_gross_exactly(
        (base_reserve, quote_reserve) in reserve_strategy(),
        amount in 1_u64..1_000_000,
        fee_num in 0_u64..500,
    ) {
        let pool = normal_pool(base_reserve, quote_reserve, fee_num);
        let market = MarketPriceTriple::from_mid(Decimal::from(2u64));
        let result = quote_swap_out(
            &pool,
            &base_token(),
            &quote_token(),
            &amount.to_string(),
            1.0,
            &market,
        );
        prop_assert!(result.is_ok());
        let Ok(result) = result else { unreachable!() };

        // net + fee is the gross output; re-applying the fee split to it
        // reproduces the quoted net exactly.
        let net = parse(result.amount_out());
        let fee = parse(result.fee());
        let gross = &net + &fee;
        let keep = Decimal::from(10_000 - fee_num);
        let recomputed = gross
            .mul(&keep, Rounding::Floor)
            .div(&Decimal::from(10_000_u64), Rounding::Floor);
        prop_assert!(recomputed.is_ok());
        let Ok(recomputed) = recomputed else { unreachable!() };
        // Quantized at six decimals, the recomputed net matches.
        let factor = Decimal::from(1_000_000_u64);
        let lhs = net.mul(&factor, Rounding::Floor).floor();
        let rhs = recomputed.mul(&factor, Rounding::Floor).floor();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn zero_input_is_the_zero_result(
        (base_reserve, quote_reserve) in reserve_strategy(),
    ) {
        let pool = normal_pool(base_reserve, quote_reserve, 30);
        let market = MarketPriceTriple::from_mid(Decimal::from(2u64));
        let result = quote_swap_out(&pool, &base_token(), &quote_token(), "0", 1.0, &market);
        prop_assert_eq!(result, Ok(SwapResult::zero()));
    }

    #[test]
    fn inverse_round_trip_covers_desired_output(
        reserve in 900_000_000_000_u64..1_100_000_000_000,
        desired in 1_u64..10_000,
    ) {
        let pool = stable_pool(reserve);
        let market = MarketPriceTriple::from_mid(Decimal::one());
        let inverse = quote_swap_in(
            &pool,
            &base_token(),
            &quote_token(),
            &desired.to_string(),
            1.0,
            &market,
        );
        prop_assert!(inverse.is_ok());
        let Ok(inverse) = inverse else { unreachable!() };
        prop_assert!(!inverse.is_empty());

        let forward = quote_swap_out(
            &pool,
            &base_token(),
            &quote_token(),
            inverse.amount_in(),
            1.0,
            &market,
        );
        prop_assert!(forward.is_ok());
        let Ok(forward) = forward else { unreachable!() };
        prop_assert!(
            parse(forward.amount_out()) >= Decimal::from(desired),
            "round trip out {} < desired {}",
            forward.amount_out(),
            desired,
        );
    }

    #[test]
    fn sufficiency_is_monotone(
        (base_reserve, quote_reserve) in reserve_strategy(),
        amount_out in 1_000_000_u64..500_000_000_000,
    ) {
        let mut pool = normal_pool(base_reserve, quote_reserve, 0);
        pool.swap_config.min_reserve_limit_percentage = 10;
        let market = MarketPriceTriple::from_mid(Decimal::from(2u64));

        let large = check_sufficient_reserve(
            &pool,
            amount_out / 2,
            amount_out,
            SwapDirection::SellBase,
            &market,
        );
        let small = check_sufficient_reserve(
            &pool,
            amount_out / 4,
            amount_out / 2,
            SwapDirection::SellBase,
            &market,
        );
        prop_assert!(large.is_ok() && small.is_ok());
        let (Ok(large), Ok(small)) = (large, small) else { unreachable!() };
        // A passing trade implies every smaller trade passes.
        prop_assert!(!large || small);
    }

    #[test]
    fn quotes_are_deterministic(
        (base_reserve, quote_reserve) in reserve_strategy(),
        amount in 1_u64..1_000_000,
    ) {
        let pool = normal_pool(base_reserve, quote_reserve, 30);
        let market = MarketPriceTriple::from_mid(Decimal::from(3u64));
        let input = format!("{amount}.123456");
        let a = quote_swap_out(&pool, &base_token(), &quote_token(), &input, 0.5, &market);
        let b = quote_swap_out(&pool, &base_token(), &quote_token(), &input, 0.5, &market);
        prop_assert_eq!(a, b);
    }
}
