//! # Helm AMM
//!
//! Pricing core of a two-sided automated market maker that anchors its
//! bonding curve on an external oracle price.
//!
//! Given a pool descriptor (reserves, targets, fees, slope), a token
//! pair, an amount, and a market-price triple, the crate answers three
//! questions deterministically:
//!
//! 1. **Forward quote** — what does the curve pay for a given input?
//! 2. **Inverse quote** — what input buys a desired output?
//! 3. **Liquidity safety** — would the trade breach the pool's minimum
//!    reserve limit?
//!
//! Two curve families are supported:
//!
//! | Family | Curve | Anchor |
//! |--------|-------|--------|
//! | Normal | Logarithmic | Oracle market price |
//! | Stable | Flat blend (slope `s`) | Static peg price |
//!
//! # Quick Start
//!
//! ```rust
//! use helm_amm::domain::{
//!     Address, Decimals, MarketPriceTriple, PoolState, SwapConfig,
//!     SwapInfo, SwapType, TokenDescriptor,
//! };
//! use helm_amm::engine::quote_swap_out;
//! use helm_amm::math::Decimal;
//!
//! let base = TokenDescriptor::new(
//!     "BASE",
//!     Address::from_bytes([1u8; 32]),
//!     Decimals::new(6).expect("valid decimals"),
//!     Address::from_bytes([11u8; 32]),
//! );
//! let quote = TokenDescriptor::new(
//!     "QUOTE",
//!     Address::from_bytes([2u8; 32]),
//!     Decimals::new(6).expect("valid decimals"),
//!     Address::from_bytes([12u8; 32]),
//! );
//!
//! let pool = SwapInfo {
//!     swap_type: SwapType::Normal,
//!     config_key: Address::zero(),
//!     mint_base: base.mint_id(),
//!     mint_quote: quote.mint_id(),
//!     mint_base_decimals: base.decimals(),
//!     mint_quote_decimals: quote.decimals(),
//!     pool_state: PoolState {
//!         base_reserve: 1_000_000_000,
//!         quote_reserve: 2_000_000_000,
//!         target_base_reserve: 1_000_000_000,
//!         target_quote_reserve: 2_000_000_000,
//!         base_supply: 1_000_000_000,
//!         quote_supply: 2_000_000_000,
//!     },
//!     swap_config: SwapConfig {
//!         trade_fee_num: 30,
//!         trade_fee_den: 10_000,
//!         ..SwapConfig::default()
//!     },
//! };
//!
//! let market = MarketPriceTriple::from_mid(Decimal::from(2u64));
//! let result = quote_swap_out(&pool, &base, &quote, "1", 0.5, &market)
//!     .expect("quote succeeded");
//!
//! assert!(!result.insufficient_liquidity());
//! assert!(!result.amount_out().is_empty());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ Quote engine  │  quote_swap_out / quote_swap_in / support fns
//! └──────┬───────┘
//!        │ normalized reserves, direction, decimals
//!        ▼
//! ┌──────────────┐   ┌──────────────┐
//! │   Reserves    │   │ Curve kernels │  normal / stable
//! └──────┬───────┘   └──────┬───────┘
//!        │                  │
//!        ▼                  ▼
//! ┌──────────────────────────────────┐
//! │ Fixed-point Decimal (BigInt/10²⁴) │  per-op rounding
//! └──────────────────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`SwapInfo`](domain::SwapInfo), [`PoolState`](domain::PoolState), [`MarketPriceTriple`](domain::MarketPriceTriple), … |
//! | [`math`] | [`Decimal`](math::Decimal) fixed-point arithmetic with explicit [`Rounding`](math::Rounding) |
//! | [`curve`] | Pure curve kernels for the two families |
//! | [`reserves`] | Normalization, virtual liquidity, sufficiency, withdrawal split |
//! | [`engine`] | Public quote entry points and deposit/withdraw support |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Purity
//!
//! Every entry point is synchronous, side-effect-free, and thread-safe
//! by construction: no I/O, no clocks, no logging, no shared mutable
//! state, and no global numeric configuration.

pub mod curve;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod prelude;
pub mod reserves;

#[cfg(test)]
mod proptest_properties;
