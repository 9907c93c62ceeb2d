//! Convenience re-exports for common types and functions.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use helm_amm::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Address, Decimals, MarketPriceTriple, OraclePrice, PoolState, SwapConfig, SwapDirection,
    SwapInfo, SwapResult, SwapType, TokenDescriptor, WAD,
};

// Re-export arithmetic
pub use crate::math::{Decimal, Rounding};

// Re-export quote entry points and support functions
pub use crate::engine::{
    calculate_min_shares_for_deposit, calculate_withdrawal_from_shares, check_sufficient_reserve,
    quote_swap_in, quote_swap_out, MinDepositShares, WithdrawalAmounts,
};

// Re-export reserve analytics
pub use crate::reserves::{
    has_sufficient_reserve, normalized_reserves, reserves_after_swap, virtual_reserves,
    withdrawal_from_shares, NormalizedReserves,
};

// Re-export error types
pub use crate::error::{AmmError, Result};
