//! Fundamental domain value types used throughout the pricing core.
//!
//! This module contains the value types that model the quoting domain:
//! token descriptors, oracle prices, pool snapshots, configuration, and
//! the quote result record.  Types with invariants use validated
//! constructors; plain input snapshots expose their fields directly.

mod address;
mod decimals;
mod direction;
mod oracle;
mod pool_state;
mod swap_config;
mod swap_info;
mod swap_result;
mod swap_type;
mod token;

pub use address::Address;
pub use decimals::Decimals;
pub use direction::SwapDirection;
pub use oracle::{MarketPriceTriple, OraclePrice};
pub use pool_state::PoolState;
pub use swap_config::{SwapConfig, WAD};
pub use swap_info::SwapInfo;
pub use swap_result::SwapResult;
pub use swap_type::SwapType;
pub use token::TokenDescriptor;
