//! Pure curve kernels for the two pricing families.
//!
//! | Module | Curve | Anchor |
//! |--------|-------|--------|
//! | [`normal`] | Logarithmic | External oracle price |
//! | [`stable`] | Flat blend | Static peg price |
//!
//! Kernels are direction-agnostic: they price the "sell-base form" and
//! the engine swaps reserves and inverts the price for the opposite
//! direction.  Each family exposes an explicit forward kernel
//! (`forward_out`) and an explicit inverse kernel (`inverse_in`) sharing
//! a signed shift core; infeasible requests surface as
//! [`AmmError::InsufficientLiquidity`](crate::error::AmmError), never as
//! sentinel values.

pub mod normal;
pub mod stable;

pub use normal::{NormalInverse, NormalQuote, FLOAT_ROUND_UP_EPSILON};
pub use stable::{StableInverse, StableQuote};
