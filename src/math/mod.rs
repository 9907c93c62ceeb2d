//! Arbitrary-precision arithmetic for the pricing core.
//!
//! This module provides the [`Decimal`] fixed-point type and the
//! [`Rounding`] direction threaded through every inexact operation.
//!
//! # Precision
//!
//! `Decimal` carries 24 base-10 fractional digits over an unbounded
//! integer part, which covers the product of two 64-bit reserves scaled by
//! `WAD = 10^18` without loss.  Multiplication and division lose at most
//! one ULP in the requested direction; addition and subtraction are exact.

mod decimal;
mod rounding;

pub use decimal::{Decimal, FRACTIONAL_DIGITS, WAD_DIGITS};
pub use rounding::Rounding;
