//! Unified error types for the pricing core.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.  The core never logs, retries, or fails silently: every
//! failure is a returned variant.
//!
//! # Error Code Ranges
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 1000–1999 | Validation | Invalid inputs or parameters |
//! | 2000–2999 | Liquidity | Reserves cannot satisfy the request |
//! | 3000–3999 | Arithmetic | Domain violations in exact arithmetic |
//! | 4000–4999 | Oracle | Market data unavailable |
//! | 5000–5999 | Internal | Post-condition violations (never recovered) |

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

// ---------------------------------------------------------------------------
// AmmError
// ---------------------------------------------------------------------------

/// Unified error enum for the pricing core.
///
/// Every fallible operation in the crate returns `Result<T, AmmError>`.
/// Variants are grouped by numeric error-code ranges so that callers can
/// pattern-match on categories or inspect individual codes for display.
///
/// [`AmmError::InternalInvariant`] is special: it reports a broken
/// pricing post-condition.  Callers must treat it as fatal and must not
/// retry or coerce it into a quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    // ----- 1000–1999: Validation errors ------------------------------------
    /// The input amount is negative or not a plain decimal number (code 1000).
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The from/to mints do not match the pool's base/quote mints (code 1001).
    #[error("token pair does not match pool mints")]
    InvalidTokenPair,

    /// The pool's swap-type tag is neither Normal nor Stable (code 1002).
    #[error("unknown swap type")]
    InvalidSwapType,

    /// A direction tag is neither SellBase nor SellQuote (code 1003).
    #[error("unknown swap direction")]
    InvalidSwapDirection,

    /// A pool configuration value is out of range (code 1004).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    // ----- 2000–2999: Liquidity errors -------------------------------------
    /// Reserves cannot satisfy the requested trade (code 2000).
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    // ----- 3000–3999: Arithmetic errors ------------------------------------
    /// Division by zero or square root of a negative value (code 3000).
    #[error("arithmetic domain error: {0}")]
    DomainError(&'static str),

    // ----- 4000–4999: Oracle errors ----------------------------------------
    /// The market-price triple is undefined (code 4000).
    ///
    /// Surfaced to the caller for display; not a core failure.
    #[error("oracle price unavailable")]
    OracleUnavailable,

    // ----- 5000–5999: Internal errors --------------------------------------
    /// A pricing post-condition was violated (code 5000).
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}

impl AmmError {
    /// Returns the numeric error code for this variant.
    ///
    /// Codes are organized into ranges:
    /// - 1000–1999 for validation errors
    /// - 2000–2999 for liquidity errors
    /// - 3000–3999 for arithmetic errors
    /// - 4000–4999 for oracle errors
    /// - 5000–5999 for internal errors
    #[must_use]
    pub const fn error_code(&self) -> u16 {
        match self {
            // Validation (1000–1999)
            Self::InvalidAmount(_) => 1000,
            Self::InvalidTokenPair => 1001,
            Self::InvalidSwapType => 1002,
            Self::InvalidSwapDirection => 1003,
            Self::InvalidConfiguration(_) => 1004,

            // Liquidity (2000–2999)
            Self::InsufficientLiquidity => 2000,

            // Arithmetic (3000–3999)
            Self::DomainError(_) => 3000,

            // Oracle (4000–4999)
            Self::OracleUnavailable => 4000,

            // Internal (5000–5999)
            Self::InternalInvariant(_) => 5000,
        }
    }

    /// Returns `true` if this is a validation error (1000–1999).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        self.error_code() >= 1000 && self.error_code() < 2000
    }

    /// Returns `true` if this is a liquidity error (2000–2999).
    #[must_use]
    pub const fn is_liquidity(&self) -> bool {
        self.error_code() >= 2000 && self.error_code() < 3000
    }

    /// Returns `true` if this is an arithmetic error (3000–3999).
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        self.error_code() >= 3000 && self.error_code() < 4000
    }

    /// Returns `true` if this is an oracle error (4000–4999).
    #[must_use]
    pub const fn is_oracle(&self) -> bool {
        self.error_code() >= 4000 && self.error_code() < 5000
    }

    /// Returns `true` if this is an internal invariant violation (5000–5999).
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.error_code() >= 5000 && self.error_code() < 6000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- error_code ranges --------------------------------------------------

    #[test]
    fn validation_errors_have_1xxx_codes() {
        let cases: &[AmmError] = &[
            AmmError::InvalidAmount("a"),
            AmmError::InvalidTokenPair,
            AmmError::InvalidSwapType,
            AmmError::InvalidSwapDirection,
            AmmError::InvalidConfiguration("c"),
        ];
        for err in cases {
            let code = err.error_code();
            assert!(
                (1000..2000).contains(&code),
                "expected 1xxx for {err}, got {code}"
            );
            assert!(err.is_validation());
            assert!(!err.is_liquidity());
            assert!(!err.is_arithmetic());
            assert!(!err.is_internal());
        }
    }

    #[test]
    fn liquidity_errors_have_2xxx_codes() {
        let err = AmmError::InsufficientLiquidity;
        assert_eq!(err.error_code(), 2000);
        assert!(err.is_liquidity());
        assert!(!err.is_validation());
    }

    #[test]
    fn arithmetic_errors_have_3xxx_codes() {
        let err = AmmError::DomainError("division by zero");
        assert_eq!(err.error_code(), 3000);
        assert!(err.is_arithmetic());
        assert!(!err.is_oracle());
    }

    #[test]
    fn oracle_errors_have_4xxx_codes() {
        let err = AmmError::OracleUnavailable;
        assert_eq!(err.error_code(), 4000);
        assert!(err.is_oracle());
        assert!(!err.is_internal());
    }

    #[test]
    fn internal_errors_have_5xxx_codes() {
        let err = AmmError::InternalInvariant("approx exceeded implied");
        assert_eq!(err.error_code(), 5000);
        assert!(err.is_internal());
        assert!(!err.is_validation());
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display_includes_context_message() {
        let err = AmmError::InvalidAmount("must be non-negative");
        let msg = format!("{err}");
        assert!(
            msg.contains("must be non-negative"),
            "expected context in display: {msg}"
        );
    }

    #[test]
    fn display_unit_variants_are_readable() {
        let msg = format!("{}", AmmError::OracleUnavailable);
        assert!(
            msg.contains("oracle price unavailable"),
            "expected readable message: {msg}"
        );
    }

    // -- Clone & PartialEq --------------------------------------------------

    #[test]
    fn clone_and_eq() {
        let a = AmmError::DomainError("test");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn different_variants_are_not_equal() {
        assert_ne!(AmmError::InvalidSwapType, AmmError::InvalidSwapDirection);
    }

    // -- Result alias -------------------------------------------------------

    #[test]
    fn result_alias() {
        let ok: Result<u32> = Ok(42);
        let err: Result<u32> = Err(AmmError::InsufficientLiquidity);
        assert_eq!(ok, Ok(42));
        assert!(err.is_err());
    }
}
