//! Outcome record of a quote.

use core::fmt;

/// The outcome of a quote, rendered as decimal strings at human scale.
///
/// Numeric fields are strings so that no precision is lost across client
/// boundaries (JSON, FFI, display).  Two sentinel shapes exist besides
/// ordinary quotes:
///
/// - the **empty** result (all fields empty) — no quote is available, for
///   example when oracle data is missing;
/// - the **zero** result (all numeric fields `"0"`) — the quoted amount
///   was zero.
///
/// # Examples
///
/// ```
/// use helm_amm::domain::SwapResult;
///
/// let zero = SwapResult::zero();
/// assert_eq!(zero.amount_out(), "0");
/// assert!(!zero.insufficient_liquidity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapResult {
    amount_in: String,
    amount_out: String,
    amount_out_with_slippage: String,
    fee: String,
    price_impact: String,
    insufficient_liquidity: bool,
}

impl SwapResult {
    /// Creates a fully populated quote record.
    #[must_use]
    pub fn new(
        amount_in: String,
        amount_out: String,
        amount_out_with_slippage: String,
        fee: String,
        price_impact: String,
        insufficient_liquidity: bool,
    ) -> Self {
        Self {
            amount_in,
            amount_out,
            amount_out_with_slippage,
            fee,
            price_impact,
            insufficient_liquidity,
        }
    }

    /// Returns the empty result: no quote available.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            amount_in: String::new(),
            amount_out: String::new(),
            amount_out_with_slippage: String::new(),
            fee: String::new(),
            price_impact: String::new(),
            insufficient_liquidity: false,
        }
    }

    /// Returns the empty result flagged insufficient: the pool cannot pay
    /// the requested amount at any price.
    #[must_use]
    pub fn insufficient() -> Self {
        Self {
            insufficient_liquidity: true,
            ..Self::empty()
        }
    }

    /// Returns the zero result: a quote for a zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            amount_in: "0".to_string(),
            amount_out: "0".to_string(),
            amount_out_with_slippage: "0".to_string(),
            fee: "0".to_string(),
            price_impact: "0".to_string(),
            insufficient_liquidity: false,
        }
    }

    /// Returns `true` if this is the empty result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount_in.is_empty()
    }

    /// Returns the input amount.
    #[must_use]
    pub fn amount_in(&self) -> &str {
        &self.amount_in
    }

    /// Returns the gross-of-slippage output amount (net of fees).
    #[must_use]
    pub fn amount_out(&self) -> &str {
        &self.amount_out
    }

    /// Returns the slippage-protected output bound.
    #[must_use]
    pub fn amount_out_with_slippage(&self) -> &str {
        &self.amount_out_with_slippage
    }

    /// Returns the trade fee, in output-token units.
    #[must_use]
    pub fn fee(&self) -> &str {
        &self.fee
    }

    /// Returns the relative price impact of the trade.
    #[must_use]
    pub fn price_impact(&self) -> &str {
        &self.price_impact
    }

    /// Returns `true` if executing the trade would breach the pool's
    /// minimum reserve limit.
    #[must_use]
    pub const fn insufficient_liquidity(&self) -> bool {
        self.insufficient_liquidity
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, min_out={}, fee={}, impact={}, insufficient={})",
            self.amount_in,
            self.amount_out,
            self.amount_out_with_slippage,
            self.fee,
            self.price_impact,
            self.insufficient_liquidity
        )
    }
}
