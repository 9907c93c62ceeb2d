//! Token descriptor.

use super::{Address, Decimals};

/// Immutable description of a tradeable token: display symbol, mint
/// identifier, decimal places, and the oracle feed that prices it.
///
/// Two descriptors refer to the same token exactly when their mint
/// identifiers are equal; the symbol is display-only.
///
/// # Examples
///
/// ```
/// use helm_amm::domain::{Address, Decimals, TokenDescriptor};
///
/// let usdc = TokenDescriptor::new(
///     "USDC",
///     Address::from_bytes([1u8; 32]),
///     Decimals::new(6).expect("valid decimals"),
///     Address::from_bytes([9u8; 32]),
/// );
/// assert_eq!(usdc.symbol(), "USDC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDescriptor {
    symbol: String,
    mint_id: Address,
    decimals: Decimals,
    oracle_ref: Address,
}

impl TokenDescriptor {
    /// Creates a new `TokenDescriptor`.
    ///
    /// Construction is infallible because both `Decimals` and `Address`
    /// are validated at their own construction sites.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        mint_id: Address,
        decimals: Decimals,
        oracle_ref: Address,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            mint_id,
            decimals,
            oracle_ref,
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the mint identifier.
    #[must_use]
    pub const fn mint_id(&self) -> Address {
        self.mint_id
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns the oracle feed identifier for this token.
    #[must_use]
    pub const fn oracle_ref(&self) -> Address {
        self.oracle_ref
    }
}
