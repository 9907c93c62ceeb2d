//! Pool pricing configuration.

use super::SwapType;
use crate::error::{AmmError, Result};
use crate::math::{Decimal, Rounding};

/// WAD fixed-point unit used for the stored slope (`10^18`).
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Immutable pricing parameters of a pool.
///
/// Fees are stored as `numerator / denominator` pairs; percentages are
/// whole numbers in `0..=100`.  The slope is stored WAD-scaled, matching
/// its on-chain representation.
///
/// `virtual_reserve_percentage` defaults to 0 because older pool-config
/// layouts do not carry the field; an absent value means no virtual
/// reserves.
///
/// # Validation
///
/// [`SwapConfig::validate`] takes the pool's [`SwapType`] because the
/// slope constraint only applies to stable-swap pools; the normal curve
/// never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapConfig {
    /// Stable-curve flatness in `(0, 1]`, WAD-scaled.  Smaller is flatter.
    pub slope: u128,
    /// Trade fee numerator.
    pub trade_fee_num: u64,
    /// Trade fee denominator.
    pub trade_fee_den: u64,
    /// Admin share of the trade fee, numerator.
    pub admin_trade_fee_num: u64,
    /// Admin share of the trade fee, denominator.
    pub admin_trade_fee_den: u64,
    /// Withdrawal fee numerator.
    pub withdraw_fee_num: u64,
    /// Withdrawal fee denominator.
    pub withdraw_fee_den: u64,
    /// Admin share of the withdrawal fee, numerator.
    pub admin_withdraw_fee_num: u64,
    /// Admin share of the withdrawal fee, denominator.
    pub admin_withdraw_fee_den: u64,
    /// Sufficiency floor as a percentage of normalized reserves.
    pub min_reserve_limit_percentage: u8,
    /// Fraction of normalized reserves quoted as virtual liquidity
    /// (normal-swap only).
    pub virtual_reserve_percentage: u8,
    /// When `true`, quotes price against the adverse confidence bound.
    pub enable_confidence_interval: bool,
    /// Largest single trade as a percentage of the in-side reserve;
    /// 0 disables the guard.
    pub max_swap_percentage: u8,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            slope: WAD,
            trade_fee_num: 0,
            trade_fee_den: 1,
            admin_trade_fee_num: 0,
            admin_trade_fee_den: 1,
            withdraw_fee_num: 0,
            withdraw_fee_den: 1,
            admin_withdraw_fee_num: 0,
            admin_withdraw_fee_den: 1,
            min_reserve_limit_percentage: 0,
            virtual_reserve_percentage: 0,
            enable_confidence_interval: false,
            max_swap_percentage: 0,
        }
    }
}

impl SwapConfig {
    /// Validates all configuration invariants for the given curve family.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if:
    /// - any fee denominator is zero, or a numerator exceeds its
    ///   denominator;
    /// - a percentage field exceeds 100;
    /// - the pool is stable-swap and the slope is outside `(0, WAD]`.
    pub const fn validate(&self, swap_type: SwapType) -> Result<()> {
        if self.trade_fee_den == 0
            || self.admin_trade_fee_den == 0
            || self.withdraw_fee_den == 0
            || self.admin_withdraw_fee_den == 0
        {
            return Err(AmmError::InvalidConfiguration(
                "fee denominator must be non-zero",
            ));
        }
        if self.trade_fee_num > self.trade_fee_den
            || self.admin_trade_fee_num > self.admin_trade_fee_den
            || self.withdraw_fee_num > self.withdraw_fee_den
            || self.admin_withdraw_fee_num > self.admin_withdraw_fee_den
        {
            return Err(AmmError::InvalidConfiguration(
                "fee numerator must not exceed denominator",
            ));
        }
        if self.min_reserve_limit_percentage > 100
            || self.virtual_reserve_percentage > 100
            || self.max_swap_percentage > 100
        {
            return Err(AmmError::InvalidConfiguration(
                "percentage must be 0..=100",
            ));
        }
        if matches!(swap_type, SwapType::Stable) && (self.slope == 0 || self.slope > WAD) {
            return Err(AmmError::InvalidConfiguration(
                "slope must be in (0, WAD] for stable-swap",
            ));
        }
        Ok(())
    }

    /// Returns the slope as a [`Decimal`] in `(0, 1]`.
    #[must_use]
    pub fn slope_decimal(&self) -> Decimal {
        Decimal::from_wad(self.slope)
    }

    /// Returns the trade fee as a fraction in `[0, 1]`.
    ///
    /// The denominator is validated non-zero, so this cannot fail after
    /// [`SwapConfig::validate`].
    #[must_use]
    pub fn trade_fee_fraction(&self) -> Decimal {
        Decimal::from(self.trade_fee_num)
            .div(&Decimal::from(self.trade_fee_den), Rounding::HalfEven)
            .unwrap_or_else(|_| Decimal::zero())
    }

    /// Returns the admin share of the trade fee as a fraction in `[0, 1]`.
    #[must_use]
    pub fn admin_trade_fee_fraction(&self) -> Decimal {
        Decimal::from(self.admin_trade_fee_num)
            .div(&Decimal::from(self.admin_trade_fee_den), Rounding::HalfEven)
            .unwrap_or_else(|_| Decimal::zero())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn config() -> SwapConfig {
        SwapConfig {
            slope: WAD / 2,
            trade_fee_num: 30,
            trade_fee_den: 10_000,
            admin_trade_fee_num: 1,
            admin_trade_fee_den: 5,
            min_reserve_limit_percentage: 2,
            virtual_reserve_percentage: 10,
            max_swap_percentage: 90,
            ..SwapConfig::default()
        }
    }

    // -- validate ------------------------------------------------------------

    #[test]
    fn valid_config_passes_both_types() {
        assert!(config().validate(SwapType::Normal).is_ok());
        assert!(config().validate(SwapType::Stable).is_ok());
    }

    #[test]
    fn zero_fee_denominator_fails() {
        let mut c = config();
        c.trade_fee_den = 0;
        assert!(c.validate(SwapType::Normal).is_err());
    }

    #[test]
    fn fee_numerator_above_denominator_fails() {
        let mut c = config();
        c.admin_trade_fee_num = 6;
        c.admin_trade_fee_den = 5;
        assert!(c.validate(SwapType::Normal).is_err());
    }

    #[test]
    fn percentage_above_hundred_fails() {
        let mut c = config();
        c.min_reserve_limit_percentage = 101;
        assert!(c.validate(SwapType::Normal).is_err());
    }

    #[test]
    fn zero_slope_fails_only_for_stable() {
        let mut c = config();
        c.slope = 0;
        assert!(c.validate(SwapType::Normal).is_ok());
        assert!(c.validate(SwapType::Stable).is_err());
    }

    #[test]
    fn slope_above_wad_fails_for_stable() {
        let mut c = config();
        c.slope = WAD + 1;
        assert!(c.validate(SwapType::Stable).is_err());
    }

    #[test]
    fn slope_exactly_wad_is_valid() {
        let mut c = config();
        c.slope = WAD;
        assert!(c.validate(SwapType::Stable).is_ok());
    }

    // -- fraction helpers ----------------------------------------------------

    #[test]
    fn slope_decimal_half() {
        let c = config();
        let Ok(expected) = Decimal::from(1u64).div(&Decimal::from(2u64), Rounding::Floor) else {
            panic!("expected Ok");
        };
        assert_eq!(c.slope_decimal(), expected);
    }

    #[test]
    fn trade_fee_fraction_thirty_bps() {
        let c = config();
        let Ok(expected) =
            Decimal::from(30u64).div(&Decimal::from(10_000u64), Rounding::HalfEven)
        else {
            panic!("expected Ok");
        };
        assert_eq!(c.trade_fee_fraction(), expected);
    }

    #[test]
    fn default_has_no_fees_and_no_virtual_reserves() {
        let c = SwapConfig::default();
        assert!(c.trade_fee_fraction().is_zero());
        assert_eq!(c.virtual_reserve_percentage, 0);
        assert!(!c.enable_confidence_interval);
        assert!(c.validate(SwapType::Normal).is_ok());
    }
}
