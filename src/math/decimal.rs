//! Arbitrary-precision fixed-point decimal with per-operation rounding.
//!
//! [`Decimal`] is the single numeric type used by the curve kernels, the
//! reserve analytics, and the quote engine.  A value is a signed integer
//! mantissa over a fixed power-of-ten scale:
//!
//! ```text
//! value = mantissa / 10^24
//! ```
//!
//! The mantissa is a [`BigInt`], so the integer part is unbounded: the
//! product of two 64-bit reserves scaled by `WAD = 10^18` is represented
//! exactly, and every value carries well over 40 significant decimal digits.
//!
//! # Numerical contract
//!
//! - Addition, subtraction, and negation are **exact**.
//! - Multiplication and division perform a single rounded rescale and
//!   therefore lose at most **one ULP** (`10^-24`) in the direction named
//!   by the [`Rounding`] argument.
//! - There is no global rounding mode.  Rounding is a parameter of each
//!   operation, chosen at the call site.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{AmmError, Result};
use crate::math::Rounding;

/// Number of base-10 fractional digits carried by every [`Decimal`].
pub const FRACTIONAL_DIGITS: u32 = 24;

/// Number of base-10 fractional digits of WAD-scaled on-chain values.
pub const WAD_DIGITS: u32 = 18;

/// Returns `10^digits` as a [`BigInt`].
fn pow10(digits: u32) -> BigInt {
    BigInt::from(10u8).pow(digits)
}

/// Returns the mantissa scale `10^24`.
fn scale() -> BigInt {
    pow10(FRACTIONAL_DIGITS)
}

/// Integer division with explicit rounding direction.
///
/// The denominator must be non-zero; callers that accept external divisors
/// go through [`Decimal::div`], which maps a zero divisor to
/// [`AmmError::DomainError`].
fn div_rounded(numerator: BigInt, denominator: &BigInt, rounding: Rounding) -> BigInt {
    debug_assert!(!denominator.is_zero());

    // Normalize to a positive denominator so floor/ceil keep their
    // direction for negative numerators.
    let (numerator, denominator) = if denominator.is_negative() {
        (-numerator, -denominator.clone())
    } else {
        (numerator, denominator.clone())
    };

    let (quotient, remainder) = numerator.div_mod_floor(&denominator);
    if remainder.is_zero() {
        return quotient;
    }

    match rounding {
        Rounding::Floor => quotient,
        Rounding::Ceil => quotient + 1,
        Rounding::HalfEven => {
            let twice = &remainder * BigInt::from(2);
            match twice.cmp(&denominator) {
                Ordering::Less => quotient,
                Ordering::Greater => quotient + 1,
                Ordering::Equal => {
                    if quotient.is_even() {
                        quotient
                    } else {
                        quotient + 1
                    }
                }
            }
        }
    }
}

/// Floor square root of a non-negative [`BigInt`] via Newton's method.
fn isqrt(n: &BigInt) -> BigInt {
    debug_assert!(!n.is_negative());
    if n.is_zero() {
        return BigInt::zero();
    }

    // Initial guess: 2^ceil(bits/2) >= sqrt(n), so the sequence is
    // monotonically decreasing and terminates.
    let mut x = BigInt::from(1u8) << ((n.bits() as usize).div_ceil(2));
    loop {
        let y = (&x + n / &x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Signed fixed-point decimal: `mantissa / 10^24` with a [`BigInt`]
/// mantissa.
///
/// # Examples
///
/// ```
/// use helm_amm::math::{Decimal, Rounding};
///
/// let a = Decimal::from(3u64);
/// let b = Decimal::from(2u64);
/// let q = a.div(&b, Rounding::Floor).expect("non-zero divisor");
/// assert_eq!(q.to_string_with_scale(1, Rounding::HalfEven), "1.5");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal {
    mantissa: BigInt,
}

impl Decimal {
    /// Returns the additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
        }
    }

    /// Returns the multiplicative identity.
    #[must_use]
    pub fn one() -> Self {
        Self { mantissa: scale() }
    }

    /// Builds a decimal from a WAD-scaled (`10^18`) on-chain integer, such
    /// as a stored slope.
    ///
    /// ```
    /// use helm_amm::math::Decimal;
    ///
    /// let half = Decimal::from_wad(500_000_000_000_000_000);
    /// assert_eq!(&half + &half, Decimal::one());
    /// ```
    #[must_use]
    pub fn from_wad(value: u128) -> Self {
        Self {
            mantissa: BigInt::from(value) * pow10(FRACTIONAL_DIGITS - WAD_DIGITS),
        }
    }

    /// Returns `true` if the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns `true` if the value is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
        }
    }

    /// Multiplies two decimals, rounding the rescale in the given
    /// direction.  Loses at most one ULP.
    #[must_use]
    pub fn mul(&self, other: &Self, rounding: Rounding) -> Self {
        Self {
            mantissa: div_rounded(&self.mantissa * &other.mantissa, &scale(), rounding),
        }
    }

    /// Divides `self` by `other`, rounding in the given direction.  Loses
    /// at most one ULP.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if `other` is zero.
    pub fn div(&self, other: &Self, rounding: Rounding) -> Result<Self> {
        if other.is_zero() {
            return Err(AmmError::DomainError("division by zero"));
        }
        Ok(Self {
            mantissa: div_rounded(&self.mantissa * scale(), &other.mantissa, rounding),
        })
    }

    /// Returns `1 / self`, rounding in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if `self` is zero.
    pub fn reciprocal(&self, rounding: Rounding) -> Result<Self> {
        Self::one().div(self, rounding)
    }

    /// Raises the value to a non-negative integer power by repeated
    /// squaring, rounding each multiplication in the given direction.
    ///
    /// `powi(0)` is `1` for every base, including zero.
    #[must_use]
    pub fn powi(&self, exponent: u64, rounding: Rounding) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base, rounding);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base, rounding);
            }
        }
        result
    }

    /// Computes the square root, rounding in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if the value is negative.
    pub fn sqrt(&self, rounding: Rounding) -> Result<Self> {
        if self.is_negative() {
            return Err(AmmError::DomainError("square root of a negative value"));
        }

        // sqrt(m / 10^24) = isqrt(m * 10^24) / 10^24
        let target = &self.mantissa * scale();
        let floor_root = isqrt(&target);
        let square = &floor_root * &floor_root;

        let mantissa = if square == target {
            floor_root
        } else {
            match rounding {
                Rounding::Floor => floor_root,
                Rounding::Ceil => floor_root + 1,
                Rounding::HalfEven => {
                    // Nearest neighbour; the midpoint is never attained for
                    // integer targets, so no tie-break is needed.
                    let low_gap = &target - &square;
                    let high_gap = (&floor_root + 1) * (&floor_root + 1) - &target;
                    if low_gap > high_gap {
                        floor_root + 1
                    } else {
                        floor_root
                    }
                }
            }
        };
        Ok(Self { mantissa })
    }

    /// Returns the largest integer-valued decimal `<= self`.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self {
            mantissa: div_rounded(self.mantissa.clone(), &scale(), Rounding::Floor) * scale(),
        }
    }

    /// Returns the smallest integer-valued decimal `>= self`.
    #[must_use]
    pub fn ceil(&self) -> Self {
        Self {
            mantissa: div_rounded(self.mantissa.clone(), &scale(), Rounding::Ceil) * scale(),
        }
    }

    /// Extracts the integer part, rounding towards negative infinity.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if the result is negative or does
    /// not fit in a `u64`.
    pub fn try_floor_u64(&self) -> Result<u64> {
        let floored = div_rounded(self.mantissa.clone(), &scale(), Rounding::Floor);
        floored
            .to_u64()
            .ok_or(AmmError::DomainError("integer part outside u64 range"))
    }

    /// Extracts the integer part, rounding towards positive infinity.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if the result is negative or does
    /// not fit in a `u64`.
    pub fn try_ceil_u64(&self) -> Result<u64> {
        let ceiled = div_rounded(self.mantissa.clone(), &scale(), Rounding::Ceil);
        ceiled
            .to_u64()
            .ok_or(AmmError::DomainError("integer part outside u64 range"))
    }

    /// Converts to `f64` with a single correctly-rounded step, losing
    /// only what the 53-bit significand cannot hold.
    ///
    /// Only the normal-curve power path uses this conversion; every other
    /// computation stays in exact mantissa arithmetic.  Values beyond the
    /// `f64` range saturate to the matching infinity.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        // The decimal-string parser is correctly rounded, so this is a
        // single rounding rather than a convert-then-divide pair whose
        // error could swallow the power-path epsilon.
        self.to_string_with_scale(FRACTIONAL_DIGITS as u8, Rounding::HalfEven)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Builds a decimal from an `f64` exactly, then rounds half-even at
    /// the last internal digit.
    ///
    /// The float is decomposed into its binary significand and exponent,
    /// so no error beyond the final ULP is introduced; the power-path
    /// epsilon survives the conversion intact.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DomainError`] if the value is NaN or infinite.
    pub fn try_from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(AmmError::DomainError("non-finite float"));
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent_bits = ((bits >> 52) & 0x7FF) as i64;
        let fraction = bits & ((1_u64 << 52) - 1);

        // value = significand · 2^exponent, exactly.
        let (significand, exponent) = if exponent_bits == 0 {
            (fraction, -1074_i64)
        } else {
            (fraction | (1_u64 << 52), exponent_bits - 1075)
        };

        let scaled = BigInt::from(significand) * scale();
        let mantissa = if exponent >= 0 {
            scaled << (exponent as usize)
        } else {
            div_rounded(
                scaled,
                &(BigInt::from(1u8) << ((-exponent) as usize)),
                Rounding::HalfEven,
            )
        };

        Ok(Self {
            mantissa: if negative { -mantissa } else { mantissa },
        })
    }

    /// Parses a plain decimal string: optional sign, digits, optional
    /// fractional part.  Fractional digits beyond the internal precision
    /// are rounded half-even.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] for anything that is not a plain
    /// decimal number (exponents, hex, thousands separators, empty input).
    pub fn parse(input: &str) -> Result<Self> {
        let (negative, body) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AmmError::InvalidAmount("empty decimal string"));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmmError::InvalidAmount("not a plain decimal number"));
        }

        let int_mantissa = if int_part.is_empty() {
            BigInt::zero()
        } else {
            // Digits are pre-validated, so BigInt parsing cannot fail.
            int_part
                .parse::<BigInt>()
                .map_err(|_| AmmError::InvalidAmount("integer part overflow"))?
                * scale()
        };

        let frac_mantissa = if frac_part.is_empty() {
            BigInt::zero()
        } else {
            let digits = frac_part.len() as u32;
            let raw = frac_part
                .parse::<BigInt>()
                .map_err(|_| AmmError::InvalidAmount("fractional part overflow"))?;
            if digits <= FRACTIONAL_DIGITS {
                raw * pow10(FRACTIONAL_DIGITS - digits)
            } else {
                div_rounded(raw, &pow10(digits - FRACTIONAL_DIGITS), Rounding::HalfEven)
            }
        };

        let mantissa = int_mantissa + frac_mantissa;
        Ok(Self {
            mantissa: if negative { -mantissa } else { mantissa },
        })
    }

    /// Renders the value with exactly `digits` fractional digits, then
    /// trims trailing zeros (and a trailing point).
    ///
    /// Display-only conversions use [`Rounding::HalfEven`]; fund-bearing
    /// boundaries pass [`Rounding::Floor`] or [`Rounding::Ceil`]
    /// explicitly.
    #[must_use]
    pub fn to_string_with_scale(&self, digits: u8, rounding: Rounding) -> String {
        let digits = u32::from(digits);
        let rescaled = if digits >= FRACTIONAL_DIGITS {
            self.mantissa.clone() * pow10(digits - FRACTIONAL_DIGITS)
        } else {
            div_rounded(
                self.mantissa.clone(),
                &pow10(FRACTIONAL_DIGITS - digits),
                rounding,
            )
        };

        let negative = rescaled.is_negative();
        let unsigned = rescaled.abs().to_string();
        let digits = digits as usize;

        let (int_str, frac_str) = if unsigned.len() > digits {
            let split = unsigned.len() - digits;
            (unsigned[..split].to_string(), unsigned[split..].to_string())
        } else {
            (
                "0".to_string(),
                format!("{unsigned:0>width$}", width = digits),
            )
        };

        let frac_trimmed = frac_str.trim_end_matches('0');
        let mut rendered = if frac_trimmed.is_empty() {
            int_str
        } else {
            format!("{int_str}.{frac_trimmed}")
        };
        if negative && rendered != "0" {
            rendered.insert(0, '-');
        }
        rendered
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self {
            mantissa: BigInt::from(value) * scale(),
        }
    }
}

impl From<u128> for Decimal {
    fn from(value: u128) -> Self {
        Self {
            mantissa: BigInt::from(value) * scale(),
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            mantissa: BigInt::from(value) * scale(),
        }
    }
}

impl Add for Decimal {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            mantissa: self.mantissa + other.mantissa,
        }
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, other: Self) -> Decimal {
        Decimal {
            mantissa: &self.mantissa + &other.mantissa,
        }
    }
}

impl Sub for Decimal {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            mantissa: self.mantissa - other.mantissa,
        }
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, other: Self) -> Decimal {
        Decimal {
            mantissa: &self.mantissa - &other.mantissa,
        }
    }
}

impl Neg for Decimal {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            mantissa: -self.mantissa,
        }
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            mantissa: -&self.mantissa,
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full precision is exact, so the rounding mode is irrelevant here.
        write!(
            f,
            "{}",
            self.to_string_with_scale(FRACTIONAL_DIGITS as u8, Rounding::HalfEven)
        )
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}
