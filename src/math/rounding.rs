//! Explicit rounding direction for arithmetic operations.
//!
//! Every inexact [`Decimal`](crate::math::Decimal) operation takes a
//! [`Rounding`] parameter.  There is no crate-wide rounding mode: rounding
//! is decided at each call site, because the direction determines who
//! absorbs the sub-ULP remainder of a trade.
//!
//! # Convention
//!
//! **Always round against the user** (protocol-favorable):
//!
//! | Quantity | Direction | Rationale |
//! |----------|-----------|-----------|
//! | Curve factor kept by the pool | [`Rounding::Ceil`] | Pool retains more |
//! | Output amount | [`Rounding::Floor`] | User receives less |
//! | Required input | [`Rounding::Ceil`] | User pays more |
//! | Display-only conversion | [`Rounding::HalfEven`] | No funds at stake |

/// Specifies the rounding direction for [`Decimal`](crate::math::Decimal)
/// multiplication, division, powers, roots, and string conversion.
///
/// # Examples
///
/// ```
/// use helm_amm::math::Rounding;
///
/// let r = Rounding::Ceil;
/// assert!(r.is_ceil());
/// assert!(!r.is_floor());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity.
    Ceil,
    /// Round towards negative infinity.
    Floor,
    /// Round to nearest, ties to the even neighbour (banker's rounding).
    ///
    /// Used for display-only conversions where no funds are at stake.
    HalfEven,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Ceil`].
    #[must_use]
    pub const fn is_ceil(&self) -> bool {
        matches!(self, Self::Ceil)
    }

    /// Returns `true` if this is [`Rounding::Floor`].
    #[must_use]
    pub const fn is_floor(&self) -> bool {
        matches!(self, Self::Floor)
    }

    /// Returns `true` if this is [`Rounding::HalfEven`].
    #[must_use]
    pub const fn is_half_even(&self) -> bool {
        matches!(self, Self::HalfEven)
    }

    /// Returns a human-readable description of the rounding direction.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Ceil => "round towards positive infinity",
            Self::Floor => "round towards negative infinity",
            Self::HalfEven => "round to nearest, ties to even",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_is_ceil() {
        assert!(Rounding::Ceil.is_ceil());
        assert!(!Rounding::Ceil.is_floor());
        assert!(!Rounding::Ceil.is_half_even());
    }

    #[test]
    fn floor_is_floor() {
        assert!(Rounding::Floor.is_floor());
        assert!(!Rounding::Floor.is_ceil());
    }

    #[test]
    fn half_even_is_half_even() {
        assert!(Rounding::HalfEven.is_half_even());
        assert!(!Rounding::HalfEven.is_ceil());
        assert!(!Rounding::HalfEven.is_floor());
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            Rounding::Ceil.description(),
            "round towards positive infinity"
        );
        assert_eq!(
            Rounding::Floor.description(),
            "round towards negative infinity"
        );
        assert_eq!(
            Rounding::HalfEven.description(),
            "round to nearest, ties to even"
        );
    }

    #[test]
    fn equality() {
        assert_eq!(Rounding::Ceil, Rounding::Ceil);
        assert_ne!(Rounding::Ceil, Rounding::Floor);
        assert_ne!(Rounding::Floor, Rounding::HalfEven);
    }

    #[test]
    fn copy_semantics() {
        let a = Rounding::HalfEven;
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn debug_format() {
        assert!(format!("{:?}", Rounding::Ceil).contains("Ceil"));
        assert!(format!("{:?}", Rounding::Floor).contains("Floor"));
        assert!(format!("{:?}", Rounding::HalfEven).contains("HalfEven"));
    }
}
