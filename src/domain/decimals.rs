//! Token decimal places.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RmmError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// The number of decimal places carried by a [`FixedDecimal`](super::FixedDecimal).
///
/// Valid range is `0..=18`, matching ERC-20 tokens. Liquidity shares and
/// prices always use 18 decimals.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// assert_eq!(d.factor(), 1_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18), also the width of liquidity
    /// shares and prices.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, RmmError> {
        if value > MAX_DECIMALS {
            return Err(RmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals`.
    #[must_use]
    pub const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }

    /// Fails with [`RmmError::DecimalMismatch`] unless `self == expected`.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DecimalMismatch`] on a width mismatch.
    pub const fn ensure(&self, expected: Self) -> Result<(), RmmError> {
        if self.0 != expected.0 {
            return Err(RmmError::DecimalMismatch {
                expected: expected.0,
                actual: self.0,
            });
        }
        Ok(())
    }
}

impl TryFrom<u8> for Decimals {
    type Error = RmmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}

impl fmt::Display for Decimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for v in [0u8, 6, 8, 18] {
            let Ok(d) = Decimals::new(v) else {
                panic!("expected Ok for {v}");
            };
            assert_eq!(d.get(), v);
        }
    }

    #[test]
    fn invalid_nineteen() {
        let Err(e) = Decimals::new(19) else {
            panic!("expected Err");
        };
        assert_eq!(e, RmmError::InvalidPrecision("decimals must be 0..=18"));
    }

    #[test]
    fn factor_values() {
        assert_eq!(Decimals::ZERO.factor(), 1);
        assert_eq!(Decimals::MAX.factor(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn ensure_reports_both_widths() {
        let Ok(d6) = Decimals::new(6) else {
            panic!("expected Ok");
        };
        assert!(d6.ensure(d6).is_ok());
        assert_eq!(
            d6.ensure(Decimals::MAX),
            Err(RmmError::DecimalMismatch {
                expected: 18,
                actual: 6
            })
        );
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: Result<Decimals, _> = serde_json::from_str("8");
        assert!(ok.is_ok());
        let bad: Result<Decimals, _> = serde_json::from_str("24");
        assert!(bad.is_err());
    }
}
