//! Basis-point representation for sigma and gamma.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{FixedDecimal, Rounding};
use crate::error::Result;
use crate::math::mul_div;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Sigma may legitimately exceed 100% (up to 10 000 000 bp), so no upper
/// bound is enforced here; [`Calibration`](super::Calibration) applies the
/// per-field limits.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::Percentage;
///
/// let gamma = Percentage::new(9_900);
/// assert!((gamma.as_fraction() - 0.99).abs() < f64::EPSILON);
/// assert_eq!(gamma.complement(), Percentage::new(100));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percentage(u32);

impl Percentage {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const ONE: Self = Self(BPS_PER_UNIT);

    /// Creates a new `Percentage` from raw basis points.
    pub const fn new(bps: u32) -> Self {
        Self(bps)
    }

    /// Returns the raw basis points.
    #[must_use]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Converts to a float fraction, e.g. 1 000 bp → `0.1`.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(BPS_PER_UNIT)
    }

    /// Returns `100% − self`, saturating at zero. For gamma this is the fee.
    pub const fn complement(&self) -> Self {
        Self(BPS_PER_UNIT.saturating_sub(self.0))
    }

    /// Computes `amount × self / 10 000` in the integer domain.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`](crate::error::RmmError::Overflow) if
    /// the result exceeds `u128`.
    pub fn apply(&self, amount: &FixedDecimal, rounding: Rounding) -> Result<FixedDecimal> {
        let raw = mul_div(
            amount.raw(),
            u128::from(self.0),
            u128::from(BPS_PER_UNIT),
            rounding,
        )?;
        Ok(FixedDecimal::from_raw(raw, amount.decimals()))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
