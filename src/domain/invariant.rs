//! Signed 64.64 fixed-point trading-function value.

use core::fmt;
use core::ops::Sub;

use serde::{Deserialize, Serialize};

/// `2^64` as a float.
const ONE_X64: f64 = 18_446_744_073_709_551_616.0;

/// The trading-function value `y − stable_given_risky(x)` in the contract's
/// signed 64.64 representation (`raw = trunc(value × 2^64)`).
///
/// Ordering is by raw value, so comparisons agree with the contract's
/// `int128` checks.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::Invariant;
///
/// let k = Invariant::from_f64(-0.5);
/// assert_eq!(k.raw(), -(1i128 << 63));
/// assert!(k < Invariant::ZERO);
/// assert_eq!(Invariant::from_f64(f64::NAN), Invariant::ZERO);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Invariant(i128);

impl Invariant {
    /// The invariant of a pool constructed from a reference price.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw 64.64 value.
    #[must_use]
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// Converts a float, truncating toward zero. NaN and infinities map to
    /// zero; out-of-range finite values saturate.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        // float-to-int `as` truncates toward zero and saturates
        #[allow(clippy::cast_possible_truncation)]
        Self((value * ONE_X64) as i128)
    }

    /// Returns the raw 64.64 value.
    #[must_use]
    pub const fn raw(&self) -> i128 {
        self.0
    }

    /// Converts back to `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let v = self.0 as f64;
        v / ONE_X64
    }
}

impl Sub for Invariant {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
