//! Scaled-integer decimal with on-chain truncation semantics.

use core::cmp::Ordering;
use core::fmt;

use alloy_primitives::U256;

use super::{Decimals, Rounding};
use crate::error::{Result, RmmError};
use crate::math::{mul_div, narrow, pow10, wide_div};

/// Width of liquidity shares and prices.
pub const LIQUIDITY_DECIMALS: Decimals = Decimals::MAX;

/// A non-negative decimal `raw / 10^decimals` with an explicit width.
///
/// Every operation is carried out in the integer domain with a 256-bit
/// intermediate and truncated back to the target width, so two
/// implementations fed the same inputs produce the same `raw` bits as the
/// contract's integer math. Nothing rounds half-up.
///
/// `raw == u128::MAX` is reserved as the [`infinity`](Self::infinity)
/// sentinel for ratios whose denominator degenerated to zero.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::{Decimals, FixedDecimal};
///
/// let d6 = Decimals::new(6).expect("valid");
/// let a = FixedDecimal::from_f64(0.3, d6).expect("positive");
/// assert_eq!(a.raw(), 300_000);
///
/// let third = FixedDecimal::parse("1", d6).expect("valid").div(3).expect("non-zero");
/// assert_eq!(third.to_string(), "0.333333");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct FixedDecimal {
    raw: u128,
    decimals: Decimals,
}

#[allow(clippy::should_implement_trait)]
impl FixedDecimal {
    /// Wraps a raw base-unit magnitude.
    pub const fn from_raw(raw: u128, decimals: Decimals) -> Self {
        Self { raw, decimals }
    }

    /// Zero at the given width.
    pub const fn zero(decimals: Decimals) -> Self {
        Self { raw: 0, decimals }
    }

    /// The saturating sentinel for an unbounded ratio.
    pub const fn infinity(decimals: Decimals) -> Self {
        Self {
            raw: u128::MAX,
            decimals,
        }
    }

    /// Builds a value from a float, truncating to `decimals`.
    ///
    /// The float is rendered with its shortest round-trip decimal form
    /// first, so `0.3` becomes exactly `0.3` rather than
    /// `0.299999999999999988…`.
    ///
    /// # Errors
    ///
    /// - [`RmmError::NumericalDomain`] for NaN or infinite input.
    /// - [`RmmError::NegativeAmount`] for negative input.
    /// - [`RmmError::Overflow`] if the scaled value exceeds `u128`.
    pub fn from_f64(value: f64, decimals: Decimals) -> Result<Self> {
        if !value.is_finite() {
            return Err(RmmError::NumericalDomain("amount must be finite"));
        }
        if value < 0.0 {
            return Err(RmmError::NegativeAmount);
        }
        // f64 Display never uses exponent notation; abs() folds -0.0 into 0.0
        Self::parse(&value.abs().to_string(), decimals)
    }

    /// Parses a decimal string such as `"12.5"`, truncating extra digits.
    ///
    /// # Errors
    ///
    /// - [`RmmError::NegativeAmount`] if the text starts with `-`.
    /// - [`RmmError::InvalidAmount`] if the text is not a plain decimal.
    /// - [`RmmError::Overflow`] if the scaled value exceeds `u128`.
    pub fn parse(text: &str, decimals: Decimals) -> Result<Self> {
        let text = text.trim();
        if text.starts_with('-') {
            return Err(RmmError::NegativeAmount);
        }
        let text = text.strip_prefix('+').unwrap_or(text);
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(RmmError::InvalidAmount("empty decimal string"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(RmmError::InvalidAmount("expected only digits and one '.'"));
        }

        let overflow = RmmError::Overflow("decimal string exceeds u128");
        let mut whole: u128 = 0;
        for b in int_part.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(b - b'0')))
                .ok_or(overflow.clone())?;
        }

        let mut frac: u128 = 0;
        let mut digits = frac_part.bytes();
        for _ in 0..decimals.get() {
            let digit = digits.next().map_or(0, |b| b - b'0');
            frac = frac * 10 + u128::from(digit);
        }

        let raw = whole
            .checked_mul(decimals.factor())
            .and_then(|v| v.checked_add(frac))
            .ok_or(overflow)?;
        Ok(Self { raw, decimals })
    }

    /// Returns the raw base-unit magnitude.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.raw
    }

    /// Returns the decimal width.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Returns `true` for the [`infinity`](Self::infinity) sentinel.
    #[must_use]
    pub const fn is_infinity(&self) -> bool {
        self.raw == u128::MAX
    }

    /// Fails unless this value carries `expected` decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DecimalMismatch`] on a width mismatch.
    pub const fn ensure_decimals(&self, expected: Decimals) -> Result<()> {
        self.decimals.ensure(expected)
    }

    /// Converts to `f64` for the pricing collaborator.
    ///
    /// The exact decimal string is parsed, so the result is the float
    /// nearest to the true value. The infinity sentinel maps to
    /// [`f64::INFINITY`].
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_infinity() {
            return f64::INFINITY;
        }
        #[allow(clippy::cast_precision_loss)]
        let fallback = self.raw as f64 / self.decimals.factor() as f64;
        self.to_string().parse().unwrap_or(fallback)
    }

    /// Re-expresses the value at another width, truncating when narrowing.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if widening overflows `u128`.
    pub fn rescale(&self, decimals: Decimals) -> Result<Self> {
        let (from, to) = (u32::from(self.decimals.get()), u32::from(decimals.get()));
        let raw = if to >= from {
            let scaled = U256::from(self.raw) * pow10(to - from)?;
            narrow(scaled, "rescale exceeds u128")?
        } else {
            self.raw / 10u128.pow(from - to)
        };
        Ok(Self { raw, decimals })
    }

    /// Sums two values, truncating to `self`'s width.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if the sum exceeds `u128`.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let (a, b, wide) = self.aligned(other)?;
        self.truncate_from(a + b, wide, "addition exceeds u128")
    }

    /// Subtracts `other`, truncating to `self`'s width.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::NegativeAmount`] if `other > self`.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        let (a, b, wide) = self.aligned(other)?;
        if b > a {
            return Err(RmmError::NegativeAmount);
        }
        self.truncate_from(a - b, wide, "subtraction exceeds u128")
    }

    /// Multiplies by an integer scalar.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if the product exceeds `u128`.
    pub fn mul(&self, scalar: u128) -> Result<Self> {
        self.mul_div(scalar, 1)
    }

    /// Computes `self × numerator / denominator`, floor-truncated.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`RmmError::Overflow`] if the result exceeds `u128`.
    pub fn mul_div(&self, numerator: u128, denominator: u128) -> Result<Self> {
        let raw = mul_div(self.raw, numerator, denominator, Rounding::Down)?;
        Ok(Self { raw, ..*self })
    }

    /// Divides by an integer scalar, floor-truncated.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DivisionByZero`] if `scalar` is zero.
    pub fn div(&self, scalar: u128) -> Result<Self> {
        self.mul_div(1, scalar)
    }

    /// Divides by an integer scalar, rounding up.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DivisionByZero`] if `scalar` is zero.
    pub fn div_ceil(&self, scalar: u128) -> Result<Self> {
        let raw = mul_div(self.raw, 1, scalar, Rounding::Up)?;
        Ok(Self { raw, ..*self })
    }

    /// Multiplies two decimals and truncates the product to `decimals`.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if the result exceeds `u128`.
    pub fn mul_fixed(&self, other: &Self, decimals: Decimals) -> Result<Self> {
        let product = U256::from(self.raw) * U256::from(other.raw);
        let source = u32::from(self.decimals.get()) + u32::from(other.decimals.get());
        let target = u32::from(decimals.get());
        let scaled = if target >= source {
            product
                .checked_mul(pow10(target - source)?)
                .ok_or(RmmError::Overflow("product exceeds 256 bits"))?
        } else {
            product / pow10(source - target)?
        };
        Ok(Self {
            raw: narrow(scaled, "product exceeds u128")?,
            decimals,
        })
    }

    /// Divides by another decimal and truncates the quotient to `decimals`.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DivisionByZero`] if `other` is zero.
    /// - [`RmmError::Overflow`] if the result exceeds `u128`.
    pub fn div_fixed(&self, other: &Self, decimals: Decimals) -> Result<Self> {
        let numerator_exp = u32::from(decimals.get()) + u32::from(other.decimals.get());
        let numerator = U256::from(self.raw) * pow10(numerator_exp)?;
        let denominator = U256::from(other.raw) * pow10(u32::from(self.decimals.get()))?;
        let quotient = wide_div(numerator, denominator, Rounding::Down)?;
        Ok(Self {
            raw: narrow(quotient, "quotient exceeds u128")?,
            decimals,
        })
    }

    /// Like [`div_fixed`](Self::div_fixed) but returns the infinity sentinel
    /// when `other` is zero, and saturates instead of overflowing.
    pub fn ratio_or_infinity(&self, other: &Self, decimals: Decimals) -> Self {
        match self.div_fixed(other, decimals) {
            Ok(v) => v,
            Err(_) if other.is_zero() && self.is_zero() => Self::zero(decimals),
            Err(_) => Self::infinity(decimals),
        }
    }

    /// Compares the represented values, independent of width.
    #[must_use]
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match self.aligned(other) {
            Ok((a, b, _)) => a.cmp(&b),
            // aligned only fails past 10^77, which cannot happen for 0..=18
            Err(_) => Ordering::Equal,
        }
    }

    /// Both magnitudes scaled to the wider of the two widths.
    fn aligned(&self, other: &Self) -> Result<(U256, U256, u32)> {
        let da = u32::from(self.decimals.get());
        let db = u32::from(other.decimals.get());
        let wide = da.max(db);
        let a = U256::from(self.raw) * pow10(wide - da)?;
        let b = U256::from(other.raw) * pow10(wide - db)?;
        Ok((a, b, wide))
    }

    fn truncate_from(&self, value: U256, wide: u32, context: &'static str) -> Result<Self> {
        let shift = wide - u32::from(self.decimals.get());
        let raw = narrow(value / pow10(shift)?, context)?;
        Ok(Self { raw, ..*self })
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "inf");
        }
        let factor = self.decimals.factor();
        let whole = self.raw / factor;
        if self.decimals.get() == 0 {
            return write!(f, "{whole}");
        }
        let frac = self.raw % factor;
        let width = usize::from(self.decimals.get());
        write!(f, "{whole}.{frac:0width$}")
    }
}
