//! 256-bit intermediate arithmetic for truncating fixed-point operations.
//!
//! On-chain math multiplies two 128-bit magnitudes inside a 256-bit word
//! before dividing, so `a × b / c` never loses precision to an intermediate
//! overflow. These helpers reproduce that: widen to [`U256`], operate, then
//! narrow back with an explicit overflow check.
//!
//! # Examples
//!
//! ```
//! use rmm_engine::domain::Rounding;
//! use rmm_engine::math::mul_div;
//!
//! // u128::MAX * 3 / 3 would overflow in 128 bits.
//! assert_eq!(mul_div(u128::MAX, 3, 3, Rounding::Down), Ok(u128::MAX));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
//! ```

use alloy_primitives::U256;

use crate::domain::Rounding;
use crate::error::{Result, RmmError};

/// Computes `a × b / denominator` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`RmmError::DivisionByZero`] if `denominator` is zero.
/// - [`RmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    let quotient = wide_div(
        U256::from(a) * U256::from(b),
        U256::from(denominator),
        rounding,
    )?;
    narrow(quotient, "mul_div result exceeds u128")
}

/// Divides two wide values with explicit rounding.
///
/// # Errors
///
/// Returns [`RmmError::DivisionByZero`] if `denominator` is zero.
pub fn wide_div(numerator: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(RmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up => {
            if (numerator % denominator).is_zero() {
                Ok(quotient)
            } else {
                // quotient < numerator here, so +1 cannot wrap
                Ok(quotient + U256::from(1u8))
            }
        }
    }
}

/// Returns `10^exp` as a [`U256`].
///
/// # Errors
///
/// Returns [`RmmError::Overflow`] for exponents beyond 77.
pub fn pow10(exp: u32) -> Result<U256> {
    let ten = U256::from(10u8);
    let mut acc = U256::from(1u8);
    for _ in 0..exp {
        acc = acc
            .checked_mul(ten)
            .ok_or(RmmError::Overflow("power of ten exceeds 256 bits"))?;
    }
    Ok(acc)
}

/// Narrows a [`U256`] back to `u128`.
///
/// # Errors
///
/// Returns [`RmmError::Overflow`] with `context` if the value is too large.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    let limbs = value.as_limbs();
    if limbs[2] != 0 || limbs[3] != 0 {
        return Err(RmmError::Overflow(context));
    }
    Ok((u128::from(limbs[1]) << 64) | u128::from(limbs[0]))
}
