//! Proportional allocate/remove quotes.

use core::fmt;

use super::{FixedDecimal, PoolSide};

/// Amounts that move together when liquidity is allocated or removed.
///
/// All three legs keep the pool's `risky : stable : liquidity` ratio; the
/// leg the quote was keyed on is echoed back unchanged.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::{Decimals, FixedDecimal, LiquidityQuote, PoolSide};
///
/// let d6 = Decimals::new(6).expect("valid");
/// let q = LiquidityQuote::new(
///     PoolSide::Stable,
///     FixedDecimal::zero(Decimals::MAX),
///     FixedDecimal::zero(d6),
///     FixedDecimal::zero(Decimals::MAX),
/// );
/// assert!(q.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityQuote {
    keyed_on: PoolSide,
    delta_risky: FixedDecimal,
    delta_stable: FixedDecimal,
    delta_liquidity: FixedDecimal,
}

impl LiquidityQuote {
    /// Creates a quote.
    pub const fn new(
        keyed_on: PoolSide,
        delta_risky: FixedDecimal,
        delta_stable: FixedDecimal,
        delta_liquidity: FixedDecimal,
    ) -> Self {
        Self {
            keyed_on,
            delta_risky,
            delta_stable,
            delta_liquidity,
        }
    }

    /// Returns the side the caller supplied.
    #[must_use]
    pub const fn keyed_on(&self) -> PoolSide {
        self.keyed_on
    }

    /// Risky amount, at risky decimals.
    pub const fn delta_risky(&self) -> FixedDecimal {
        self.delta_risky
    }

    /// Stable amount, at stable decimals.
    pub const fn delta_stable(&self) -> FixedDecimal {
        self.delta_stable
    }

    /// Liquidity shares, at 18 decimals.
    pub const fn delta_liquidity(&self) -> FixedDecimal {
        self.delta_liquidity
    }

    /// Returns `true` if every leg is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delta_risky.is_zero() && self.delta_stable.is_zero() && self.delta_liquidity.is_zero()
    }
}

impl fmt::Display for LiquidityQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LiquidityQuote(by {}: risky={}, stable={}, liquidity={})",
            self.keyed_on, self.delta_risky, self.delta_stable, self.delta_liquidity
        )
    }
}
