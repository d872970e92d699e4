//! Liquidity trait extending [`SwapCurve`].
//!
//! [`LiquidityCurve`] adds proportional allocate/remove quoting and pool
//! valuation on top of the swap surface.
//!
//! # Proportionality Invariant
//!
//! Allocating or removing liquidity never moves the price: every quote
//! preserves `risky : stable : liquidity`.
//!
//! ```text
//! Δother     = reserve_other × Δknown / reserve_known
//! Δliquidity = liquidity     × Δknown / reserve_known
//! ```

use super::SwapCurve;
use crate::domain::{FixedDecimal, LiquidityQuote, LiquidityValue, PoolSide, ReferencePrices};
use crate::error::Result;

/// Trait for engines that quote liquidity provision and value LP shares.
///
/// # Errors
///
/// - `DecimalMismatch` — the amount is not at the keyed side's width
/// - `DivisionByZero` — the keyed reserve (or liquidity) is zero
/// - `Overflow` — an intermediate does not fit the 128-bit magnitude
pub trait LiquidityCurve: SwapCurve {
    /// Total liquidity, at 18 decimals.
    fn total_liquidity(&self) -> FixedDecimal;

    /// Amounts that accompany `amount` of `side` in an allocate or remove.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn quote_liquidity(&self, amount: FixedDecimal, side: PoolSide) -> Result<LiquidityQuote>;

    /// Reserves marked at external prices.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn value_at(&self, prices: &ReferencePrices) -> Result<LiquidityValue>;

    /// Covered-call value `S − C` per liquidity, and in total.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrice` for a zero price of risky.
    fn theoretical_value(&self, price_of_risky: FixedDecimal) -> Result<LiquidityValue>;
}
