//! Swap trait for trading-curve engines.
//!
//! [`SwapCurve`] is the trading surface of an engine. It covers the full
//! lifecycle of an exact-input trade:
//!
//! 1. **Preview** — [`SwapCurve::preview_exact_in`] simulates the trade
//!    without touching state.
//! 2. **Execute** — [`SwapCurve::swap_exact_in`] simulates and commits.
//! 3. **Quote** — [`SwapCurve::spot_price`] and
//!    [`SwapCurve::marginal_price_after`] read prices off the curve.
//!
//! # Fee Invariant
//!
//! Fees are charged on the input *before* the curve is solved, and the
//! full input is credited to the reserve afterwards:
//!
//! ```text
//! effective_in = amount_in × gamma
//! new_same     = same + effective_in           (solve the curve here)
//! amount_out   = opposite − solve(new_same)
//! commit       : same += amount_in, opposite −= amount_out
//! ```
//!
//! # Infeasible Trades
//!
//! A trade that would empty a side, or any non-positive input, yields the
//! zero [`SwapOutcome`] rather than an error.

use crate::domain::{FixedDecimal, SwapDirection, SwapOutcome};
use crate::error::Result;

/// Trait for engines that simulate exact-input swaps.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, RmmError>`](crate::error::RmmError).
/// Common variants:
///
/// - `DecimalMismatch` — the input is not at the paying token's width
/// - `Overflow` — an intermediate does not fit the 128-bit magnitude
/// - `InvariantRegression` — only under a strict invariant policy
pub trait SwapCurve {
    /// Simulates an exact-input swap and commits the resulting reserves.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn swap_exact_in(
        &mut self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapOutcome>;

    /// Simulates an exact-input swap without committing.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn preview_exact_in(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapOutcome>;

    /// Reported price of risky in stable, at 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the price does not fit an 18-decimal value.
    fn spot_price(&self) -> Result<FixedDecimal>;

    /// Marginal price after a hypothetical swap of `amount_in`, at 18
    /// decimals. Zero for a non-positive input.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn marginal_price_after(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<FixedDecimal>;
}
