//! Outcome of a simulated swap.

use core::fmt;

use super::{Decimals, FixedDecimal, Invariant, SwapDirection, LIQUIDITY_DECIMALS};

/// Result of an exact-input swap against the curve.
///
/// An infeasible or non-positive trade is reported as the
/// [`zero`](Self::zero) outcome rather than an error.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::{Decimals, SwapDirection, SwapOutcome};
///
/// let d6 = Decimals::new(6).expect("valid");
/// let out = SwapOutcome::zero(SwapDirection::StableIn, d6, Decimals::MAX);
/// assert!(out.is_zero());
/// assert!(out.effective_price().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOutcome {
    direction: SwapDirection,
    amount_in: FixedDecimal,
    amount_out: FixedDecimal,
    fee: FixedDecimal,
    invariant_last: Invariant,
    invariant_next: Invariant,
    effective_price: FixedDecimal,
    price_after: FixedDecimal,
}

impl SwapOutcome {
    /// Assembles an outcome. `effective_price` is derived as
    /// `amount_out / amount_in` at 18 decimals.
    pub fn new(
        direction: SwapDirection,
        amount_in: FixedDecimal,
        amount_out: FixedDecimal,
        fee: FixedDecimal,
        invariant_last: Invariant,
        invariant_next: Invariant,
        price_after: FixedDecimal,
    ) -> Self {
        let effective_price = amount_out.ratio_or_infinity(&amount_in, LIQUIDITY_DECIMALS);
        Self {
            direction,
            amount_in,
            amount_out,
            fee,
            invariant_last,
            invariant_next,
            effective_price,
            price_after,
        }
    }

    /// The empty outcome: nothing in, nothing out.
    pub const fn zero(direction: SwapDirection, in_decimals: Decimals, out_decimals: Decimals) -> Self {
        Self {
            direction,
            amount_in: FixedDecimal::zero(in_decimals),
            amount_out: FixedDecimal::zero(out_decimals),
            fee: FixedDecimal::zero(in_decimals),
            invariant_last: Invariant::ZERO,
            invariant_next: Invariant::ZERO,
            effective_price: FixedDecimal::zero(LIQUIDITY_DECIMALS),
            price_after: FixedDecimal::zero(LIQUIDITY_DECIMALS),
        }
    }

    /// Returns the trade direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the amount paid in, fee included.
    pub const fn amount_in(&self) -> FixedDecimal {
        self.amount_in
    }

    /// Returns the amount paid out.
    pub const fn amount_out(&self) -> FixedDecimal {
        self.amount_out
    }

    /// Returns the part of `amount_in` retained as fee.
    pub const fn fee(&self) -> FixedDecimal {
        self.fee
    }

    /// Returns the invariant before the trade.
    #[must_use]
    pub const fn invariant_last(&self) -> Invariant {
        self.invariant_last
    }

    /// Returns the invariant after the trade.
    #[must_use]
    pub const fn invariant_next(&self) -> Invariant {
        self.invariant_next
    }

    /// Returns `amount_out / amount_in` at 18 decimals.
    pub const fn effective_price(&self) -> FixedDecimal {
        self.effective_price
    }

    /// Returns the reported price of risky after the trade.
    pub const fn price_after(&self) -> FixedDecimal {
        self.price_after
    }

    /// Returns `true` if nothing was traded.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_out.is_zero()
    }

    /// Returns `true` if the trade did not lower the invariant.
    #[must_use]
    pub fn invariant_held(&self) -> bool {
        self.invariant_next >= self.invariant_last
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapOutcome({}, in={}, out={}, fee={}, price={})",
            self.direction, self.amount_in, self.amount_out, self.fee, self.effective_price
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn d(v: u8) -> Decimals {
        let Ok(d) = Decimals::new(v) else {
            panic!("valid decimals");
        };
        d
    }

    #[test]
    fn effective_price_independent_of_widths() {
        // 0.3 risky (18 dec) -> 2.7 stable (6 dec) = 9 stable per risky
        let outcome = SwapOutcome::new(
            SwapDirection::RiskyIn,
            FixedDecimal::from_raw(300_000_000_000_000_000, d(18)),
            FixedDecimal::from_raw(2_700_000, d(6)),
            FixedDecimal::from_raw(3_000_000_000_000_000, d(18)),
            Invariant::ZERO,
            Invariant::from_raw(1),
            FixedDecimal::zero(LIQUIDITY_DECIMALS),
        );
        assert_eq!(outcome.effective_price().raw(), 9_000_000_000_000_000_000);
        assert!(outcome.invariant_held());
        assert!(!outcome.is_zero());
    }

    #[test]
    fn zero_outcome_widths() {
        let z = SwapOutcome::zero(SwapDirection::RiskyIn, d(18), d(6));
        assert_eq!(z.amount_in().decimals(), d(18));
        assert_eq!(z.amount_out().decimals(), d(6));
        assert_eq!(z.fee().decimals(), d(18));
        assert!(z.is_zero());
        assert!(z.invariant_held());
    }

    #[test]
    fn display_mentions_direction() {
        let z = SwapOutcome::zero(SwapDirection::StableIn, d(6), d(18));
        assert!(z.to_string().starts_with("SwapOutcome(StableIn"));
    }
}
