//! Mutable curve state and speculative swap previews.

use core::fmt;

use crate::domain::{FixedDecimal, Invariant, SwapOutcome};

/// Reserves, liquidity and last computed invariant of one pool.
///
/// Reserves carry their token's decimals; liquidity carries 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurveState {
    reserve_risky: FixedDecimal,
    reserve_stable: FixedDecimal,
    liquidity: FixedDecimal,
    invariant: Invariant,
}

impl CurveState {
    /// Bundles a state. Decimal widths are checked by the engine.
    pub const fn new(
        reserve_risky: FixedDecimal,
        reserve_stable: FixedDecimal,
        liquidity: FixedDecimal,
        invariant: Invariant,
    ) -> Self {
        Self {
            reserve_risky,
            reserve_stable,
            liquidity,
            invariant,
        }
    }

    /// Risky reserve.
    pub const fn reserve_risky(&self) -> FixedDecimal {
        self.reserve_risky
    }

    /// Stable reserve.
    pub const fn reserve_stable(&self) -> FixedDecimal {
        self.reserve_stable
    }

    /// Total liquidity.
    pub const fn liquidity(&self) -> FixedDecimal {
        self.liquidity
    }

    /// Last computed invariant.
    #[must_use]
    pub const fn invariant(&self) -> Invariant {
        self.invariant
    }

    pub(crate) fn set_invariant(&mut self, invariant: Invariant) {
        self.invariant = invariant;
    }
}

impl fmt::Display for CurveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurveState(risky={}, stable={}, liquidity={}, invariant={})",
            self.reserve_risky, self.reserve_stable, self.liquidity, self.invariant
        )
    }
}

/// A non-committed swap: its outcome and the state it would leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPreview {
    outcome: SwapOutcome,
    state: CurveState,
}

impl SwapPreview {
    pub(crate) const fn new(outcome: SwapOutcome, state: CurveState) -> Self {
        Self { outcome, state }
    }

    /// The simulated outcome.
    #[must_use]
    pub const fn outcome(&self) -> &SwapOutcome {
        &self.outcome
    }

    /// The speculative next state.
    #[must_use]
    pub const fn state(&self) -> &CurveState {
        &self.state
    }

    /// Splits into outcome and state.
    #[must_use]
    pub const fn into_parts(self) -> (SwapOutcome, CurveState) {
        (self.outcome, self.state)
    }
}
