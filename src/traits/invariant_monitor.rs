//! Observer hook for invariant regressions.
//!
//! A swap should never lower the trading-function value: the fee stays in
//! the pool, so the post-trade invariant is at least the pre-trade one.
//! Truncation or a numerically awkward region of the curve can still make
//! a preview come out marginally below. Those cases are reported as
//! structured [`RegressionEvent`]s to whatever [`InvariantMonitor`] the
//! engine carries, instead of being printed or silently dropped.
//!
//! Whether a regression also aborts the swap is decided separately by the
//! engine's [`InvariantPolicy`](crate::engine::InvariantPolicy).

use core::fmt::Debug;

use crate::domain::{FixedDecimal, Invariant, PoolId, SwapDirection};

/// One observed invariant regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegressionEvent {
    /// Pool the swap ran against.
    pub pool_id: PoolId,
    /// Trade direction.
    pub direction: SwapDirection,
    /// Input amount of the offending swap.
    pub amount_in: FixedDecimal,
    /// Invariant before the swap.
    pub last: Invariant,
    /// Invariant after the swap.
    pub next: Invariant,
    /// `true` if the swap was a non-committing preview.
    pub is_virtual: bool,
}

impl RegressionEvent {
    /// `last − next`, always positive for a real regression.
    #[must_use]
    pub fn shortfall(&self) -> Invariant {
        self.last - self.next
    }
}

/// Receives invariant-regression events from an engine.
///
/// Implementations must be cheap and must not panic; they run inline on
/// the swap path.
///
/// # Implementors
///
/// - [`TracingMonitor`](crate::engine::TracingMonitor) — `warn!` event (default)
/// - [`NoopMonitor`](crate::engine::NoopMonitor) — discards events
/// - [`RecordingMonitor`](crate::engine::RecordingMonitor) — keeps events for inspection
pub trait InvariantMonitor: Debug + Send + Sync {
    /// Called once per regressing swap, before the policy is applied.
    fn on_regression(&self, event: &RegressionEvent);
}
