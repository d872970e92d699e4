//! Built-in invariant monitors and the regression policy.

use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::traits::{InvariantMonitor, RegressionEvent};

/// What the engine does when a swap lowers the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InvariantPolicy {
    /// Report through the monitor and return the outcome anyway.
    #[default]
    Advisory,
    /// Report, then fail with
    /// [`RmmError::InvariantRegression`](crate::error::RmmError::InvariantRegression)
    /// without committing.
    Strict,
}

/// Emits a `warn!` event per regression. The engine default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitor;

impl InvariantMonitor for TracingMonitor {
    fn on_regression(&self, event: &RegressionEvent) {
        warn!(
            pool_id = %event.pool_id,
            direction = %event.direction,
            amount_in = %event.amount_in,
            last = %event.last,
            next = %event.next,
            shortfall = %event.shortfall(),
            is_virtual = event.is_virtual,
            "invariant regressed during swap"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl InvariantMonitor for NoopMonitor {
    fn on_regression(&self, _event: &RegressionEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingMonitor {
    events: Mutex<Vec<RegressionEvent>>,
}

impl RecordingMonitor {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RegressionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InvariantMonitor for RecordingMonitor {
    fn on_regression(&self, event: &RegressionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
    }
}
