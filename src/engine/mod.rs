//! The RMM-01 curve engine and its invariant-monitoring policy.
//!
//! | Type | Role |
//! |------|------|
//! | [`CurveEngine`] | reserves, invariant, swaps, prices, liquidity quotes and values |
//! | [`CurveState`] | the mutable part of an engine, cloned for previews |
//! | [`SwapPreview`] | a non-committed swap and the state it would leave |
//! | [`InvariantPolicy`] | advisory or strict handling of invariant regressions |
//! | [`TracingMonitor`] / [`NoopMonitor`] / [`RecordingMonitor`] | built-in regression monitors |

mod curve_engine;
mod monitor;
mod state;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use curve_engine::CurveEngine;
pub use monitor::{InvariantPolicy, NoopMonitor, RecordingMonitor, TracingMonitor};
pub use state::{CurveState, SwapPreview};
