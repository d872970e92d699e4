//! Core trait abstractions for curve engines.
//!
//! This module defines the seams every engine satisfies: [`SwapCurve`]
//! for trading, [`LiquidityCurve`] for LP quoting and valuation,
//! [`FromConfig`] for configuration-driven construction, and
//! [`InvariantMonitor`] for regression diagnostics.

mod from_config;
mod invariant_monitor;
mod liquidity_curve;
mod swap_curve;

pub use from_config::FromConfig;
pub use invariant_monitor::{InvariantMonitor, RegressionEvent};
pub use liquidity_curve::LiquidityCurve;
pub use swap_curve::SwapCurve;
