//! Generic construction trait for building engines from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating engines from
//! their configuration structs. The engine implements `FromConfig<C>` for
//! each config variant, enabling the factory to dispatch construction
//! without `dyn` trait objects.
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction. A successfully constructed engine is in a valid initial
//! state:
//!
//! - Risky and stable have two distinct addresses
//! - Calibration is within its on-chain bounds
//! - Reserves carry their token's decimals; liquidity is non-zero
//!
//! # Factory Integration
//!
//! The [`DefaultEngineFactory`](crate::factory::DefaultEngineFactory) uses
//! `FromConfig` to construct engines from
//! [`CurveConfig`](crate::config::CurveConfig) variants:
//!
//! ```text
//! CurveConfig::Reserves(cfg)       => CurveEngine::from_config(&cfg)
//! CurveConfig::ReferencePrice(cfg) => CurveEngine::from_config(&cfg)
//! ```

use crate::error::RmmError;

/// Construction from a configuration struct.
///
/// # Type Parameters
///
/// - `C` — the configuration type that fully describes the engine's
///   calibration and initial state.
///
/// # Implementors
///
/// - `impl FromConfig<ReservesConfig> for CurveEngine`
/// - `impl FromConfig<ReferencePriceConfig> for CurveEngine`
/// - `impl FromConfig<CurveConfig> for CurveEngine`
pub trait FromConfig<C> {
    /// Creates a new engine from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidConfiguration`] if an amount is malformed.
    /// - [`RmmError::InvalidCalibration`] if a parameter is out of range.
    /// - [`RmmError::InvalidToken`] if the token pair is invalid.
    fn from_config(config: &C) -> Result<Self, RmmError>
    where
        Self: Sized;
}
