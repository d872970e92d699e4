//! Top-level curve configuration enum.
//!
//! [`CurveConfig`] is the declarative blueprint for creating an engine.
//! Each variant describes one way of seeding the curve's state.
//!
//! # Factory Integration
//!
//! The factory matches on `CurveConfig` to dispatch construction:
//!
//! ```text
//! match config {
//!     CurveConfig::Reserves(cfg)       => CurveEngine::from_config(cfg),
//!     CurveConfig::ReferencePrice(cfg) => CurveEngine::from_config(cfg),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{CalibrationConfig, PoolSnapshot, ReferencePriceConfig, ReservesConfig};
use crate::error::Result;

/// Configuration enum for every supported way to build an engine.
///
/// # Variants
///
/// - [`Reserves`](CurveConfig::Reserves) — live on-chain reserves
/// - [`ReferencePrice`](CurveConfig::ReferencePrice) — a new curve seeded at a price
///
/// # Validation
///
/// Call [`validate()`](CurveConfig::validate) to check all configuration
/// invariants before constructing an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveConfig {
    /// Engine over existing reserves.
    Reserves(ReservesConfig),
    /// Engine seeded from a reference price with zero invariant.
    ReferencePrice(ReferencePriceConfig),
}

impl CurveConfig {
    /// Validates the inner configuration by delegating to the
    /// variant-specific `validate()` method.
    ///
    /// # Errors
    ///
    /// Returns the same error the inner config's `validate()` would.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Reserves(cfg) => cfg.validate(),
            Self::ReferencePrice(cfg) => cfg.validate(),
        }
    }

    /// Returns the calibration blueprint shared by both variants.
    #[must_use]
    pub const fn calibration(&self) -> &CalibrationConfig {
        match self {
            Self::Reserves(cfg) => cfg.calibration(),
            Self::ReferencePrice(cfg) => cfg.calibration(),
        }
    }

    /// Returns `true` if this is a [`Reserves`](Self::Reserves) variant.
    #[must_use]
    pub const fn is_reserves(&self) -> bool {
        matches!(self, Self::Reserves(_))
    }

    /// Returns `true` if this is a [`ReferencePrice`](Self::ReferencePrice) variant.
    #[must_use]
    pub const fn is_reference_price(&self) -> bool {
        matches!(self, Self::ReferencePrice(_))
    }
}

impl From<PoolSnapshot> for CurveConfig {
    fn from(snapshot: PoolSnapshot) -> Self {
        Self::Reserves(snapshot.reserves().clone())
    }
}

impl core::fmt::Display for CurveConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Reserves(_) => write!(f, "Reserves"),
            Self::ReferencePrice(_) => write!(f, "ReferencePrice"),
        }
    }
}
