//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use rmm_engine::prelude::*;
//! ```

// Domain types
pub use crate::domain::{
    Calibration, Decimals, EngineIdentity, FixedDecimal, Invariant, LiquidityQuote,
    LiquidityValue, Percentage, PoolId, PoolSide, PoolStatus, ReferencePrices, Rounding,
    SwapDirection, SwapOutcome, Timestamp, Token, SECONDS_PER_YEAR,
};

// Core traits
pub use crate::traits::{FromConfig, InvariantMonitor, LiquidityCurve, SwapCurve};

// Pricing
pub use crate::pricing::{CurveParams, PricingModel, StandardPricing};

// Engine and quoting
pub use crate::engine::{CurveEngine, CurveState, InvariantPolicy, SwapPreview};
pub use crate::quote::QuoteBuilder;

// Configuration, factory and registry
pub use crate::config::{CurveConfig, PoolSnapshot};
pub use crate::factory::DefaultEngineFactory;
pub use crate::registry::PoolRegistry;

// Error types
pub use crate::error::{Result, RmmError};
