//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model an RMM-01 pool:
//! truncating decimals, tokens, calibration, pool identity, the
//! fixed-point invariant, and swap/liquidity readouts. All types use
//! newtypes with validated constructors to enforce invariants.

mod calibration;
mod decimals;
mod engine_identity;
mod fixed_decimal;
mod invariant;
mod liquidity_quote;
mod percentage;
mod pool_id;
mod rounding;
mod swap_direction;
mod swap_outcome;
mod timestamp;
mod token;
mod valuation;

pub use calibration::{
    Calibration, CalibrationField, PoolStatus, MAX_GAMMA_BPS, MAX_SIGMA_BPS, MIN_GAMMA_BPS,
    MIN_SIGMA_BPS,
};
pub use decimals::Decimals;
pub use engine_identity::EngineIdentity;
pub use fixed_decimal::{FixedDecimal, LIQUIDITY_DECIMALS};
pub use invariant::Invariant;
pub use liquidity_quote::LiquidityQuote;
pub use percentage::{Percentage, BPS_PER_UNIT};
pub use pool_id::{packed_preimage, PoolId, POOL_ID_PREIMAGE_LEN};
pub use rounding::Rounding;
pub use swap_direction::{PoolSide, SwapDirection};
pub use swap_outcome::SwapOutcome;
pub use timestamp::{Timestamp, SECONDS_PER_YEAR};
pub use token::Token;
pub use valuation::{LiquidityValue, ReferencePrices};
