//! Unified error types for the RMM engine.
//!
//! All fallible operations across the crate return [`RmmError`] as their
//! error type. Infeasible trades are *not* errors: swap previews report
//! them as a zero outcome so preview pipelines can treat "no trade
//! possible" as a normal result.

use thiserror::Error;

use crate::domain::{CalibrationField, Invariant, PoolId};

/// Every failure the engine can surface to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RmmError {
    /// A calibration parameter is out of its on-chain bounds.
    #[error("invalid calibration ({field}): {reason}")]
    InvalidCalibration {
        /// The offending field.
        field: CalibrationField,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A decimal width is outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A value does not carry the decimal width of the token it belongs to.
    #[error("decimal mismatch: expected {expected} decimals, got {actual}")]
    DecimalMismatch {
        /// Declared decimals of the token or side.
        expected: u8,
        /// Decimals carried by the supplied value.
        actual: u8,
    },

    /// Token identity is invalid (e.g. risky and stable share an address).
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// An amount could not be parsed or constructed.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A price input is non-positive or non-finite.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A configuration or snapshot is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A reserve, liquidity or amount would be negative.
    #[error("negative amount")]
    NegativeAmount,

    /// A scaled-arithmetic denominator is exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A result does not fit in the 128-bit magnitude.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A floating-point input is NaN or infinite where an amount is needed.
    #[error("numerical domain error: {0}")]
    NumericalDomain(&'static str),

    /// Post-swap invariant fell below the pre-swap invariant while the
    /// engine runs under [`InvariantPolicy::Strict`](crate::engine::InvariantPolicy::Strict).
    #[error("invariant regressed from {last} to {next}")]
    InvariantRegression {
        /// Invariant before the swap.
        last: Invariant,
        /// Invariant after the swap.
        next: Invariant,
    },

    /// No engine is registered under the requested pool id.
    #[error("pool not found: {0}")]
    PoolNotFound(PoolId),
}

/// Crate-wide result alias.
pub type Result<T, E = RmmError> = core::result::Result<T, E>;
