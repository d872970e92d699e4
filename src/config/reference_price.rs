//! Configuration for an engine seeded from a reference price.

use serde::{Deserialize, Serialize};

use super::CalibrationConfig;
use crate::domain::{Calibration, FixedDecimal, LIQUIDITY_DECIMALS};
use crate::error::{Result, RmmError};

/// Calibration plus the price of risky (in stable) the curve is seeded at.
///
/// Unlike [`ReservesConfig`](super::ReservesConfig), amounts here are
/// human-readable decimal strings (`"10.5"`), since they are typed by a
/// person planning a new pool rather than read from chain state.
///
/// # Derived Values
///
/// - Risky per liquidity: `x = 1 − Δ_call(S)`
/// - Stable per liquidity: `y = K·Φ(Φ⁻¹(1 − x) − σ√τ)`
/// - Initial invariant: zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePriceConfig {
    calibration: CalibrationConfig,
    reference_price: String,
    liquidity: String,
}

impl ReferencePriceConfig {
    /// Creates a config from typed values.
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidPrice`] if the price is zero.
    /// - [`RmmError::InvalidConfiguration`] if liquidity is zero.
    pub fn new(
        calibration: &Calibration,
        reference_price: FixedDecimal,
        liquidity: FixedDecimal,
    ) -> Result<Self> {
        let config = Self {
            calibration: CalibrationConfig::from(calibration),
            reference_price: reference_price.to_string(),
            liquidity: liquidity.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first calibration, price or liquidity error found.
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        if self.reference_price()?.is_zero() {
            return Err(RmmError::InvalidPrice("reference price must be positive"));
        }
        if self.liquidity()?.is_zero() {
            return Err(RmmError::InvalidConfiguration("liquidity must be non-zero"));
        }
        Ok(())
    }

    /// Returns the calibration blueprint.
    #[must_use]
    pub const fn calibration(&self) -> &CalibrationConfig {
        &self.calibration
    }

    /// Price of one risky token in stable, at 18 decimals.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedDecimal::parse`] errors.
    pub fn reference_price(&self) -> Result<FixedDecimal> {
        FixedDecimal::parse(&self.reference_price, LIQUIDITY_DECIMALS)
    }

    /// Liquidity to seed, at 18 decimals.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedDecimal::parse`] errors.
    pub fn liquidity(&self) -> Result<FixedDecimal> {
        FixedDecimal::parse(&self.liquidity, LIQUIDITY_DECIMALS)
    }
}
