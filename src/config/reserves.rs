//! Configuration for an engine built from live reserves.

use serde::{Deserialize, Serialize};

use super::calibration::parse_raw;
use super::CalibrationConfig;
use crate::domain::{Calibration, FixedDecimal, LIQUIDITY_DECIMALS};
use crate::error::{Result, RmmError};

/// Calibration plus the pool's on-chain reserves and total liquidity.
///
/// Amounts are raw base-unit integer strings: reserves at their token's
/// decimals, liquidity at 18 decimals.
///
/// # Validation
///
/// - The calibration builds.
/// - All three amounts parse; liquidity is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservesConfig {
    calibration: CalibrationConfig,
    reserve_risky: String,
    reserve_stable: String,
    liquidity: String,
}

impl ReservesConfig {
    /// Creates a config from typed values.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DecimalMismatch`] if an amount is not at its side's width.
    /// - [`RmmError::InvalidConfiguration`] if liquidity is zero.
    pub fn new(
        calibration: &Calibration,
        reserve_risky: FixedDecimal,
        reserve_stable: FixedDecimal,
        liquidity: FixedDecimal,
    ) -> Result<Self> {
        reserve_risky.ensure_decimals(calibration.risky().decimals())?;
        reserve_stable.ensure_decimals(calibration.stable().decimals())?;
        liquidity.ensure_decimals(LIQUIDITY_DECIMALS)?;
        let config = Self {
            calibration: CalibrationConfig::from(calibration),
            reserve_risky: reserve_risky.raw().to_string(),
            reserve_stable: reserve_stable.raw().to_string(),
            liquidity: liquidity.raw().to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first calibration or amount error found.
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        let _ = self.reserve_risky()?;
        let _ = self.reserve_stable()?;
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

    /// Risky reserve at risky decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidConfiguration`] if the string is malformed.
    pub fn reserve_risky(&self) -> Result<FixedDecimal> {
        let raw = parse_raw(
            &self.reserve_risky,
            "reserve_risky must be a base-unit integer string",
        )?;
        Ok(self.calibration.risky().raw_amount(raw))
    }

    /// Stable reserve at stable decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidConfiguration`] if the string is malformed.
    pub fn reserve_stable(&self) -> Result<FixedDecimal> {
        let raw = parse_raw(
            &self.reserve_stable,
            "reserve_stable must be a base-unit integer string",
        )?;
        Ok(self.calibration.stable().raw_amount(raw))
    }

    /// Total liquidity at 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidConfiguration`] if the string is malformed.
    pub fn liquidity(&self) -> Result<FixedDecimal> {
        let raw = parse_raw(&self.liquidity, "liquidity must be a base-unit integer string")?;
        Ok(FixedDecimal::from_raw(raw, LIQUIDITY_DECIMALS))
    }
}
