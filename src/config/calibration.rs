//! Serializable calibration blueprint.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::{Calibration, EngineIdentity, FixedDecimal, Percentage, Timestamp, Token};
use crate::error::{Result, RmmError};

/// Calibration as an indexer or JSON fixture describes it.
///
/// `strike` is a raw base-unit integer string at the stable token's
/// decimals (`"10000000"` is 10.0 for a 6-decimal stable), matching how
/// 128-bit on-chain integers are usually transported.
///
/// # Validation
///
/// [`build`](Self::build) applies every [`Calibration`] bound; a config
/// that builds once always builds.
///
/// # Examples
///
/// ```
/// use rmm_engine::config::CalibrationConfig;
///
/// let json = r#"{
///     "engine": "0x1111111111111111111111111111111111111111",
///     "risky":  { "address": "0x0000000000000000000000000000000000000001", "decimals": 18 },
///     "stable": { "address": "0x0000000000000000000000000000000000000002", "decimals": 6 },
///     "strike": "10000000",
///     "sigma": 1000,
///     "maturity": 1731556952,
///     "gamma": 9900,
///     "last_timestamp": 1700000000
/// }"#;
/// let cfg: CalibrationConfig = serde_json::from_str(json).expect("valid json");
/// let cal = cfg.build().expect("valid calibration");
/// assert_eq!(cal.strike().to_string(), "10.000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    engine: Address,
    risky: Token,
    stable: Token,
    strike: String,
    sigma: Percentage,
    maturity: Timestamp,
    gamma: Percentage,
    last_timestamp: Timestamp,
}

impl CalibrationConfig {
    /// Builds the validated [`Calibration`].
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidConfiguration`] if `strike` is not an integer.
    /// - [`RmmError::InvalidToken`] if both tokens share an address.
    /// - [`RmmError::InvalidCalibration`] for any out-of-bounds field.
    pub fn build(&self) -> Result<Calibration> {
        let engine = EngineIdentity::new(self.engine, self.risky, self.stable)?;
        let strike = FixedDecimal::from_raw(
            parse_raw(&self.strike, "strike must be a base-unit integer string")?,
            self.stable.decimals(),
        );
        Calibration::new(
            engine,
            strike,
            self.sigma,
            self.maturity,
            self.gamma,
            self.last_timestamp,
        )
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn validate(&self) -> Result<()> {
        self.build().map(|_| ())
    }

    /// Returns the risky token.
    #[must_use]
    pub const fn risky(&self) -> Token {
        self.risky
    }

    /// Returns the stable token.
    #[must_use]
    pub const fn stable(&self) -> Token {
        self.stable
    }
}

impl From<&Calibration> for CalibrationConfig {
    fn from(cal: &Calibration) -> Self {
        Self {
            engine: cal.engine().address(),
            risky: cal.risky(),
            stable: cal.stable(),
            strike: cal.strike().raw().to_string(),
            sigma: cal.sigma(),
            maturity: cal.maturity(),
            gamma: cal.gamma(),
            last_timestamp: cal.last_timestamp(),
        }
    }
}

/// Parses a raw base-unit integer string, failing with `message`.
pub(crate) fn parse_raw(text: &str, message: &'static str) -> Result<u128> {
    text.trim()
        .parse::<u128>()
        .map_err(|_| RmmError::InvalidConfiguration(message))
}
