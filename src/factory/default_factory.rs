//! Default engine factory implementation.

use crate::config::CurveConfig;
use crate::engine::CurveEngine;
use crate::error::RmmError;
use crate::pricing::{PricingModel, StandardPricing};
use crate::traits::FromConfig;

/// Stateless factory for creating engines from configuration.
///
/// `DefaultEngineFactory` is the single entry point for constructing an
/// engine from a declarative blueprint. It validates the [`CurveConfig`],
/// matches on its variant and delegates to the engine's constructor.
///
/// # Example
///
/// ```rust
/// use rmm_engine::config::CurveConfig;
/// use rmm_engine::factory::DefaultEngineFactory;
///
/// let json = r#"{
///     "kind": "reference_price",
///     "calibration": {
///         "engine": "0x1111111111111111111111111111111111111111",
///         "risky":  { "address": "0x0000000000000000000000000000000000000001", "decimals": 18 },
///         "stable": { "address": "0x0000000000000000000000000000000000000002", "decimals": 6 },
///         "strike": "10000000", "sigma": 1000, "maturity": 1731556952,
///         "gamma": 9900, "last_timestamp": 1700000000
///     },
///     "reference_price": "10",
///     "liquidity": "1"
/// }"#;
/// let config: CurveConfig = serde_json::from_str(json).expect("valid json");
/// let engine = DefaultEngineFactory::create(&config).expect("engine created");
/// assert_eq!(engine.reserve_stable().to_string(), "4.800611");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultEngineFactory;

impl DefaultEngineFactory {
    /// Creates an engine priced by [`StandardPricing`].
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`CurveConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the engine's [`FromConfig`] implementation.
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidConfiguration`] for malformed amounts.
    /// - [`RmmError::InvalidCalibration`] for out-of-range parameters.
    /// - Any error propagated from engine construction.
    pub fn create(config: &CurveConfig) -> Result<CurveEngine, RmmError> {
        config.validate()?;
        CurveEngine::<StandardPricing>::from_config(config)
    }

    /// Creates an engine priced by `pricing`.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub fn create_with<P: PricingModel>(
        config: &CurveConfig,
        pricing: P,
    ) -> Result<CurveEngine<P>, RmmError> {
        config.validate()?;
        match config {
            CurveConfig::Reserves(cfg) => CurveEngine::from_reserves_with_model(
                cfg.calibration().build()?,
                cfg.reserve_risky()?,
                cfg.reserve_stable()?,
                cfg.liquidity()?,
                pricing,
            ),
            CurveConfig::ReferencePrice(cfg) => CurveEngine::from_reference_price_with_model(
                cfg.calibration().build()?,
                cfg.reference_price()?,
                cfg.liquidity()?,
                pricing,
            ),
        }
    }
}
