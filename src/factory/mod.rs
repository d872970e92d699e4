//! Engine instantiation via the factory pattern.
//!
//! The [`DefaultEngineFactory`] creates [`CurveEngine`] instances from
//! [`CurveConfig`] values, validating the configuration and dispatching to
//! the matching constructor based on the config variant.
//!
//! # Usage
//!
//! ```rust
//! use rmm_engine::config::PoolSnapshot;
//! use rmm_engine::factory::DefaultEngineFactory;
//!
//! let json = r#"{
//!     "calibration": {
//!         "engine": "0x1111111111111111111111111111111111111111",
//!         "risky":  { "address": "0x0000000000000000000000000000000000000001", "decimals": 18 },
//!         "stable": { "address": "0x0000000000000000000000000000000000000002", "decimals": 6 },
//!         "strike": "10000000", "sigma": 1000, "maturity": 1731556952,
//!         "gamma": 9900, "last_timestamp": 1700000000
//!     },
//!     "reserve_risky": "480061194161627500",
//!     "reserve_stable": "4800611",
//!     "liquidity": "1000000000000000000",
//!     "observed_at": 1700000012
//! }"#;
//! let snapshot: PoolSnapshot = serde_json::from_str(json).expect("valid json");
//! let engine = DefaultEngineFactory::create(&snapshot.into()).expect("engine created");
//! assert_eq!(engine.liquidity().to_string(), "1.000000000000000000");
//! ```
//!
//! [`CurveEngine`]: crate::engine::CurveEngine
//! [`CurveConfig`]: crate::config::CurveConfig

mod default_factory;

pub use default_factory::DefaultEngineFactory;
