//! Engine configuration enums and structs.
//!
//! This module contains the [`CurveConfig`] enum, the top-level
//! declarative blueprint for creating an engine, along with the
//! serializable calibration, reserves, reference-price and snapshot
//! structs it is built from. All of them derive `serde` so fixtures and
//! indexer payloads load directly from JSON.

mod calibration;
mod curve_config;
mod reference_price;
mod reserves;
mod snapshot;

pub use calibration::CalibrationConfig;
pub use curve_config::CurveConfig;
pub use reference_price::ReferencePriceConfig;
pub use reserves::ReservesConfig;
pub use snapshot::PoolSnapshot;
