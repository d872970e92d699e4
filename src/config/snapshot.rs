//! Point-in-time pool state as delivered by a snapshot source.

use serde::{Deserialize, Serialize};

use super::ReservesConfig;
use crate::domain::{PoolId, Timestamp};
use crate::error::Result;

/// Reserves of one pool observed at a given wall-clock time.
///
/// The JSON form is flat: the [`ReservesConfig`] fields plus
/// `observed_at`.
///
/// # Examples
///
/// ```
/// use rmm_engine::config::PoolSnapshot;
///
/// let json = r#"{
///     "calibration": {
///         "engine": "0x1111111111111111111111111111111111111111",
///         "risky":  { "address": "0x0000000000000000000000000000000000000001", "decimals": 18 },
///         "stable": { "address": "0x0000000000000000000000000000000000000002", "decimals": 6 },
///         "strike": "10000000", "sigma": 1000, "maturity": 1731556952,
///         "gamma": 9900, "last_timestamp": 1700000000
///     },
///     "reserve_risky": "480061194161627500",
///     "reserve_stable": "4800611",
///     "liquidity": "1000000000000000000",
///     "observed_at": 1700000012
/// }"#;
/// let snapshot: PoolSnapshot = serde_json::from_str(json).expect("valid json");
/// assert!(snapshot.validate().is_ok());
/// assert_eq!(snapshot.observed_at().get(), 1_700_000_012);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    #[serde(flatten)]
    reserves: ReservesConfig,
    observed_at: Timestamp,
}

impl PoolSnapshot {
    /// Creates a snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`ReservesConfig::validate`] errors.
    pub fn new(reserves: ReservesConfig, observed_at: Timestamp) -> Result<Self> {
        reserves.validate()?;
        Ok(Self {
            reserves,
            observed_at,
        })
    }

    /// Validates the embedded reserves and calibration.
    ///
    /// # Errors
    ///
    /// Propagates [`ReservesConfig::validate`] errors.
    pub fn validate(&self) -> Result<()> {
        self.reserves.validate()
    }

    /// Returns the reserves.
    #[must_use]
    pub const fn reserves(&self) -> &ReservesConfig {
        &self.reserves
    }

    /// When the snapshot was taken.
    #[must_use]
    pub const fn observed_at(&self) -> Timestamp {
        self.observed_at
    }

    /// The pool this snapshot describes.
    ///
    /// # Errors
    ///
    /// Propagates calibration errors.
    pub fn pool_id(&self) -> Result<PoolId> {
        Ok(self.reserves.calibration().build()?.pool_id())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::test_fixtures::{calibration, reserves_config};

    #[test]
    fn pool_id_matches_calibration() {
        let Ok(snap) = PoolSnapshot::new(reserves_config(), Timestamp::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(snap.pool_id(), Ok(calibration().pool_id()));
    }

    #[test]
    fn json_is_flat() {
        let Ok(snap) = PoolSnapshot::new(reserves_config(), Timestamp::new(5)) else {
            panic!("expected Ok");
        };
        let Ok(value) = serde_json::to_value(&snap) else {
            panic!("serialize");
        };
        assert!(value.get("reserve_risky").is_some());
        assert!(value.get("observed_at").is_some());
        assert!(value.get("reserves").is_none());
        let Ok(back) = serde_json::from_value::<PoolSnapshot>(value) else {
            panic!("deserialize");
        };
        assert_eq!(back, snap);
    }
}
