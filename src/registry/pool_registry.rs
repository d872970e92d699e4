//! Caller-owned store of engines keyed by pool id.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::PoolSnapshot;
use crate::domain::{PoolId, PoolStatus, Timestamp};
use crate::engine::{CurveEngine, InvariantPolicy, TracingMonitor};
use crate::error::{Result, RmmError};
use crate::pricing::{PricingModel, StandardPricing};
use crate::traits::InvariantMonitor;

/// What [`PoolRegistry::refresh`] did with a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
    /// First snapshot for this pool.
    Inserted,
    /// Replaced an older snapshot.
    Updated,
    /// Older than the stored snapshot; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
struct Entry<P: PricingModel> {
    engine: CurveEngine<P>,
    observed_at: Timestamp,
}

/// Engines rebuilt from snapshots, one per pool id.
///
/// Every engine the registry builds shares the registry's pricing model,
/// policy and monitor. Snapshots older than the one already stored for a
/// pool are ignored; an equal timestamp replaces it.
#[derive(Debug, Clone)]
pub struct PoolRegistry<P: PricingModel = StandardPricing> {
    pools: HashMap<PoolId, Entry<P>>,
    pricing: P,
    policy: InvariantPolicy,
    monitor: Arc<dyn InvariantMonitor>,
}

impl PoolRegistry<StandardPricing> {
    /// Creates an empty registry using [`StandardPricing`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_model(StandardPricing)
    }
}

impl Default for PoolRegistry<StandardPricing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PricingModel> PoolRegistry<P> {
    /// Creates an empty registry using `pricing` for every engine.
    #[must_use]
    pub fn with_model(pricing: P) -> Self {
        Self {
            pools: HashMap::new(),
            pricing,
            policy: InvariantPolicy::default(),
            monitor: Arc::new(TracingMonitor),
        }
    }

    /// Regression policy for engines built from now on.
    #[must_use]
    pub fn with_policy(mut self, policy: InvariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Regression monitor for engines built from now on.
    #[must_use]
    pub fn with_monitor(mut self, monitor: Arc<dyn InvariantMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Rebuilds the engine for `snapshot`'s pool from its reserves.
    ///
    /// # Errors
    ///
    /// Any validation or construction error; the registry is left as it was.
    pub fn refresh(&mut self, snapshot: &PoolSnapshot) -> Result<RefreshOutcome> {
        snapshot.validate()?;
        let reserves = snapshot.reserves();
        let calibration = reserves.calibration().build()?;
        let pool_id = calibration.pool_id();
        let observed_at = snapshot.observed_at();

        let outcome = match self.pools.get(&pool_id) {
            Some(entry) if entry.observed_at > observed_at => {
                debug!(
                    %pool_id,
                    stored = %entry.observed_at,
                    received = %observed_at,
                    "ignoring out-of-order snapshot"
                );
                return Ok(RefreshOutcome::Ignored);
            }
            Some(_) => RefreshOutcome::Updated,
            None => RefreshOutcome::Inserted,
        };

        let engine = CurveEngine::from_reserves_with_model(
            calibration,
            reserves.reserve_risky()?,
            reserves.reserve_stable()?,
            reserves.liquidity()?,
            self.pricing.clone(),
        )?
        .with_policy(self.policy)
        .with_monitor(Arc::clone(&self.monitor));

        self.pools.insert(
            pool_id,
            Entry {
                engine,
                observed_at,
            },
        );
        debug!(%pool_id, %observed_at, ?outcome, "pool refreshed");
        Ok(outcome)
    }

    /// Engine for `pool_id`, if registered.
    #[must_use]
    pub fn get(&self, pool_id: &PoolId) -> Option<&CurveEngine<P>> {
        self.pools.get(pool_id).map(|entry| &entry.engine)
    }

    /// Mutable engine for `pool_id`, if registered.
    pub fn get_mut(&mut self, pool_id: &PoolId) -> Option<&mut CurveEngine<P>> {
        self.pools.get_mut(pool_id).map(|entry| &mut entry.engine)
    }

    /// Engine for `pool_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::PoolNotFound`] if the pool is not registered.
    pub fn require(&self, pool_id: &PoolId) -> Result<&CurveEngine<P>> {
        self.get(pool_id).ok_or(RmmError::PoolNotFound(*pool_id))
    }

    /// When the stored snapshot for `pool_id` was observed.
    #[must_use]
    pub fn observed_at(&self, pool_id: &PoolId) -> Option<Timestamp> {
        self.pools.get(pool_id).map(|entry| entry.observed_at)
    }

    /// Removes and returns one engine.
    pub fn evict(&mut self, pool_id: &PoolId) -> Option<CurveEngine<P>> {
        let entry = self.pools.remove(pool_id)?;
        debug!(%pool_id, "pool evicted");
        Some(entry.engine)
    }

    /// Removes every pool at or past maturity as seen at `now`.
    pub fn evict_expired(&mut self, now: Timestamp) -> Vec<PoolId> {
        self.evict_where(|entry| entry.engine.status(now) == PoolStatus::Expired, "expired")
    }

    /// Removes every pool whose snapshot is more than `max_age` seconds
    /// old at `now`.
    pub fn evict_stale(&mut self, now: Timestamp, max_age: u32) -> Vec<PoolId> {
        self.evict_where(|entry| entry.observed_at.seconds_until(now) > max_age, "stale")
    }

    /// Ids of every registered pool, in no particular order.
    pub fn pool_ids(&self) -> impl Iterator<Item = &PoolId> {
        self.pools.keys()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    fn evict_where(
        &mut self,
        doomed: impl Fn(&Entry<P>) -> bool,
        reason: &'static str,
    ) -> Vec<PoolId> {
        let ids: Vec<PoolId> = self
            .pools
            .iter()
            .filter(|(_, entry)| doomed(entry))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.pools.remove(id);
            debug!(pool_id = %id, reason, "pool evicted");
        }
        ids
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ReservesConfig;
    use crate::domain::{Calibration, SwapDirection, SECONDS_PER_YEAR};
    use crate::test_fixtures::{calibration, d18, d6, fx, reserves_config, START};

    fn snapshot(config: ReservesConfig, at: u32) -> PoolSnapshot {
        let Ok(snap) = PoolSnapshot::new(config, Timestamp::new(at)) else {
            panic!("valid snapshot");
        };
        snap
    }

    fn reserves(cal: &Calibration, risky: &str, stable: &str) -> ReservesConfig {
        let Ok(cfg) = ReservesConfig::new(cal, fx(risky, d18()), fx(stable, d6()), fx("1", d18()))
        else {
            panic!("valid reserves");
        };
        cfg
    }

    /// Same tokens, half-year maturity.
    fn short_calibration() -> Calibration {
        let base = calibration();
        let Ok(cal) = Calibration::new(
            base.engine(),
            base.strike(),
            base.sigma(),
            Timestamp::new(START + SECONDS_PER_YEAR / 2),
            base.gamma(),
            base.last_timestamp(),
        ) else {
            panic!("valid calibration");
        };
        cal
    }

    #[test]
    fn refresh_inserts_then_updates() {
        let mut registry = PoolRegistry::new();
        let id = calibration().pool_id();
        assert_eq!(
            registry.refresh(&snapshot(reserves_config(), START + 10)),
            Ok(RefreshOutcome::Inserted)
        );
        assert_eq!(registry.len(), 1);

        let moved = reserves(&calibration(), "0.6", "3.5");
        assert_eq!(
            registry.refresh(&snapshot(moved, START + 20)),
            Ok(RefreshOutcome::Updated)
        );
        let Ok(engine) = registry.require(&id) else {
            panic!("expected registered pool");
        };
        assert_eq!(engine.reserve_risky(), fx("0.6", d18()));
        assert_eq!(registry.observed_at(&id), Some(Timestamp::new(START + 20)));
    }

    #[test]
    fn out_of_order_snapshot_ignored() {
        let mut registry = PoolRegistry::new();
        let id = calibration().pool_id();
        let Ok(_) = registry.refresh(&snapshot(reserves_config(), START + 20)) else {
            panic!("expected Ok");
        };
        let older = reserves(&calibration(), "0.6", "3.5");
        assert_eq!(
            registry.refresh(&snapshot(older, START + 10)),
            Ok(RefreshOutcome::Ignored)
        );
        assert_eq!(
            registry.get(&id).map(CurveEngine::reserve_stable),
            Some(fx("4.800611", d6()))
        );
    }

    #[test]
    fn missing_pool_is_an_error() {
        let registry = PoolRegistry::new();
        let id = calibration().pool_id();
        assert_eq!(
            registry.require(&id).err(),
            Some(RmmError::PoolNotFound(id))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn get_mut_commits_swaps() {
        let mut registry = PoolRegistry::new();
        let id = calibration().pool_id();
        let Ok(_) = registry.refresh(&snapshot(reserves_config(), START)) else {
            panic!("expected Ok");
        };
        let Some(engine) = registry.get_mut(&id) else {
            panic!("expected registered pool");
        };
        let Ok(out) = engine.swap_exact_in(SwapDirection::RiskyIn, fx("0.1", d18())) else {
            panic!("expected Ok");
        };
        assert!(!out.is_zero());
        assert_ne!(
            registry.get(&id).map(CurveEngine::reserve_risky),
            Some(fx("0.480061194161627500", d18()))
        );
    }

    #[test]
    fn evict_expired_and_stale() {
        let mut registry = PoolRegistry::new();
        let long_id = calibration().pool_id();
        let short_id = short_calibration().pool_id();
        let Ok(_) = registry.refresh(&snapshot(reserves_config(), START)) else {
            panic!("expected Ok");
        };
        let Ok(_) = registry.refresh(&snapshot(
            reserves(&short_calibration(), "0.5", "4.5"),
            START + 100,
        )) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.len(), 2);

        let expired = registry.evict_expired(Timestamp::new(START + SECONDS_PER_YEAR / 2));
        assert_eq!(expired, vec![short_id]);
        assert!(registry.get(&long_id).is_some());

        assert!(registry.evict_stale(Timestamp::new(START + 60), 60).is_empty());
        assert_eq!(registry.evict_stale(Timestamp::new(START + 61), 60), vec![long_id]);
        assert!(registry.is_empty());
    }

    #[test]
    fn evict_returns_engine() {
        let mut registry = PoolRegistry::new();
        let id = calibration().pool_id();
        let Ok(_) = registry.refresh(&snapshot(reserves_config(), START)) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.pool_ids().count(), 1);
        assert!(registry.evict(&id).is_some());
        assert!(registry.evict(&id).is_none());
    }
}
