//! Pool registry with a snapshot-driven lifecycle.
//!
//! A [`PoolRegistry`] is owned by the caller; nothing is global. Engines
//! enter through [`PoolRegistry::refresh`], are read or swapped through
//! [`get`](PoolRegistry::get) and [`get_mut`](PoolRegistry::get_mut), and
//! leave through [`evict`](PoolRegistry::evict),
//! [`evict_expired`](PoolRegistry::evict_expired) or
//! [`evict_stale`](PoolRegistry::evict_stale).

mod pool_registry;

pub use pool_registry::{PoolRegistry, RefreshOutcome};
