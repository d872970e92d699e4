//! Unix timestamps at the on-chain width.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in the year convention used to express tau (365.2425 days).
pub const SECONDS_PER_YEAR: u32 = 31_556_952;

/// Unix seconds stored as `u32`, the width the contract packs.
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::Timestamp;
///
/// let t = Timestamp::new(1_700_000_000);
/// assert_eq!(t.seconds_until(Timestamp::new(1_700_000_060)), 60);
/// assert_eq!(t.seconds_until(Timestamp::new(0)), 0);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Creates a timestamp from Unix seconds.
    pub const fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Current wall-clock time, saturating at `u32::MAX`.
    #[must_use]
    pub fn now() -> Self {
        let secs = Utc::now().timestamp();
        Self(u32::try_from(secs.max(0)).unwrap_or(u32::MAX))
    }

    /// Returns the Unix seconds.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Seconds from `self` to `later`, zero if `later` is not after `self`.
    #[must_use]
    pub const fn seconds_until(&self, later: Self) -> u32 {
        later.0.saturating_sub(self.0)
    }

    /// Returns `self + seconds`, saturating.
    pub const fn saturating_add(&self, seconds: u32) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Converts to a UTC date-time.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.0), 0)
    }
}

impl From<u32> for Timestamp {
    fn from(seconds: u32) -> Self {
        Self(seconds)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
