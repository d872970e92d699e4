//! Deterministic pool identifier.

use core::fmt;

use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};

use super::{Percentage, Timestamp};

/// Length of the packed preimage: 20 + 16 + 4 + 4 + 4 bytes.
pub const POOL_ID_PREIMAGE_LEN: usize = 48;

/// Keccak-256 identifier of a pool within an engine.
///
/// Equal to the contract's
/// `keccak256(abi.encodePacked(engine, strike, sigma, maturity, gamma))`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use rmm_engine::domain::{Percentage, PoolId, Timestamp};
///
/// let a = PoolId::compute(Address::ZERO, 1, Percentage::new(1), Timestamp::new(1), Percentage::new(9_000));
/// let b = PoolId::compute(Address::ZERO, 1, Percentage::new(1), Timestamp::new(2), Percentage::new(9_000));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(B256);

impl PoolId {
    /// Hashes the packed calibration fields.
    #[must_use]
    pub fn compute(
        engine: Address,
        strike_raw: u128,
        sigma: Percentage,
        maturity: Timestamp,
        gamma: Percentage,
    ) -> Self {
        Self(keccak256(packed_preimage(
            engine, strike_raw, sigma, maturity, gamma,
        )))
    }

    /// Wraps an already-known identifier.
    #[must_use]
    pub const fn from_b256(hash: B256) -> Self {
        Self(hash)
    }

    /// Returns the 32-byte hash.
    #[must_use]
    pub const fn as_b256(&self) -> B256 {
        self.0
    }
}

/// Big-endian `address ‖ uint128 ‖ uint32 ‖ uint32 ‖ uint32`.
#[must_use]
pub fn packed_preimage(
    engine: Address,
    strike_raw: u128,
    sigma: Percentage,
    maturity: Timestamp,
    gamma: Percentage,
) -> [u8; POOL_ID_PREIMAGE_LEN] {
    let mut buf = [0u8; POOL_ID_PREIMAGE_LEN];
    buf[..20].copy_from_slice(engine.as_slice());
    buf[20..36].copy_from_slice(&strike_raw.to_be_bytes());
    buf[36..40].copy_from_slice(&sigma.bps().to_be_bytes());
    buf[40..44].copy_from_slice(&maturity.get().to_be_bytes());
    buf[44..48].copy_from_slice(&gamma.bps().to_be_bytes());
    buf
}

impl From<B256> for PoolId {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    fn fixture() -> (Address, u128, Percentage, Timestamp, Percentage) {
        (
            Address::repeat_byte(0x11),
            10_000_000,
            Percentage::new(1_000),
            Timestamp::new(1_731_556_952),
            Percentage::new(9_900),
        )
    }

    #[test]
    fn preimage_layout_matches_encode_packed() {
        let (e, k, s, m, g) = fixture();
        // engine | strike | sigma | maturity | gamma
        let expected = hex!(
            "111111111111111111111111111111111111111100000000000000000000000000989680000003e867357658000026ac"
        );
        assert_eq!(packed_preimage(e, k, s, m, g), expected);
    }

    #[test]
    fn known_digest() {
        let (e, k, s, m, g) = fixture();
        let id = PoolId::compute(e, k, s, m, g);
        assert_eq!(
            id.to_string(),
            "0x217db03e135ef59154e8032654881999b8fd556acc70e6fea302920e9f750875"
        );
    }

    #[test]
    fn every_field_changes_the_id() {
        let (e, k, s, m, g) = fixture();
        let base = PoolId::compute(e, k, s, m, g);
        assert_ne!(base, PoolId::compute(Address::repeat_byte(0x12), k, s, m, g));
        assert_ne!(base, PoolId::compute(e, k + 1, s, m, g));
        assert_ne!(base, PoolId::compute(e, k, Percentage::new(1_001), m, g));
        assert_ne!(base, PoolId::compute(e, k, s, m.saturating_add(1), g));
        assert_ne!(base, PoolId::compute(e, k, s, m, Percentage::new(9_901)));
    }

    #[test]
    fn deterministic() {
        let (e, k, s, m, g) = fixture();
        assert_eq!(PoolId::compute(e, k, s, m, g), PoolId::compute(e, k, s, m, g));
    }

    #[test]
    fn b256_round_trip() {
        let id = PoolId::from(B256::repeat_byte(7));
        assert_eq!(id.as_b256(), B256::repeat_byte(7));
        assert_eq!(PoolId::from_b256(B256::repeat_byte(7)), id);
    }
}
