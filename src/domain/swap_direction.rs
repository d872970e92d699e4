//! Trade direction and reserve sides.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which token a swap pays into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SwapDirection {
    /// Pay risky, receive stable.
    RiskyIn = 0,
    /// Pay stable, receive risky.
    StableIn = 1,
}

impl SwapDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::RiskyIn => Self::StableIn,
            Self::StableIn => Self::RiskyIn,
        }
    }

    /// The side the input is paid into.
    #[must_use]
    pub const fn input_side(&self) -> PoolSide {
        match self {
            Self::RiskyIn => PoolSide::Risky,
            Self::StableIn => PoolSide::Stable,
        }
    }

    /// The side the output is paid from.
    #[must_use]
    pub const fn output_side(&self) -> PoolSide {
        self.opposite().input_side()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiskyIn => write!(f, "RiskyIn"),
            Self::StableIn => write!(f, "StableIn"),
        }
    }
}

/// A quantity a liquidity quote can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PoolSide {
    /// The risky reserve.
    Risky = 0,
    /// The stable reserve.
    Stable = 1,
    /// LP shares.
    Liquidity = 2,
}

impl fmt::Display for PoolSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Risky => write!(f, "Risky"),
            Self::Stable => write!(f, "Stable"),
            Self::Liquidity => write!(f, "Liquidity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_follow_direction() {
        assert_eq!(SwapDirection::RiskyIn.input_side(), PoolSide::Risky);
        assert_eq!(SwapDirection::RiskyIn.output_side(), PoolSide::Stable);
        assert_eq!(SwapDirection::StableIn.input_side(), PoolSide::Stable);
        assert_eq!(SwapDirection::StableIn.output_side(), PoolSide::Risky);
    }

    #[test]
    fn opposite_is_involution() {
        for d in [SwapDirection::RiskyIn, SwapDirection::StableIn] {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn display() {
        assert_eq!(SwapDirection::StableIn.to_string(), "StableIn");
        assert_eq!(PoolSide::Liquidity.to_string(), "Liquidity");
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&SwapDirection::RiskyIn).unwrap_or_default();
        assert_eq!(json, "\"risky_in\"");
    }
}
