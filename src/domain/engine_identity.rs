//! The engine contract and its risky/stable token pair.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::Token;
use crate::error::RmmError;

/// The deployed engine contract a pool lives in, plus its two tokens.
///
/// Unlike a generic token pair, order here is semantic: `risky` is the
/// underlying of the replicated call, `stable` is the numeraire in which
/// the strike is quoted.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use rmm_engine::domain::{Decimals, EngineIdentity, Token};
///
/// let weth = Token::new(Address::repeat_byte(1), Decimals::new(18).expect("valid"));
/// let usdc = Token::new(Address::repeat_byte(2), Decimals::new(6).expect("valid"));
/// let engine = EngineIdentity::new(Address::repeat_byte(0x11), weth, usdc).expect("distinct");
/// assert_eq!(engine.stable(), usdc);
///
/// assert!(EngineIdentity::new(Address::ZERO, weth, weth).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineIdentity {
    address: Address,
    risky: Token,
    stable: Token,
}

impl EngineIdentity {
    /// Creates a new engine identity.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidToken`] if both tokens share an address.
    pub fn new(address: Address, risky: Token, stable: Token) -> Result<Self, RmmError> {
        if risky.address() == stable.address() {
            return Err(RmmError::InvalidToken(
                "risky and stable require two distinct addresses",
            ));
        }
        Ok(Self {
            address,
            risky,
            stable,
        })
    }

    /// Returns the engine contract address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
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
