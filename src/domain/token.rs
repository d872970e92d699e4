//! Token identity type.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::{Decimals, FixedDecimal};
use crate::error::Result;

/// An ERC-20 token: its address and declared decimals.
///
/// Two tokens are equal only if both address and decimals match.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use rmm_engine::domain::{Decimals, Token};
///
/// let usdc = Token::new(Address::repeat_byte(2), Decimals::new(6).expect("valid"));
/// let one = usdc.parse_amount("1.5").expect("valid");
/// assert_eq!(one.raw(), 1_500_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    #[must_use]
    pub const fn new(address: Address, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Zero at this token's width.
    pub const fn zero_amount(&self) -> FixedDecimal {
        FixedDecimal::zero(self.decimals)
    }

    /// Wraps a raw base-unit amount at this token's width.
    pub const fn raw_amount(&self, raw: u128) -> FixedDecimal {
        FixedDecimal::from_raw(raw, self.decimals)
    }

    /// Parses a human-readable amount, truncated to this token's width.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedDecimal::parse`] errors.
    pub fn parse_amount(&self, text: &str) -> Result<FixedDecimal> {
        FixedDecimal::parse(text, self.decimals)
    }

    /// Builds an amount from a float, truncated to this token's width.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedDecimal::from_f64`] errors.
    pub fn amount_from_f64(&self, value: f64) -> Result<FixedDecimal> {
        FixedDecimal::from_f64(value, self.decimals)
    }
}
