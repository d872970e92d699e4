//! Pool valuation readouts.

use super::{Decimals, FixedDecimal, LIQUIDITY_DECIMALS};
use crate::error::{Result, RmmError};

/// External prices for both pool tokens, in a common valuation currency.
///
/// Both prices carry 18 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferencePrices {
    risky: FixedDecimal,
    stable: FixedDecimal,
}

impl ReferencePrices {
    /// Creates a price pair.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DecimalMismatch`] unless both are 18-decimal.
    pub fn new(risky: FixedDecimal, stable: FixedDecimal) -> Result<Self> {
        risky.ensure_decimals(LIQUIDITY_DECIMALS)?;
        stable.ensure_decimals(LIQUIDITY_DECIMALS)?;
        Ok(Self { risky, stable })
    }

    /// Builds a pair from float prices.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidPrice`] for negative or non-finite input.
    pub fn from_f64(risky: f64, stable: f64) -> Result<Self> {
        let convert = |p: f64| {
            FixedDecimal::from_f64(p, LIQUIDITY_DECIMALS)
                .map_err(|_| RmmError::InvalidPrice("reference price must be finite and >= 0"))
        };
        Ok(Self {
            risky: convert(risky)?,
            stable: convert(stable)?,
        })
    }

    /// Price of one risky token.
    pub const fn risky(&self) -> FixedDecimal {
        self.risky
    }

    /// Price of one stable token.
    pub const fn stable(&self) -> FixedDecimal {
        self.stable
    }
}

/// Value of a pool's reserves, in total and per unit of liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityValue {
    per_liquidity: FixedDecimal,
    total: FixedDecimal,
}

impl LiquidityValue {
    /// Creates a value readout.
    pub const fn new(per_liquidity: FixedDecimal, total: FixedDecimal) -> Self {
        Self {
            per_liquidity,
            total,
        }
    }

    /// Value of one liquidity share.
    pub const fn per_liquidity(&self) -> FixedDecimal {
        self.per_liquidity
    }

    /// Value of the whole pool.
    pub const fn total(&self) -> FixedDecimal {
        self.total
    }

    /// Width of both readouts.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.total.decimals()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn prices_must_be_18_decimals() {
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let Err(RmmError::DecimalMismatch { .. }) = ReferencePrices::new(
            FixedDecimal::from_raw(1, d6),
            FixedDecimal::from_raw(1, LIQUIDITY_DECIMALS),
        ) else {
            panic!("expected DecimalMismatch");
        };
    }

    #[test]
    fn from_f64_rejects_negative() {
        let Err(RmmError::InvalidPrice(_)) = ReferencePrices::from_f64(-1.0, 1.0) else {
            panic!("expected InvalidPrice");
        };
        let Ok(p) = ReferencePrices::from_f64(2_000.5, 1.0) else {
            panic!("expected Ok");
        };
        assert_eq!(p.risky().to_string(), "2000.500000000000000000");
    }
}
