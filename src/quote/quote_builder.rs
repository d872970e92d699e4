//! Option-style quotes composed over a curve engine.

use crate::domain::{FixedDecimal, LiquidityValue, Timestamp};
use crate::engine::CurveEngine;
use crate::error::{Result, RmmError};
use crate::pricing::{finite_or_zero, CurveParams, PricingModel};

/// Read-only quote view over a [`CurveEngine`].
///
/// The reference price `S` of risky defaults to the curve's reported
/// price; [`with_reference_price`](Self::with_reference_price) overrides it.
/// Premiums and fees are expressed in stable units at the stable token's
/// decimals.
///
/// # Example
///
/// ```rust
/// # use rmm_engine::prelude::*;
/// # use alloy_primitives::Address;
/// # let d6 = Decimals::new(6).expect("ok");
/// # let d18 = Decimals::new(18).expect("ok");
/// # let risky = Token::new(Address::repeat_byte(1), d18);
/// # let stable = Token::new(Address::repeat_byte(2), d6);
/// # let id = EngineIdentity::new(Address::repeat_byte(0x11), risky, stable).expect("ok");
/// # let calibration = Calibration::new(id, stable.parse_amount("10").expect("ok"),
/// #     Percentage::new(1_000), Timestamp::new(1 + SECONDS_PER_YEAR), Percentage::new(9_900),
/// #     Timestamp::new(1)).expect("ok");
/// let engine = CurveEngine::from_reference_price(
///     calibration,
///     FixedDecimal::parse("10", d18).expect("ok"),
///     FixedDecimal::parse("1", d18).expect("ok"),
/// )
/// .expect("engine");
///
/// let quote = QuoteBuilder::new(&engine);
/// let premium = quote.premium().expect("premium");
/// assert_eq!(premium.to_string(), "0.398776");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QuoteBuilder<'a, P: PricingModel> {
    engine: &'a CurveEngine<P>,
    reference_price: Option<FixedDecimal>,
}

impl<'a, P: PricingModel> QuoteBuilder<'a, P> {
    /// Quotes against the engine's reported price.
    #[must_use]
    pub const fn new(engine: &'a CurveEngine<P>) -> Self {
        Self {
            engine,
            reference_price: None,
        }
    }

    /// Quotes against an external price of risky instead.
    #[must_use]
    pub fn with_reference_price(mut self, price: FixedDecimal) -> Self {
        self.reference_price = Some(price);
        self
    }

    /// The price of risky in use, at whatever width it was supplied.
    ///
    /// # Errors
    ///
    /// Propagates [`CurveEngine::reported_price_of_risky`] errors.
    pub fn reference_price(&self) -> Result<FixedDecimal> {
        match self.reference_price {
            Some(price) => Ok(price),
            None => self.engine.reported_price_of_risky(),
        }
    }

    /// Black–Scholes call delta `Φ(d1)`.
    ///
    /// # Errors
    ///
    /// See [`reference_price`](Self::reference_price).
    pub fn delta(&self) -> Result<f64> {
        let spot = self.reference_price()?.to_f64();
        let delta = self.engine.pricing().call_delta(spot, &self.engine.curve_params());
        Ok(finite_or_zero(delta, "call delta"))
    }

    /// Call premium per unit of risky, at stable decimals. A non-finite
    /// premium from the pricing model reads as zero.
    ///
    /// # Errors
    ///
    /// See [`reference_price`](Self::reference_price).
    pub fn premium(&self) -> Result<FixedDecimal> {
        self.premium_at(&self.engine.curve_params())
    }

    /// `S / K`.
    ///
    /// # Errors
    ///
    /// See [`reference_price`](Self::reference_price).
    pub fn moneyness(&self) -> Result<f64> {
        Ok(self.reference_price()?.to_f64() / self.engine.strike().to_f64())
    }

    /// `S > K`.
    ///
    /// # Errors
    ///
    /// See [`reference_price`](Self::reference_price).
    pub fn in_the_money(&self) -> Result<bool> {
        Ok(self
            .reference_price()?
            .cmp_value(&self.engine.strike())
            .is_gt())
    }

    /// Fee income that would make an LP whole for time decay between two
    /// timestamps: `C(τ_start) − C(τ_end)` per liquidity, and in total.
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidConfiguration`] if `end` precedes `start`.
    /// - [`RmmError::InvalidCalibration`] for a `u32::MAX` timestamp.
    pub fn theoretical_max_fee(&self, start: Timestamp, end: Timestamp) -> Result<LiquidityValue> {
        if end < start {
            return Err(RmmError::InvalidConfiguration(
                "fee window must not end before it starts",
            ));
        }
        let calibration = self.engine.calibration();
        let params = self.engine.curve_params();
        let at_start = params.with_tau(calibration.at_timestamp(start)?.tau_years());
        let at_end = params.with_tau(calibration.at_timestamp(end)?.tau_years());

        let decay = self.premium_at(&at_start)?.sub(&self.premium_at(&at_end)?);
        let stable_decimals = calibration.stable().decimals();
        let per_liquidity = match decay {
            Ok(value) => value,
            // a deep in-the-money call can gain value as tau shrinks
            Err(RmmError::NegativeAmount) => FixedDecimal::zero(stable_decimals),
            Err(err) => return Err(err),
        };
        let total = per_liquidity.mul_fixed(&self.engine.liquidity(), stable_decimals)?;
        Ok(LiquidityValue::new(per_liquidity, total))
    }

    /// Covered-call value of the pool at the reference price.
    ///
    /// # Errors
    ///
    /// See [`CurveEngine::theoretical_liquidity_value`].
    pub fn theoretical_value(&self) -> Result<LiquidityValue> {
        self.engine
            .theoretical_liquidity_value(self.reference_price()?)
    }

    fn premium_at(&self, params: &CurveParams) -> Result<FixedDecimal> {
        let spot = self.reference_price()?.to_f64();
        let premium = finite_or_zero(
            self.engine.pricing().call_premium(spot, params),
            "call premium",
        );
        let decimals = self.engine.calibration().stable().decimals();
        if premium <= 0.0 {
            return Ok(FixedDecimal::zero(decimals));
        }
        FixedDecimal::from_f64(premium, decimals)
    }
}
