//! RMM-01 curve engine.
//!
//! The trading function, per unit of liquidity, is
//!
//! ```text
//! y = K·Φ(Φ⁻¹(1 − x) − σ√τ) + k
//! ```
//!
//! where `x`/`y` are the risky/stable reserves divided by total liquidity,
//! `K` the strike, `σ` the volatility, `τ` the time to maturity in years
//! and `k` the invariant. The engine owns every fixed-point conversion; the
//! [`PricingModel`] only ever sees unscaled `f64` values.
//!
//! # Swap Algorithm (exact input)
//!
//! 1. `k_last` = invariant of the current reserves
//! 2. `effective_in = amount_in × gamma` (floor)
//! 3. normalize `same + effective_in` by liquidity
//! 4. solve the opposite side holding `k_last`
//! 5. `amount_out = opposite − solved_opposite`
//! 6. `same += amount_in` (fee stays in the pool), `opposite −= amount_out`
//! 7. `k_next` = invariant of the new reserves
//!
//! A trade that pushes the input side to one unit per liquidity or more,
//! or that would produce no positive output, yields the zero outcome.
//!
//! # Invariant
//!
//! The solved opposite reserve is truncated, which can hand the trader up
//! to one base unit of the output token. A fee-paying swap whose invariant
//! drop is explained by that unit alone is too small to clear truncation
//! and yields the zero outcome. Any other drop below `k_last` is reported
//! to the engine's [`InvariantMonitor`] and, under
//! [`InvariantPolicy::Strict`], turned into an error. Fee-free swaps have
//! no such cushion and report truncation drops like any other.

use std::sync::Arc;

use tracing::{debug, trace};

use super::{CurveState, InvariantPolicy, SwapPreview, TracingMonitor};
use crate::config::{CurveConfig, ReferencePriceConfig, ReservesConfig};
use crate::domain::{
    Calibration, Decimals, FixedDecimal, Invariant, LiquidityQuote, LiquidityValue, Percentage,
    PoolId, PoolSide, PoolStatus, ReferencePrices, Rounding, SwapDirection, SwapOutcome,
    Timestamp, Token, LIQUIDITY_DECIMALS,
};
use crate::error::{Result, RmmError};
use crate::pricing::{finite_or_zero, CurveParams, PricingModel, StandardPricing};
use crate::traits::{FromConfig, InvariantMonitor, LiquidityCurve, RegressionEvent, SwapCurve};

/// An RMM-01 pool simulated off-chain.
///
/// # State
///
/// - `calibration` — immutable pool parameters plus the timestamp tau is
///   measured from
/// - `state` — reserves at token decimals, liquidity at 18 decimals and the
///   last computed invariant
/// - `pricing` — the normal-distribution collaborator
/// - `policy` / `monitor` — how invariant regressions are handled
///
/// # Example
///
/// ```rust
/// use rmm_engine::prelude::*;
/// use alloy_primitives::Address;
///
/// let d6 = Decimals::new(6).expect("ok");
/// let d18 = Decimals::new(18).expect("ok");
/// let risky = Token::new(Address::repeat_byte(1), d18);
/// let stable = Token::new(Address::repeat_byte(2), d6);
/// let engine_id = EngineIdentity::new(Address::repeat_byte(0x11), risky, stable).expect("distinct");
/// let calibration = Calibration::new(
///     engine_id,
///     stable.parse_amount("10").expect("ok"),
///     Percentage::new(1_000),
///     Timestamp::new(1_000 + SECONDS_PER_YEAR),
///     Percentage::new(9_900),
///     Timestamp::new(1_000),
/// )
/// .expect("valid calibration");
///
/// let mut engine = CurveEngine::from_reference_price(
///     calibration,
///     FixedDecimal::parse("10", d18).expect("ok"),
///     FixedDecimal::parse("1", d18).expect("ok"),
/// )
/// .expect("engine");
///
/// let outcome = engine
///     .swap_exact_in(SwapDirection::RiskyIn, risky.parse_amount("0.3").expect("ok"))
///     .expect("swap");
/// assert!(!outcome.is_zero());
/// assert!(outcome.invariant_held());
/// ```
#[derive(Debug, Clone)]
pub struct CurveEngine<P: PricingModel = StandardPricing> {
    calibration: Calibration,
    state: CurveState,
    pricing: P,
    policy: InvariantPolicy,
    monitor: Arc<dyn InvariantMonitor>,
}

impl CurveEngine<StandardPricing> {
    /// Builds an engine from live reserves, computing the invariant.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DecimalMismatch`] if a reserve is not at its token's
    ///   width or liquidity is not at 18 decimals.
    /// - [`RmmError::InvalidAmount`] if liquidity is zero.
    pub fn from_reserves(
        calibration: Calibration,
        reserve_risky: FixedDecimal,
        reserve_stable: FixedDecimal,
        liquidity: FixedDecimal,
    ) -> Result<Self> {
        Self::from_reserves_with_model(
            calibration,
            reserve_risky,
            reserve_stable,
            liquidity,
            StandardPricing,
        )
    }

    /// Builds an engine whose reserves put the curve at `reference_price`.
    ///
    /// The invariant is defined as zero.
    ///
    /// # Errors
    ///
    /// - [`RmmError::InvalidPrice`] for a zero price.
    /// - [`RmmError::DecimalMismatch`] if liquidity is not at 18 decimals.
    /// - [`RmmError::InvalidAmount`] if liquidity is zero.
    pub fn from_reference_price(
        calibration: Calibration,
        reference_price: FixedDecimal,
        liquidity: FixedDecimal,
    ) -> Result<Self> {
        Self::from_reference_price_with_model(
            calibration,
            reference_price,
            liquidity,
            StandardPricing,
        )
    }
}

impl<P: PricingModel> CurveEngine<P> {
    /// [`from_reserves`](CurveEngine::from_reserves) with an explicit
    /// pricing model.
    ///
    /// # Errors
    ///
    /// See [`from_reserves`](CurveEngine::from_reserves).
    pub fn from_reserves_with_model(
        calibration: Calibration,
        reserve_risky: FixedDecimal,
        reserve_stable: FixedDecimal,
        liquidity: FixedDecimal,
        pricing: P,
    ) -> Result<Self> {
        reserve_risky.ensure_decimals(calibration.risky().decimals())?;
        reserve_stable.ensure_decimals(calibration.stable().decimals())?;
        ensure_liquidity(&liquidity)?;

        let state = CurveState::new(reserve_risky, reserve_stable, liquidity, Invariant::ZERO);
        let mut engine = Self::assemble(calibration, state, pricing);
        let invariant = engine.calc_invariant()?;
        debug!(
            pool_id = %engine.pool_id(),
            reserve_risky = %reserve_risky,
            reserve_stable = %reserve_stable,
            liquidity = %liquidity,
            invariant = %invariant,
            "engine built from reserves"
        );
        Ok(engine)
    }

    /// [`from_reference_price`](CurveEngine::from_reference_price) with an
    /// explicit pricing model.
    ///
    /// Per unit of liquidity, `x = 1 − Δ_call(S)` and
    /// `y = stable_given_risky(x, k = 0)`.
    ///
    /// # Errors
    ///
    /// See [`from_reference_price`](CurveEngine::from_reference_price).
    pub fn from_reference_price_with_model(
        calibration: Calibration,
        reference_price: FixedDecimal,
        liquidity: FixedDecimal,
        pricing: P,
    ) -> Result<Self> {
        ensure_liquidity(&liquidity)?;
        if reference_price.is_zero() {
            return Err(RmmError::InvalidPrice("reference price must be positive"));
        }
        let spot = reference_price.to_f64();
        if !spot.is_finite() {
            return Err(RmmError::InvalidPrice("reference price must be finite"));
        }

        let params = curve_params(&calibration);
        let delta = finite_or_zero(pricing.call_delta(spot, &params), "call delta");
        let risky_per_unit = 1.0 - delta;
        let stable_per_unit = finite_or_zero(
            pricing.stable_given_risky(risky_per_unit, &params, 0.0),
            "stable given risky",
        );

        let reserve_risky = scale(risky_per_unit, calibration.risky().decimals(), &liquidity)?;
        let reserve_stable = scale(stable_per_unit, calibration.stable().decimals(), &liquidity)?;
        let state = CurveState::new(reserve_risky, reserve_stable, liquidity, Invariant::ZERO);
        let engine = Self::assemble(calibration, state, pricing);
        debug!(
            pool_id = %engine.pool_id(),
            reference_price = %reference_price,
            reserve_risky = %reserve_risky,
            reserve_stable = %reserve_stable,
            liquidity = %liquidity,
            "engine built from reference price"
        );
        Ok(engine)
    }

    fn assemble(calibration: Calibration, state: CurveState, pricing: P) -> Self {
        Self {
            calibration,
            state,
            pricing,
            policy: InvariantPolicy::default(),
            monitor: Arc::new(TracingMonitor),
        }
    }

    /// Replaces the regression policy.
    #[must_use]
    pub fn with_policy(mut self, policy: InvariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the regression monitor.
    #[must_use]
    pub fn with_monitor(mut self, monitor: Arc<dyn InvariantMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    // -- accessors ----------------------------------------------------------

    /// Returns the calibration.
    #[must_use]
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &CurveState {
        &self.state
    }

    /// Returns the pricing model.
    #[must_use]
    pub const fn pricing(&self) -> &P {
        &self.pricing
    }

    /// Returns the regression policy.
    #[must_use]
    pub const fn policy(&self) -> InvariantPolicy {
        self.policy
    }

    /// Returns the on-chain pool id.
    #[must_use]
    pub fn pool_id(&self) -> PoolId {
        self.calibration.pool_id()
    }

    /// Strike in stable units.
    pub const fn strike(&self) -> FixedDecimal {
        self.calibration.strike()
    }

    /// Volatility in basis points.
    #[must_use]
    pub const fn sigma(&self) -> Percentage {
        self.calibration.sigma()
    }

    /// `1 − fee` in basis points.
    #[must_use]
    pub const fn gamma(&self) -> Percentage {
        self.calibration.gamma()
    }

    /// Maturity timestamp.
    #[must_use]
    pub const fn maturity(&self) -> Timestamp {
        self.calibration.maturity()
    }

    /// Timestamp tau is measured from.
    #[must_use]
    pub const fn last_timestamp(&self) -> Timestamp {
        self.calibration.last_timestamp()
    }

    /// Risky reserve.
    pub const fn reserve_risky(&self) -> FixedDecimal {
        self.state.reserve_risky()
    }

    /// Stable reserve.
    pub const fn reserve_stable(&self) -> FixedDecimal {
        self.state.reserve_stable()
    }

    /// Total liquidity.
    pub const fn liquidity(&self) -> FixedDecimal {
        self.state.liquidity()
    }

    /// Last stored invariant.
    #[must_use]
    pub const fn invariant(&self) -> Invariant {
        self.state.invariant()
    }

    /// Time to maturity in years.
    #[must_use]
    pub fn tau_years(&self) -> f64 {
        self.calibration.tau_years()
    }

    /// Active or expired as seen at `now`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> PoolStatus {
        self.calibration.status(now)
    }

    /// Unscaled parameters handed to the pricing model.
    #[must_use]
    pub fn curve_params(&self) -> CurveParams {
        curve_params(&self.calibration)
    }

    // -- invariant ----------------------------------------------------------

    /// Invariant of the current reserves, without storing it.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if normalization overflows.
    pub fn compute_invariant(&self) -> Result<Invariant> {
        self.invariant_of(&self.state)
    }

    /// Recomputes, stores and returns the invariant.
    ///
    /// # Errors
    ///
    /// See [`compute_invariant`](Self::compute_invariant).
    pub fn calc_invariant(&mut self) -> Result<Invariant> {
        let invariant = self.compute_invariant()?;
        self.state.set_invariant(invariant);
        Ok(invariant)
    }

    /// Moves the clock to `timestamp`, shrinking tau, and recomputes the
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidCalibration`] for `u32::MAX`.
    pub fn advance_to(&mut self, timestamp: Timestamp) -> Result<Invariant> {
        self.calibration = self.calibration.at_timestamp(timestamp)?;
        let invariant = self.calc_invariant()?;
        debug!(
            pool_id = %self.pool_id(),
            timestamp = %timestamp,
            tau_years = self.tau_years(),
            invariant = %invariant,
            "engine clock advanced"
        );
        Ok(invariant)
    }

    // -- swaps --------------------------------------------------------------

    /// Simulates an exact-input swap and commits the new reserves.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DecimalMismatch`] if `amount_in` is not at the paying
    ///   token's width.
    /// - [`RmmError::InvariantRegression`] under
    ///   [`InvariantPolicy::Strict`]; nothing is committed.
    pub fn swap_exact_in(
        &mut self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapOutcome> {
        let (outcome, state) = self.simulate(direction, amount_in, false)?.into_parts();
        self.state = state;
        debug!(
            pool_id = %self.pool_id(),
            direction = %direction,
            amount_in = %outcome.amount_in(),
            amount_out = %outcome.amount_out(),
            invariant = %outcome.invariant_next(),
            "swap committed"
        );
        Ok(outcome)
    }

    /// [`swap_exact_in`](Self::swap_exact_in) with a human-readable float
    /// amount. Zero or negative amounts yield the zero outcome.
    ///
    /// # Errors
    ///
    /// - [`RmmError::NumericalDomain`] for NaN or infinite input.
    /// - Anything [`swap_exact_in`](Self::swap_exact_in) returns.
    pub fn swap_exact_in_f64(
        &mut self,
        direction: SwapDirection,
        amount_in: f64,
    ) -> Result<SwapOutcome> {
        let (input, output) = self.tokens(direction);
        if amount_in <= 0.0 {
            return Ok(SwapOutcome::zero(direction, input.decimals(), output.decimals()));
        }
        let amount = input.amount_from_f64(amount_in)?;
        self.swap_exact_in(direction, amount)
    }

    /// Simulates an exact-input swap against a copy of the state.
    ///
    /// # Errors
    ///
    /// Same as [`swap_exact_in`](Self::swap_exact_in).
    pub fn virtual_swap_exact_in(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapPreview> {
        self.simulate(direction, amount_in, true)
    }

    /// Previews several independent trade sizes from the current state.
    ///
    /// # Errors
    ///
    /// Fails on the first size that fails.
    pub fn preview(
        &self,
        direction: SwapDirection,
        sizes: &[FixedDecimal],
    ) -> Result<Vec<SwapOutcome>> {
        sizes
            .iter()
            .map(|size| Ok(*self.virtual_swap_exact_in(direction, *size)?.outcome()))
            .collect()
    }

    fn simulate(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
        is_virtual: bool,
    ) -> Result<SwapPreview> {
        let (input, output) = self.tokens(direction);
        amount_in.ensure_decimals(input.decimals())?;
        let nothing = SwapPreview::new(
            SwapOutcome::zero(direction, input.decimals(), output.decimals()),
            self.state,
        );
        if amount_in.is_zero() {
            return Ok(nothing);
        }

        let params = self.curve_params();
        let liquidity = self.state.liquidity();
        let invariant_last = self.compute_invariant()?;
        let k = invariant_last.to_f64();

        let effective_in = self.calibration.gamma().apply(&amount_in, Rounding::Down)?;
        let fee = amount_in.sub(&effective_in)?;

        let (same, opposite) = match direction {
            SwapDirection::RiskyIn => (self.state.reserve_risky(), self.state.reserve_stable()),
            SwapDirection::StableIn => (self.state.reserve_stable(), self.state.reserve_risky()),
        };
        let same_per_unit = per_unit(&same.add(&effective_in)?, &liquidity)?;
        let solved = match direction {
            SwapDirection::RiskyIn => {
                if same_per_unit >= 1.0 {
                    trace!(risky_per_unit = same_per_unit, "risky side saturated");
                    return Ok(nothing);
                }
                self.pricing.stable_given_risky(same_per_unit, &params, k)
            }
            SwapDirection::StableIn => {
                if (same_per_unit - k) / params.strike >= 1.0 {
                    trace!(stable_per_unit = same_per_unit, "stable side saturated");
                    return Ok(nothing);
                }
                self.pricing.risky_given_stable(same_per_unit, &params, k)
            }
        };
        let solved_opposite = scale(
            finite_or_zero(solved, "solved reserve"),
            opposite.decimals(),
            &liquidity,
        )?;
        let amount_out = match opposite.sub(&solved_opposite) {
            Ok(out) if !out.is_zero() => out,
            Ok(_) | Err(RmmError::NegativeAmount) => {
                trace!(%opposite, %solved_opposite, "swap would produce no output");
                return Ok(nothing);
            }
            Err(err) => return Err(err),
        };

        let next_same = same.add(&amount_in)?;
        let (next_risky, next_stable) = match direction {
            SwapDirection::RiskyIn => (next_same, solved_opposite),
            SwapDirection::StableIn => (solved_opposite, next_same),
        };
        let mut next = CurveState::new(next_risky, next_stable, liquidity, invariant_last);
        let invariant_next = self.invariant_of(&next)?;
        next.set_invariant(invariant_next);

        if invariant_next < invariant_last
            && !fee.is_zero()
            && self.regression_is_truncation(
                direction,
                next_same,
                solved_opposite,
                &amount_out,
                invariant_last,
            )?
        {
            trace!(%amount_in, %amount_out, "swap too small to clear truncation");
            return Ok(nothing);
        }
        let price_after = self.price_of(&next)?;

        if invariant_next < invariant_last {
            self.monitor.on_regression(&RegressionEvent {
                pool_id: self.pool_id(),
                direction,
                amount_in,
                last: invariant_last,
                next: invariant_next,
                is_virtual,
            });
            if self.policy == InvariantPolicy::Strict {
                return Err(RmmError::InvariantRegression {
                    last: invariant_last,
                    next: invariant_next,
                });
            }
        }

        let outcome = SwapOutcome::new(
            direction,
            amount_in,
            amount_out,
            fee,
            invariant_last,
            invariant_next,
            price_after,
        );
        Ok(SwapPreview::new(outcome, next))
    }

    // -- prices -------------------------------------------------------------

    /// Price of risky in stable implied by the curve, at 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if the price does not fit.
    pub fn reported_price_of_risky(&self) -> Result<FixedDecimal> {
        self.price_of(&self.state)
    }

    /// Alias of [`reported_price_of_risky`](Self::reported_price_of_risky).
    ///
    /// # Errors
    ///
    /// See [`reported_price_of_risky`](Self::reported_price_of_risky).
    pub fn spot_price(&self) -> Result<FixedDecimal> {
        self.reported_price_of_risky()
    }

    /// Marginal price of risky after a hypothetical swap, at 18 decimals.
    ///
    /// Zero for a zero input.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::DecimalMismatch`] if `amount_in` is not at the
    /// paying token's width.
    pub fn marginal_price_after_swap(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<FixedDecimal> {
        let (input, _) = self.tokens(direction);
        amount_in.ensure_decimals(input.decimals())?;
        if amount_in.is_zero() {
            return Ok(FixedDecimal::zero(LIQUIDITY_DECIMALS));
        }

        let params = self.curve_params();
        let gamma = self.gamma().as_fraction();
        let liquidity = self.state.liquidity();
        let amount_per_unit = per_unit(&amount_in, &liquidity)?;
        let price = match direction {
            SwapDirection::RiskyIn => {
                let risky = per_unit(&self.state.reserve_risky(), &liquidity)?;
                self.pricing
                    .marginal_price_risky_in(risky, amount_per_unit, &params, gamma)
            }
            SwapDirection::StableIn => {
                let stable = per_unit(&self.state.reserve_stable(), &liquidity)?;
                let k = self.compute_invariant()?.to_f64();
                self.pricing
                    .marginal_price_stable_in(stable, amount_per_unit, &params, gamma, k)
            }
        };
        price_to_fixed(price, "marginal price")
    }

    // -- liquidity ----------------------------------------------------------

    /// Amounts that accompany `amount` of `side` in a proportional
    /// allocate or remove.
    ///
    /// # Errors
    ///
    /// - [`RmmError::DecimalMismatch`] if `amount` is not at the side's width.
    /// - [`RmmError::DivisionByZero`] if the keyed reserve is zero.
    pub fn liquidity_quote(&self, amount: FixedDecimal, side: PoolSide) -> Result<LiquidityQuote> {
        let s = &self.state;
        match side {
            PoolSide::Risky => {
                amount.ensure_decimals(self.calibration.risky().decimals())?;
                let known = s.reserve_risky().raw();
                Ok(LiquidityQuote::new(
                    side,
                    amount,
                    s.reserve_stable().mul_div(amount.raw(), known)?,
                    s.liquidity().mul_div(amount.raw(), known)?,
                ))
            }
            PoolSide::Stable => {
                amount.ensure_decimals(self.calibration.stable().decimals())?;
                let known = s.reserve_stable().raw();
                Ok(LiquidityQuote::new(
                    side,
                    s.reserve_risky().mul_div(amount.raw(), known)?,
                    amount,
                    s.liquidity().mul_div(amount.raw(), known)?,
                ))
            }
            PoolSide::Liquidity => {
                amount.ensure_decimals(LIQUIDITY_DECIMALS)?;
                let known = s.liquidity().raw();
                Ok(LiquidityQuote::new(
                    side,
                    s.reserve_risky().mul_div(amount.raw(), known)?,
                    s.reserve_stable().mul_div(amount.raw(), known)?,
                    amount,
                ))
            }
        }
    }

    /// Reserves marked at external prices; both prices are 18-decimal
    /// values in a common numeraire.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::Overflow`] if a product does not fit.
    pub fn current_liquidity_value(&self, prices: &ReferencePrices) -> Result<LiquidityValue> {
        let risky_value = self
            .state
            .reserve_risky()
            .mul_fixed(&prices.risky(), LIQUIDITY_DECIMALS)?;
        let stable_value = self
            .state
            .reserve_stable()
            .mul_fixed(&prices.stable(), LIQUIDITY_DECIMALS)?;
        let total = risky_value.add(&stable_value)?;
        let per_liquidity = total.div_fixed(&self.state.liquidity(), LIQUIDITY_DECIMALS)?;
        Ok(LiquidityValue::new(per_liquidity, total))
    }

    /// Covered-call value `S − C(K, σ, τ, S)` per liquidity, and in total.
    ///
    /// # Errors
    ///
    /// Returns [`RmmError::InvalidPrice`] for a zero price.
    pub fn theoretical_liquidity_value(&self, price_of_risky: FixedDecimal) -> Result<LiquidityValue> {
        if price_of_risky.is_zero() {
            return Err(RmmError::InvalidPrice("price of risky must be positive"));
        }
        let spot = price_of_risky.to_f64();
        let premium = finite_or_zero(
            self.pricing.call_premium(spot, &self.curve_params()),
            "call premium",
        );
        let per_liquidity = price_to_fixed(spot - premium, "covered call value")?;
        let total = per_liquidity.mul_fixed(&self.state.liquidity(), LIQUIDITY_DECIMALS)?;
        Ok(LiquidityValue::new(per_liquidity, total))
    }

    // -- helpers ------------------------------------------------------------

    const fn tokens(&self, direction: SwapDirection) -> (Token, Token) {
        match direction {
            SwapDirection::RiskyIn => (self.calibration.risky(), self.calibration.stable()),
            SwapDirection::StableIn => (self.calibration.stable(), self.calibration.risky()),
        }
    }

    fn invariant_of(&self, state: &CurveState) -> Result<Invariant> {
        let risky = per_unit(&state.reserve_risky(), &state.liquidity())?;
        let stable = per_unit(&state.reserve_stable(), &state.liquidity())?;
        let k = self
            .pricing
            .invariant_given(risky, stable, &self.curve_params());
        Ok(Invariant::from_f64(finite_or_zero(k, "invariant")))
    }

    /// Whether keeping one more base unit of the output in the pool would
    /// hold the invariant. A single-unit output always qualifies: at that
    /// size the comparison is below float resolution.
    fn regression_is_truncation(
        &self,
        direction: SwapDirection,
        next_same: FixedDecimal,
        solved_opposite: FixedDecimal,
        amount_out: &FixedDecimal,
        invariant_last: Invariant,
    ) -> Result<bool> {
        if amount_out.raw() == 1 {
            return Ok(true);
        }
        let kept = solved_opposite.add(&FixedDecimal::from_raw(1, solved_opposite.decimals()))?;
        let (risky, stable) = match direction {
            SwapDirection::RiskyIn => (next_same, kept),
            SwapDirection::StableIn => (kept, next_same),
        };
        let liquidity = self.state.liquidity();
        let with_unit =
            self.invariant_of(&CurveState::new(risky, stable, liquidity, invariant_last))?;
        Ok(with_unit >= invariant_last)
    }

    fn price_of(&self, state: &CurveState) -> Result<FixedDecimal> {
        let risky = per_unit(&state.reserve_risky(), &state.liquidity())?;
        let price = self.pricing.reported_price(risky, &self.curve_params());
        price_to_fixed(price, "reported price")
    }
}

fn curve_params(calibration: &Calibration) -> CurveParams {
    CurveParams::new(
        calibration.strike().to_f64(),
        calibration.sigma().as_fraction(),
        calibration.tau_years(),
    )
}

fn ensure_liquidity(liquidity: &FixedDecimal) -> Result<()> {
    liquidity.ensure_decimals(LIQUIDITY_DECIMALS)?;
    if liquidity.is_zero() {
        return Err(RmmError::InvalidAmount("liquidity must be non-zero"));
    }
    Ok(())
}

/// `reserve / liquidity` at the reserve's width, as a float.
fn per_unit(reserve: &FixedDecimal, liquidity: &FixedDecimal) -> Result<f64> {
    Ok(reserve.div_fixed(liquidity, reserve.decimals())?.to_f64())
}

/// Truncates a per-unit float to `decimals` and multiplies by liquidity.
fn scale(per_unit: f64, decimals: Decimals, liquidity: &FixedDecimal) -> Result<FixedDecimal> {
    if per_unit <= 0.0 {
        return Ok(FixedDecimal::zero(decimals));
    }
    FixedDecimal::from_f64(per_unit, decimals)?.mul_fixed(liquidity, decimals)
}

fn price_to_fixed(value: f64, what: &'static str) -> Result<FixedDecimal> {
    let value = finite_or_zero(value, what);
    if value <= 0.0 {
        return Ok(FixedDecimal::zero(LIQUIDITY_DECIMALS));
    }
    FixedDecimal::from_f64(value, LIQUIDITY_DECIMALS)
}

// -- trait impls --------------------------------------------------------------

impl<P: PricingModel> SwapCurve for CurveEngine<P> {
    fn swap_exact_in(
        &mut self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapOutcome> {
        Self::swap_exact_in(self, direction, amount_in)
    }

    fn preview_exact_in(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<SwapOutcome> {
        Ok(*self.virtual_swap_exact_in(direction, amount_in)?.outcome())
    }

    fn spot_price(&self) -> Result<FixedDecimal> {
        self.reported_price_of_risky()
    }

    fn marginal_price_after(
        &self,
        direction: SwapDirection,
        amount_in: FixedDecimal,
    ) -> Result<FixedDecimal> {
        self.marginal_price_after_swap(direction, amount_in)
    }
}

impl<P: PricingModel> LiquidityCurve for CurveEngine<P> {
    fn total_liquidity(&self) -> FixedDecimal {
        self.state.liquidity()
    }

    fn quote_liquidity(&self, amount: FixedDecimal, side: PoolSide) -> Result<LiquidityQuote> {
        self.liquidity_quote(amount, side)
    }

    fn value_at(&self, prices: &ReferencePrices) -> Result<LiquidityValue> {
        self.current_liquidity_value(prices)
    }

    fn theoretical_value(&self, price_of_risky: FixedDecimal) -> Result<LiquidityValue> {
        self.theoretical_liquidity_value(price_of_risky)
    }
}

impl<P: PricingModel + Default> FromConfig<ReservesConfig> for CurveEngine<P> {
    fn from_config(config: &ReservesConfig) -> Result<Self> {
        config.validate()?;
        Self::from_reserves_with_model(
            config.calibration().build()?,
            config.reserve_risky()?,
            config.reserve_stable()?,
            config.liquidity()?,
            P::default(),
        )
    }
}

impl<P: PricingModel + Default> FromConfig<ReferencePriceConfig> for CurveEngine<P> {
    fn from_config(config: &ReferencePriceConfig) -> Result<Self> {
        config.validate()?;
        Self::from_reference_price_with_model(
            config.calibration().build()?,
            config.reference_price()?,
            config.liquidity()?,
            P::default(),
        )
    }
}

impl<P: PricingModel + Default> FromConfig<CurveConfig> for CurveEngine<P> {
    fn from_config(config: &CurveConfig) -> Result<Self> {
        match config {
            CurveConfig::Reserves(cfg) => <Self as FromConfig<ReservesConfig>>::from_config(cfg),
            CurveConfig::ReferencePrice(cfg) => {
                <Self as FromConfig<ReferencePriceConfig>>::from_config(cfg)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::engine::RecordingMonitor;
    use crate::domain::SECONDS_PER_YEAR;
    use crate::test_fixtures::{
        calibration, d18, d6, engine, engine_with, fx, reference_price_config, reserves_config,
        START,
    };

    const TOL: f64 = 1e-6;

    fn risky(text: &str) -> FixedDecimal {
        fx(text, d18())
    }

    fn stable(text: &str) -> FixedDecimal {
        fx(text, d6())
    }

    /// Overstates every solved reserve so swaps pay out too much.
    #[derive(Debug, Clone, Copy, Default)]
    struct LeakyPricing;

    impl PricingModel for LeakyPricing {
        fn std_normal_cdf(&self, x: f64) -> f64 {
            StandardPricing.std_normal_cdf(x)
        }

        fn std_normal_pdf(&self, x: f64) -> f64 {
            StandardPricing.std_normal_pdf(x)
        }

        fn inverse_std_normal_cdf(&self, p: f64) -> f64 {
            StandardPricing.inverse_std_normal_cdf(p)
        }

        fn stable_given_risky(&self, risky: f64, params: &CurveParams, invariant: f64) -> f64 {
            StandardPricing.stable_given_risky(risky, params, invariant) - 0.05
        }

        fn invariant_given(&self, risky: f64, stable: f64, params: &CurveParams) -> f64 {
            stable - StandardPricing.stable_given_risky(risky, params, 0.0)
        }
    }

    fn leaky_engine() -> CurveEngine<LeakyPricing> {
        let Ok(engine) = CurveEngine::from_reference_price_with_model(
            calibration(),
            risky("10"),
            risky("1"),
            LeakyPricing,
        ) else {
            panic!("expected Ok");
        };
        engine
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn reference_price_scenario() {
        let e = engine();
        assert!((e.reserve_risky().to_f64() - 0.480_061_194_161_627_5).abs() < 1e-12);
        assert_eq!(e.reserve_stable(), stable("4.800611"));
        assert_eq!(e.invariant(), Invariant::ZERO);

        let Ok(k) = e.compute_invariant() else {
            panic!("expected Ok");
        };
        assert!(k.to_f64().abs() < 1e-5);

        let Ok(price) = e.reported_price_of_risky() else {
            panic!("expected Ok");
        };
        assert!((price.to_f64() - 10.0).abs() < TOL);
    }

    #[test]
    fn reserves_scale_with_liquidity() {
        let one = engine();
        let many = engine_with(calibration(), "3");
        assert!(
            (many.reserve_risky().to_f64() - 3.0 * one.reserve_risky().to_f64()).abs() < 1e-12
        );
        assert_eq!(many.reserve_stable(), stable("14.401833"));
    }

    #[test]
    fn from_reserves_computes_invariant() {
        let cal = calibration();
        let Ok(e) = CurveEngine::from_reserves(
            cal,
            cal.risky().raw_amount(480_061_194_161_627_500),
            stable("4.800611"),
            risky("1"),
        ) else {
            panic!("expected Ok");
        };
        assert_ne!(e.invariant(), Invariant::ZERO);
        assert!(e.invariant().to_f64().abs() < 1e-5);
    }

    #[test]
    fn zero_liquidity_rejected() {
        let cal = calibration();
        let result = CurveEngine::from_reserves(cal, risky("0.5"), stable("5"), risky("0"));
        assert_eq!(
            result.err(),
            Some(RmmError::InvalidAmount("liquidity must be non-zero"))
        );
    }

    #[test]
    fn reserve_width_checked() {
        let cal = calibration();
        let result = CurveEngine::from_reserves(cal, stable("0.5"), stable("5"), risky("1"));
        assert_eq!(
            result.err(),
            Some(RmmError::DecimalMismatch {
                expected: 18,
                actual: 6
            })
        );
    }

    #[test]
    fn zero_reference_price_rejected() {
        let result = CurveEngine::from_reference_price(calibration(), risky("0"), risky("1"));
        assert!(matches!(result, Err(RmmError::InvalidPrice(_))));
    }

    #[test]
    fn accessors_mirror_calibration() {
        let e = engine();
        let cal = calibration();
        assert_eq!(e.pool_id(), cal.pool_id());
        assert_eq!(e.strike(), cal.strike());
        assert_eq!(e.sigma(), cal.sigma());
        assert_eq!(e.gamma(), cal.gamma());
        assert_eq!(e.maturity(), cal.maturity());
        assert_eq!(e.policy(), InvariantPolicy::Advisory);
        assert!((e.tau_years() - 1.0).abs() < 1e-12);
    }

    // -- swaps ----------------------------------------------------------------

    #[test]
    fn risky_in_swap_pays_stable() {
        let mut e = engine();
        let before = *e.state();
        let Ok(out) = e.swap_exact_in(SwapDirection::RiskyIn, risky("0.3")) else {
            panic!("expected Ok");
        };
        assert!(!out.is_zero());
        assert!(out.amount_out().cmp_value(&before.reserve_stable()).is_lt());
        assert!(out.invariant_next() >= out.invariant_last());
        assert_eq!(out.fee(), risky("0.003"));
        let Ok(expected_risky) = before.reserve_risky().add(&risky("0.3")) else {
            panic!("expected Ok");
        };
        assert_eq!(e.reserve_risky(), expected_risky);
        let Ok(expected_stable) = before.reserve_stable().sub(&out.amount_out()) else {
            panic!("expected Ok");
        };
        assert_eq!(e.reserve_stable(), expected_stable);
        assert_eq!(e.invariant(), out.invariant_next());
        // selling risky lowers its price
        assert!(out.price_after().to_f64() < 10.0);
        assert!(out.effective_price().to_f64() < 10.0);
    }

    #[test]
    fn stable_in_swap_pays_risky() {
        let mut e = engine();
        let before = e.reserve_risky();
        let Ok(out) = e.swap_exact_in(SwapDirection::StableIn, stable("2")) else {
            panic!("expected Ok");
        };
        assert!(!out.is_zero());
        assert!(out.amount_out().cmp_value(&before).is_lt());
        assert!(out.invariant_held());
        assert!(out.price_after().to_f64() > 10.0);
        // about 2 / 10 risky, less fee and slippage
        assert!(out.amount_out().to_f64() > 0.15 && out.amount_out().to_f64() < 0.2);
    }

    #[test]
    fn zero_amount_is_zero_outcome() {
        let mut e = engine();
        let before = *e.state();
        let Ok(out) = e.swap_exact_in(SwapDirection::RiskyIn, risky("0")) else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
        assert_eq!(*e.state(), before);
    }

    #[test]
    fn negative_float_amount_is_zero_outcome() {
        let mut e = engine();
        let before = *e.state();
        let Ok(out) = e.swap_exact_in_f64(SwapDirection::StableIn, -1.0) else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
        assert_eq!(out.amount_in().decimals(), d6());
        assert_eq!(*e.state(), before);
    }

    #[test]
    fn nan_float_amount_rejected() {
        let mut e = engine();
        assert!(matches!(
            e.swap_exact_in_f64(SwapDirection::RiskyIn, f64::NAN),
            Err(RmmError::NumericalDomain(_))
        ));
    }

    #[test]
    fn float_amount_matches_fixed_amount() {
        let mut a = engine();
        let mut b = engine();
        let Ok(x) = a.swap_exact_in_f64(SwapDirection::RiskyIn, 0.3) else {
            panic!("expected Ok");
        };
        let Ok(y) = b.swap_exact_in(SwapDirection::RiskyIn, risky("0.3")) else {
            panic!("expected Ok");
        };
        assert_eq!(x, y);
    }

    #[test]
    fn wrong_width_rejected() {
        let mut e = engine();
        assert_eq!(
            e.swap_exact_in(SwapDirection::RiskyIn, stable("1")).err(),
            Some(RmmError::DecimalMismatch {
                expected: 18,
                actual: 6
            })
        );
    }

    #[test]
    fn oversized_trade_is_zero_outcome() {
        let mut e = engine();
        let Ok(out) = e.swap_exact_in(SwapDirection::RiskyIn, risky("0.6")) else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
        let Ok(out) = e.swap_exact_in(SwapDirection::StableIn, stable("6")) else {
            panic!("expected Ok");
        };
        assert!(out.is_zero());
    }

    #[test]
    fn virtual_swap_leaves_state() {
        let e = engine();
        let before = *e.state();
        let Ok(preview) = e.virtual_swap_exact_in(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert_eq!(*e.state(), before);
        assert_ne!(*preview.state(), before);
        assert_eq!(preview.state().invariant(), preview.outcome().invariant_next());

        let mut committed = engine();
        let Ok(out) = committed.swap_exact_in(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert_eq!(out, *preview.outcome());
        assert_eq!(*committed.state(), *preview.state());
    }

    #[test]
    fn preview_sizes_are_independent() {
        let e = engine();
        let sizes = [risky("0.01"), risky("0.1"), risky("0.2")];
        let Ok(outcomes) = e.preview(SwapDirection::RiskyIn, &sizes) else {
            panic!("expected Ok");
        };
        assert_eq!(outcomes.len(), 3);
        // larger trades get a worse average price
        assert!(outcomes[0].effective_price().raw() > outcomes[1].effective_price().raw());
        assert!(outcomes[1].effective_price().raw() > outcomes[2].effective_price().raw());
    }

    #[test]
    fn advisory_regression_is_reported() {
        let recorder = Arc::new(RecordingMonitor::new());
        let mut e = leaky_engine().with_monitor(recorder.clone());
        let Ok(out) = e.swap_exact_in(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert!(!out.invariant_held());
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert!(!events[0].is_virtual);
        assert_eq!(events[0].next, out.invariant_next());
    }

    #[test]
    fn strict_regression_fails_without_commit() {
        let recorder = Arc::new(RecordingMonitor::new());
        let mut e = leaky_engine()
            .with_policy(InvariantPolicy::Strict)
            .with_monitor(recorder.clone());
        let before = *e.state();
        let result = e.swap_exact_in(SwapDirection::RiskyIn, risky("0.1"));
        assert!(matches!(result, Err(RmmError::InvariantRegression { .. })));
        assert_eq!(*e.state(), before);
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn healthy_swaps_report_nothing() {
        let recorder = Arc::new(RecordingMonitor::new());
        let mut e = engine()
            .with_policy(InvariantPolicy::Strict)
            .with_monitor(recorder.clone());
        let Ok(_) = e.swap_exact_in(SwapDirection::RiskyIn, risky("0.2")) else {
            panic!("expected Ok");
        };
        let Ok(_) = e.swap_exact_in(SwapDirection::StableIn, stable("1.5")) else {
            panic!("expected Ok");
        };
        assert!(recorder.is_empty());
    }

    #[test]
    fn dust_swaps_never_lower_the_invariant() {
        let recorder = Arc::new(RecordingMonitor::new());
        let mut e = engine()
            .with_policy(InvariantPolicy::Strict)
            .with_monitor(recorder.clone());
        let before = *e.state();
        for raw in 1..=200u128 {
            let Ok(out) = e.swap_exact_in(SwapDirection::RiskyIn, FixedDecimal::from_raw(raw, d18()))
            else {
                panic!("dust swap of {raw} wei failed");
            };
            assert!(out.is_zero(), "{raw} wei paid out {}", out.amount_out());
        }
        assert_eq!(*e.state(), before);
        assert!(recorder.is_empty());
    }

    // -- prices ---------------------------------------------------------------

    #[test]
    fn marginal_price_zero_for_zero_input() {
        let e = engine();
        let Ok(p) = e.marginal_price_after_swap(SwapDirection::RiskyIn, risky("0")) else {
            panic!("expected Ok");
        };
        assert!(p.is_zero());
    }

    #[test]
    fn marginal_prices_bracket_spot() {
        let e = engine();
        let Ok(sell) = e.marginal_price_after_swap(SwapDirection::RiskyIn, risky("0.000001")) else {
            panic!("expected Ok");
        };
        let Ok(buy) = e.marginal_price_after_swap(SwapDirection::StableIn, stable("0.00001")) else {
            panic!("expected Ok");
        };
        assert!((sell.to_f64() - 9.9).abs() < 1e-3);
        assert!((buy.to_f64() - 10.0 / 0.99).abs() < 1e-3);

        let Ok(deeper) = e.marginal_price_after_swap(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert!(deeper.raw() < sell.raw());
    }

    #[test]
    fn marginal_price_matches_post_swap_price_without_fee() {
        let e = engine_with(calibration().without_fee(), "1");
        let Ok(marginal) = e.marginal_price_after_swap(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        let Ok(preview) = e.virtual_swap_exact_in(SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert!((marginal.to_f64() - preview.outcome().price_after().to_f64()).abs() < 1e-4);
    }

    // -- liquidity ------------------------------------------------------------

    #[test]
    fn liquidity_quote_is_proportional() {
        let e = engine_with(calibration(), "2");
        let Ok(q) = e.liquidity_quote(risky("1"), PoolSide::Liquidity) else {
            panic!("expected Ok");
        };
        assert_eq!(q.keyed_on(), PoolSide::Liquidity);
        assert_eq!(q.delta_liquidity(), risky("1"));
        assert_eq!(q.delta_risky().raw(), e.reserve_risky().raw() / 2);
        assert_eq!(q.delta_stable().raw(), e.reserve_stable().raw() / 2);

        let Ok(by_stable) = e.liquidity_quote(q.delta_stable(), PoolSide::Stable) else {
            panic!("expected Ok");
        };
        assert_eq!(by_stable.delta_stable(), q.delta_stable());
        assert!(by_stable.delta_liquidity().raw() <= risky("1").raw());
    }

    #[test]
    fn liquidity_quote_checks_width() {
        let e = engine();
        assert_eq!(
            e.liquidity_quote(risky("1"), PoolSide::Stable).err(),
            Some(RmmError::DecimalMismatch {
                expected: 6,
                actual: 18
            })
        );
    }

    #[test]
    fn liquidity_quote_on_empty_side() {
        let cal = calibration();
        let Ok(e) = CurveEngine::from_reserves(cal, risky("0"), stable("5"), risky("1")) else {
            panic!("expected Ok");
        };
        assert_eq!(
            e.liquidity_quote(risky("1"), PoolSide::Risky).err(),
            Some(RmmError::DivisionByZero)
        );
    }

    #[test]
    fn current_value_marks_reserves() {
        let e = engine_with(calibration(), "2");
        let Ok(prices) = ReferencePrices::from_f64(10.0, 1.0) else {
            panic!("expected Ok");
        };
        let Ok(value) = e.current_liquidity_value(&prices) else {
            panic!("expected Ok");
        };
        let expected = e.reserve_risky().to_f64() * 10.0 + e.reserve_stable().to_f64();
        assert!((value.total().to_f64() - expected).abs() < 1e-9);
        assert!((value.per_liquidity().to_f64() - expected / 2.0).abs() < 1e-9);
    }

    #[test]
    fn theoretical_value_is_covered_call() {
        let e = engine();
        let Ok(value) = e.theoretical_liquidity_value(risky("10")) else {
            panic!("expected Ok");
        };
        assert!((value.per_liquidity().to_f64() - (10.0 - 0.398_776_1)).abs() < TOL);
        assert_eq!(value.per_liquidity(), value.total());
        assert!(matches!(
            e.theoretical_liquidity_value(risky("0")),
            Err(RmmError::InvalidPrice(_))
        ));
    }

    // -- clock ----------------------------------------------------------------

    #[test]
    fn advance_to_shrinks_tau() {
        let mut e = engine();
        let Ok(_) = e.advance_to(Timestamp::new(START + SECONDS_PER_YEAR / 2)) else {
            panic!("expected Ok");
        };
        assert!((e.tau_years() - 0.5).abs() < 1e-6);
        // less time value: the same reserves now sit below the curve
        assert!(e.invariant() < Invariant::ZERO);
    }

    #[test]
    fn expired_pool_status() {
        let mut e = engine();
        assert_eq!(e.status(Timestamp::new(START)), PoolStatus::Active);
        assert_eq!(e.status(e.maturity()), PoolStatus::Expired);
        let Ok(_) = e.advance_to(Timestamp::new(START + 2 * SECONDS_PER_YEAR)) else {
            panic!("expected Ok");
        };
        assert_eq!(e.calibration().tau_seconds(), 0);
    }

    // -- traits ---------------------------------------------------------------

    #[test]
    fn trait_surface_delegates() {
        let mut e = engine();
        let Ok(preview) = SwapCurve::preview_exact_in(&e, SwapDirection::RiskyIn, risky("0.1"))
        else {
            panic!("expected Ok");
        };
        let Ok(out) = SwapCurve::swap_exact_in(&mut e, SwapDirection::RiskyIn, risky("0.1")) else {
            panic!("expected Ok");
        };
        assert_eq!(preview, out);
        assert_eq!(LiquidityCurve::total_liquidity(&e), risky("1"));
    }

    #[test]
    fn from_config_variants() {
        let Ok(by_price) =
            CurveEngine::<StandardPricing>::from_config(&reference_price_config())
        else {
            panic!("expected Ok");
        };
        assert_eq!(by_price.reserve_stable(), engine().reserve_stable());

        let cfg = CurveConfig::Reserves(reserves_config());
        let Ok(by_reserves) = CurveEngine::<StandardPricing>::from_config(&cfg) else {
            panic!("expected Ok");
        };
        assert_eq!(by_reserves.reserve_stable(), stable("4.800611"));
        assert!(by_reserves.invariant().to_f64().abs() < 1e-5);
    }
}
