//! The pricing collaborator seam.
//!
//! The engine owns fixed-point scaling; everything behind [`PricingModel`]
//! works on unscaled `f64` quantities *per unit of liquidity*: `risky` is
//! the normalized risky reserve in `[0, 1]`, `stable` the normalized stable
//! reserve in `[invariant, strike + invariant]`.
//!
//! Implementors supply the three normal-distribution primitives; the RMM-01
//! trading function, its inverse, Black–Scholes readouts and the marginal
//! prices are provided on top of them.

use core::fmt::Debug;

use tracing::trace;

/// Unscaled curve parameters: strike, sigma and tau in years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Strike in stable units.
    pub strike: f64,
    /// Annualized volatility as a fraction (`0.1` = 10%).
    pub sigma: f64,
    /// Time to maturity in years.
    pub tau: f64,
}

impl CurveParams {
    /// Bundles the parameters.
    #[must_use]
    pub const fn new(strike: f64, sigma: f64, tau: f64) -> Self {
        Self { strike, sigma, tau }
    }

    /// `σ√τ`, clamped at zero for negative tau.
    #[must_use]
    pub fn sigma_sqrt_tau(&self) -> f64 {
        self.sigma * libm::sqrt(self.tau.max(0.0))
    }

    /// Copy with a different tau.
    #[must_use]
    pub const fn with_tau(&self, tau: f64) -> Self {
        Self { tau, ..*self }
    }
}

/// Closed-form option and trading-function math consumed by the engine.
///
/// # Contract
///
/// - Methods never panic. Inputs outside a formula's domain yield NaN or an
///   infinity; the engine sanitizes those to zero.
/// - Marginal prices return exactly `0.0` for a non-positive trade size.
pub trait PricingModel: Debug + Clone + Send + Sync {
    // -- Primitives ---------------------------------------------------------

    /// `Φ(x)`.
    fn std_normal_cdf(&self, x: f64) -> f64;

    /// `φ(x)`.
    fn std_normal_pdf(&self, x: f64) -> f64;

    /// `Φ⁻¹(p)`, `±∞` at the endpoints.
    fn inverse_std_normal_cdf(&self, p: f64) -> f64;

    /// `d/dp Φ⁻¹(p) = 1 / φ(Φ⁻¹(p))`.
    fn quantile_prime(&self, p: f64) -> f64 {
        1.0 / self.std_normal_pdf(self.inverse_std_normal_cdf(p))
    }

    // -- Black–Scholes ------------------------------------------------------

    /// `d1 = (ln(S/K) + σ²τ/2) / (σ√τ)`.
    fn call_d1(&self, spot: f64, params: &CurveParams) -> f64 {
        let vol = params.sigma_sqrt_tau();
        (libm::log(spot / params.strike) + 0.5 * vol * vol) / vol
    }

    /// Call delta `Φ(d1)`; a step function at expiry.
    fn call_delta(&self, spot: f64, params: &CurveParams) -> f64 {
        if params.tau <= 0.0 {
            return if spot > params.strike { 1.0 } else { 0.0 };
        }
        self.std_normal_cdf(self.call_d1(spot, params))
    }

    /// Call premium `S·Φ(d1) − K·Φ(d1 − σ√τ)`; intrinsic value at expiry.
    fn call_premium(&self, spot: f64, params: &CurveParams) -> f64 {
        if params.tau <= 0.0 || spot <= 0.0 {
            return (spot - params.strike).max(0.0);
        }
        let d1 = self.call_d1(spot, params);
        let d2 = d1 - params.sigma_sqrt_tau();
        spot * self.std_normal_cdf(d1) - params.strike * self.std_normal_cdf(d2)
    }

    // -- Trading function ---------------------------------------------------

    /// `y = K·Φ(Φ⁻¹(1 − x) − σ√τ) + k`.
    fn stable_given_risky(&self, risky: f64, params: &CurveParams, invariant: f64) -> f64 {
        let z = self.inverse_std_normal_cdf(1.0 - risky) - params.sigma_sqrt_tau();
        params.strike * self.std_normal_cdf(z) + invariant
    }

    /// `x = 1 − Φ(Φ⁻¹((y − k) / K) + σ√τ)`.
    fn risky_given_stable(&self, stable: f64, params: &CurveParams, invariant: f64) -> f64 {
        let z = self.inverse_std_normal_cdf((stable - invariant) / params.strike)
            + params.sigma_sqrt_tau();
        1.0 - self.std_normal_cdf(z)
    }

    /// `k = y − K·Φ(Φ⁻¹(1 − x) − σ√τ)`.
    fn invariant_given(&self, risky: f64, stable: f64, params: &CurveParams) -> f64 {
        stable - self.stable_given_risky(risky, params, 0.0)
    }

    /// Spot price of risky implied by the curve at `risky`:
    /// `K·φ(Φ⁻¹(1 − x) − σ√τ)·Φ⁻¹'(1 − x)`.
    fn reported_price(&self, risky: f64, params: &CurveParams) -> f64 {
        let p = 1.0 - risky;
        let z = self.inverse_std_normal_cdf(p) - params.sigma_sqrt_tau();
        params.strike * self.std_normal_pdf(z) * self.quantile_prime(p)
    }

    // -- Marginal prices ----------------------------------------------------

    /// Stable received per marginal risky after paying `amount_in` risky.
    fn marginal_price_risky_in(
        &self,
        risky: f64,
        amount_in: f64,
        params: &CurveParams,
        gamma: f64,
    ) -> f64 {
        if amount_in <= 0.0 {
            return 0.0;
        }
        let u = 1.0 - risky - gamma * amount_in;
        let z = self.inverse_std_normal_cdf(u) - params.sigma_sqrt_tau();
        gamma * params.strike * self.std_normal_pdf(z) * self.quantile_prime(u)
    }

    /// Stable paid per marginal risky after paying `amount_in` stable.
    fn marginal_price_stable_in(
        &self,
        stable: f64,
        amount_in: f64,
        params: &CurveParams,
        gamma: f64,
        invariant: f64,
    ) -> f64 {
        if amount_in <= 0.0 {
            return 0.0;
        }
        let u = (stable + gamma * amount_in - invariant) / params.strike;
        let z = self.inverse_std_normal_cdf(u) + params.sigma_sqrt_tau();
        let risky_per_stable = gamma * self.std_normal_pdf(z) * self.quantile_prime(u) / params.strike;
        1.0 / risky_per_stable
    }
}

/// Replaces a non-finite pricing output with zero.
///
/// Every layer that reads a [`PricingModel`] result goes through this, so a
/// NaN or infinity from the collaborator never reaches fixed-point code.
pub(crate) fn finite_or_zero(value: f64, what: &'static str) -> f64 {
    if value.is_finite() {
        value
    } else {
        trace!(what, value, "non-finite pricing output replaced by zero");
        0.0
    }
}
