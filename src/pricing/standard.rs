//! Default pricing backend.

use super::{normal, PricingModel};

/// [`PricingModel`] backed by `libm` special functions.
///
/// # Examples
///
/// ```
/// use rmm_engine::pricing::{CurveParams, PricingModel, StandardPricing};
///
/// let model = StandardPricing;
/// let params = CurveParams::new(10.0, 0.1, 1.0);
///
/// // At-the-money: the curve's spot price equals the reference price.
/// let x = 1.0 - model.call_delta(10.0, &params);
/// assert!((model.reported_price(x, &params) - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardPricing;

impl PricingModel for StandardPricing {
    #[inline]
    fn std_normal_cdf(&self, x: f64) -> f64 {
        normal::std_normal_cdf(x)
    }

    #[inline]
    fn std_normal_pdf(&self, x: f64) -> f64 {
        normal::std_normal_pdf(x)
    }

    #[inline]
    fn inverse_std_normal_cdf(&self, p: f64) -> f64 {
        normal::inverse_std_normal_cdf(p)
    }
}
