//! Option-pricing and trading-function math on unscaled floats.
//!
//! [`PricingModel`] is the seam between the fixed-point engine and the
//! numerical library. [`StandardPricing`] is the built-in backend; tests or
//! callers that need a different quantile or CDF implementation provide their
//! own type and construct engines with it.

mod model;
pub mod normal;
mod standard;

pub(crate) use model::finite_or_zero;
pub use model::{CurveParams, PricingModel};
pub use standard::StandardPricing;
