//! Integer-domain arithmetic helpers.
//!
//! Everything that has to agree bit-for-bit with the contract goes through
//! these helpers: products are formed in 256 bits, divided with an explicit
//! [`Rounding`](crate::domain::Rounding), then narrowed back to `u128`.

mod mul_div;

pub use mul_div::{mul_div, narrow, pow10, wide_div};
