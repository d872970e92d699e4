//! Option-style quoting over a curve engine.
//!
//! [`QuoteBuilder`] reads an engine without mutating it and reports the
//! Black–Scholes view of the pool: call delta and premium, moneyness, and
//! the theoretical fee income that offsets time decay between two
//! timestamps.

mod quote_builder;

pub use quote_builder::QuoteBuilder;
