//! # RMM Engine
//!
//! Off-chain simulation of replicating market maker pools (RMM-01): the
//! covered-call trading curve, its swaps, liquidity quotes and valuations,
//! reproduced with the same truncating fixed-point arithmetic as the
//! on-chain contracts.
//!
//! This crate provides domain types, a pluggable pricing model, the curve
//! engine itself, option-style quoting, declarative configuration and a
//! caller-owned pool registry.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rmm-engine = "0.1"
//! ```
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use alloy_primitives::Address;
//! use rmm_engine::prelude::*;
//!
//! // 1. Define the risky/stable pair deployed by one engine
//! let weth = Token::new(Address::repeat_byte(1), Decimals::new(18).expect("valid decimals"));
//! let usdc = Token::new(Address::repeat_byte(2), Decimals::new(6).expect("valid decimals"));
//! let engine_id = EngineIdentity::new(Address::repeat_byte(0x11), weth, usdc).expect("distinct");
//!
//! // 2. Calibrate: strike 10, 10% volatility, one year, 1% fee
//! let now = 1_700_000_000;
//! let calibration = Calibration::new(
//!     engine_id,
//!     usdc.parse_amount("10").expect("valid strike"),
//!     Percentage::new(1_000),
//!     Timestamp::new(now + SECONDS_PER_YEAR),
//!     Percentage::new(9_900),
//!     Timestamp::new(now),
//! )
//! .expect("valid calibration");
//!
//! // 3. Seed the curve at a reference price
//! let d18 = Decimals::new(18).expect("valid decimals");
//! let mut engine = CurveEngine::from_reference_price(
//!     calibration,
//!     FixedDecimal::parse("10", d18).expect("valid price"),
//!     FixedDecimal::parse("1", d18).expect("valid liquidity"),
//! )
//! .expect("engine");
//!
//! // 4. Sell 0.3 risky for stable
//! let outcome = engine
//!     .swap_exact_in(SwapDirection::RiskyIn, weth.parse_amount("0.3").expect("valid amount"))
//!     .expect("swap succeeded");
//!
//! assert!(outcome.amount_out().raw() > 0);
//! assert!(outcome.fee().raw() > 0);
//! assert!(outcome.invariant_held());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  CurveConfig / PoolSnapshot
//! └──────┬───────┘
//!        │ create(&config) / refresh(&snapshot)
//!        ▼
//! ┌──────────────┐
//! │ Factory and   │  validate config, build engines
//! │ Registry      │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐        ┌──────────────┐
//! │ CurveEngine   │◄──────│ QuoteBuilder  │
//! └──────┬───────┘        └──────────────┘
//!        │ f64 curve math          │
//!        ▼                         ▼
//! ┌──────────────┐
//! │ PricingModel  │  Φ, φ, Φ⁻¹, Black–Scholes, trading function
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │   Domain      │  FixedDecimal, Calibration, PoolId, Invariant, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`FixedDecimal`](domain::FixedDecimal), [`Calibration`](domain::Calibration), [`PoolId`](domain::PoolId), etc. |
//! | [`pricing`] | [`PricingModel`](pricing::PricingModel) collaborator and [`StandardPricing`](pricing::StandardPricing) |
//! | [`engine`] | [`CurveEngine`](engine::CurveEngine), regression policy and monitors |
//! | [`quote`] | [`QuoteBuilder`](quote::QuoteBuilder) for delta, premium and theoretical fees |
//! | [`traits`] | Core abstractions: [`SwapCurve`](traits::SwapCurve), [`LiquidityCurve`](traits::LiquidityCurve), [`FromConfig`](traits::FromConfig), [`InvariantMonitor`](traits::InvariantMonitor) |
//! | [`config`] | Serializable blueprints: [`CurveConfig`](config::CurveConfig), [`PoolSnapshot`](config::PoolSnapshot) |
//! | [`factory`] | [`DefaultEngineFactory`](factory::DefaultEngineFactory) for config-driven construction |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) keyed by pool id |
//! | [`math`] | 256-bit `mul_div` with explicit rounding |
//! | [`error`] | [`RmmError`](error::RmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber: `debug`
//! for construction, commits and registry lifecycle, `trace` for sanitized
//! pricing output, and `warn` from the default
//! [`TracingMonitor`](engine::TracingMonitor).

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod factory;
pub mod math;
pub mod prelude;
pub mod pricing;
pub mod quote;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_fixtures;
