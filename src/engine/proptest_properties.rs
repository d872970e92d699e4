//! Property-based tests using `proptest` for curve-engine behavior.
//!
//! 1. **Invariant preservation** — fee-paying swaps never lower the invariant.
//! 2. **Bounded output** — a swap never pays out the whole opposite reserve.
//! 3. **Quote proportionality** — keying a quote on either side agrees.
//! 4. **Decimal round trip** — short decimals survive a float round trip.
//! 5. **Fee-free reversibility** — swapping back returns the input within
//!    one smallest unit of the coarser token, at equal and mixed widths.

use alloy_primitives::Address;
use proptest::prelude::*;

use super::CurveEngine;
use crate::domain::{
    Calibration, Decimals, EngineIdentity, FixedDecimal, PoolSide, SwapDirection, Token,
};
use crate::test_fixtures::{calibration, d18, d6, fx};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine_at(price_cents: u32, liquidity: &str) -> CurveEngine {
    let price = FixedDecimal::from_raw(u128::from(price_cents) * 10u128.pow(16), d18());
    let Ok(engine) = CurveEngine::from_reference_price(calibration(), price, fx(liquidity, d18()))
    else {
        panic!("valid engine");
    };
    engine
}

/// Both tokens at 6 decimals, no fee.
fn six_decimal_fee_free_engine() -> CurveEngine {
    let base = calibration();
    let risky = Token::new(Address::repeat_byte(0x01), d6());
    let Ok(identity) = EngineIdentity::new(base.engine().address(), risky, base.stable()) else {
        panic!("distinct tokens");
    };
    let Ok(cal) = Calibration::new(
        identity,
        base.strike(),
        base.sigma(),
        base.maturity(),
        base.gamma(),
        base.last_timestamp(),
    ) else {
        panic!("valid calibration");
    };
    let Ok(engine) =
        CurveEngine::from_reference_price(cal.without_fee(), fx("10", d18()), fx("1", d18()))
    else {
        panic!("valid engine");
    };
    engine
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reference price between 9.00 and 11.00, in cents.
fn price_strategy() -> impl Strategy<Value = u32> {
    900u32..=1_100u32
}

/// Risky input between 0.001 and 0.2 (18 decimals).
fn risky_in_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..=200_000_000_000_000_000u128
}

/// Stable input between 0.01 and 2 (6 decimals).
fn stable_in_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=2_000_000u128
}

fn decimals_strategy() -> impl Strategy<Value = u8> {
    prop_oneof![Just(6u8), Just(8u8), Just(18u8)]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn risky_in_preserves_invariant(price in price_strategy(), raw in risky_in_strategy()) {
        let mut engine = engine_at(price, "1");
        let Ok(out) = engine.swap_exact_in(SwapDirection::RiskyIn, FixedDecimal::from_raw(raw, d18())) else {
            panic!("expected Ok");
        };
        prop_assert!(out.invariant_held());
    }

    #[test]
    fn stable_in_preserves_invariant(price in price_strategy(), raw in stable_in_strategy()) {
        let mut engine = engine_at(price, "1");
        let Ok(out) = engine.swap_exact_in(SwapDirection::StableIn, FixedDecimal::from_raw(raw, d6())) else {
            panic!("expected Ok");
        };
        prop_assert!(out.invariant_held());
    }

    #[test]
    fn output_stays_below_reserve(price in price_strategy(), raw in risky_in_strategy()) {
        let engine = engine_at(price, "2.5");
        let reserve = engine.reserve_stable();
        let Ok(preview) = engine.virtual_swap_exact_in(SwapDirection::RiskyIn, FixedDecimal::from_raw(raw, d18())) else {
            panic!("expected Ok");
        };
        prop_assert!(preview.outcome().amount_out().raw() < reserve.raw());
        prop_assert_eq!(engine.reserve_stable(), reserve);
    }

    #[test]
    fn quotes_agree_across_sides(price in price_strategy(), share in 1u128..=1_000u128) {
        let engine = engine_at(price, "1");
        let delta_liquidity = FixedDecimal::from_raw(share * 10u128.pow(15), d18());
        let Ok(by_liquidity) = engine.liquidity_quote(delta_liquidity, PoolSide::Liquidity) else {
            panic!("expected Ok");
        };
        prop_assume!(!by_liquidity.delta_risky().is_zero());
        let Ok(by_risky) = engine.liquidity_quote(by_liquidity.delta_risky(), PoolSide::Risky) else {
            panic!("expected Ok");
        };
        let back = by_risky.delta_liquidity().raw();
        // truncation loses at most liquidity / reserve units, plus one
        let slack = engine.liquidity().raw() / engine.reserve_risky().raw() + 1;
        prop_assert!(back <= delta_liquidity.raw());
        prop_assert!(delta_liquidity.raw() - back <= slack);
    }

    #[test]
    fn short_decimals_survive_float_round_trip(dec in decimals_strategy(), raw in 0u128..1_000_000_000_000u128) {
        let Ok(decimals) = Decimals::new(dec) else {
            panic!("valid decimals");
        };
        let value = FixedDecimal::from_raw(raw, decimals);
        let Ok(back) = FixedDecimal::from_f64(value.to_f64(), decimals) else {
            panic!("expected Ok");
        };
        prop_assert_eq!(back, value);
        let Ok(parsed) = FixedDecimal::parse(&value.to_string(), decimals) else {
            panic!("expected Ok");
        };
        prop_assert_eq!(parsed, value);
    }

    #[test]
    fn fee_free_round_trip(raw in 1_000u128..=200_000u128) {
        let mut engine = six_decimal_fee_free_engine();
        let amount = FixedDecimal::from_raw(raw, d6());
        let Ok(there) = engine.swap_exact_in(SwapDirection::RiskyIn, amount) else {
            panic!("expected Ok");
        };
        prop_assume!(!there.is_zero());
        let Ok(back) = engine.swap_exact_in(SwapDirection::StableIn, there.amount_out()) else {
            panic!("expected Ok");
        };
        prop_assert!(back.amount_out().raw().abs_diff(raw) <= 1);
    }

    #[test]
    fn fee_free_round_trip_across_widths(raw in risky_in_strategy()) {
        let Ok(mut engine) = CurveEngine::from_reference_price(
            calibration().without_fee(),
            fx("10", d18()),
            fx("1", d18()),
        ) else {
            panic!("valid engine");
        };
        let amount = FixedDecimal::from_raw(raw, d18());
        let Ok(there) = engine.swap_exact_in(SwapDirection::RiskyIn, amount) else {
            panic!("expected Ok");
        };
        prop_assume!(!there.is_zero());
        let Ok(back) = engine.swap_exact_in(SwapDirection::StableIn, there.amount_out()) else {
            panic!("expected Ok");
        };
        // drift stays under one unit of the 6-decimal side, in wei
        let coarse_unit = 10u128.pow(18 - 6);
        prop_assert!(back.amount_out().raw().abs_diff(raw) < coarse_unit);
    }
}
