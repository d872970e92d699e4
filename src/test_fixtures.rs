//! Shared fixtures for unit tests: a one-year, strike-10 pool.

#![allow(clippy::panic)]

use alloy_primitives::Address;

use crate::config::{ReferencePriceConfig, ReservesConfig};
use crate::domain::{
    Calibration, Decimals, EngineIdentity, FixedDecimal, Percentage, Timestamp, Token,
    SECONDS_PER_YEAR,
};
use crate::engine::CurveEngine;

pub(crate) const START: u32 = 1_700_000_000;

pub(crate) fn d6() -> Decimals {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    d
}

pub(crate) fn d18() -> Decimals {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    d
}

pub(crate) fn risky() -> Token {
    Token::new(Address::repeat_byte(0x01), d18())
}

pub(crate) fn stable() -> Token {
    Token::new(Address::repeat_byte(0x02), d6())
}

pub(crate) fn fx(text: &str, decimals: Decimals) -> FixedDecimal {
    let Ok(v) = FixedDecimal::parse(text, decimals) else {
        panic!("valid decimal {text}");
    };
    v
}

/// Strike 10, sigma 10%, one year to maturity, 1% fee.
pub(crate) fn calibration() -> Calibration {
    let Ok(engine) = EngineIdentity::new(Address::repeat_byte(0x11), risky(), stable()) else {
        panic!("distinct tokens");
    };
    let Ok(cal) = Calibration::new(
        engine,
        fx("10", d6()),
        Percentage::new(1000),
        Timestamp::new(START + SECONDS_PER_YEAR),
        Percentage::new(9900),
        Timestamp::new(START),
    ) else {
        panic!("valid calibration");
    };
    cal
}

pub(crate) fn reserves_config() -> ReservesConfig {
    let cal = calibration();
    let Ok(cfg) = ReservesConfig::new(
        &cal,
        cal.risky().raw_amount(480_061_194_161_627_500),
        cal.stable().raw_amount(4_800_611),
        fx("1", d18()),
    ) else {
        panic!("valid reserves config");
    };
    cfg
}

pub(crate) fn reference_price_config() -> ReferencePriceConfig {
    let Ok(cfg) = ReferencePriceConfig::new(&calibration(), fx("10", d18()), fx("1", d18()))
    else {
        panic!("valid reference price config");
    };
    cfg
}

/// Engine at the money: reference price equal to the strike, one unit of
/// liquidity.
pub(crate) fn engine() -> CurveEngine {
    engine_with(calibration(), "1")
}

pub(crate) fn engine_with(calibration: Calibration, liquidity: &str) -> CurveEngine {
    let Ok(engine) =
        CurveEngine::from_reference_price(calibration, fx("10", d18()), fx(liquidity, d18()))
    else {
        panic!("valid engine");
    };
    engine
}
