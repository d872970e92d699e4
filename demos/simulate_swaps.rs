//! RMM-01 swap simulation example.
//!
//! Builds a covered-call curve from a reference price, previews a ladder
//! of trade sizes, commits a round trip and advances the pool clock.
//! Set `RUST_LOG=rmm_engine=debug` to watch the engine's events.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=rmm_engine=debug cargo run --example simulate_swaps
//! ```

use alloy_primitives::Address;
use rmm_engine::domain::{
    Calibration, Decimals, EngineIdentity, FixedDecimal, Percentage, SwapDirection, Timestamp,
    Token, SECONDS_PER_YEAR,
};
use rmm_engine::engine::{CurveEngine, InvariantPolicy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== RMM-01 covered-call curve ===\n");

    // ── 1. Tokens and calibration ───────────────────────────────────────
    let weth = Token::new(Address::repeat_byte(0x01), Decimals::new(18)?);
    let usdc = Token::new(Address::repeat_byte(0x02), Decimals::new(6)?);
    let identity = EngineIdentity::new(Address::repeat_byte(0x11), weth, usdc)?;

    let now = Timestamp::now();
    let calibration = Calibration::new(
        identity,
        usdc.parse_amount("10")?,
        Percentage::new(1_000),
        now.saturating_add(SECONDS_PER_YEAR),
        Percentage::new(9_900),
        now,
    )?;
    println!("Pool id:  {}", calibration.pool_id());
    println!("Strike:   {}", calibration.strike());
    println!("Tau:      {:.4} years", calibration.tau_years());

    // ── 2. Seed the curve at the strike ─────────────────────────────────
    let wad = Decimals::new(18)?;
    let mut engine = CurveEngine::from_reference_price(
        calibration,
        FixedDecimal::parse("10", wad)?,
        FixedDecimal::parse("1", wad)?,
    )?
    .with_policy(InvariantPolicy::Strict);

    println!("\nInitial state: {}", engine.state());
    println!("Reported price: {}", engine.reported_price_of_risky()?);

    // ── 3. Preview a ladder of risky sales ──────────────────────────────
    println!("\n--- Preview: sell risky ---");
    let sizes = ["0.01", "0.05", "0.1", "0.2", "0.4"]
        .iter()
        .map(|s| weth.parse_amount(s))
        .collect::<Result<Vec<_>, _>>()?;
    for outcome in engine.preview(SwapDirection::RiskyIn, &sizes)? {
        println!(
            "  in {:>6}  out {:>10}  avg {:>8}  after {:>8}",
            outcome.amount_in(),
            outcome.amount_out(),
            outcome.effective_price(),
            outcome.price_after()
        );
    }

    // ── 4. Commit a sale, then buy back ─────────────────────────────────
    let sell = weth.parse_amount("0.1")?;
    let sold = engine.swap_exact_in(SwapDirection::RiskyIn, sell)?;
    println!("\nCommitted: {sold}");
    let bought = engine.swap_exact_in(SwapDirection::StableIn, sold.amount_out())?;
    println!("Committed: {bought}");
    let lost = sell.sub(&bought.amount_out()).unwrap_or(weth.zero_amount());
    println!("Round-trip risky lost to fees: {lost}");
    println!("State after round trip: {}", engine.state());

    // ── 5. Let half the term pass ───────────────────────────────────────
    let later = now.saturating_add(SECONDS_PER_YEAR / 2);
    let invariant = engine.advance_to(later)?;
    println!("\nAdvanced to {later}: tau {:.4}, invariant {invariant}", engine.tau_years());
    println!("Spot price now: {}", engine.spot_price()?);

    Ok(())
}
