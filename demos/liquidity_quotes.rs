//! Liquidity and option-quote example.
//!
//! Loads a pool snapshot from JSON into a [`PoolRegistry`], quotes
//! proportional allocations, marks the pool at external prices and
//! reports the covered-call figures for an LP position.
//!
//! # Run
//!
//! ```bash
//! cargo run --example liquidity_quotes
//! ```

use rmm_engine::config::PoolSnapshot;
use rmm_engine::domain::{Decimals, FixedDecimal, PoolSide, ReferencePrices};
use rmm_engine::engine::RecordingMonitor;
use rmm_engine::quote::QuoteBuilder;
use rmm_engine::registry::PoolRegistry;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SNAPSHOT: &str = r#"{
    "calibration": {
        "engine": "0x1111111111111111111111111111111111111111",
        "risky":  { "address": "0x0101010101010101010101010101010101010101", "decimals": 18 },
        "stable": { "address": "0x0202020202020202020202020202020202020202", "decimals": 6 },
        "strike": "10000000",
        "sigma": 1000,
        "maturity": 1731556952,
        "gamma": 9900,
        "last_timestamp": 1700000000
    },
    "reserve_risky": "960122388323255000",
    "reserve_stable": "9601222",
    "liquidity": "2000000000000000000",
    "observed_at": 1700000012
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== RMM-01 liquidity and quotes ===\n");

    // ── 1. Load the snapshot into a registry ────────────────────────────
    let snapshot: PoolSnapshot = serde_json::from_str(SNAPSHOT)?;
    let pool_id = snapshot.pool_id()?;
    let monitor = Arc::new(RecordingMonitor::new());
    let mut registry = PoolRegistry::new().with_monitor(monitor.clone());
    println!("Refresh: {:?}", registry.refresh(&snapshot)?);
    let engine = registry.require(&pool_id)?;
    println!("Pool {pool_id}");
    println!("  {}", engine.state());

    // ── 2. Proportional allocation quotes ───────────────────────────────
    let calibration = *engine.calibration();
    let wad = Decimals::new(18)?;
    println!("\n--- Allocation quotes ---");
    for (side, amount) in [
        (PoolSide::Risky, calibration.risky().parse_amount("0.5")?),
        (PoolSide::Stable, calibration.stable().parse_amount("100")?),
        (PoolSide::Liquidity, FixedDecimal::parse("0.25", wad)?),
    ] {
        println!("  keyed on {side:?}: {}", engine.liquidity_quote(amount, side)?);
    }

    // ── 3. Mark the pool at external prices ─────────────────────────────
    let prices = ReferencePrices::from_f64(10.5, 1.0)?;
    let marked = engine.current_liquidity_value(&prices)?;
    println!("\nMarked at risky = 10.5:");
    println!("  per liquidity: {}", marked.per_liquidity());
    println!("  total:         {}", marked.total());

    // ── 4. Option view of the LP position ───────────────────────────────
    let quote = QuoteBuilder::new(engine).with_reference_price(FixedDecimal::parse("10.5", wad)?);
    println!("\n--- Covered call at S = 10.5 ---");
    println!("  delta:      {:.6}", quote.delta()?);
    println!("  premium:    {}", quote.premium()?);
    println!("  moneyness:  {:.4}", quote.moneyness()?);
    println!("  in money:   {}", quote.in_the_money()?);
    let value = quote.theoretical_value()?;
    println!("  S - C:      {} per liquidity", value.per_liquidity());

    let start = calibration.last_timestamp();
    let month = start.saturating_add(30 * 24 * 60 * 60);
    let fees = quote.theoretical_max_fee(start, month)?;
    println!("  max fee over 30 days: {} ({} per liquidity)", fees.total(), fees.per_liquidity());

    // ── 5. Age out ──────────────────────────────────────────────────────
    let evicted = registry.evict_expired(calibration.maturity());
    println!("\nEvicted at maturity: {}", evicted.len());
    println!("Regressions recorded: {}", monitor.len());

    Ok(())
}
