//! desk-runner: headless fleet scanner for the till diagnostic desk.
//!
//! Usage:
//!   desk-runner --seed 12345 --fleet 200
//!   desk-runner --curated --json
//!   desk-runner --seed 7 --fleet 50 --top 3

use anyhow::Result;
use std::env;
use tillwatch_core::{
    fleet::{scan_batch, BatchResult},
    generator::{curated_fleet, MerchantGenerator},
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let fleet_size = parse_arg(&args, "--fleet", 100usize);
    let top = parse_arg(&args, "--top", 5usize);
    let json = args.iter().any(|a| a == "--json");
    let curated = args.iter().any(|a| a == "--curated");

    let merchants = if curated {
        curated_fleet()
    } else {
        MerchantGenerator::new(seed).generate_batch(fleet_size)
    };
    log::info!("scanning {} merchants (seed {seed})", merchants.len());

    let result = scan_batch(&merchants)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result, top);
    }
    Ok(())
}

fn print_report(result: &BatchResult, top: usize) {
    let fleet = &result.fleet;
    println!("till diagnostic desk — fleet report");
    println!("  merchants:       {}", fleet.merchants);
    println!("  healthy:         {}", fleet.healthy);
    println!("  with failures:   {}", fleet.with_failures);
    println!("  with critical:   {}", fleet.with_critical);
    println!("  calls at risk:   {}", fleet.calls_at_risk);
    println!();

    println!("top failure codes:");
    for freq in &fleet.top_codes {
        println!(
            "  {:<24} {:>4} hits  {:>3} merchants  {:>5.1}% of fleet",
            freq.code, freq.occurrences, freq.merchants, freq.pct_of_fleet
        );
    }
    println!();

    // Worst merchants first: most critical blocks, then calls at risk.
    let mut worst: Vec<_> = result
        .reports
        .iter()
        .filter(|r| !r.failures.is_empty())
        .collect();
    worst.sort_by(|a, b| {
        b.summary
            .critical
            .cmp(&a.summary.critical)
            .then(b.summary.calls_at_risk.cmp(&a.summary.calls_at_risk))
    });

    println!("priority merchants:");
    for report in worst.iter().take(top) {
        println!(
            "  {} {} [{}] — {} blocked action(s), {} calls at risk",
            report.merchant_id,
            report.trading_name,
            report.risk_tier.as_str(),
            report.summary.failing,
            report.summary.calls_at_risk
        );
        for failure in report.failures.iter().take(3) {
            println!(
                "      {:<10} {:<22} {}",
                format!("{:?}", failure.severity).to_lowercase(),
                failure.code,
                failure.inline
            );
        }
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
