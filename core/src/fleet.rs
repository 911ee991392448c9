//! Fleet batch scanner — map per merchant, reduce to desk aggregates.
//!
//! This module:
//!   1. Runs the per-merchant scanner over a whole fleet
//!   2. Reduces to fleet health counts and calls-at-risk
//!   3. Ranks the most frequent failure codes across the fleet
//!
//! RULE: Merchants are independent. No per-merchant result may read
//! another merchant's state, and input order must not change any
//! aggregate — only report order, which is fixed by merchant id.

use crate::{
    error::DeskResult,
    merchant::Merchant,
    risk::{risk_tier, RiskTier},
    scanner::{scan_all, summary_of, Failure, ScanSummary},
    types::MerchantId,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ranked failure codes reported per fleet scan.
pub const TOP_CODE_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct MerchantReport {
    pub merchant_id: MerchantId,
    pub trading_name: String,
    pub risk_tier: RiskTier,
    pub summary: ScanSummary,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeFrequency {
    pub code: &'static str,
    /// Raw occurrences across all merchants and actions.
    pub occurrences: usize,
    /// Merchants exhibiting the code at least once.
    pub merchants: usize,
    /// Share of the fleet exhibiting the code, 0-100.
    pub pct_of_fleet: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetStats {
    pub merchants: usize,
    pub healthy: usize,
    pub with_failures: usize,
    pub with_critical: usize,
    pub calls_at_risk: u64,
    pub top_codes: Vec<CodeFrequency>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub reports: Vec<MerchantReport>,
    pub fleet: FleetStats,
}

/// Scan every merchant and aggregate. Tolerates an empty fleet.
pub fn scan_batch(merchants: &[Merchant]) -> DeskResult<BatchResult> {
    let mut reports = Vec::with_capacity(merchants.len());
    for m in merchants {
        let failures = scan_all(m)?;
        reports.push(MerchantReport {
            merchant_id: m.merchant_id.clone(),
            trading_name: m.trading_name.clone(),
            risk_tier: risk_tier(m),
            summary: summary_of(&failures),
            failures,
        });
    }
    reports.sort_by(|a, b| a.merchant_id.cmp(&b.merchant_id));

    let fleet = reduce(&reports);
    log::info!(
        "fleet scan: {} merchants, {} healthy, {} with critical blocks, {} calls at risk",
        fleet.merchants,
        fleet.healthy,
        fleet.with_critical,
        fleet.calls_at_risk
    );
    Ok(BatchResult { reports, fleet })
}

fn reduce(reports: &[MerchantReport]) -> FleetStats {
    let merchants = reports.len();
    let healthy = reports.iter().filter(|r| r.failures.is_empty()).count();
    let with_critical = reports.iter().filter(|r| r.summary.critical > 0).count();
    let calls_at_risk = reports.iter().map(|r| r.summary.calls_at_risk).sum();

    // BTreeMap keeps code ties in a deterministic order.
    let mut by_code: BTreeMap<&'static str, (usize, usize)> = BTreeMap::new();
    for report in reports {
        let mut seen: Vec<&'static str> = Vec::new();
        for failure in &report.failures {
            let entry = by_code.entry(failure.code).or_insert((0, 0));
            entry.0 += 1;
            if !seen.contains(&failure.code) {
                entry.1 += 1;
                seen.push(failure.code);
            }
        }
    }
    let mut top_codes: Vec<CodeFrequency> = by_code
        .into_iter()
        .map(|(code, (occurrences, exhibiting))| CodeFrequency {
            code,
            occurrences,
            merchants: exhibiting,
            pct_of_fleet: if merchants == 0 {
                0.0
            } else {
                exhibiting as f64 * 100.0 / merchants as f64
            },
        })
        .collect();
    top_codes.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.code.cmp(b.code)));
    top_codes.truncate(TOP_CODE_COUNT);

    FleetStats {
        merchants,
        healthy,
        with_failures: merchants - healthy,
        with_critical,
        calls_at_risk,
        top_codes,
    }
}
