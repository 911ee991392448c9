//! Per-merchant scanner — all 12 actions against one snapshot.
//!
//! This module:
//!   1. Runs the evaluator across the whole catalog
//!   2. Annotates each non-pass with the action's desk metadata
//!   3. Ranks failures by severity, then historical demand
//!   4. Summarizes the scan for the fleet aggregator

use crate::{
    catalog::{rule_catalog, ActionKey},
    error::DeskResult,
    evaluator::{evaluate, Severity, Verdict},
    merchant::Merchant,
};
use serde::Serialize;

/// One failing or warning rule, annotated for the support desk.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub action: ActionKey,
    pub label: &'static str,
    pub demand_rank: u8,
    pub demand_total: u64,
    pub verdict: Verdict,
    pub code: &'static str,
    pub severity: Severity,
    pub inline: String,
    pub reason: String,
    pub fix: String,
    pub escalation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub evaluated: usize,
    pub passing: usize,
    pub failing: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Historical call volume attributable to this merchant's blocks.
    pub calls_at_risk: u64,
}

/// Evaluate every action and keep the non-passes, ranked by composite
/// risk: severity first, then demand volume descending, demand rank as
/// the tie-break.
pub fn scan_all(m: &Merchant) -> DeskResult<Vec<Failure>> {
    let mut failures = Vec::new();
    for def in rule_catalog() {
        let result = evaluate(m, def.key)?;
        if result.verdict == Verdict::Pass {
            continue;
        }
        failures.push(Failure {
            action: def.key,
            label: def.label,
            demand_rank: def.demand_rank,
            demand_total: def.demand_total,
            verdict: result.verdict,
            code: result.code,
            // Non-pass results always carry these fields.
            severity: result.severity.unwrap_or(Severity::Low),
            inline: result.inline.unwrap_or_default(),
            reason: result.reason.unwrap_or_default(),
            fix: result.fix.unwrap_or_default(),
            escalation: result.escalation.unwrap_or_default(),
        });
    }
    failures.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(b.demand_total.cmp(&a.demand_total))
            .then(a.demand_rank.cmp(&b.demand_rank))
    });
    Ok(failures)
}

/// Summary counts for an already-computed failure list.
pub fn summary_of(failures: &[Failure]) -> ScanSummary {
    let count_of = |s: Severity| failures.iter().filter(|f| f.severity == s).count();
    ScanSummary {
        evaluated: rule_catalog().len(),
        passing: rule_catalog().len() - failures.len(),
        failing: failures.len(),
        critical: count_of(Severity::Critical),
        high: count_of(Severity::High),
        medium: count_of(Severity::Medium),
        low: count_of(Severity::Low),
        calls_at_risk: failures.iter().map(|f| f.demand_total).sum(),
    }
}

/// Summary counts derived from the same evaluation as `scan_all`.
pub fn summarize(m: &Merchant) -> DeskResult<ScanSummary> {
    Ok(summary_of(&scan_all(m)?))
}
