//! Scanner tests: the pass/fail count property, composite ranking,
//! and calls-at-risk accounting.

use tillwatch_core::{
    evaluator::Severity,
    generator::curated_fleet,
    merchant::{AccountStatus, Merchant, SimStatus},
    scanner::{scan_all, summarize},
};

fn healthy() -> Merchant {
    Merchant::baseline("m-000001", "Riverside Grocers", "Achieng Otieno", "T48211")
}

#[test]
fn failures_plus_passing_always_equals_twelve() {
    for m in curated_fleet() {
        let failures = scan_all(&m).unwrap();
        let summary = summarize(&m).unwrap();
        assert_eq!(
            failures.len() + summary.passing,
            12,
            "merchant {}",
            m.merchant_id
        );
        assert_eq!(summary.evaluated, 12);
        assert_eq!(summary.failing, failures.len());
    }
}

#[test]
fn healthy_merchant_has_an_empty_scan() {
    let m = healthy();
    assert!(scan_all(&m).unwrap().is_empty());
    let summary = summarize(&m).unwrap();
    assert_eq!(summary.passing, 12);
    assert_eq!(summary.calls_at_risk, 0);
}

#[test]
fn ranking_is_severity_first_then_demand() {
    // Locked PIN fails several high-severity actions; alerts off warns
    // a few low ones. Highs must all sort before lows, and within a
    // severity band larger demand_total sorts first.
    let mut m = healthy();
    m.pin_attempts = 3;
    m.pin_locked = true;
    m.notifications_enabled = false;

    let failures = scan_all(&m).unwrap();
    assert!(failures.len() >= 4);
    for pair in failures.windows(2) {
        assert!(
            pair[0].severity <= pair[1].severity,
            "severity order broken: {:?} before {:?}",
            pair[0].severity,
            pair[1].severity
        );
        if pair[0].severity == pair[1].severity {
            assert!(
                pair[0].demand_total >= pair[1].demand_total,
                "equal severity must rank by demand: {} before {}",
                pair[0].demand_total,
                pair[1].demand_total
            );
        }
    }
    assert_eq!(
        failures[0].severity,
        Severity::High,
        "locked PIN is the top finding"
    );
}

#[test]
fn equal_severity_ties_break_on_demand_volume() {
    // A fresh SIM swap fails deposit (rank 1) and withdrawal (rank 2)
    // at the same severity; the bigger call volume must come first.
    let mut m = healthy();
    m.sim_status = SimStatus::Swapped;
    m.sim_swap_days_ago = Some(1);

    let failures = scan_all(&m).unwrap();
    let deposit_pos = failures
        .iter()
        .position(|f| f.label == "Customer Cash Deposit")
        .expect("deposit blocked");
    let withdrawal_pos = failures
        .iter()
        .position(|f| f.label == "Customer Cash Withdrawal")
        .expect("withdrawal blocked");
    assert!(
        deposit_pos < withdrawal_pos,
        "deposit (48k calls) sorts before withdrawal (41k)"
    );
}

#[test]
fn calls_at_risk_sums_demand_over_every_non_pass() {
    let mut m = healthy();
    m.account_status = AccountStatus::Frozen;

    let failures = scan_all(&m).unwrap();
    assert_eq!(failures.len(), 12, "a freeze blocks the whole catalog");

    let summary = summarize(&m).unwrap();
    let expected: u64 = failures.iter().map(|f| f.demand_total).sum();
    assert_eq!(summary.calls_at_risk, expected);
    assert_eq!(summary.critical, 12);
    assert_eq!(summary.passing, 0);
}

#[test]
fn summary_severity_buckets_partition_the_failures() {
    let mut m = healthy();
    m.pin_attempts = 3;
    m.pin_locked = true;
    m.notifications_enabled = false;

    let summary = summarize(&m).unwrap();
    assert_eq!(
        summary.critical + summary.high + summary.medium + summary.low,
        summary.failing
    );
}
