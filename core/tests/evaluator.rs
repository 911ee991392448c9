//! Evaluator tests: purity, first-match priority, severity mapping,
//! and the unknown-action error path.

use tillwatch_core::{
    catalog::ActionKey,
    error::DeskError,
    evaluator::{evaluate, evaluate_key, Severity, Verdict},
    merchant::{AccountStatus, KycStatus, Merchant, SimStatus},
};

fn healthy() -> Merchant {
    Merchant::baseline("m-000001", "Riverside Grocers", "Achieng Otieno", "T48211")
}

#[test]
fn evaluation_is_deterministic_for_every_action() {
    let mut m = healthy();
    m.account_status = AccountStatus::Suspended;
    m.pin_attempts = 3;
    m.pin_locked = true;
    m.notifications_enabled = false;

    for key in ActionKey::ALL {
        let first = evaluate(&m, key).unwrap();
        let second = evaluate(&m, key).unwrap();
        assert_eq!(first, second, "{key}: identical snapshots must yield identical results");
    }
}

#[test]
fn unknown_action_key_is_a_caller_bug() {
    let m = healthy();
    let err = evaluate_key(&m, "send_marketing_blast").unwrap_err();
    match err {
        DeskError::UnknownAction { key } => assert_eq!(key, "send_marketing_blast"),
        other => panic!("expected UnknownAction, got {other}"),
    }
}

#[test]
fn known_keys_evaluate_through_the_string_api() {
    let m = healthy();
    let result = evaluate_key(&m, "customer_deposit").unwrap();
    assert_eq!(result.verdict, Verdict::Pass);
    assert_eq!(result.code, "OK");
}

#[test]
fn first_matching_block_wins_not_the_union() {
    // Suspended AND pin-locked: the account block outranks the PIN.
    let mut m = healthy();
    m.account_status = AccountStatus::Suspended;
    m.pin_attempts = 3;
    m.pin_locked = true;

    let result = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(result.code, "ACCOUNT_SUSPENDED");
    assert_eq!(result.severity, Some(Severity::Critical));

    // Clear the account block; the PIN surfaces next.
    m.account_status = AccountStatus::Active;
    let result = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(result.code, "PIN_LOCKED");
    assert_eq!(result.severity, Some(Severity::High));
}

#[test]
fn frozen_account_blocks_everything_critically() {
    let mut m = healthy();
    m.account_status = AccountStatus::Frozen;
    for key in ActionKey::ALL {
        let result = evaluate(&m, key).unwrap();
        assert_eq!(result.verdict, Verdict::Fail, "{key}");
        assert_eq!(result.code, "ACCOUNT_FROZEN", "{key}");
        assert_eq!(result.severity, Some(Severity::Critical), "{key}");
    }
}

#[test]
fn compound_failure_scenario_reports_account_first() {
    // Frozen + expired KYC + locked PIN + settlement hold.
    let mut m = healthy();
    m.account_status = AccountStatus::Frozen;
    m.kyc_status = KycStatus::Expired;
    m.kyc_age_days = 450;
    m.pin_attempts = 3;
    m.pin_locked = true;
    m.settlement_on_hold = true;

    for key in [ActionKey::CustomerDeposit, ActionKey::SettlementTransfer] {
        let result = evaluate(&m, key).unwrap();
        assert_eq!(result.verdict, Verdict::Fail, "{key}");
        let severity = result.severity.unwrap();
        assert!(
            severity <= Severity::High,
            "{key}: expected critical or high, got {severity:?}"
        );
    }
}

#[test]
fn settlement_hold_surfaces_once_the_account_is_clear() {
    let mut m = healthy();
    m.settlement_on_hold = true;
    let result = evaluate(&m, ActionKey::SettlementTransfer).unwrap();
    assert_eq!(result.code, "SETTLEMENT_HOLD");
    assert_eq!(result.severity, Some(Severity::High));

    // The hold is settlement-specific: deposits still pass.
    let deposit = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(deposit.verdict, Verdict::Pass);
}

#[test]
fn sim_swap_lockouts_differ_by_action_risk() {
    let mut m = healthy();
    m.sim_status = SimStatus::Swapped;
    m.sim_swap_days_ago = Some(5);

    // Day 5: float-moving actions are already clear (3-day lock)...
    let deposit = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(deposit.verdict, Verdict::Pass);

    // ...but cash-out and settlement stay locked through day 7.
    let withdrawal = evaluate(&m, ActionKey::CustomerWithdrawal).unwrap();
    assert_eq!(withdrawal.code, "SIM_RECENTLY_SWAPPED");
    assert_eq!(withdrawal.severity, Some(Severity::High));

    m.sim_swap_days_ago = Some(8);
    let withdrawal = evaluate(&m, ActionKey::CustomerWithdrawal).unwrap();
    assert_eq!(withdrawal.verdict, Verdict::Pass, "lock clears after day 7");
}

#[test]
fn kyc_pending_is_a_medium_warning_not_a_block() {
    let mut m = healthy();
    m.kyc_status = KycStatus::Pending;
    let result = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(result.verdict, Verdict::Warn);
    assert_eq!(result.code, "KYC_PENDING");
    assert_eq!(result.severity, Some(Severity::Medium));
}

#[test]
fn notifications_off_is_the_softest_finding() {
    let mut m = healthy();
    m.notifications_enabled = false;
    let result = evaluate(&m, ActionKey::BalanceInquiry).unwrap();
    assert_eq!(result.verdict, Verdict::Warn);
    assert_eq!(result.code, "ALERTS_DISABLED");
    assert_eq!(result.severity, Some(Severity::Low));
}

#[test]
fn operator_channel_rules_only_touch_operator_actions() {
    let mut m = healthy();
    m.operator_dormant_days = 120;

    let login = evaluate(&m, ActionKey::OperatorPortalLogin).unwrap();
    assert_eq!(login.code, "OPERATOR_INACTIVE");
    assert_eq!(login.verdict, Verdict::Fail);

    let deposit = evaluate(&m, ActionKey::CustomerDeposit).unwrap();
    assert_eq!(deposit.verdict, Verdict::Pass, "till actions ignore operator dormancy");
}

#[test]
fn corrupt_snapshots_error_instead_of_evaluating() {
    let mut m = healthy();
    m.pin_attempts = 3; // pin_locked left false — corrupt upstream data
    let err = evaluate(&m, ActionKey::CustomerDeposit).unwrap_err();
    assert!(matches!(err, DeskError::InvalidState { .. }), "got {err}");
}

#[test]
fn failure_results_carry_the_full_desk_guidance() {
    let mut m = healthy();
    m.pin_attempts = 3;
    m.pin_locked = true;
    let result = evaluate(&m, ActionKey::PinChange).unwrap();
    assert!(result.inline.as_deref().unwrap_or("").contains("locked"));
    assert!(result.reason.is_some());
    assert!(result.fix.is_some());
    assert!(result.escalation.is_some());
}
