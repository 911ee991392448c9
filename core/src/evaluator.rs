//! The rule evaluator — predicts whether a till action will fail.
//!
//! This module:
//!   1. Defines the check table: per action, a priority-ordered list
//!      of sensor predicates with terminal verdicts
//!   2. Evaluates one action against one snapshot, returning the FIRST
//!      matching block (checks are never cumulative)
//!   3. Carries the fix and escalation text the support desk shows
//!
//! RULE: Evaluation is a pure function. Same snapshot in, same verdict
//! out — no randomness, no I/O, no reads outside the sensor fields.
//! Severity is intrinsic to each check, never computed.

use crate::{
    catalog::ActionKey,
    error::DeskResult,
    merchant::{AccountStatus, KycStatus, Merchant, SimStatus, StartKeyStatus},
    types::{Days, Money},
};
use serde::Serialize;

// ── Check thresholds ─────────────────────────────────────────────────────────

/// Working float minimum; below this, float-consuming actions degrade.
pub const FLOAT_LOW_THRESHOLD: Money = 2_500.0;
/// Post-SIM-swap lockout for float-moving actions.
pub const SIM_SWAP_FLOAT_LOCK_DAYS: Days = 3;
/// Post-SIM-swap lockout for cash-out, settlement, and PIN changes.
pub const SIM_SWAP_CASHOUT_LOCK_DAYS: Days = 7;
/// Reversals only apply to activity within this window.
pub const REVERSAL_WINDOW_DAYS: Days = 7;
/// Operator credentials lock after this much portal inactivity.
pub const OPERATOR_LOCK_DAYS: Days = 90;
/// Operator inactivity warning level.
pub const OPERATOR_IDLE_DAYS: Days = 60;
/// Dormancy warning level; auto-suspension lands at 60.
pub const DORMANCY_WARN_DAYS: Days = 30;

// ── Verdicts ─────────────────────────────────────────────────────────────────

/// Ordered by operational impact; `Ord` follows declaration order, so
/// ascending sorts put the most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// The outcome of evaluating one action against one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub action: ActionKey,
    pub verdict: Verdict,
    /// Stable identifier for the matched check; `"OK"` on a pass.
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<String>,
}

impl EvaluationResult {
    fn pass(action: ActionKey) -> Self {
        Self {
            action,
            verdict: Verdict::Pass,
            code: "OK",
            severity: None,
            inline: None,
            reason: None,
            fix: None,
            escalation: None,
        }
    }

    fn blocked(action: ActionKey, check: &Check, m: &Merchant) -> Self {
        Self {
            action,
            verdict: check.outcome,
            code: check.code,
            severity: Some(check.severity),
            inline: Some((check.inline)(m)),
            reason: Some(check.reason.to_string()),
            fix: Some(check.fix.to_string()),
            escalation: Some(check.escalation.to_string()),
        }
    }
}

// ── The check table ──────────────────────────────────────────────────────────

/// One sensor condition in an action's priority chain.
pub(crate) struct Check {
    code: &'static str,
    severity: Severity,
    outcome: Verdict,
    applies: fn(&Merchant) -> bool,
    inline: fn(&Merchant) -> String,
    reason: &'static str,
    fix: &'static str,
    escalation: &'static str,
}

fn sim_swap_within(m: &Merchant, days: Days) -> bool {
    m.sim_status == SimStatus::Swapped && m.sim_swap_days_ago.is_some_and(|d| d <= days)
}

fn swap_age(m: &Merchant) -> Days {
    m.sim_swap_days_ago.unwrap_or(0)
}

const ACCOUNT_FROZEN: Check = Check {
    code: "ACCOUNT_FROZEN",
    severity: Severity::Critical,
    outcome: Verdict::Fail,
    applies: |m| m.account_status == AccountStatus::Frozen,
    inline: |_| "Account is frozen; every till operation is blocked".to_string(),
    reason: "The merchant account was frozen, normally by a compliance or fraud review.",
    fix: "Only the compliance team can lift a freeze. No till-side action will help.",
    escalation: "Escalate to the compliance desk with the merchant id. Do not advise workarounds.",
};

const ACCOUNT_SUSPENDED: Check = Check {
    code: "ACCOUNT_SUSPENDED",
    severity: Severity::Critical,
    outcome: Verdict::Fail,
    applies: |m| m.account_status == AccountStatus::Suspended,
    inline: |m| {
        format!(
            "Account is suspended ({} days without a transaction)",
            m.dormant_days
        )
    },
    reason: "The account is suspended, most often automatically after 60 dormant days.",
    fix: "Reactivate the account from the operator portal, then run any small transaction.",
    escalation: "Agent support line can reactivate after verifying the owner's identity.",
};

const SETTLEMENT_HOLD: Check = Check {
    code: "SETTLEMENT_HOLD",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.settlement_on_hold,
    inline: |_| "Settlement to bank is on hold for this merchant".to_string(),
    reason: "A settlement hold is in place, usually alongside dormancy suspension or a review.",
    fix: "Clear the underlying suspension or review; the hold releases on reactivation.",
    escalation: "Settlement operations team releases holds once the account is back in order.",
};

const SIM_UNREGISTERED: Check = Check {
    code: "SIM_UNREGISTERED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.sim_status == SimStatus::Unregistered,
    inline: |_| "Till SIM is not registered to this merchant".to_string(),
    reason: "The SIM in the till handset is not registered against the merchant line.",
    fix: "Re-register the SIM at an agent outlet with the owner's ID documents.",
    escalation: "SIM registration desk; requires the owner in person with original ID.",
};

const SIM_SWAP_FLOAT_LOCK: Check = Check {
    code: "SIM_RECENTLY_SWAPPED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| sim_swap_within(m, SIM_SWAP_FLOAT_LOCK_DAYS),
    inline: |m| {
        format!(
            "SIM was swapped {} day(s) ago; float movements are locked for {} days",
            swap_age(m),
            SIM_SWAP_FLOAT_LOCK_DAYS
        )
    },
    reason: "Float-moving actions are locked briefly after a SIM swap to stop takeover fraud.",
    fix: "Wait out the lock window. It clears automatically.",
    escalation: "If the swap was not requested by the owner, treat as account takeover and freeze.",
};

const SIM_SWAP_CASHOUT_LOCK: Check = Check {
    code: "SIM_RECENTLY_SWAPPED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| sim_swap_within(m, SIM_SWAP_CASHOUT_LOCK_DAYS),
    inline: |m| {
        format!(
            "SIM was swapped {} day(s) ago; cash-out and settlement are locked for {} days",
            swap_age(m),
            SIM_SWAP_CASHOUT_LOCK_DAYS
        )
    },
    reason: "High-risk actions stay locked for a week after a SIM swap to stop takeover fraud.",
    fix: "Wait out the lock window. It clears automatically.",
    escalation: "If the swap was not requested by the owner, treat as account takeover and freeze.",
};

const PIN_LOCKED: Check = Check {
    code: "PIN_LOCKED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.pin_locked,
    inline: |_| "Till PIN is locked after 3 failed attempts".to_string(),
    reason: "Three wrong PIN entries lock the till PIN.",
    fix: "Request a PIN reset; a new one-time PIN is sent to the registered SIM.",
    escalation: "Agent support line resets PINs after owner verification.",
};

const START_KEY_INVALID: Check = Check {
    code: "START_KEY_INVALID",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.start_key_status == StartKeyStatus::Invalid,
    inline: |_| "Operator start key is invalid".to_string(),
    reason: "The operator channel start key failed validation and no longer authenticates.",
    fix: "Request a start key reset from the network.",
    escalation: "Operator support issues a fresh start key to the registered operator line.",
};

const START_KEY_EXPIRED: Check = Check {
    code: "START_KEY_EXPIRED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.start_key_status == StartKeyStatus::Expired,
    inline: |_| "Operator start key has expired".to_string(),
    reason: "Start keys expire after extended dormancy and must be re-issued.",
    fix: "Request a start key reset from the network.",
    escalation: "Operator support issues a fresh start key to the registered operator line.",
};

const KYC_EXPIRED: Check = Check {
    code: "KYC_EXPIRED",
    severity: Severity::High,
    outcome: Verdict::Fail,
    applies: |m| m.kyc_status == KycStatus::Expired,
    inline: |m| format!("KYC verification expired ({} days old)", m.kyc_age_days),
    reason: "The merchant's KYC record is older than a year and no longer valid.",
    fix: "Submit renewed KYC documents; actions unblock once the review is approved.",
    escalation: "KYC desk fast-tracks renewals for active merchants on request.",
};

const KYC_PENDING: Check = Check {
    code: "KYC_PENDING",
    severity: Severity::Medium,
    outcome: Verdict::Warn,
    applies: |m| m.kyc_status == KycStatus::Pending,
    inline: |_| "KYC renewal is still under review".to_string(),
    reason: "Renewed KYC documents are with the back office and not yet approved.",
    fix: "None needed from the merchant; chase the review if it is older than 5 working days.",
    escalation: "KYC desk can confirm review status and expected completion.",
};

const FLOAT_EMPTY: Check = Check {
    code: "FLOAT_EMPTY",
    severity: Severity::Medium,
    outcome: Verdict::Fail,
    applies: |m| m.balance <= 0.0,
    inline: |_| "Till float balance is zero".to_string(),
    reason: "This action draws on till float and there is none.",
    fix: "Buy float from the network or a super-agent.",
    escalation: "Float desk can arrange an emergency float advance for high-volume tills.",
};

const NOTHING_TO_SETTLE: Check = Check {
    code: "NOTHING_TO_SETTLE",
    severity: Severity::Medium,
    outcome: Verdict::Fail,
    applies: |m| m.balance <= 0.0,
    inline: |_| "No float balance to transfer to bank".to_string(),
    reason: "Settlement sweeps the float balance and the balance is zero.",
    fix: "Nothing to do; settle once the till has traded.",
    escalation: "None.",
};

const FLOAT_LOW: Check = Check {
    code: "FLOAT_LOW",
    severity: Severity::Medium,
    outcome: Verdict::Warn,
    applies: |m| m.balance > 0.0 && m.balance < FLOAT_LOW_THRESHOLD,
    inline: |m| {
        format!(
            "Float balance {:.2} is below the working minimum of {:.2}",
            m.balance, FLOAT_LOW_THRESHOLD
        )
    },
    reason: "The float balance is below the working minimum; larger deposits will start failing.",
    fix: "Top up float before peak hours.",
    escalation: "None; advisory only.",
};

const OPERATOR_INACTIVE: Check = Check {
    code: "OPERATOR_INACTIVE",
    severity: Severity::Medium,
    outcome: Verdict::Fail,
    applies: |m| m.operator_dormant_days >= OPERATOR_LOCK_DAYS,
    inline: |m| {
        format!(
            "Operator has not used the portal for {} days; credentials are locked",
            m.operator_dormant_days
        )
    },
    reason: "Operator credentials lock after 90 days without a portal sign-in.",
    fix: "Re-verify the operator through support to unlock portal access.",
    escalation: "Operator support re-enables locked credentials after identity checks.",
};

const OPERATOR_IDLE: Check = Check {
    code: "OPERATOR_IDLE",
    severity: Severity::Medium,
    outcome: Verdict::Warn,
    applies: |m| {
        m.operator_dormant_days >= OPERATOR_IDLE_DAYS
            && m.operator_dormant_days < OPERATOR_LOCK_DAYS
    },
    inline: |m| {
        format!(
            "Operator idle for {} days; credentials lock at {}",
            m.operator_dormant_days, OPERATOR_LOCK_DAYS
        )
    },
    reason: "The operator is approaching the 90-day inactivity lock.",
    fix: "Any portal sign-in resets the inactivity counter.",
    escalation: "None; advisory only.",
};

const REVERSAL_WINDOW_CLOSED: Check = Check {
    code: "REVERSAL_WINDOW_CLOSED",
    severity: Severity::Medium,
    outcome: Verdict::Fail,
    applies: |m| m.dormant_days >= REVERSAL_WINDOW_DAYS,
    inline: |m| {
        format!(
            "Last transaction was {} days ago; outside the {}-day reversal window",
            m.dormant_days, REVERSAL_WINDOW_DAYS
        )
    },
    reason: "Reversals only apply to transactions inside the reversal window.",
    fix: "Older disputes go through the formal dispute process instead.",
    escalation: "Disputes team handles out-of-window reversal requests.",
};

const DORMANCY_WARNING: Check = Check {
    code: "DORMANCY_WARNING",
    severity: Severity::Low,
    outcome: Verdict::Warn,
    applies: |m| {
        m.account_status == AccountStatus::Active && m.dormant_days >= DORMANCY_WARN_DAYS
    },
    inline: |m| {
        format!(
            "No transactions for {} days; auto-suspension at 60",
            m.dormant_days
        )
    },
    reason: "The till is drifting toward the 60-day dormancy suspension.",
    fix: "Any transaction resets the dormancy counter.",
    escalation: "None; advisory only.",
};

const ALERTS_DISABLED: Check = Check {
    code: "ALERTS_DISABLED",
    severity: Severity::Low,
    outcome: Verdict::Warn,
    applies: |m| !m.notifications_enabled,
    inline: |_| "SMS confirmations are switched off".to_string(),
    reason: "The merchant will not receive confirmation messages for till activity.",
    fix: "Re-enable notifications from the account settings menu.",
    escalation: "None; advisory only.",
};

// Priority chains. Order is the contract: account-level blocks first,
// then identity/security, then data freshness, warns last.
static CUSTOMER_DEPOSIT_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    SIM_SWAP_FLOAT_LOCK,
    PIN_LOCKED,
    KYC_EXPIRED,
    FLOAT_EMPTY,
    KYC_PENDING,
    FLOAT_LOW,
    DORMANCY_WARNING,
    ALERTS_DISABLED,
];

static CUSTOMER_WITHDRAWAL_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    SIM_SWAP_CASHOUT_LOCK,
    PIN_LOCKED,
    KYC_EXPIRED,
    KYC_PENDING,
    DORMANCY_WARNING,
    ALERTS_DISABLED,
];

static BALANCE_INQUIRY_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    PIN_LOCKED,
    ALERTS_DISABLED,
];

static FLOAT_PURCHASE_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    SIM_SWAP_FLOAT_LOCK,
    PIN_LOCKED,
    KYC_EXPIRED,
    KYC_PENDING,
];

static TILL_PAYMENT_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    KYC_EXPIRED,
    ALERTS_DISABLED,
];

static AIRTIME_SALE_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    SIM_SWAP_FLOAT_LOCK,
    PIN_LOCKED,
    FLOAT_EMPTY,
    FLOAT_LOW,
];

static SETTLEMENT_TRANSFER_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SETTLEMENT_HOLD,
    SIM_UNREGISTERED,
    SIM_SWAP_CASHOUT_LOCK,
    PIN_LOCKED,
    KYC_EXPIRED,
    NOTHING_TO_SETTLE,
];

static PIN_CHANGE_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    SIM_SWAP_CASHOUT_LOCK,
    PIN_LOCKED,
];

static MINI_STATEMENT_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    PIN_LOCKED,
    ALERTS_DISABLED,
];

static TRANSACTION_REVERSAL_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    PIN_LOCKED,
    REVERSAL_WINDOW_CLOSED,
    ALERTS_DISABLED,
];

static OPERATOR_PORTAL_LOGIN_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    START_KEY_INVALID,
    START_KEY_EXPIRED,
    OPERATOR_INACTIVE,
    OPERATOR_IDLE,
];

static CUSTOMER_REGISTRATION_CHECKS: &[Check] = &[
    ACCOUNT_FROZEN,
    ACCOUNT_SUSPENDED,
    SIM_UNREGISTERED,
    START_KEY_INVALID,
    START_KEY_EXPIRED,
    KYC_EXPIRED,
    OPERATOR_INACTIVE,
    KYC_PENDING,
    OPERATOR_IDLE,
];

pub(crate) fn checks_for(action: ActionKey) -> &'static [Check] {
    match action {
        ActionKey::CustomerDeposit => CUSTOMER_DEPOSIT_CHECKS,
        ActionKey::CustomerWithdrawal => CUSTOMER_WITHDRAWAL_CHECKS,
        ActionKey::BalanceInquiry => BALANCE_INQUIRY_CHECKS,
        ActionKey::FloatPurchase => FLOAT_PURCHASE_CHECKS,
        ActionKey::TillPayment => TILL_PAYMENT_CHECKS,
        ActionKey::AirtimeSale => AIRTIME_SALE_CHECKS,
        ActionKey::SettlementTransfer => SETTLEMENT_TRANSFER_CHECKS,
        ActionKey::PinChange => PIN_CHANGE_CHECKS,
        ActionKey::MiniStatement => MINI_STATEMENT_CHECKS,
        ActionKey::TransactionReversal => TRANSACTION_REVERSAL_CHECKS,
        ActionKey::OperatorPortalLogin => OPERATOR_PORTAL_LOGIN_CHECKS,
        ActionKey::CustomerRegistration => CUSTOMER_REGISTRATION_CHECKS,
    }
}

// ── Evaluation ───────────────────────────────────────────────────────────────

/// Evaluate one action against one snapshot.
///
/// Walks the action's check chain in priority order and reports the
/// first matching block. An invalid snapshot is an error, not a fail.
pub fn evaluate(m: &Merchant, action: ActionKey) -> DeskResult<EvaluationResult> {
    m.validate()?;
    for check in checks_for(action) {
        if (check.applies)(m) {
            return Ok(EvaluationResult::blocked(action, check, m));
        }
    }
    Ok(EvaluationResult::pass(action))
}

/// Evaluate by string key, for callers outside the type system.
/// Unknown keys are a caller bug and surface as `UnknownAction`.
pub fn evaluate_key(m: &Merchant, key: &str) -> DeskResult<EvaluationResult> {
    evaluate(m, key.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merchant::Merchant;

    fn healthy() -> Merchant {
        Merchant::baseline("m-000001", "Riverside Grocers", "Achieng Otieno", "T48211")
    }

    #[test]
    fn healthy_merchant_passes_everything() {
        let m = healthy();
        for key in ActionKey::ALL {
            let result = evaluate(&m, key).unwrap();
            assert_eq!(result.verdict, Verdict::Pass, "{key} should pass");
            assert_eq!(result.code, "OK");
            assert!(result.severity.is_none());
        }
    }

    #[test]
    fn every_chain_starts_with_account_blocks() {
        for key in ActionKey::ALL {
            let chain = checks_for(key);
            assert_eq!(chain[0].code, "ACCOUNT_FROZEN", "{key}");
            assert_eq!(chain[1].code, "ACCOUNT_SUSPENDED", "{key}");
        }
    }

    #[test]
    fn warns_never_precede_fails_in_any_chain() {
        for key in ActionKey::ALL {
            let chain = checks_for(key);
            let first_warn = chain.iter().position(|c| c.outcome == Verdict::Warn);
            let last_fail = chain.iter().rposition(|c| c.outcome == Verdict::Fail);
            if let (Some(w), Some(f)) = (first_warn, last_fail) {
                assert!(w > f, "{key}: warn at {w} before fail at {f}");
            }
        }
    }
}
