//! State transitions — discrete events applied to a merchant snapshot.
//!
//! This module:
//!   1. Implements one pure function per till/account event
//!   2. Ages all day counters and applies threshold cascades atomically
//!   3. Stamps every produced snapshot with the mutation name and time
//!
//! RULE: No transition mutates its input. Every function clones the
//! snapshot, changes it, stamps it, and re-validates before returning.
//! Out-of-range inputs are rejected, never clamped.

use crate::{
    error::{DeskError, DeskResult},
    merchant::{AccountStatus, KycStatus, Merchant, SimStatus, StartKeyStatus},
    types::{Days, Money},
};
use chrono::Utc;

// ── Cascade thresholds ───────────────────────────────────────────────────────

/// Verified KYC expires once this old.
pub const KYC_EXPIRY_DAYS: Days = 365;
/// An active account auto-suspends (and settlement goes on hold) here.
pub const DORMANCY_SUSPEND_DAYS: Days = 60;
/// A valid start key expires at this level of dormancy.
pub const START_KEY_EXPIRY_DAYS: Days = 540;
/// PIN attempts allowed before the PIN locks.
pub const PIN_ATTEMPT_LIMIT: u8 = 3;

fn commit(mut next: Merchant, mutation: &'static str) -> DeskResult<Merchant> {
    next.last_mutation = mutation.to_string();
    next.mutated_at = Utc::now();
    next.validate()?;
    Ok(next)
}

fn rejected(mutation: &'static str, detail: String) -> DeskError {
    DeskError::InvalidMutation { mutation, detail }
}

/// SIM card replaced. Starts the post-swap risk window at day zero.
pub fn apply_sim_swap(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.sim_status = SimStatus::Swapped;
    next.sim_swap_days_ago = Some(0);
    commit(next, "sim_swap")
}

/// One failed PIN entry. Locks the PIN at the attempt limit; further
/// attempts on a locked PIN leave it locked.
pub fn apply_pin_attempt(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.pin_attempts = (m.pin_attempts + 1).min(PIN_ATTEMPT_LIMIT);
    next.pin_locked = next.pin_attempts >= PIN_ATTEMPT_LIMIT;
    commit(next, "pin_attempt")
}

/// Support-desk PIN reset. Clears the counter and the lock.
pub fn apply_pin_reset(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.pin_attempts = 0;
    next.pin_locked = false;
    commit(next, "pin_reset")
}

/// Manual suspension. Only an active account can be suspended.
pub fn apply_account_suspend(m: &Merchant) -> DeskResult<Merchant> {
    if m.account_status != AccountStatus::Active {
        return Err(rejected(
            "account_suspend",
            format!("account is {:?}, not active", m.account_status),
        ));
    }
    let mut next = m.clone();
    next.account_status = AccountStatus::Suspended;
    commit(next, "account_suspend")
}

/// Reactivation after suspension. Clears dormancy and releases the
/// settlement hold. A frozen account cannot be reactivated this way.
pub fn apply_account_reactivate(m: &Merchant) -> DeskResult<Merchant> {
    if m.account_status != AccountStatus::Suspended {
        return Err(rejected(
            "account_reactivate",
            format!("account is {:?}, not suspended", m.account_status),
        ));
    }
    let mut next = m.clone();
    next.account_status = AccountStatus::Active;
    next.dormant_days = 0;
    next.settlement_on_hold = false;
    commit(next, "account_reactivate")
}

/// Compliance freeze. Valid from any account state; there is no
/// unfreeze transition in this core.
pub fn apply_account_freeze(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.account_status = AccountStatus::Frozen;
    commit(next, "account_freeze")
}

/// Merchant submits renewed KYC documents for review.
pub fn apply_kyc_renewal(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.kyc_status = KycStatus::Pending;
    commit(next, "kyc_renewal")
}

/// Back office approves a pending KYC review.
pub fn apply_kyc_approval(m: &Merchant) -> DeskResult<Merchant> {
    if m.kyc_status != KycStatus::Pending {
        return Err(rejected(
            "kyc_approval",
            format!("kyc is {:?}, nothing pending to approve", m.kyc_status),
        ));
    }
    let mut next = m.clone();
    next.kyc_status = KycStatus::Verified;
    next.kyc_age_days = 0;
    commit(next, "kyc_approval")
}

/// A till transaction settles on the float balance. Positive amounts
/// credit the float, negative amounts debit it. Either way the
/// merchant is no longer dormant.
pub fn apply_transaction(m: &Merchant, amount: Money) -> DeskResult<Merchant> {
    if !amount.is_finite() {
        return Err(rejected("transaction", format!("amount {amount} is not finite")));
    }
    if amount == 0.0 {
        return Err(rejected("transaction", "amount must be non-zero".to_string()));
    }
    let new_balance = m.balance + amount;
    if new_balance < 0.0 {
        return Err(rejected(
            "transaction",
            format!("debit of {} exceeds float balance {}", -amount, m.balance),
        ));
    }
    let mut next = m.clone();
    next.balance = new_balance;
    next.dormant_days = 0;
    commit(next, "transaction")
}

/// Sweep the full float balance to the settlement bank.
pub fn apply_settlement(m: &Merchant) -> DeskResult<Merchant> {
    if m.settlement_on_hold {
        return Err(rejected(
            "settlement",
            "settlement is on hold for this merchant".to_string(),
        ));
    }
    if m.balance <= 0.0 {
        return Err(rejected("settlement", "no float balance to settle".to_string()));
    }
    let mut next = m.clone();
    next.balance = 0.0;
    commit(next, "settlement")
}

/// Operator start key re-issued by the network.
pub fn apply_start_key_reset(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.start_key_status = StartKeyStatus::Valid;
    commit(next, "start_key_reset")
}

/// Flip SMS confirmation delivery on or off.
pub fn apply_notification_toggle(m: &Merchant) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.notifications_enabled = !m.notifications_enabled;
    commit(next, "notification_toggle")
}

/// Advance the twin's clock by `n` days.
///
/// Ages every day counter, then applies the threshold cascades against
/// the NEW counters, in fixed order, within this single call:
///   1. verified KYC expires at `KYC_EXPIRY_DAYS`
///   2. an active account suspends and settlement goes on hold at
///      `DORMANCY_SUSPEND_DAYS` dormant
///   3. a valid start key expires at `START_KEY_EXPIRY_DAYS` dormant
pub fn advance_days(m: &Merchant, n: Days) -> DeskResult<Merchant> {
    let mut next = m.clone();
    next.kyc_age_days = next.kyc_age_days.saturating_add(n);
    next.dormant_days = next.dormant_days.saturating_add(n);
    next.operator_dormant_days = next.operator_dormant_days.saturating_add(n);
    if let Some(days) = next.sim_swap_days_ago {
        next.sim_swap_days_ago = Some(days.saturating_add(n));
    }

    if next.kyc_status == KycStatus::Verified && next.kyc_age_days >= KYC_EXPIRY_DAYS {
        log::debug!(
            "merchant {}: kyc expired at age {} days",
            next.merchant_id,
            next.kyc_age_days
        );
        next.kyc_status = KycStatus::Expired;
    }
    if next.account_status == AccountStatus::Active && next.dormant_days >= DORMANCY_SUSPEND_DAYS {
        log::debug!(
            "merchant {}: auto-suspended after {} dormant days, settlement held",
            next.merchant_id,
            next.dormant_days
        );
        next.account_status = AccountStatus::Suspended;
        next.settlement_on_hold = true;
    }
    if next.start_key_status == StartKeyStatus::Valid && next.dormant_days >= START_KEY_EXPIRY_DAYS
    {
        log::debug!(
            "merchant {}: start key expired after {} dormant days",
            next.merchant_id,
            next.dormant_days
        );
        next.start_key_status = StartKeyStatus::Expired;
    }

    commit(next, "advance_days")
}
