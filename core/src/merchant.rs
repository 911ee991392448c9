//! The merchant twin record — sensor schema and invariants.
//!
//! This module:
//!   1. Declares the sensor enums every rule reads
//!   2. Defines the Merchant snapshot (profile + sensors + audit stamp)
//!   3. Enforces cross-field invariants on every snapshot
//!   4. Publishes the field schema (sensor vs profile split)
//!
//! RULE: Rules read ONLY sensor fields. Profile fields exist for
//! display and routing and must never influence a verdict.

use crate::{
    error::{DeskError, DeskResult},
    types::{Days, MerchantId, Money},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Sensor enums ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Frozen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Verified,
    Pending,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimStatus {
    Active,
    Swapped,
    Unregistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartKeyStatus {
    Valid,
    Invalid,
    Expired,
}

// ── Merchant snapshot ────────────────────────────────────────────────────────

/// One immutable snapshot of a merchant's twin state.
///
/// Transitions never mutate a snapshot in place; they clone, change,
/// stamp, and re-validate. See `transitions.rs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    // Profile — display/routing only, never read by rules.
    pub merchant_id: MerchantId,
    pub trading_name: String,
    pub owner_name: String,
    pub till_number: String,
    pub region: String,
    pub settlement_bank: String,
    pub onboarded_days_ago: Days,

    // Sensors — the only fields rules read.
    pub account_status: AccountStatus,
    pub kyc_status: KycStatus,
    pub kyc_age_days: Days,
    pub sim_status: SimStatus,
    pub sim_swap_days_ago: Option<Days>,
    pub pin_attempts: u8,
    pub pin_locked: bool,
    pub start_key_status: StartKeyStatus,
    pub balance: Money,
    pub dormant_days: Days,
    pub operator_dormant_days: Days,
    pub notifications_enabled: bool,
    pub settlement_on_hold: bool,

    // Audit stamp — set by the transition that produced this snapshot.
    pub last_mutation: String,
    pub mutated_at: DateTime<Utc>,
}

impl Merchant {
    /// A fully healthy merchant with the given identity.
    /// The starting point for generators and fixtures.
    pub fn baseline(
        merchant_id: &str,
        trading_name: &str,
        owner_name: &str,
        till_number: &str,
    ) -> Self {
        Self {
            merchant_id: merchant_id.to_string(),
            trading_name: trading_name.to_string(),
            owner_name: owner_name.to_string(),
            till_number: till_number.to_string(),
            region: "Central".to_string(),
            settlement_bank: "Equity Bank".to_string(),
            onboarded_days_ago: 0,
            account_status: AccountStatus::Active,
            kyc_status: KycStatus::Verified,
            kyc_age_days: 0,
            sim_status: SimStatus::Active,
            sim_swap_days_ago: None,
            pin_attempts: 0,
            pin_locked: false,
            start_key_status: StartKeyStatus::Valid,
            balance: 10_000.0,
            dormant_days: 0,
            operator_dormant_days: 0,
            notifications_enabled: true,
            settlement_on_hold: false,
            last_mutation: "created".to_string(),
            mutated_at: Utc::now(),
        }
    }

    /// Enforce the cross-field invariants. Violations indicate upstream
    /// data corruption and are surfaced loudly, never coerced.
    pub fn validate(&self) -> DeskResult<()> {
        if self.pin_attempts > 3 {
            return Err(self.invalid(format!(
                "pin_attempts {} outside 0..=3",
                self.pin_attempts
            )));
        }
        if self.pin_locked != (self.pin_attempts >= 3) {
            return Err(self.invalid(format!(
                "pin_locked={} disagrees with pin_attempts={}",
                self.pin_locked, self.pin_attempts
            )));
        }
        let swapped = self.sim_status == SimStatus::Swapped;
        if swapped != self.sim_swap_days_ago.is_some() {
            return Err(self.invalid(format!(
                "sim_swap_days_ago must be set iff sim_status is swapped (status {:?}, days {:?})",
                self.sim_status, self.sim_swap_days_ago
            )));
        }
        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(self.invalid(format!("balance {} is not a non-negative amount", self.balance)));
        }
        Ok(())
    }

    fn invalid(&self, detail: String) -> DeskError {
        DeskError::InvalidState {
            merchant_id: self.merchant_id.clone(),
            detail,
        }
    }
}

// ── Field schema ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Sensor,
    Profile,
    Audit,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Every field of the merchant record, with its sensor/profile split.
/// Display layers use this to decide what is live twin state.
pub fn schema() -> &'static [FieldSpec] {
    use FieldKind::*;
    &[
        FieldSpec { name: "merchant_id", kind: Profile },
        FieldSpec { name: "trading_name", kind: Profile },
        FieldSpec { name: "owner_name", kind: Profile },
        FieldSpec { name: "till_number", kind: Profile },
        FieldSpec { name: "region", kind: Profile },
        FieldSpec { name: "settlement_bank", kind: Profile },
        FieldSpec { name: "onboarded_days_ago", kind: Profile },
        FieldSpec { name: "account_status", kind: Sensor },
        FieldSpec { name: "kyc_status", kind: Sensor },
        FieldSpec { name: "kyc_age_days", kind: Sensor },
        FieldSpec { name: "sim_status", kind: Sensor },
        FieldSpec { name: "sim_swap_days_ago", kind: Sensor },
        FieldSpec { name: "pin_attempts", kind: Sensor },
        FieldSpec { name: "pin_locked", kind: Sensor },
        FieldSpec { name: "start_key_status", kind: Sensor },
        FieldSpec { name: "balance", kind: Sensor },
        FieldSpec { name: "dormant_days", kind: Sensor },
        FieldSpec { name: "operator_dormant_days", kind: Sensor },
        FieldSpec { name: "notifications_enabled", kind: Sensor },
        FieldSpec { name: "settlement_on_hold", kind: Sensor },
        FieldSpec { name: "last_mutation", kind: Audit },
        FieldSpec { name: "mutated_at", kind: Audit },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_valid() {
        let m = Merchant::baseline("m-000001", "Riverside Grocers", "Achieng Otieno", "T48211");
        assert!(m.validate().is_ok());
    }

    #[test]
    fn pin_lock_disagreement_is_rejected() {
        let mut m = Merchant::baseline("m-000001", "Riverside Grocers", "Achieng Otieno", "T48211");
        m.pin_attempts = 3;
        // pin_locked left false — corrupt.
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("pin_locked"), "got: {err}");
    }

    #[test]
    fn sim_swap_days_must_match_sim_status() {
        let mut m = Merchant::baseline("m-000002", "Market Lane Chemist", "Brian Mwangi", "T10292");
        m.sim_swap_days_ago = Some(2);
        assert!(m.validate().is_err(), "days set while sim not swapped");

        m.sim_status = SimStatus::Swapped;
        assert!(m.validate().is_ok());

        m.sim_swap_days_ago = None;
        assert!(m.validate().is_err(), "swapped sim without swap age");
    }

    #[test]
    fn schema_splits_sensors_from_profile() {
        let sensors = schema()
            .iter()
            .filter(|f| f.kind == FieldKind::Sensor)
            .count();
        assert_eq!(sensors, 13, "13 raw sensor fields are declared");
    }
}
