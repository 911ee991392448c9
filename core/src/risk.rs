//! Risk classification — sensor traffic lights and coarse tiers.
//!
//! Independent of the action catalog: each sensor group is bucketed
//! green/amber/red against fixed thresholds, and the tier is derived
//! from the bucket counts alone. Any condition the catalog treats as
//! critical also lands a red bucket here, so a merchant with a
//! critical rule failure can never classify as healthy.

use crate::{
    evaluator::{
        DORMANCY_WARN_DAYS, FLOAT_LOW_THRESHOLD, OPERATOR_IDLE_DAYS, OPERATOR_LOCK_DAYS,
        SIM_SWAP_FLOAT_LOCK_DAYS,
    },
    merchant::{AccountStatus, KycStatus, Merchant, SimStatus, StartKeyStatus},
    transitions::DORMANCY_SUSPEND_DAYS,
};
use serde::Serialize;

/// The ten sensor groups bucketed by `sensor_health`.
const SENSOR_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Critical,
    High,
    Medium,
    Healthy,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Healthy => "healthy",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorHealth {
    pub green: Vec<&'static str>,
    pub amber: Vec<&'static str>,
    pub red: Vec<&'static str>,
    /// green count / total sensor count.
    pub score: f64,
}

enum Light {
    Green,
    Amber,
    Red,
}

/// Bucket every sensor group into a traffic-light category.
pub fn sensor_health(m: &Merchant) -> SensorHealth {
    let buckets: [(&'static str, Light); SENSOR_COUNT] = [
        (
            "account_status",
            match m.account_status {
                AccountStatus::Active => Light::Green,
                AccountStatus::Suspended | AccountStatus::Frozen => Light::Red,
            },
        ),
        (
            "kyc",
            match m.kyc_status {
                KycStatus::Verified => Light::Green,
                KycStatus::Pending => Light::Amber,
                KycStatus::Expired => Light::Red,
            },
        ),
        (
            "sim",
            match m.sim_status {
                SimStatus::Active => Light::Green,
                SimStatus::Swapped => {
                    if m.sim_swap_days_ago.is_some_and(|d| d <= SIM_SWAP_FLOAT_LOCK_DAYS) {
                        Light::Red
                    } else {
                        Light::Amber
                    }
                }
                SimStatus::Unregistered => Light::Red,
            },
        ),
        (
            "pin",
            if m.pin_locked {
                Light::Red
            } else if m.pin_attempts >= 2 {
                Light::Amber
            } else {
                Light::Green
            },
        ),
        (
            "start_key",
            match m.start_key_status {
                StartKeyStatus::Valid => Light::Green,
                StartKeyStatus::Invalid | StartKeyStatus::Expired => Light::Red,
            },
        ),
        (
            "float",
            if m.balance < FLOAT_LOW_THRESHOLD {
                Light::Amber
            } else {
                Light::Green
            },
        ),
        (
            "dormancy",
            if m.dormant_days >= DORMANCY_SUSPEND_DAYS {
                Light::Red
            } else if m.dormant_days >= DORMANCY_WARN_DAYS {
                Light::Amber
            } else {
                Light::Green
            },
        ),
        (
            "operator",
            if m.operator_dormant_days >= OPERATOR_LOCK_DAYS {
                Light::Red
            } else if m.operator_dormant_days >= OPERATOR_IDLE_DAYS {
                Light::Amber
            } else {
                Light::Green
            },
        ),
        (
            "notifications",
            if m.notifications_enabled {
                Light::Green
            } else {
                Light::Amber
            },
        ),
        (
            "settlement",
            if m.settlement_on_hold {
                Light::Red
            } else {
                Light::Green
            },
        ),
    ];

    let mut health = SensorHealth {
        green: Vec::new(),
        amber: Vec::new(),
        red: Vec::new(),
        score: 0.0,
    };
    for (name, light) in buckets {
        match light {
            Light::Green => health.green.push(name),
            Light::Amber => health.amber.push(name),
            Light::Red => health.red.push(name),
        }
    }
    health.score = health.green.len() as f64 / SENSOR_COUNT as f64;
    health
}

/// Coarse fleet-comparable tier from the same buckets.
pub fn risk_tier(m: &Merchant) -> RiskTier {
    let health = sensor_health(m);
    let reds = health.red.len();
    let ambers = health.amber.len();
    if reds >= 3 || m.account_status == AccountStatus::Frozen {
        RiskTier::Critical
    } else if reds >= 1 || ambers >= 3 {
        RiskTier::High
    } else if ambers >= 1 {
        RiskTier::Medium
    } else {
        RiskTier::Healthy
    }
}
