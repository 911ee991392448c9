//! Merchant generation — curated fixtures and seeded random fleets.
//!
//! This module:
//!   1. Draws weighted failure profiles with a realistic joint
//!      distribution (most merchants healthy, a minority compounding)
//!   2. Builds each profile on top of a randomized healthy base
//!   3. Ships a fixed curated fleet covering every profile once
//!
//! All generation is deterministic: same seed, same fleet.

use crate::{
    evaluator::FLOAT_LOW_THRESHOLD,
    merchant::{AccountStatus, KycStatus, Merchant, SimStatus, StartKeyStatus},
    rng::DeskRng,
};

// ── Failure profiles ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureProfile {
    Healthy,
    Dormant,
    KycExpired,
    KycPending,
    SimSwapFresh,
    SimUnregistered,
    PinLocked,
    StartKeyInvalid,
    OperatorIdle,
    LowFloat,
    AlertsOff,
    SettlementHeld,
    FrozenCompliance,
    Compound,
}

impl FailureProfile {
    pub const ALL: [FailureProfile; 14] = [
        FailureProfile::Healthy,
        FailureProfile::Dormant,
        FailureProfile::KycExpired,
        FailureProfile::KycPending,
        FailureProfile::SimSwapFresh,
        FailureProfile::SimUnregistered,
        FailureProfile::PinLocked,
        FailureProfile::StartKeyInvalid,
        FailureProfile::OperatorIdle,
        FailureProfile::LowFloat,
        FailureProfile::AlertsOff,
        FailureProfile::SettlementHeld,
        FailureProfile::FrozenCompliance,
        FailureProfile::Compound,
    ];
}

/// Draw weights per profile, in `ALL` order. Sum to 100.
const PROFILE_WEIGHTS: [(FailureProfile, u32); 14] = [
    (FailureProfile::Healthy, 64),
    (FailureProfile::Dormant, 7),
    (FailureProfile::KycExpired, 4),
    (FailureProfile::KycPending, 3),
    (FailureProfile::SimSwapFresh, 4),
    (FailureProfile::SimUnregistered, 1),
    (FailureProfile::PinLocked, 4),
    (FailureProfile::StartKeyInvalid, 1),
    (FailureProfile::OperatorIdle, 3),
    (FailureProfile::LowFloat, 3),
    (FailureProfile::AlertsOff, 2),
    (FailureProfile::SettlementHeld, 1),
    (FailureProfile::FrozenCompliance, 1),
    (FailureProfile::Compound, 2),
];

// ── Name material ────────────────────────────────────────────────────────────

const FIRST_NAMES: &[&str] = &[
    "Achieng", "Amina", "Brian", "Catherine", "Daniel", "Dennis", "Esther", "Faith", "Fatuma",
    "George", "Grace", "Halima", "Ibrahim", "James", "Janet", "John", "Joseph", "Joyce", "Kevin",
    "Lucy", "Margaret", "Mary", "Mercy", "Mohamed", "Moses", "Mwajuma", "Nancy", "Omar", "Paul",
    "Peter", "Rose", "Salim", "Samuel", "Sarah", "Stephen", "Susan", "Tabitha", "Victor",
    "Wanjiru", "Zainab",
];

const LAST_NAMES: &[&str] = &[
    "Abdalla", "Achieng", "Barasa", "Chebet", "Gathoni", "Hassan", "Juma", "Kamau", "Kiprotich",
    "Korir", "Langat", "Maina", "Mohammed", "Mutua", "Mwangi", "Mwende", "Njoroge", "Nyambura",
    "Ochieng", "Odhiambo", "Ogola", "Okello", "Omondi", "Onyango", "Otieno", "Oyoo", "Wafula",
    "Wairimu", "Wambui", "Wanjala",
];

const TRADE_WORDS: &[&str] = &[
    "Grocers", "Chemist", "Hardware", "Butchery", "Salon", "Electronics", "Boutique", "Stores",
    "Agencies", "Cyber", "Spares", "Wholesalers", "Bookshop", "Dairy",
];

const AREA_WORDS: &[&str] = &[
    "Riverside", "Market Lane", "Highway", "Junction", "Corner", "Plaza", "Sunrise", "Greenfield",
    "Lakeview", "Hilltop", "Station Road", "Central",
];

const REGIONS: &[&str] = &[
    "Central", "Coast", "Eastern", "Lakeside", "Northern", "Rift Valley", "Western",
];

const BANKS: &[&str] = &[
    "Equity Bank", "KCB", "Co-operative Bank", "Absa", "NCBA", "DTB",
];

// ── Generator ────────────────────────────────────────────────────────────────

pub struct MerchantGenerator {
    rng: DeskRng,
    seq: u64,
}

impl MerchantGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeskRng::seed_from(seed),
            seq: 0,
        }
    }

    /// One merchant, profile drawn from the weighted distribution.
    pub fn generate(&mut self) -> Merchant {
        let roll = self.rng.next_u64_below(100) as u32;
        let mut cumulative = 0;
        let mut profile = FailureProfile::Healthy;
        for (candidate, weight) in PROFILE_WEIGHTS {
            cumulative += weight;
            if roll < cumulative {
                profile = candidate;
                break;
            }
        }
        self.generate_with(profile)
    }

    /// One merchant with the given failure profile imposed on a
    /// randomized healthy base.
    pub fn generate_with(&mut self, profile: FailureProfile) -> Merchant {
        let mut m = self.healthy_base();
        match profile {
            FailureProfile::Healthy => {}
            FailureProfile::Dormant => {
                // Mirrors the 60-day cascade: suspension plus hold.
                m.dormant_days = self.rng.range_u32(60, 180);
                m.account_status = AccountStatus::Suspended;
                m.settlement_on_hold = true;
            }
            FailureProfile::KycExpired => {
                m.kyc_status = KycStatus::Expired;
                m.kyc_age_days = self.rng.range_u32(365, 540);
            }
            FailureProfile::KycPending => {
                m.kyc_status = KycStatus::Pending;
                m.kyc_age_days = self.rng.range_u32(300, 364);
            }
            FailureProfile::SimSwapFresh => {
                m.sim_status = SimStatus::Swapped;
                m.sim_swap_days_ago = Some(self.rng.range_u32(0, 2));
            }
            FailureProfile::SimUnregistered => {
                m.sim_status = SimStatus::Unregistered;
            }
            FailureProfile::PinLocked => {
                m.pin_attempts = 3;
                m.pin_locked = true;
            }
            FailureProfile::StartKeyInvalid => {
                m.start_key_status = StartKeyStatus::Invalid;
            }
            FailureProfile::OperatorIdle => {
                m.operator_dormant_days = self.rng.range_u32(60, 150);
            }
            FailureProfile::LowFloat => {
                m.balance = self.rng.range_u32(0, FLOAT_LOW_THRESHOLD as u32 - 1) as f64;
            }
            FailureProfile::AlertsOff => {
                m.notifications_enabled = false;
            }
            FailureProfile::SettlementHeld => {
                m.settlement_on_hold = true;
            }
            FailureProfile::FrozenCompliance => {
                m.account_status = AccountStatus::Frozen;
                if self.rng.chance(0.5) {
                    m.settlement_on_hold = true;
                }
            }
            FailureProfile::Compound => {
                m.account_status = AccountStatus::Frozen;
                m.kyc_status = KycStatus::Expired;
                m.kyc_age_days = self.rng.range_u32(365, 500);
                m.pin_attempts = 3;
                m.pin_locked = true;
                m.settlement_on_hold = true;
            }
        }
        m
    }

    pub fn generate_batch(&mut self, n: usize) -> Vec<Merchant> {
        (0..n).map(|_| self.generate()).collect()
    }

    fn healthy_base(&mut self) -> Merchant {
        self.seq += 1;
        let owner = format!(
            "{} {}",
            self.rng.pick(FIRST_NAMES),
            self.rng.pick(LAST_NAMES)
        );
        let trading_name = if self.rng.chance(0.3) {
            format!("{} {}", self.rng.pick(LAST_NAMES), self.rng.pick(TRADE_WORDS))
        } else {
            format!("{} {}", self.rng.pick(AREA_WORDS), self.rng.pick(TRADE_WORDS))
        };
        let till = format!("T{}", self.rng.range_u32(10_000, 99_999));

        let mut m = Merchant::baseline(
            &format!("m-{:06}", self.seq),
            &trading_name,
            &owner,
            &till,
        );
        m.region = self.rng.pick(REGIONS).to_string();
        m.settlement_bank = self.rng.pick(BANKS).to_string();
        m.onboarded_days_ago = self.rng.range_u32(30, 2_000);
        m.balance = self.rng.range_u32(2_600, 60_000) as f64;
        m.kyc_age_days = self.rng.range_u32(0, 300);
        m.dormant_days = self.rng.range_u32(0, 6);
        m.operator_dormant_days = self.rng.range_u32(0, 29);
        m
    }
}

// ── Curated fleet ────────────────────────────────────────────────────────────

/// A fixed fleet with every failure profile represented exactly once.
/// No randomness; stable ids; used by tests and the demo runner.
pub fn curated_fleet() -> Vec<Merchant> {
    FailureProfile::ALL
        .iter()
        .enumerate()
        .map(|(i, profile)| curated(i + 1, *profile))
        .collect()
}

fn curated(index: usize, profile: FailureProfile) -> Merchant {
    let mut m = Merchant::baseline(
        &format!("fix-{index:03}"),
        &format!("{} {}", AREA_WORDS[index % AREA_WORDS.len()], TRADE_WORDS[index % TRADE_WORDS.len()]),
        &format!("{} {}", FIRST_NAMES[index % FIRST_NAMES.len()], LAST_NAMES[index % LAST_NAMES.len()]),
        &format!("T{:05}", 10_000 + index * 37),
    );
    match profile {
        FailureProfile::Healthy => {}
        FailureProfile::Dormant => {
            m.dormant_days = 75;
            m.account_status = AccountStatus::Suspended;
            m.settlement_on_hold = true;
        }
        FailureProfile::KycExpired => {
            m.kyc_status = KycStatus::Expired;
            m.kyc_age_days = 400;
        }
        FailureProfile::KycPending => {
            m.kyc_status = KycStatus::Pending;
            m.kyc_age_days = 350;
        }
        FailureProfile::SimSwapFresh => {
            m.sim_status = SimStatus::Swapped;
            m.sim_swap_days_ago = Some(1);
        }
        FailureProfile::SimUnregistered => {
            m.sim_status = SimStatus::Unregistered;
        }
        FailureProfile::PinLocked => {
            m.pin_attempts = 3;
            m.pin_locked = true;
        }
        FailureProfile::StartKeyInvalid => {
            m.start_key_status = StartKeyStatus::Invalid;
        }
        FailureProfile::OperatorIdle => {
            m.operator_dormant_days = 95;
        }
        FailureProfile::LowFloat => {
            m.balance = 800.0;
        }
        FailureProfile::AlertsOff => {
            // A long-quiet till that also switched confirmations off.
            m.notifications_enabled = false;
            m.dormant_days = 45;
        }
        FailureProfile::SettlementHeld => {
            m.settlement_on_hold = true;
        }
        FailureProfile::FrozenCompliance => {
            m.account_status = AccountStatus::Frozen;
        }
        FailureProfile::Compound => {
            m.account_status = AccountStatus::Frozen;
            m.kyc_status = KycStatus::Expired;
            m.kyc_age_days = 450;
            m.pin_attempts = 3;
            m.pin_locked = true;
            m.settlement_on_hold = true;
        }
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_weights_sum_to_one_hundred() {
        let total: u32 = PROFILE_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn curated_fleet_is_valid_and_covers_all_profiles() {
        let fleet = curated_fleet();
        assert_eq!(fleet.len(), FailureProfile::ALL.len());
        for m in &fleet {
            m.validate().expect("curated fixture must satisfy invariants");
        }
    }
}
