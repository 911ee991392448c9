//! The action catalog — the 12 till operations the desk diagnoses.
//!
//! Each action carries static desk metadata: display label, demand
//! rank (1 = most support calls historically), historical call volume,
//! and the two navigation paths shown to agents. The set is closed;
//! policy changes edit this table, not engine code.

use crate::error::DeskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    CustomerDeposit,
    CustomerWithdrawal,
    BalanceInquiry,
    FloatPurchase,
    TillPayment,
    AirtimeSale,
    SettlementTransfer,
    PinChange,
    MiniStatement,
    TransactionReversal,
    OperatorPortalLogin,
    CustomerRegistration,
}

impl ActionKey {
    /// Every action, in demand-rank order.
    pub const ALL: [ActionKey; 12] = [
        ActionKey::CustomerDeposit,
        ActionKey::CustomerWithdrawal,
        ActionKey::BalanceInquiry,
        ActionKey::FloatPurchase,
        ActionKey::TillPayment,
        ActionKey::AirtimeSale,
        ActionKey::SettlementTransfer,
        ActionKey::PinChange,
        ActionKey::MiniStatement,
        ActionKey::TransactionReversal,
        ActionKey::OperatorPortalLogin,
        ActionKey::CustomerRegistration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerDeposit => "customer_deposit",
            Self::CustomerWithdrawal => "customer_withdrawal",
            Self::BalanceInquiry => "balance_inquiry",
            Self::FloatPurchase => "float_purchase",
            Self::TillPayment => "till_payment",
            Self::AirtimeSale => "airtime_sale",
            Self::SettlementTransfer => "settlement_transfer",
            Self::PinChange => "pin_change",
            Self::MiniStatement => "mini_statement",
            Self::TransactionReversal => "transaction_reversal",
            Self::OperatorPortalLogin => "operator_portal_login",
            Self::CustomerRegistration => "customer_registration",
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKey {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| DeskError::UnknownAction { key: s.to_string() })
    }
}

/// Static desk metadata for one action.
#[derive(Debug, Clone, Serialize)]
pub struct RuleDefinition {
    pub key: ActionKey,
    pub label: &'static str,
    /// One-based; 1 = highest historical call volume.
    pub demand_rank: u8,
    pub description: &'static str,
    /// USSD menu path, display only.
    pub nav_ussd: &'static str,
    /// Agent-app menu path, display only.
    pub nav_app: &'static str,
    /// Historical support-call volume for this action.
    pub demand_total: u64,
}

/// The full catalog, ordered by demand rank.
pub fn rule_catalog() -> &'static [RuleDefinition; 12] {
    &CATALOG
}

/// Metadata for one action key.
pub fn definition(key: ActionKey) -> &'static RuleDefinition {
    // CATALOG is ordered by rank which matches ALL's order.
    &CATALOG[key as usize]
}

static CATALOG: [RuleDefinition; 12] = [
    RuleDefinition {
        key: ActionKey::CustomerDeposit,
        label: "Customer Cash Deposit",
        demand_rank: 1,
        description: "Customer hands over cash; the agent credits their wallet from till float.",
        nav_ussd: "*234# > Agent Services > Deposit",
        nav_app: "Agent App > Till > Accept Deposit",
        demand_total: 48_210,
    },
    RuleDefinition {
        key: ActionKey::CustomerWithdrawal,
        label: "Customer Cash Withdrawal",
        demand_rank: 2,
        description: "Customer cashes out; the agent pays cash and receives float.",
        nav_ussd: "*234# > Agent Services > Withdrawal",
        nav_app: "Agent App > Till > Pay Withdrawal",
        demand_total: 41_876,
    },
    RuleDefinition {
        key: ActionKey::BalanceInquiry,
        label: "Float Balance Inquiry",
        demand_rank: 3,
        description: "Agent checks the current till float balance.",
        nav_ussd: "*234# > My Till > Balance",
        nav_app: "Agent App > Till > Balance",
        demand_total: 33_402,
    },
    RuleDefinition {
        key: ActionKey::FloatPurchase,
        label: "Float Purchase",
        demand_rank: 4,
        description: "Agent buys e-float from the network or a super-agent.",
        nav_ussd: "*234# > My Till > Buy Float",
        nav_app: "Agent App > Float > Purchase",
        demand_total: 29_115,
    },
    RuleDefinition {
        key: ActionKey::TillPayment,
        label: "Till Payment Collection",
        demand_rank: 5,
        description: "Customer pays the merchant's till number for goods.",
        nav_ussd: "*234# > Lipa > Till Number",
        nav_app: "Agent App > Till > Payments",
        demand_total: 24_664,
    },
    RuleDefinition {
        key: ActionKey::AirtimeSale,
        label: "Airtime Sale",
        demand_rank: 6,
        description: "Agent sells airtime drawn against till float.",
        nav_ussd: "*234# > Agent Services > Airtime",
        nav_app: "Agent App > Till > Sell Airtime",
        demand_total: 19_830,
    },
    RuleDefinition {
        key: ActionKey::SettlementTransfer,
        label: "Bank Settlement Transfer",
        demand_rank: 7,
        description: "Sweep accumulated float earnings to the settlement bank account.",
        nav_ussd: "*234# > My Till > Settle to Bank",
        nav_app: "Agent App > Settlement > Transfer",
        demand_total: 15_492,
    },
    RuleDefinition {
        key: ActionKey::PinChange,
        label: "Agent PIN Change",
        demand_rank: 8,
        description: "Agent changes the till PIN on the handset.",
        nav_ussd: "*234# > My Account > Change PIN",
        nav_app: "Agent App > Security > Change PIN",
        demand_total: 11_069,
    },
    RuleDefinition {
        key: ActionKey::MiniStatement,
        label: "Mini Statement",
        demand_rank: 9,
        description: "Last five till movements on the handset.",
        nav_ussd: "*234# > My Till > Mini Statement",
        nav_app: "Agent App > Till > Statement",
        demand_total: 8_745,
    },
    RuleDefinition {
        key: ActionKey::TransactionReversal,
        label: "Transaction Reversal",
        demand_rank: 10,
        description: "Agent requests reversal of a recent erroneous transaction.",
        nav_ussd: "*234# > Agent Services > Reversal",
        nav_app: "Agent App > Till > Request Reversal",
        demand_total: 6_318,
    },
    RuleDefinition {
        key: ActionKey::OperatorPortalLogin,
        label: "Operator Portal Login",
        demand_rank: 11,
        description: "Operator signs into the administrative web portal.",
        nav_ussd: "n/a (web portal)",
        nav_app: "Operator Portal > Sign In",
        demand_total: 4_921,
    },
    RuleDefinition {
        key: ActionKey::CustomerRegistration,
        label: "New Customer Registration",
        demand_rank: 12,
        description: "Agent registers a new wallet customer over the operator channel.",
        nav_ussd: "*234# > Agent Services > Register Customer",
        nav_app: "Operator Portal > Customers > Register",
        demand_total: 3_207,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twelve_unique_ranked_entries() {
        let catalog = rule_catalog();
        assert_eq!(catalog.len(), 12);
        for (i, def) in catalog.iter().enumerate() {
            assert_eq!(def.demand_rank as usize, i + 1, "ranks are 1..=12 in order");
            assert_eq!(def.key, ActionKey::ALL[i], "catalog order matches ALL");
            assert_eq!(definition(def.key).key, def.key);
        }
    }

    #[test]
    fn demand_totals_strictly_descend_with_rank() {
        let catalog = rule_catalog();
        for pair in catalog.windows(2) {
            assert!(
                pair[0].demand_total > pair[1].demand_total,
                "{} should out-demand {}",
                pair[0].label,
                pair[1].label
            );
        }
    }

    #[test]
    fn keys_round_trip_through_strings() {
        for key in ActionKey::ALL {
            let parsed: ActionKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("agent_disco".parse::<ActionKey>().is_err());
    }
}
