//! tillwatch-core — the merchant till diagnostic engine.
//!
//! Models each merchant account as a bundle of observable sensors
//! (account status, KYC, SIM, PIN, start key, float, dormancy,
//! notifications, settlement hold) and evaluates a fixed catalog of
//! twelve till-action rules against every snapshot, predicting which
//! customer-facing operations will fail before a customer tries them.
//!
//! RULES:
//!   - Evaluation is pure: same snapshot in, same verdicts out.
//!   - Snapshots are immutable; transitions return fresh copies.
//!   - All randomness flows through the seeded DeskRng.

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod fleet;
pub mod generator;
pub mod merchant;
pub mod risk;
pub mod rng;
pub mod scanner;
pub mod transitions;
pub mod types;
