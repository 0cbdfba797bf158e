//! Custodia Vault Core
//!
//! Custodial ledger that pools native currency from independent callers
//! under an immutable rule set fixed at creation time.
//!
//! # Architecture
//!
//! - **Single State Machine**: One `Vault` owns every balance and counter
//! - **Checks-Effects-Interactions**: All preconditions validated, then state
//!   mutated, then the external payout rail invoked - untrusted code never
//!   observes a half-updated ledger
//! - **Reentrancy Guard**: Nested withdrawals are detected and rejected
//! - **Event Journal**: Every successful mutation appends an auditable record
//!
//! # Invariants
//!
//! - Conservation: aggregate balance == Σ(per-caller balances) for all time
//! - Capacity: aggregate balance never exceeds the configured cap
//! - No negative balances: every debit is pre-checked, never clamped
//! - Immutable rules: capacity and withdrawal ceiling never change after creation

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod transfer;
pub mod types;
pub mod vault;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use transfer::{InstantPayout, PayoutEngine};
pub use types::{AccountId, AccountRecord, EventKind, VaultEvent};
pub use vault::Vault;
