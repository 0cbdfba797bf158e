//! Core types for the vault ledger
//!
//! Amounts are plain `u64` units of the single native currency. There is no
//! sub-unit scaling and no multi-asset dimension; the vault holds one asset
//! and counts it in whole units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque caller identity
///
/// The vault treats this as an unforgeable key supplied by the execution
/// environment. It has no internal structure the ledger inspects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-caller ledger record
///
/// Created implicitly the first time a caller touches the vault and never
/// deleted; a balance that returns to zero simply stays a zero entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Current vault balance
    pub balance: u64,

    /// Successful deposits made by this caller (monotonic)
    pub deposit_count: u64,

    /// Successful withdrawals made by this caller (monotonic)
    pub withdrawal_count: u64,
}

/// Kind of journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Value entered the vault through `deposit`
    DepositMade,
    /// Value left the vault through `withdraw`
    WithdrawalMade,
}

/// Auditable record of a successful mutation
///
/// Appended after the mutation completes; a rejected call never journals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEvent {
    /// Unique event ID (UUIDv7 for time-ordering)
    pub event_id: Uuid,

    /// Type of mutation
    pub kind: EventKind,

    /// Caller whose balance changed
    pub account: AccountId,

    /// Amount moved
    pub amount: u64,

    /// Caller's balance after the mutation
    pub new_balance: u64,

    /// Journal timestamp
    pub recorded_at: DateTime<Utc>,
}

impl VaultEvent {
    /// Stamp a new journal entry
    pub fn record(kind: EventKind, account: AccountId, amount: u64, new_balance: u64) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            kind,
            account,
            amount,
            new_balance,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_roundtrip() {
        let account = AccountId::new("ACCT-0001");
        assert_eq!(account.as_str(), "ACCT-0001");
        assert_eq!(account.to_string(), "ACCT-0001");
    }

    #[test]
    fn test_account_record_starts_zeroed() {
        let record = AccountRecord::default();
        assert_eq!(record.balance, 0);
        assert_eq!(record.deposit_count, 0);
        assert_eq!(record.withdrawal_count, 0);
    }

    #[test]
    fn test_event_serializes() {
        let event = VaultEvent::record(EventKind::DepositMade, AccountId::new("ACCT-1"), 50, 50);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("DepositMade"));
        assert!(json.contains("ACCT-1"));
    }
}
