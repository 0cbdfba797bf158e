//! Vault state machine
//!
//! This module holds the whole ledger: per-caller records, the incrementally
//! tracked aggregate balance, global counters, the reentrancy guard, and the
//! event journal.
//!
//! # Example
//!
//! ```
//! use vault_core::{AccountId, Config, InstantPayout, Vault};
//!
//! fn main() -> vault_core::Result<()> {
//!     let mut vault = Vault::new(Config::default())?;
//!     let alice = AccountId::new("ACCT-ALICE");
//!
//!     vault.deposit(&alice, 250)?;
//!     vault.withdraw(&alice, 100, &mut InstantPayout)?;
//!     assert_eq!(vault.balance_of(&alice), 150);
//!     Ok(())
//! }
//! ```

use crate::{
    config::Config,
    metrics::Metrics,
    transfer::PayoutEngine,
    types::{AccountId, AccountRecord, EventKind, VaultEvent},
    Error, Result,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Scoped hold on the withdrawal lock
///
/// Acquiring fails if the flag is already set; dropping clears it, so no
/// early return can leave the lock stuck.
struct ReentrancyGuard {
    flag: Arc<AtomicBool>,
}

impl ReentrancyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::ReentrantCall);
        }
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Custodial vault ledger
///
/// Created once with validated configuration and alive for the lifetime of
/// the hosting process. Only a caller's own `deposit`/`withdraw` calls ever
/// mutate that caller's record.
pub struct Vault {
    /// Immutable rules fixed at creation
    config: Config,

    /// Per-caller records, created implicitly on first touch
    accounts: HashMap<AccountId, AccountRecord>,

    /// Running total of all balances, tracked incrementally
    aggregate_balance: u64,

    /// Successful deposits across all callers (monotonic)
    deposit_count: u64,

    /// Successful withdrawals across all callers (monotonic)
    withdrawal_count: u64,

    /// Set only for the dynamic extent of an in-flight withdrawal
    withdraw_lock: Arc<AtomicBool>,

    /// Amount debited by an in-flight withdrawal, awaiting the payout outcome
    ///
    /// Non-zero only while the payout engine is executing. A failed payout
    /// re-credits this amount, so it keeps claiming capacity headroom until
    /// the outcome is known.
    pending_payout: u64,

    /// Auditable record of every successful mutation
    journal: Vec<VaultEvent>,

    /// Optional metrics collector
    metrics: Option<Metrics>,
}

impl Vault {
    /// Create a vault with the given immutable configuration
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `capacity` or
    /// `withdrawal_ceiling` is zero, or the ceiling exceeds the capacity.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            capacity = config.capacity,
            withdrawal_ceiling = config.withdrawal_ceiling,
            "vault created"
        );

        Ok(Self {
            config,
            accounts: HashMap::new(),
            aggregate_balance: 0,
            deposit_count: 0,
            withdrawal_count: 0,
            withdraw_lock: Arc::new(AtomicBool::new(false)),
            pending_payout: 0,
            journal: Vec::new(),
            metrics: None,
        })
    }

    /// Attach a metrics collector
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Credit `amount` to `caller`'s balance
    ///
    /// `amount` is the value the execution environment attached to the call;
    /// the calling convention guarantees they are identical. The deposit path
    /// performs no external interaction, so it takes no lock.
    ///
    /// Filling the vault to exactly `capacity` succeeds; one unit more fails
    /// with [`Error::CapacityExceeded`] carrying the pre-deposit headroom.
    /// While a withdrawal is mid-flight, the amount it debited is still
    /// reserved, so a deposit arriving through the payout engine cannot claim
    /// headroom that a failed payout would need back.
    pub fn deposit(&mut self, caller: &AccountId, amount: u64) -> Result<()> {
        if amount == 0 {
            self.note_rejection();
            return Err(Error::ZeroAmount);
        }

        // The debited amount of an in-flight withdrawal still claims headroom:
        // a failed payout re-credits it, and that re-credit must never push the
        // aggregate past the cap. Invariant: reserved <= capacity, so neither
        // the sum nor the subtraction can wrap.
        let reserved = self.aggregate_balance + self.pending_payout;
        let remaining = self.config.capacity - reserved;
        match reserved.checked_add(amount) {
            Some(next) if next <= self.config.capacity => {}
            _ => {
                self.note_rejection();
                tracing::warn!(
                    caller = %caller,
                    amount,
                    remaining,
                    "deposit rejected: capacity exceeded"
                );
                return Err(Error::CapacityExceeded {
                    attempted: amount,
                    remaining,
                });
            }
        }

        let record = self.accounts.entry(caller.clone()).or_default();
        record.balance += amount;
        record.deposit_count += 1;
        let new_balance = record.balance;

        self.aggregate_balance += amount;
        self.deposit_count += 1;

        self.journal.push(VaultEvent::record(
            EventKind::DepositMade,
            caller.clone(),
            amount,
            new_balance,
        ));
        tracing::info!(caller = %caller, amount, new_balance, "deposit recorded");

        if let Some(metrics) = &self.metrics {
            metrics.record_deposit();
            metrics.set_aggregate_balance(self.aggregate_balance);
        }

        Ok(())
    }

    /// Debit `amount` from `caller`'s balance and pay it out through `payout`
    ///
    /// The reentrancy guard is taken before anything else: a nested call
    /// arriving through the payout engine fails with [`Error::ReentrantCall`]
    /// without touching state. All effects are applied strictly before the
    /// payout interaction, so external code only ever observes the
    /// post-debit ledger. If the payout reports failure, this call's effects
    /// are reverted in full and [`Error::TransferFailed`] is returned. The
    /// debited amount stays reserved against the capacity cap until the payout
    /// settles, so a nested deposit can never leave the revert with nowhere
    /// to put the money back.
    pub fn withdraw(
        &mut self,
        caller: &AccountId,
        amount: u64,
        payout: &mut dyn PayoutEngine,
    ) -> Result<()> {
        let _guard = match ReentrancyGuard::acquire(&self.withdraw_lock) {
            Ok(guard) => guard,
            Err(e) => {
                self.note_rejection();
                tracing::warn!(caller = %caller, amount, "reentrant withdrawal rejected");
                return Err(e);
            }
        };

        if amount == 0 {
            self.note_rejection();
            return Err(Error::ZeroAmount);
        }
        if amount > self.config.withdrawal_ceiling {
            self.note_rejection();
            tracing::warn!(
                caller = %caller,
                requested = amount,
                ceiling = self.config.withdrawal_ceiling,
                "withdrawal rejected: above ceiling"
            );
            return Err(Error::WithdrawAboveThreshold {
                requested: amount,
                ceiling: self.config.withdrawal_ceiling,
            });
        }
        let balance = self.balance_of(caller);
        if amount > balance {
            self.note_rejection();
            tracing::warn!(
                caller = %caller,
                requested = amount,
                balance,
                "withdrawal rejected: insufficient balance"
            );
            return Err(Error::InsufficientBalance {
                requested: amount,
                balance,
            });
        }

        // Effects before the payout interaction: the engine must never
        // observe a balance the caller could still withdraw again.
        let record = self.accounts.entry(caller.clone()).or_default();
        record.balance -= amount;
        record.withdrawal_count += 1;
        self.aggregate_balance -= amount;
        self.withdrawal_count += 1;
        self.pending_payout = amount;

        let settled = payout.transfer(self, caller, amount);
        self.pending_payout = 0;

        if !settled {
            // Revert exactly this call's effects. Nested deposits made by the
            // payout code before it failed belong to their own calls and stand.
            let record = self.accounts.entry(caller.clone()).or_default();
            record.balance += amount;
            record.withdrawal_count -= 1;
            self.aggregate_balance += amount;
            self.withdrawal_count -= 1;

            self.note_rejection();
            tracing::warn!(
                caller = %caller,
                amount,
                "payout failed, withdrawal reverted"
            );
            return Err(Error::TransferFailed {
                destination: caller.clone(),
                amount,
            });
        }

        let new_balance = self.balance_of(caller);
        self.journal.push(VaultEvent::record(
            EventKind::WithdrawalMade,
            caller.clone(),
            amount,
            new_balance,
        ));
        tracing::info!(caller = %caller, amount, new_balance, "withdrawal settled");

        if let Some(metrics) = &self.metrics {
            metrics.record_withdrawal();
            metrics.set_aggregate_balance(self.aggregate_balance);
        }

        Ok(())
    }

    /// Reject value arriving outside the deposit path
    ///
    /// Every credited unit must be paired with a counter increment and a
    /// journal entry; a bare transfer would silently break the conservation
    /// invariant, so it always fails with [`Error::DirectTransferNotAllowed`].
    pub fn receive_direct(&mut self, caller: &AccountId, amount: u64) -> Result<()> {
        self.note_rejection();
        tracing::warn!(caller = %caller, amount, "bare value transfer rejected");
        Err(Error::DirectTransferNotAllowed { amount })
    }

    /// Balance held by `caller` (zero if never seen)
    pub fn balance_of(&self, caller: &AccountId) -> u64 {
        self.accounts.get(caller).map_or(0, |r| r.balance)
    }

    /// Sum of all balances, tracked incrementally
    pub fn aggregate_balance(&self) -> u64 {
        self.aggregate_balance
    }

    /// Successful deposits across all callers
    pub fn deposit_count(&self) -> u64 {
        self.deposit_count
    }

    /// Successful withdrawals across all callers
    pub fn withdrawal_count(&self) -> u64 {
        self.withdrawal_count
    }

    /// Successful deposits made by `caller`
    pub fn user_deposit_count(&self, caller: &AccountId) -> u64 {
        self.accounts.get(caller).map_or(0, |r| r.deposit_count)
    }

    /// Successful withdrawals made by `caller`
    pub fn user_withdrawal_count(&self, caller: &AccountId) -> u64 {
        self.accounts.get(caller).map_or(0, |r| r.withdrawal_count)
    }

    /// Immutable aggregate-balance cap
    pub fn capacity(&self) -> u64 {
        self.config.capacity
    }

    /// Immutable per-call withdrawal ceiling
    pub fn withdrawal_ceiling(&self) -> u64 {
        self.config.withdrawal_ceiling
    }

    /// Headroom left under the capacity cap
    ///
    /// Counts the reserved amount of an in-flight withdrawal as still held,
    /// since a failed payout re-credits it.
    pub fn remaining_capacity(&self) -> u64 {
        self.config.capacity - self.aggregate_balance - self.pending_payout
    }

    /// Journal of every successful mutation, in order
    pub fn events(&self) -> &[VaultEvent] {
        &self.journal
    }

    fn note_rejection(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.record_rejection();
        }
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("config", &self.config)
            .field("accounts", &self.accounts.len())
            .field("aggregate_balance", &self.aggregate_balance)
            .field("deposit_count", &self.deposit_count)
            .field("withdrawal_count", &self.withdrawal_count)
            .field("journal_len", &self.journal.len())
            .finish()
    }
}
