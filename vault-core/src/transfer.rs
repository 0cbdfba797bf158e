//! Payout capability seam
//!
//! Withdrawals leave the vault through a [`PayoutEngine`] supplied by the
//! execution environment on every call. The engine is untrusted: it receives
//! the vault handle and may synchronously call back into it before returning.
//! The vault's reentrancy guard and checks-effects-interactions ordering are
//! what make that safe.

use crate::{types::AccountId, vault::Vault};

/// External value-transfer capability
pub trait PayoutEngine {
    /// Send `amount` to `destination`
    ///
    /// Returns `false` if the payout rail rejected the transfer, in which
    /// case the vault reverts the withdrawal in full. The implementation may
    /// invoke any vault operation through `vault` before returning; a nested
    /// `withdraw` will be rejected as reentrant, a nested `deposit` stands.
    fn transfer(&mut self, vault: &mut Vault, destination: &AccountId, amount: u64) -> bool;
}

/// Payout engine that settles every transfer immediately
///
/// Stand-in for a real settlement rail; used by the demo binary and anywhere
/// payouts are known to succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPayout;

impl PayoutEngine for InstantPayout {
    fn transfer(&mut self, _vault: &mut Vault, destination: &AccountId, amount: u64) -> bool {
        tracing::debug!(destination = %destination, amount, "instant payout settled");
        true
    }
}
