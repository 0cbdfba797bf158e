//! Error types for the vault ledger

use crate::types::AccountId;
use thiserror::Error;

/// Result type for vault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Vault errors
///
/// Every failure is terminal for the triggering call. Nothing is retried
/// internally and nothing is clamped: the caller sees a typed rejection
/// with the diagnostic payload it needs to react programmatically.
#[derive(Error, Debug)]
pub enum Error {
    /// Creation-time parameter violation; the vault never comes into existence
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Zero-value deposit or withdrawal attempted
    #[error("Amount must be non-zero")]
    ZeroAmount,

    /// Deposit would push the aggregate balance past the capacity cap
    #[error("Deposit of {attempted} exceeds remaining capacity {remaining}")]
    CapacityExceeded {
        /// Amount the caller attempted to deposit
        attempted: u64,
        /// Headroom left under the cap before this attempt
        remaining: u64,
    },

    /// Requested withdrawal exceeds the fixed per-call ceiling
    #[error("Requested {requested} exceeds withdrawal ceiling {ceiling}")]
    WithdrawAboveThreshold {
        /// Amount the caller requested
        requested: u64,
        /// Immutable per-call ceiling
        ceiling: u64,
    },

    /// Requested withdrawal exceeds the caller's own balance
    #[error("Requested {requested} exceeds balance {balance}")]
    InsufficientBalance {
        /// Amount the caller requested
        requested: u64,
        /// Caller's balance at the time of the request
        balance: u64,
    },

    /// A withdrawal was invoked while another withdrawal was mid-flight
    #[error("Reentrant withdrawal rejected: another withdrawal is in flight")]
    ReentrantCall,

    /// The payout rail reported failure; the withdrawal was fully reverted
    #[error("Transfer of {amount} to {destination} failed")]
    TransferFailed {
        /// Intended recipient of the payout
        destination: AccountId,
        /// Amount that failed to move
        amount: u64,
    },

    /// Value arrived without going through `deposit`
    #[error("Direct transfer of {amount} rejected: value must enter through deposit")]
    DirectTransferNotAllowed {
        /// Amount that arrived outside the deposit path
        amount: u64,
    },

    /// Configuration loading/parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
