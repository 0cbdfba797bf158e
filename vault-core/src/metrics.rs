//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the vault.
//!
//! # Metrics
//!
//! - `vault_deposits_total` - Total number of successful deposits
//! - `vault_withdrawals_total` - Total number of successful withdrawals
//! - `vault_rejected_operations_total` - Total number of rejected calls
//! - `vault_aggregate_balance` - Aggregate balance currently held

use prometheus::{IntCounter, IntGauge, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Successful deposits
    pub deposits_total: IntCounter,

    /// Successful withdrawals
    pub withdrawals_total: IntCounter,

    /// Rejected operations (any taxonomy entry)
    pub rejected_total: IntCounter,

    /// Aggregate balance held by the vault
    pub aggregate_balance: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let deposits_total =
            IntCounter::new("vault_deposits_total", "Total number of successful deposits")?;
        registry.register(Box::new(deposits_total.clone()))?;

        let withdrawals_total = IntCounter::new(
            "vault_withdrawals_total",
            "Total number of successful withdrawals",
        )?;
        registry.register(Box::new(withdrawals_total.clone()))?;

        let rejected_total = IntCounter::new(
            "vault_rejected_operations_total",
            "Total number of rejected calls",
        )?;
        registry.register(Box::new(rejected_total.clone()))?;

        let aggregate_balance = IntGauge::new(
            "vault_aggregate_balance",
            "Aggregate balance currently held",
        )?;
        registry.register(Box::new(aggregate_balance.clone()))?;

        Ok(Self {
            deposits_total,
            withdrawals_total,
            rejected_total,
            aggregate_balance,
            registry,
        })
    }

    /// Record a successful deposit
    pub fn record_deposit(&self) {
        self.deposits_total.inc();
    }

    /// Record a successful withdrawal
    pub fn record_withdrawal(&self) {
        self.withdrawals_total.inc();
    }

    /// Record a rejected operation
    pub fn record_rejection(&self) {
        self.rejected_total.inc();
    }

    /// Update the aggregate balance gauge
    pub fn set_aggregate_balance(&self, balance: u64) {
        self.aggregate_balance
            .set(i64::try_from(balance).unwrap_or(i64::MAX));
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("deposits_total", &self.deposits_total.get())
            .field("withdrawals_total", &self.withdrawals_total.get())
            .field("rejected_total", &self.rejected_total.get())
            .field("aggregate_balance", &self.aggregate_balance.get())
            .finish()
    }
}
