//! Vault demo binary
//!
//! Runs a small deposit/withdraw session against an instant payout rail and
//! prints the resulting journal and metrics.

use anyhow::Result;
use vault_core::{AccountId, Config, InstantPayout, Metrics, Vault};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting vault demo");

    // Load configuration (VAULT_CAPACITY / VAULT_WITHDRAWAL_CEILING)
    let config = Config::from_env()?;
    let metrics = Metrics::new()?;
    let mut vault = Vault::new(config)?.with_metrics(metrics.clone());
    let mut payout = InstantPayout;

    let alice = AccountId::new("ACCT-ALICE");
    let bob = AccountId::new("ACCT-BOB");

    vault.deposit(&alice, 250)?;
    vault.deposit(&bob, 400)?;
    vault.withdraw(&alice, 100, &mut payout)?;

    // Expected rejection: above the per-call ceiling
    if let Err(e) = vault.withdraw(&bob, vault.withdrawal_ceiling() + 1, &mut payout) {
        tracing::warn!("rejected as designed: {}", e);
    }

    tracing::info!(
        aggregate = vault.aggregate_balance(),
        deposits = vault.deposit_count(),
        withdrawals = vault.withdrawal_count(),
        "session complete"
    );

    println!("{}", serde_json::to_string_pretty(vault.events())?);

    let encoder = prometheus::TextEncoder::new();
    println!("{}", encoder.encode_to_string(&metrics.registry().gather())?);

    Ok(())
}
