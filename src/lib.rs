#![doc(test(attr(deny(warnings))))]

//! Wallet Core keeps personal-finance state consistent: wallets,
//! transactions, budgets, goals, subscriptions, and debts, with all
//! balance mutation funneled through a single [`Ledger`] and read-only
//! aggregations layered on top.

pub mod domain;
pub mod errors;
pub mod ledger;
pub mod reports;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use errors::LedgerError;
pub use ledger::{Ledger, PayError, PaymentReceipt};
pub use snapshot::Snapshot;
pub use store::Store;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("wallet_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Wallet Core tracing initialized.");
    });
}
