//! Entity types and calendar helpers shared by the store, ledger, and reports.

pub mod asset;
pub mod budget;
pub mod debt;
pub mod goal;
pub mod period;
pub mod settings;
pub mod subscription;
pub mod transaction;
pub mod wallet;

pub use asset::Asset;
pub use budget::Budget;
pub use debt::{Debt, DebtKind, DebtStatus};
pub use goal::Goal;
pub use period::Month;
pub use settings::Settings;
pub use subscription::{BillingCycle, Subscription, SubscriptionStatus};
pub use transaction::{Transaction, TransactionKind};
pub use wallet::{Wallet, WalletKind};
