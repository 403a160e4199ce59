//! The serializable state contract shared with sync and import/export
//! collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::{Asset, Budget, Goal, Settings, Subscription, Transaction, Wallet};
use crate::errors::LedgerError;
use crate::store::Store;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Full serializable state: the six synced collections plus settings and
/// a schema version. Debts are deliberately outside this contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Snapshot::version_default")]
    pub version: u32,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    pub fn of_store(store: &Store) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            wallets: store.wallets().to_vec(),
            assets: store.assets().to_vec(),
            transactions: store.transactions().to_vec(),
            budgets: store.budgets().to_vec(),
            goals: store.goals().to_vec(),
            subscriptions: store.subscriptions().to_vec(),
            settings: store.settings().clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot without touching any live state; malformed input
    /// surfaces as an error and nothing else happens.
    pub fn from_json(data: &str) -> Result<Self, LedgerError> {
        let snapshot: Snapshot = serde_json::from_str(data)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(LedgerError::UnsupportedSnapshotVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    fn version_default() -> u32 {
        SNAPSHOT_VERSION
    }
}
