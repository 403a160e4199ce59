use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named money container with a running balance.
///
/// `balance_minor` is held in integer minor units and is mutated only by
/// the ledger engine (transaction effects) or an explicit wallet edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    pub id: Uuid,
    pub name: String,
    pub kind: WalletKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub balance_minor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(name: impl Into<String>, kind: WalletKind, balance_minor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            account_number: None,
            balance_minor,
            icon: None,
            color: None,
            is_primary: false,
            created_at: Utc::now(),
        }
    }
}

/// Supported wallet categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Bank,
    Ewallet,
    Cash,
    Savings,
    Investment,
}
