use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded money movement.
///
/// `amount_minor` is always stored non-negative; direction is derived
/// from `kind`. A transfer references exactly two distinct wallets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub category: String,
    pub wallet_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_target_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount_minor: i64,
        category: impl Into<String>,
        wallet_id: Uuid,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount_minor,
            category: category.into(),
            wallet_id,
            wallet_target_id: None,
            date,
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn transfer(
        amount_minor: i64,
        wallet_id: Uuid,
        wallet_target_id: Uuid,
        date: NaiveDate,
    ) -> Self {
        let mut txn = Self::new(
            TransactionKind::Transfer,
            amount_minor,
            "transfer",
            wallet_id,
            date,
        );
        txn.wallet_target_id = Some(wallet_target_id);
        txn
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Direction of a transaction relative to its wallet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}
