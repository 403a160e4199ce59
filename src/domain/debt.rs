use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An informational record of money owed to or by another person.
///
/// Settling a debt marks it paid but moves no money; it is tracking, not
/// a wallet-wired payment flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Debt {
    pub id: Uuid,
    pub kind: DebtKind,
    pub person: String,
    pub amount_minor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub wallet_id: Uuid,
    pub status: DebtStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Debt {
    pub fn new(
        kind: DebtKind,
        person: impl Into<String>,
        amount_minor: i64,
        wallet_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            person: person.into(),
            amount_minor,
            description: None,
            due_date: None,
            wallet_id,
            status: DebtStatus::Unpaid,
            icon: None,
            created_at: Utc::now(),
            paid_at: None,
        }
    }
}

/// Whether the money is owed by the user (debt) or to the user (receivable).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    Debt,
    Receivable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[default]
    Unpaid,
    Paid,
}
