use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::{shift_month, shift_year};

/// A recurring bill with a cycle and next-due-date, payable on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount_minor: i64,
    pub cycle: BillingCycle,
    pub next_due: NaiveDate,
    pub wallet_id: Uuid,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount_minor: i64,
        cycle: BillingCycle,
        next_due: NaiveDate,
        wallet_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount_minor,
            cycle,
            next_due,
            wallet_id,
            status: SubscriptionStatus::Active,
            icon: None,
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, SubscriptionStatus::Active)
    }
}

/// Recurrence period of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// The due date one cycle after `from`. Month and year steps clamp the
    /// day to the target month's length (Jan 31 to Feb 29/28).
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            BillingCycle::Weekly => from + Duration::days(7),
            BillingCycle::Monthly => shift_month(from, 1),
            BillingCycle::Yearly => shift_year(from, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}
