use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target tracked manually; contributions only ever grow
/// `current_minor` and are not drawn from any wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_minor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_minor,
            current_minor: 0,
            deadline: None,
            notes: None,
            icon: None,
            color: None,
            created_at: Utc::now(),
        }
    }
}
