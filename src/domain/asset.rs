use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A standalone valued holding counted toward total assets but outside
/// the transaction flow (property, vehicles, gold, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub value_minor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(name: impl Into<String>, value_minor: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value_minor,
            icon: None,
            created_at: Utc::now(),
        }
    }
}
