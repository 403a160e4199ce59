use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Month;

/// A spending cap for one category in one calendar month.
///
/// The store does not enforce uniqueness per (category, month); that soft
/// constraint belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub monthly_limit_minor: i64,
    pub month: Month,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit_minor: i64, month: Month) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            monthly_limit_minor,
            month,
            icon: None,
            color: None,
            created_at: Utc::now(),
        }
    }
}
