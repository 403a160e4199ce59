use serde::{Deserialize, Serialize};

/// User-facing preferences carried in the snapshot alongside the
/// collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub currency: String,
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "IDR".into(),
            locale: "id-ID".into(),
        }
    }
}
