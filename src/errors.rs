use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),
    #[error("Snapshot version {found} is newer than supported {supported}")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },
}
