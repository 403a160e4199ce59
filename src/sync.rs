//! Best-effort replication of ledger state to a remote or on-disk sink.
//!
//! The ledger itself knows nothing about persistence timing: it bumps a
//! revision counter on every mutation and the [`SyncScheduler`] decides
//! when to flush a snapshot, after a quiescence window with no further
//! mutations. Persist failures are logged and never roll back local
//! state; the in-memory store stays the source of truth.

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::snapshot::Snapshot;

const DEFAULT_DIR_NAME: &str = ".wallet_core";
const SNAPSHOT_FILE: &str = "snapshot.json";
const TMP_SUFFIX: &str = "tmp";

/// How long mutations must stay quiet before a flush.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_secs(2);

/// Abstraction over sinks capable of storing a state snapshot.
pub trait SyncBackend: Send + Sync {
    fn persist(&self, snapshot: &Snapshot) -> Result<(), LedgerError>;
}

/// Returns the application data directory, `~/.wallet_core` by default,
/// overridable via `WALLET_CORE_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("WALLET_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Writes snapshots as pretty JSON, replacing the file atomically via a
/// temp-file-then-rename.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        Self::new(app_data_dir().join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SyncBackend for JsonFileSink {
    fn persist(&self, snapshot: &Snapshot) -> Result<(), LedgerError> {
        let json = snapshot.to_json_pretty()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    revision: u64,
    since: Instant,
}

/// Debounces flushes: a new revision restarts the quiescence window, so
/// bursts of mutations coalesce into one persist call. Drive it from the
/// host loop with [`Self::observe`] after mutations and [`Self::tick`]
/// periodically.
pub struct SyncScheduler {
    backend: Box<dyn SyncBackend>,
    quiescence: Duration,
    last_synced: u64,
    pending: Option<Pending>,
}

impl SyncScheduler {
    pub fn new(backend: Box<dyn SyncBackend>) -> Self {
        Self::with_quiescence(backend, DEFAULT_QUIESCENCE)
    }

    pub fn with_quiescence(backend: Box<dyn SyncBackend>, quiescence: Duration) -> Self {
        Self {
            backend,
            quiescence,
            last_synced: 0,
            pending: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// Notes the ledger's current revision. A revision newer than both
    /// the last synced one and any pending one restarts the window;
    /// re-observing an unchanged revision does not.
    pub fn observe(&mut self, revision: u64) {
        self.observe_at(revision, Instant::now());
    }

    pub fn observe_at(&mut self, revision: u64, now: Instant) {
        if revision == self.last_synced {
            return;
        }
        match self.pending {
            Some(pending) if pending.revision == revision => {}
            _ => self.pending = Some(Pending { revision, since: now }),
        }
    }

    /// Flushes if the quiescence window has elapsed. Returns whether a
    /// persist was attempted and succeeded. A failed persist stays dirty
    /// and is retried on a later tick.
    pub fn tick(&mut self, ledger: &Ledger) -> bool {
        self.tick_at(Instant::now(), ledger)
    }

    pub fn tick_at(&mut self, now: Instant, ledger: &Ledger) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now.duration_since(pending.since) < self.quiescence {
            return false;
        }
        self.flush(ledger)
    }

    /// Persists immediately, ignoring the quiescence window.
    pub fn flush(&mut self, ledger: &Ledger) -> bool {
        // The snapshot is taken at flush time, so it also carries any
        // mutations newer than the pending revision.
        let revision = ledger.revision();
        match self.backend.persist(&ledger.snapshot()) {
            Ok(()) => {
                self.last_synced = revision;
                self.pending = None;
                tracing::debug!(revision, "snapshot persisted");
                true
            }
            Err(error) => {
                tracing::warn!(revision, %error, "snapshot persist failed; keeping local state");
                false
            }
        }
    }
}
