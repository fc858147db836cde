//! External sync engine signals
//!
//! The watch subsystem never starts or stops the folder-sync engine; it
//! only reads these signals to report live status to the UI.

use crate::models::watch::FolderWatch;

/// Read-only view into the folder-sync engine
pub trait SyncEngine: Send + Sync {
    /// Whether the folder-sync engine is running at all
    fn is_sync_running(&self) -> bool;

    /// Whether this specific watch is the one being synced right now
    fn is_syncing_watch(&self, watch: &FolderWatch) -> bool;
}
