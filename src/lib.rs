//! Darkroom Watch - Folder Watch Management backend
//!
//! This library is the watched-folder subsystem of the Darkroom photo
//! library. It handles:
//! - The durable set of watched local directories (SQLite backed)
//! - Flat/nested classification of candidate directories
//! - The collection-mapping decision flow, including batch drops
//! - Live per-watch sync status for the UI
//!
//! The upload engine, remote collection management, and OS file-event
//! delivery live elsewhere; this crate talks to them through the traits in
//! `probe`, `sync`, and `decision`.

pub mod classify;
pub mod db;
pub mod decision;
pub mod flow;
pub mod manager;
pub mod models;
pub mod probe;
pub mod store;
pub mod sync;

pub use manager::{DropReport, RemovalToken, WatchManager};
pub use models::watch::{CollectionMapping, FolderWatch, SyncStatusView};
pub use store::WatchStore;

/// Error type for watch management operations
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The path is already watched, or nests inside / encloses a watched root
    #[error("Already watching a folder at this path: {0}")]
    DuplicatePath(String),

    #[error("No watch found for folder: {0}")]
    NotFound(String),

    #[error("Folder contains no files: {0}")]
    EmptyDirectory(String),

    #[error("A mapping choice is already pending")]
    FlowBusy,

    #[error("No mapping choice is pending")]
    NoPendingChoice,

    #[error("Filesystem unavailable: {0}")]
    FilesystemUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
}

// Watch errors cross the IPC boundary as their display strings
impl serde::Serialize for WatchError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Initialize logging for embedding binaries
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
}
