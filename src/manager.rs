//! Watch manager
//!
//! Orchestrates the folder watch subsystem end to end:
//! - picker and drag-drop intake
//! - flat/nested classification and the mapping selection flow
//! - committing watches to the durable store
//! - two-step removal and live per-watch sync status
//!
//! All mutations funnel through `&mut self`, so add/remove/commit never
//! interleave; status queries are `&self` and safe at any rate.

use std::sync::Arc;

use serde::Serialize;

use crate::classify::{self, normalize_path, Classification};
use crate::decision::{LoadingSink, UserDecisionChannel};
use crate::flow::MappingSelectionFlow;
use crate::models::watch::{CollectionMapping, FolderWatch, SyncStatusView};
use crate::probe::FilesystemProbe;
use crate::store::WatchStore;
use crate::sync::SyncEngine;
use crate::WatchError;

/// Per-batch outcome of `add_from_drop`
///
/// Failures are isolated per directory; one bad entry never aborts the rest
/// of the batch.
#[derive(Debug, Default, Serialize)]
pub struct DropReport {
    /// Watches committed during this batch, flat ones first
    pub committed: Vec<FolderWatch>,
    /// Entries skipped because they are not directories
    pub skipped: Vec<String>,
    /// Candidates the user cancelled out of
    pub cancelled: Vec<String>,
    /// Entries that failed, with the error that isolated them
    pub failed: Vec<(String, WatchError)>,
}

/// Proof that removal of a watch was explicitly confirmed upstream
///
/// Only `request_removal` can mint one and `remove` consumes it, so the
/// core never deletes a watch without the two-step handshake.
#[derive(Debug)]
pub struct RemovalToken {
    folder_path: String,
}

impl RemovalToken {
    /// Path of the watch this token authorizes removing
    pub fn folder_path(&self) -> &str {
        &self.folder_path
    }
}

/// Result of classifying one candidate directory
enum Intake {
    Committed(FolderWatch),
    NeedsChoice(String),
}

/// Orchestrator for the folder watch subsystem
pub struct WatchManager {
    store: WatchStore,
    flow: MappingSelectionFlow,
    probe: Arc<dyn FilesystemProbe>,
    decisions: Arc<dyn UserDecisionChannel>,
    sync: Arc<dyn SyncEngine>,
    loading: Arc<dyn LoadingSink>,
}

impl WatchManager {
    pub fn new(
        store: WatchStore,
        probe: Arc<dyn FilesystemProbe>,
        decisions: Arc<dyn UserDecisionChannel>,
        sync: Arc<dyn SyncEngine>,
        loading: Arc<dyn LoadingSink>,
    ) -> Self {
        Self {
            store,
            flow: MappingSelectionFlow::new(),
            probe,
            decisions,
            sync,
            loading,
        }
    }

    /// All watches in insertion order
    pub fn list(&self) -> &[FolderWatch] {
        self.store.list()
    }

    /// Look up a watch by its root path
    pub fn find_by_path(&self, folder_path: &str) -> Option<&FolderWatch> {
        self.store.find_by_path(folder_path)
    }

    /// The candidate currently awaiting a mapping choice, if any
    pub fn pending_choice(&self) -> Option<&str> {
        self.flow.pending()
    }

    /// Add a watch through the native directory picker
    ///
    /// Returns the committed watch, or `None` when the user cancelled
    /// either the picker or the mapping choice.
    pub async fn add_from_picker(&mut self) -> Result<Option<FolderWatch>, WatchError> {
        match self.probe.select_directory().await? {
            Some(path) => self.add_directory(&path).await,
            None => Ok(None),
        }
    }

    /// Add a single directory whose path the caller already holds
    pub async fn add_directory(&mut self, path: &str) -> Result<Option<FolderWatch>, WatchError> {
        let path = normalize_path(path);

        self.loading.loading_started();
        let intake = self.intake(&path).await;
        self.loading.loading_finished();

        match intake? {
            Intake::Committed(watch) => Ok(Some(watch)),
            Intake::NeedsChoice(candidate) => {
                self.flow.submit(&candidate)?;
                self.decide_pending().await
            }
        }
    }

    /// Add watches for a batch of dropped paths
    ///
    /// Best effort: entries that are not directories are skipped, probe and
    /// store failures are isolated into the report, and nested candidates
    /// queue up to be decided one at a time.
    pub async fn add_from_drop(&mut self, paths: &[String]) -> Result<DropReport, WatchError> {
        let mut report = DropReport::default();

        self.loading.loading_started();
        for raw in paths {
            let path = normalize_path(raw);

            match self.probe.is_directory(&path).await {
                Ok(true) => {}
                Ok(false) => {
                    report.skipped.push(path);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Skipping dropped entry {}: {}", path, e);
                    report.failed.push((path, e));
                    continue;
                }
            }

            match self.intake(&path).await {
                Ok(Intake::Committed(watch)) => report.committed.push(watch),
                Ok(Intake::NeedsChoice(candidate)) => self.flow.enqueue(&candidate),
                Err(e) => {
                    tracing::warn!("Skipping dropped directory {}: {}", path, e);
                    report.failed.push((path, e));
                }
            }
        }
        self.loading.loading_finished();

        // Decide queued candidates FIFO; each prompt holds until the user
        // answers, and later candidates stay stashed in the flow.
        while let Some(pending) = self.flow.begin_next().map(str::to_string) {
            match self.decisions.choose_mapping(&pending).await {
                Some(mapping) => {
                    let (folder_path, mapping) = self.flow.resolve(mapping)?;
                    match self.commit(&folder_path, mapping) {
                        Ok(watch) => report.committed.push(watch),
                        Err(e) => {
                            tracing::warn!("Could not watch {}: {}", folder_path, e);
                            report.failed.push((folder_path, e));
                        }
                    }
                }
                None => {
                    let folder_path = self.flow.cancel()?;
                    report.cancelled.push(folder_path);
                }
            }
        }

        Ok(report)
    }

    /// Build the watch record and add it to the durable store
    pub fn commit(
        &mut self,
        folder_path: &str,
        mapping: CollectionMapping,
    ) -> Result<FolderWatch, WatchError> {
        let watch = FolderWatch::new(folder_path, mapping);
        self.store.add(watch.clone())?;
        Ok(watch)
    }

    /// First step of removal: mint the token the confirmed removal needs
    ///
    /// The UI obtains the user's consent between this call and `remove`.
    pub fn request_removal(&self, watch: &FolderWatch) -> RemovalToken {
        RemovalToken {
            folder_path: watch.folder_path.clone(),
        }
    }

    /// Second step of removal: consume the token and delete the watch
    ///
    /// Not idempotent: removing an already-removed watch fails `NotFound`.
    pub fn remove(&mut self, token: RemovalToken) -> Result<(), WatchError> {
        self.store.remove(&token.folder_path)
    }

    /// Live sync status for one watch; read fresh from the engine each call
    pub fn status_of(&self, watch: &FolderWatch) -> SyncStatusView {
        let sync_running = self.sync.is_sync_running();

        SyncStatusView {
            sync_running,
            syncing_this_watch: sync_running && self.sync.is_syncing_watch(watch),
        }
    }

    /// Enumerate and classify one candidate, committing directly when flat
    async fn intake(&mut self, folder_path: &str) -> Result<Intake, WatchError> {
        let files = self.probe.enumerate_files(folder_path).await?;

        match classify::classify(&files) {
            Ok(Classification::Flat) => {
                let watch = self.commit(folder_path, CollectionMapping::Root)?;
                Ok(Intake::Committed(watch))
            }
            Ok(Classification::Nested) => Ok(Intake::NeedsChoice(folder_path.to_string())),
            Err(_) => Err(WatchError::EmptyDirectory(folder_path.to_string())),
        }
    }

    /// Await the user's decision on the pending candidate
    async fn decide_pending(&mut self) -> Result<Option<FolderWatch>, WatchError> {
        let pending = match self.flow.pending() {
            Some(path) => path.to_string(),
            None => return Ok(None),
        };

        match self.decisions.choose_mapping(&pending).await {
            Some(mapping) => {
                let (folder_path, mapping) = self.flow.resolve(mapping)?;
                Ok(Some(self.commit(&folder_path, mapping)?))
            }
            None => {
                self.flow.cancel()?;
                Ok(None)
            }
        }
    }
}
