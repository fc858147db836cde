//! User-facing decision and progress channels
//!
//! Injected interfaces standing in for the UI shell, so the core never
//! reaches into ambient application context:
//! - the collection-mapping choice modal
//! - coarse loading state around intake work

use async_trait::async_trait;

use crate::models::watch::CollectionMapping;

/// Channel that asks the user to pick a collection mapping
#[async_trait]
pub trait UserDecisionChannel: Send + Sync {
    /// Ask which mapping to use for `candidate_path`
    ///
    /// Resolves when the user decides; `None` means they cancelled. A
    /// pending ask never times out.
    async fn choose_mapping(&self, candidate_path: &str) -> Option<CollectionMapping>;
}

/// Sink for coarse loading state around intake work
pub trait LoadingSink: Send + Sync {
    fn loading_started(&self);
    fn loading_finished(&self);
}

/// Loading sink that ignores every transition
pub struct NullLoadingSink;

impl LoadingSink for NullLoadingSink {
    fn loading_started(&self) {}
    fn loading_finished(&self) {}
}
