//! Folder watch data types
//!
//! Types representing watched folders and their mapping policy

use serde::{Deserialize, Serialize};

use crate::classify::normalize_path;

/// Policy for mapping a watched directory's contents onto remote collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionMapping {
    /// Everything under the watch root uploads into a single collection
    Root,
    /// Each immediate subdirectory uploads into its own collection
    Parent,
}

impl CollectionMapping {
    /// Database and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionMapping::Root => "root",
            CollectionMapping::Parent => "parent",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "root" => Some(CollectionMapping::Root),
            "parent" => Some(CollectionMapping::Parent),
            _ => None,
        }
    }
}

/// A watched local directory and its collection mapping policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderWatch {
    /// Display name, the final segment of `folder_path`
    pub root_folder_name: String,
    /// Absolute, forward-slash normalized path; unique key, immutable
    pub folder_path: String,
    pub collection_mapping: CollectionMapping,
    /// RFC 3339 timestamp of when the watch was established
    pub created_at: String,
}

impl FolderWatch {
    /// Build a watch record for a candidate path
    pub fn new(folder_path: &str, collection_mapping: CollectionMapping) -> Self {
        let folder_path = normalize_path(folder_path);
        let root_folder_name = folder_name(&folder_path);

        Self {
            root_folder_name,
            folder_path,
            collection_mapping,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Derive the display name from the final path segment
fn folder_name(path: &str) -> String {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// Live sync state for one watch, recomputed on every query
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncStatusView {
    /// True when the folder-sync engine is running at all
    pub sync_running: bool,
    /// True when this specific watch is the one being synced right now
    pub syncing_this_watch: bool,
}
