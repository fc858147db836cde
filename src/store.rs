//! Durable watch store
//!
//! An in-memory mirror of the `watches` table. Every mutation is a
//! synchronous round-trip to SQLite; the mirror is updated only after the
//! database write succeeds, so it never runs ahead of durable state.

use crate::classify::is_path_prefix;
use crate::db::{queries, Database};
use crate::models::watch::FolderWatch;
use crate::WatchError;

/// Ordered set of folder watches backed by the database
pub struct WatchStore {
    db: Database,
    watches: Vec<FolderWatch>,
}

impl WatchStore {
    /// Open the store, creating the schema and loading the mirror
    pub fn open(db: Database) -> Result<Self, WatchError> {
        db.initialize()?;
        let watches = db.with_connection(queries::list_watches)?;

        tracing::info!("Loaded {} folder watches", watches.len());

        Ok(Self { db, watches })
    }

    /// All watches in insertion order
    pub fn list(&self) -> &[FolderWatch] {
        &self.watches
    }

    /// Look up a watch by its root path
    pub fn find_by_path(&self, folder_path: &str) -> Option<&FolderWatch> {
        self.watches.iter().find(|w| w.folder_path == folder_path)
    }

    /// Add a new watch
    ///
    /// Rejects exact duplicates and roots nested inside or enclosing an
    /// existing watch root; overlapping watches are not allowed.
    pub fn add(&mut self, watch: FolderWatch) -> Result<(), WatchError> {
        for existing in &self.watches {
            if is_path_prefix(&existing.folder_path, &watch.folder_path)
                || is_path_prefix(&watch.folder_path, &existing.folder_path)
            {
                return Err(WatchError::DuplicatePath(watch.folder_path));
            }
        }

        self.db
            .with_connection(|conn| queries::insert_watch(conn, &watch))?;

        tracing::info!("Watching folder {}", watch.folder_path);
        self.watches.push(watch);

        Ok(())
    }

    /// Remove the watch rooted at `folder_path`
    pub fn remove(&mut self, folder_path: &str) -> Result<(), WatchError> {
        let removed = self
            .db
            .with_connection(|conn| queries::delete_watch(conn, folder_path))?;

        if !removed {
            return Err(WatchError::NotFound(folder_path.to_string()));
        }

        tracing::info!("Stopped watching folder {}", folder_path);
        self.watches.retain(|w| w.folder_path != folder_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::watch::CollectionMapping;

    fn test_store() -> WatchStore {
        WatchStore::open(Database::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_add_appears_exactly_once() {
        let mut store = test_store();

        store
            .add(FolderWatch::new("/a/b", CollectionMapping::Root))
            .unwrap();

        let matching: Vec<_> = store
            .list()
            .iter()
            .filter(|w| w.folder_path == "/a/b")
            .collect();
        assert_eq!(matching.len(), 1);
        assert!(store.find_by_path("/a/b").is_some());
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut store = test_store();

        store
            .add(FolderWatch::new("/a/b", CollectionMapping::Root))
            .unwrap();
        let result = store.add(FolderWatch::new("/a/b", CollectionMapping::Parent));

        assert!(matches!(result, Err(WatchError::DuplicatePath(_))));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_nested_rewatch_rejected_both_directions() {
        let mut store = test_store();

        store
            .add(FolderWatch::new("/a/b", CollectionMapping::Root))
            .unwrap();

        let inside = store.add(FolderWatch::new("/a/b/c", CollectionMapping::Root));
        assert!(matches!(inside, Err(WatchError::DuplicatePath(_))));

        let enclosing = store.add(FolderWatch::new("/a", CollectionMapping::Root));
        assert!(matches!(enclosing, Err(WatchError::DuplicatePath(_))));

        // A sibling with a shared name prefix is fine
        store
            .add(FolderWatch::new("/a/bc", CollectionMapping::Root))
            .unwrap();
    }

    #[test]
    fn test_remove_twice_fails_not_found() {
        let mut store = test_store();

        store
            .add(FolderWatch::new("/a/b", CollectionMapping::Root))
            .unwrap();

        store.remove("/a/b").unwrap();
        let second = store.remove("/a/b");

        assert!(matches!(second, Err(WatchError::NotFound(_))));
    }

    #[test]
    fn test_mirror_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("watches.db");

        {
            let mut store = WatchStore::open(Database::open(db_path.clone()).unwrap()).unwrap();
            store
                .add(FolderWatch::new("/a/b", CollectionMapping::Parent))
                .unwrap();
        }

        let store = WatchStore::open(Database::open(db_path).unwrap()).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(
            store.list()[0].collection_mapping,
            CollectionMapping::Parent
        );
    }
}
