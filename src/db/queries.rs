//! Database query implementations
//!
//! Insert, delete, and list operations for watch records

use rusqlite::{params, Connection, OptionalExtension};

use super::DbError;
use crate::models::watch::{CollectionMapping, FolderWatch};

/// Insert a watch record
pub fn insert_watch(conn: &Connection, watch: &FolderWatch) -> Result<(), DbError> {
    conn.execute(
        r#"
        INSERT INTO watches (folder_path, root_folder_name, collection_mapping, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            watch.folder_path,
            watch.root_folder_name,
            watch.collection_mapping.as_str(),
            watch.created_at,
        ],
    )?;

    Ok(())
}

/// Delete the watch rooted at `folder_path`; returns whether a row existed
pub fn delete_watch(conn: &Connection, folder_path: &str) -> Result<bool, DbError> {
    let affected = conn.execute(
        "DELETE FROM watches WHERE folder_path = ?1",
        params![folder_path],
    )?;

    Ok(affected > 0)
}

/// Load all watches in insertion order
pub fn list_watches(conn: &Connection) -> Result<Vec<FolderWatch>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT folder_path, root_folder_name, collection_mapping, created_at
        FROM watches
        ORDER BY rowid
        "#,
    )?;

    let watches = stmt
        .query_map([], |row| {
            let mapping: String = row.get(2)?;

            Ok(FolderWatch {
                folder_path: row.get(0)?,
                root_folder_name: row.get(1)?,
                collection_mapping: CollectionMapping::parse(&mapping).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        format!("unknown collection mapping: {mapping}").into(),
                    )
                })?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(watches)
}

/// Get a single watch by its root path
pub fn find_watch(conn: &Connection, folder_path: &str) -> Result<Option<FolderWatch>, DbError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT folder_path, root_folder_name, collection_mapping, created_at
        FROM watches
        WHERE folder_path = ?1
        "#,
    )?;

    let watch = stmt
        .query_row(params![folder_path], |row| {
            let mapping: String = row.get(2)?;

            Ok(FolderWatch {
                folder_path: row.get(0)?,
                root_folder_name: row.get(1)?,
                collection_mapping: CollectionMapping::parse(&mapping).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        format!("unknown collection mapping: {mapping}").into(),
                    )
                })?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(watch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_list_preserves_order() {
        let conn = test_conn();

        insert_watch(&conn, &FolderWatch::new("/a/b", CollectionMapping::Root)).unwrap();
        insert_watch(&conn, &FolderWatch::new("/a/c", CollectionMapping::Parent)).unwrap();

        let watches = list_watches(&conn).unwrap();
        assert_eq!(watches.len(), 2);
        assert_eq!(watches[0].folder_path, "/a/b");
        assert_eq!(watches[1].folder_path, "/a/c");
        assert_eq!(watches[1].collection_mapping, CollectionMapping::Parent);
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let conn = test_conn();

        insert_watch(&conn, &FolderWatch::new("/a/b", CollectionMapping::Root)).unwrap();
        let result = insert_watch(&conn, &FolderWatch::new("/a/b", CollectionMapping::Parent));

        assert!(result.is_err());
    }

    #[test]
    fn test_find_watch() {
        let conn = test_conn();

        insert_watch(&conn, &FolderWatch::new("/a/b", CollectionMapping::Root)).unwrap();

        let found = find_watch(&conn, "/a/b").unwrap();
        assert_eq!(found.unwrap().root_folder_name, "b");

        let missing = find_watch(&conn, "/a/z").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_delete_watch() {
        let conn = test_conn();

        insert_watch(&conn, &FolderWatch::new("/a/b", CollectionMapping::Root)).unwrap();

        assert!(delete_watch(&conn, "/a/b").unwrap());
        assert!(!delete_watch(&conn, "/a/b").unwrap());
        assert!(list_watches(&conn).unwrap().is_empty());
    }
}
