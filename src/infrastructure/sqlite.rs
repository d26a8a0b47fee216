// src/infrastructure/sqlite.rs
use crate::application::{NoteRepository, NoteStream};
use crate::constants::SCHEMA_VERSION;
use crate::domain::{DomainError, Note};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Notes table in a local SQLite database
///
/// All SQL runs on the blocking pool. The connection mutex serialises writers,
/// and the full set is republished to live subscribers while the lock is still
/// held, so snapshots reach subscribers in commit order.
pub struct SqliteNoteStore {
    inner: Arc<Inner>,
    path: Option<PathBuf>,
}

struct Inner {
    conn: Mutex<Connection>,
    snapshots: watch::Sender<Vec<Note>>,
}

impl SqliteNoteStore {
    /// Open or create the database file, recreating the notes table if its
    /// schema version differs from the current one
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = PathBuf::from(path.as_ref());
        debug!(?path, "Opening note store");

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    DomainError::Storage(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(&path)?;
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(%journal_mode, "Configured journal mode");
        let store = Self::from_connection(conn, Some(path.clone()))?;

        info!(?path, "Successfully opened note store");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, DomainError> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self, DomainError> {
        initialize_schema(&conn)?;
        let notes = load_all(&conn)?;
        debug!(count = notes.len(), "Loaded initial snapshot");
        let (snapshots, _) = watch::channel(notes);

        Ok(Self {
            inner: Arc::new(Inner {
                conn: Mutex::new(conn),
                snapshots,
            }),
            path,
        })
    }

    /// Database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn run<T, F>(&self, op: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&Inner) -> Result<T, DomainError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner)).await?
    }
}

impl Inner {
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Storage("Database connection lock poisoned".to_string()))
    }

    /// Push the current full set to every subscriber.
    ///
    /// Runs after the write has committed. A failed reload is logged and the
    /// subscribers keep their previous snapshot; the write is not rolled back.
    fn publish(&self, conn: &Connection) {
        match load_all(conn) {
            Ok(notes) => {
                debug!(
                    count = notes.len(),
                    subscribers = self.snapshots.receiver_count(),
                    "Publishing notes snapshot"
                );
                self.snapshots.send_replace(notes);
            }
            Err(e) => warn!(error = %e, "Failed to reload notes after commit"),
        }
    }

    /// Insert-or-replace keyed by id, shared by insert and update
    fn put(&self, note: &Note) -> Result<i64, DomainError> {
        let conn = self.lock()?;
        let id = match note.id {
            Some(id) => {
                conn.execute(
                    "INSERT OR REPLACE INTO notes (id, title, description, timestamp)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![id, note.title, note.description, note.timestamp],
                )?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO notes (title, description, timestamp) VALUES (?1, ?2, ?3)",
                    params![note.title, note.description, note.timestamp],
                )?;
                conn.last_insert_rowid()
            }
        };
        self.publish(&conn);
        Ok(id)
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteStore {
    fn get_all(&self) -> NoteStream {
        NoteStream::new(self.inner.snapshots.subscribe())
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Note, DomainError> {
        self.run(move |inner| {
            let conn = inner.lock()?;
            conn.query_row(
                "SELECT id, title, description, timestamp FROM notes WHERE id = ?1",
                [id],
                note_from_row,
            )
            .optional()?
            .ok_or(DomainError::NoteNotFound(id))
        })
        .await
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = ?note.id))]
    async fn insert(&self, note: Note) -> Result<i64, DomainError> {
        let id = self.run(move |inner| inner.put(&note)).await?;
        info!(note_id = id, "Inserted note");
        Ok(id)
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = ?note.id))]
    async fn update(&self, note: Note) -> Result<i64, DomainError> {
        let id = self.run(move |inner| inner.put(&note)).await?;
        info!(note_id = id, "Updated note");
        Ok(id)
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = ?note.id))]
    async fn delete(&self, note: Note) -> Result<(), DomainError> {
        let Some(id) = note.id else {
            debug!("Note was never stored, nothing to delete");
            return Ok(());
        };

        self.run(move |inner| {
            let conn = inner.lock()?;
            let removed = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
            if removed == 0 {
                debug!(note_id = id, "Note already absent");
                return Ok(());
            }
            inner.publish(&conn);
            info!(note_id = id, "Deleted note");
            Ok(())
        })
        .await
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

fn load_all(conn: &Connection) -> Result<Vec<Note>, DomainError> {
    let mut stmt = conn.prepare_cached("SELECT id, title, description, timestamp FROM notes")?;
    let notes = stmt
        .query_map([], note_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(notes)
}

fn schema_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Create the notes table, dropping any table written under another schema version
fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
    let version = schema_version(conn)?;
    if version == SCHEMA_VERSION {
        return Ok(());
    }

    if version == 0 {
        debug!("Creating notes table");
    } else {
        warn!(
            found = version,
            expected = SCHEMA_VERSION,
            "Schema version mismatch, discarding stored notes"
        );
    }

    conn.execute_batch(&format!(
        "BEGIN;
         DROP TABLE IF EXISTS notes;
         CREATE TABLE notes (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             title TEXT NOT NULL DEFAULT '',
             description TEXT NOT NULL DEFAULT '',
             timestamp INTEGER NOT NULL DEFAULT 0
         );
         PRAGMA user_version = {};
         COMMIT;",
        SCHEMA_VERSION
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, description: &str, timestamp: i64) -> Note {
        Note {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn given_unsaved_note_when_inserting_then_assigns_id() {
        // Arrange
        let store = SqliteNoteStore::open_in_memory().expect("store opens");

        // Act
        let id = store.insert(note("Milk", "buy", 10)).await.expect("insert");

        // Assert
        let stored = store.get_by_id(id).await.expect("note exists");
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.title, "Milk");
        assert_eq!(stored.description, "buy");
        assert_eq!(stored.timestamp, 10);
    }

    #[tokio::test]
    async fn given_deleted_row_when_inserting_then_does_not_reuse_id() {
        let store = SqliteNoteStore::open_in_memory().expect("store opens");
        let first = store.insert(note("a", "", 1)).await.expect("insert");
        store
            .delete(Note {
                id: Some(first),
                ..Note::default()
            })
            .await
            .expect("delete");

        let second = store.insert(note("b", "", 2)).await.expect("insert");

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn given_missing_id_when_getting_then_returns_not_found() {
        let store = SqliteNoteStore::open_in_memory().expect("store opens");

        let result = store.get_by_id(404).await;

        assert!(matches!(result, Err(DomainError::NoteNotFound(404))));
    }

    #[tokio::test]
    async fn given_unknown_id_when_updating_then_creates_row() {
        let store = SqliteNoteStore::open_in_memory().expect("store opens");

        let id = store
            .update(Note {
                id: Some(50),
                title: "Upserted".to_string(),
                description: String::new(),
                timestamp: 3,
            })
            .await
            .expect("update");

        assert_eq!(id, 50);
        assert_eq!(store.get_by_id(50).await.expect("exists").title, "Upserted");
    }

    #[tokio::test]
    async fn given_fresh_store_when_subscribing_then_sees_empty_set() {
        let store = SqliteNoteStore::open_in_memory().expect("store opens");

        let mut stream = store.get_all();

        assert_eq!(stream.next().await, Some(vec![]));
        assert!(store.path().is_none());
    }

    #[tokio::test]
    async fn given_unreadable_row_when_inserting_then_write_still_succeeds() {
        // Arrange
        let store = SqliteNoteStore::open_in_memory().expect("store opens");
        let mut stream = store.get_all();
        assert_eq!(stream.next().await, Some(vec![]));
        store
            .inner
            .lock()
            .expect("lock")
            .execute(
                "INSERT INTO notes (title, description, timestamp) VALUES (x'ff', '', 0)",
                [],
            )
            .expect("raw insert");

        // Act
        let id = store.insert(note("Landed", "", 1)).await.expect("insert");

        // Assert
        assert_eq!(store.get_by_id(id).await.expect("exists").title, "Landed");
        assert_eq!(stream.current(), vec![]);
    }

    #[test]
    fn given_outdated_schema_when_initializing_then_recreates_table() {
        // Arrange
        let conn = Connection::open_in_memory().expect("connection");
        conn.execute_batch(
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);
             INSERT INTO notes (body) VALUES ('legacy');
             PRAGMA user_version = 1;",
        )
        .expect("legacy schema");

        // Act
        initialize_schema(&conn).expect("schema initializes");

        // Assert
        assert_eq!(schema_version(&conn).expect("version"), SCHEMA_VERSION);
        assert!(load_all(&conn).expect("query").is_empty());
    }

    #[test]
    fn given_current_schema_when_initializing_then_keeps_rows() {
        let conn = Connection::open_in_memory().expect("connection");
        initialize_schema(&conn).expect("create");
        conn.execute(
            "INSERT INTO notes (title, description, timestamp) VALUES ('kept', '', 1)",
            [],
        )
        .expect("insert");

        initialize_schema(&conn).expect("reopen");

        assert_eq!(load_all(&conn).expect("query").len(), 1);
    }
}
