// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::application::{NoteRepository, NoteStream};
use crate::domain::{DomainError, Note};

/// Repository operations that can be configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetById,
    Insert,
    Update,
    Delete,
}

/// In-memory stand-in for the SQLite store
///
/// Mirrors the store's semantics (upsert on insert and update, silent delete
/// of absent rows, full-set snapshots after every write) so the service can
/// be tested without a database. Individual operations can be made to fail
/// with a storage error.
///
/// # Examples
///
/// ```
/// use quicknotes::util::testing::{InMemoryNoteRepository, Operation};
/// use quicknotes::domain::Note;
///
/// let repo = InMemoryNoteRepository::builder()
///     .with_note(Note {
///         id: Some(1),
///         title: "Milk".to_string(),
///         description: "buy".to_string(),
///         timestamp: 0,
///     })
///     .with_failure(Operation::Delete)
///     .build();
/// ```
pub struct InMemoryNoteRepository {
    state: Mutex<State>,
    snapshots: watch::Sender<Vec<Note>>,
    failures: HashSet<Operation>,
}

struct State {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
}

impl InMemoryNoteRepository {
    pub fn builder() -> InMemoryNoteRepositoryBuilder {
        InMemoryNoteRepositoryBuilder::new()
    }

    /// Copy of every stored note, ordered by id
    pub fn notes(&self) -> Vec<Note> {
        self.lock()
            .map(|state| state.notes.values().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Storage("In-memory state lock poisoned".to_string()))
    }

    fn check(&self, operation: Operation) -> Result<(), DomainError> {
        if self.failures.contains(&operation) {
            return Err(DomainError::Storage(format!(
                "Injected failure for {:?}",
                operation
            )));
        }
        Ok(())
    }

    fn put(&self, mut note: Note) -> Result<i64, DomainError> {
        let mut state = self.lock()?;
        let id = match note.id {
            Some(id) => id,
            None => state.next_id,
        };
        state.next_id = state.next_id.max(id.saturating_add(1));
        note.id = Some(id);
        state.notes.insert(id, note);
        self.snapshots
            .send_replace(state.notes.values().cloned().collect());
        Ok(id)
    }
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    fn get_all(&self) -> NoteStream {
        NoteStream::new(self.snapshots.subscribe())
    }

    async fn get_by_id(&self, id: i64) -> Result<Note, DomainError> {
        self.check(Operation::GetById)?;
        self.lock()?
            .notes
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }

    async fn insert(&self, note: Note) -> Result<i64, DomainError> {
        self.check(Operation::Insert)?;
        self.put(note)
    }

    async fn update(&self, note: Note) -> Result<i64, DomainError> {
        self.check(Operation::Update)?;
        self.put(note)
    }

    async fn delete(&self, note: Note) -> Result<(), DomainError> {
        self.check(Operation::Delete)?;
        let Some(id) = note.id else {
            return Ok(());
        };
        let mut state = self.lock()?;
        if state.notes.remove(&id).is_some() {
            self.snapshots
                .send_replace(state.notes.values().cloned().collect());
        }
        Ok(())
    }
}

/// Builder for InMemoryNoteRepository
///
/// Provides a fluent interface for seeding notes and injecting failures.
pub struct InMemoryNoteRepositoryBuilder {
    notes: BTreeMap<i64, Note>,
    failures: HashSet<Operation>,
}

impl InMemoryNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            failures: HashSet::new(),
        }
    }

    /// Seed a stored note. Notes without an id get the next free one.
    pub fn with_note(mut self, mut note: Note) -> Self {
        let id = note
            .id
            .unwrap_or_else(|| self.notes.keys().next_back().map_or(1, |last| last + 1));
        note.id = Some(id);
        self.notes.insert(id, note);
        self
    }

    /// Make every call of `operation` fail with a storage error
    pub fn with_failure(mut self, operation: Operation) -> Self {
        self.failures.insert(operation);
        self
    }

    pub fn build(self) -> InMemoryNoteRepository {
        let next_id = self.notes.keys().next_back().map_or(1, |last| last + 1);
        let (snapshots, _) = watch::channel(self.notes.values().cloned().collect());
        InMemoryNoteRepository {
            state: Mutex::new(State {
                notes: self.notes,
                next_id,
            }),
            snapshots,
            failures: self.failures,
        }
    }
}

impl Default for InMemoryNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const TEST_LOG_FILTER: &str = "warn,quicknotes=trace";

/// Route test diagnostics to the libtest capture.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at trace and everything
/// else (tokio, rusqlite) at warn. Safe to call from several test binaries.
pub fn init_test_setup() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(TEST_LOG_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .is_ok();

    debug!(installed, "Test logging ready");
    Ok(())
}
