// src/application/note_service.rs
use crate::application::{NoteRepository, NoteStream};
use crate::domain::{DomainError, Note};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Mediates between the live note collection and user intents.
///
/// Mutations are launched as detached tokio tasks: the caller is never blocked
/// and no ordering holds between two mutations issued back to back. The
/// returned [`MutationHandle`] may be dropped, or awaited to observe the result.
pub struct NoteService<R: NoteRepository + 'static> {
    repository: Arc<R>,
    clock: Clock,
}

impl<R: NoteRepository + 'static> Clone for NoteService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: NoteRepository + 'static> NoteService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            clock: Arc::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Replace the wall clock used to stamp inserts and updates (milliseconds since epoch)
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Live collection of all notes, straight from the repository
    pub fn notes(&self) -> NoteStream {
        self.repository.get_all()
    }

    pub async fn note(&self, id: i64) -> Result<Note, DomainError> {
        self.repository.get_by_id(id).await
    }

    /// Insert an empty note
    pub fn create_note(&self) -> MutationHandle<i64> {
        self.insert_note(Note::default())
    }

    pub fn insert_note(&self, mut note: Note) -> MutationHandle<i64> {
        note.timestamp = (self.clock)();
        debug!(timestamp = note.timestamp, "Launching note insert");
        let repository = Arc::clone(&self.repository);
        launch("insert", async move { repository.insert(note).await })
    }

    pub fn update_note(&self, mut note: Note) -> MutationHandle<i64> {
        note.timestamp = (self.clock)();
        debug!(note_id = ?note.id, timestamp = note.timestamp, "Launching note update");
        let repository = Arc::clone(&self.repository);
        launch("update", async move { repository.update(note).await })
    }

    pub fn delete_note(&self, note: Note) -> MutationHandle<()> {
        debug!(note_id = ?note.id, "Launching note delete");
        let repository = Arc::clone(&self.repository);
        launch("delete", async move { repository.delete(note).await })
    }
}

fn launch<T, F>(operation: &'static str, mutation: F) -> MutationHandle<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DomainError>> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let result = mutation.await;
        if let Err(e) = &result {
            warn!(operation, error = %e, "Note mutation failed");
        }
        result
    });
    MutationHandle { operation, handle }
}

/// Handle to a detached note mutation.
///
/// Dropping it leaves the mutation running.
#[derive(Debug)]
pub struct MutationHandle<T> {
    operation: &'static str,
    handle: JoinHandle<Result<T, DomainError>>,
}

impl<T> MutationHandle<T> {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Wait for the mutation and return what the repository reported
    pub async fn outcome(self) -> Result<T, DomainError> {
        self.handle.await?
    }
}
