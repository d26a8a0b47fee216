// src/application/repository.rs
use crate::domain::{DomainError, Note};
use async_trait::async_trait;
use tokio::sync::watch;

/// Storage capabilities the service depends on
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Live query of every stored note
    fn get_all(&self) -> NoteStream;

    async fn get_by_id(&self, id: i64) -> Result<Note, DomainError>;

    /// Store the note, allocating an id if it has none. Returns the stored id.
    async fn insert(&self, note: Note) -> Result<i64, DomainError>;

    /// Replace the row matching `note.id` in full (insert-or-replace)
    async fn update(&self, note: Note) -> Result<i64, DomainError>;

    /// Remove the row matching `note.id`. Absent rows are not an error.
    async fn delete(&self, note: Note) -> Result<(), DomainError>;
}

/// Subscription to full-set snapshots of the notes table.
///
/// The first call to [`NoteStream::next`] yields the set as it was when the
/// stream was created; every later call waits for the next commit. A slow
/// reader may skip intermediate snapshots but never sees an older one after a
/// newer one.
#[derive(Debug, Clone)]
pub struct NoteStream {
    receiver: watch::Receiver<Vec<Note>>,
}

impl NoteStream {
    pub fn new(mut receiver: watch::Receiver<Vec<Note>>) -> Self {
        receiver.mark_changed();
        Self { receiver }
    }

    /// Latest snapshot without waiting
    pub fn current(&self) -> Vec<Note> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<Vec<Note>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
