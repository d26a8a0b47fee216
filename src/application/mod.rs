// src/application/mod.rs
pub mod note_lister;
pub mod note_service;
pub mod repository;

pub use note_lister::{arrange_notes, NoteLister};
pub use note_service::{MutationHandle, NoteService};
pub use repository::{NoteRepository, NoteStream};
