use anyhow::{Context, Result};
use quicknotes::domain::Note;
use quicknotes::infrastructure::SqliteNoteStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for working with a temporary notes database
#[allow(dead_code)]
pub struct TestDatabase {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Create an empty database location in a fresh temp directory
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("data").join("notes_app.db");

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Open a store on this database
    pub fn open_store(&self) -> Result<SqliteNoteStore> {
        Ok(SqliteNoteStore::open(&self.path)?)
    }
}

/// Unsaved note with the given fields
#[allow(dead_code)]
pub fn note(title: &str, description: &str, timestamp: i64) -> Note {
    Note {
        id: None,
        title: title.to_string(),
        description: description.to_string(),
        timestamp,
    }
}

/// Notes sorted by id, for comparisons independent of row order
#[allow(dead_code)]
pub fn by_id(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by_key(|n| n.id);
    notes
}
