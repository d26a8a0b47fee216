// src/infrastructure/mod.rs
pub mod config;
pub mod sqlite;

pub use config::Config;
pub use sqlite::SqliteNoteStore;
