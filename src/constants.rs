// src/constants.rs
//
// Application-wide constants shared by the store, the configuration layer and the CLI.

/// Schema version stored in `PRAGMA user_version`.
///
/// A database carrying any other version has its notes table dropped and
/// recreated on open.
///
/// Used in: `infrastructure/sqlite.rs`
pub const SCHEMA_VERSION: i32 = 2;

/// File name of the database inside the application data directory.
///
/// Used in: `infrastructure/config.rs`
pub const DATABASE_FILE_NAME: &str = "notes_app.db";

/// Directory created under the platform data and config directories.
///
/// Used in: `infrastructure/config.rs`
pub const APP_DIR_NAME: &str = "quicknotes";

/// Name of the optional TOML configuration file.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum characters of a description shown in list output.
///
/// Used in: `ports/text.rs`
pub const LIST_DESCRIPTION_WIDTH: usize = 48;
