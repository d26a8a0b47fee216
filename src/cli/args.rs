// src/cli/args.rs
use crate::domain::SortOption;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the notes database (optional)
    #[arg(short, long, value_name = "DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Path to a TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Log level for the `quicknotes` target: info by default, then debug, then trace
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note and print its id
    Add {
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Note description
        #[arg(short = 'D', long, default_value = "")]
        description: String,
    },

    /// Replace the title and/or description of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Print a single note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, optionally filtered and sorted
    List {
        /// Case-insensitive text to look for in titles and descriptions
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Ordering: title-ascending, title-descending, date-ascending, date-descending
        #[arg(short, long, value_name = "SORT")]
        sort: Option<SortOption>,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file to --config or the platform config directory
    InitConfig,
}
