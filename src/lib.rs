// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{NoteLister, NoteRepository, NoteService};
use cli::args::{Args, Command};
use domain::Note;
use infrastructure::config::default_config_path;
use infrastructure::{Config, SqliteNoteStore};
use ports::TextPresenter;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting quicknotes with arguments");

    if let Command::InitConfig = args.command {
        let path = match args.config {
            Some(path) => path,
            None => default_config_path().context("Could not find config directory")?,
        };
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }
        Config::create_default(&path)?;
        info!(?path, "Wrote default configuration");
        println!("{}", path.display());
        return Ok(());
    }

    // Initialize configuration
    let config = Config::load_or_default(args.config.as_deref())?;
    debug!(?config, "Loaded configuration");

    let database_path = match args.database {
        Some(path) => {
            debug!(?path, "Using provided database path");
            path
        }
        None => config.database_path()?,
    };

    // Initialize infrastructure and application
    let store = SqliteNoteStore::open(&database_path)
        .with_context(|| format!("Failed to open notes database {}", database_path.display()))?;
    let service = NoteService::new(store);

    // Execute use case
    let output = execute(args.command, &service, &config).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Run one command against the service and return the text to print
pub async fn execute<R: NoteRepository + 'static>(
    command: Command,
    service: &NoteService<R>,
    config: &Config,
) -> Result<String> {
    let presenter = TextPresenter::new();

    let output = match command {
        Command::Add { title, description } => {
            let id = service
                .insert_note(Note::new(title, description))
                .outcome()
                .await?;
            info!(note_id = id, "Created note");
            id.to_string()
        }
        Command::Edit {
            note_id,
            title,
            description,
        } => {
            let mut note = service.note(note_id).await?;
            if let Some(title) = title {
                note.title = title;
            }
            if let Some(description) = description {
                note.description = description;
            }
            service.update_note(note).outcome().await?;
            info!(note_id, "Updated note");
            String::new()
        }
        Command::Delete { note_id } => {
            let note = Note {
                id: Some(note_id),
                ..Note::default()
            };
            service.delete_note(note).outcome().await?;
            info!(note_id, "Deleted note");
            String::new()
        }
        Command::Show { note_id, json } => {
            let note = service.note(note_id).await?;
            if json {
                serde_json::to_string_pretty(&note)?
            } else {
                presenter.render(&note)
            }
        }
        Command::List { search, sort, json } => {
            let sort = sort.unwrap_or(config.display.sort);
            let mut lister = NoteLister::new(sort);
            lister.set_query(search.unwrap_or_default());
            let snapshot = service.notes().current();
            let notes = lister.view(&snapshot);
            debug!(count = notes.len(), %sort, "Listing notes");
            if json {
                serde_json::to_string_pretty(notes)?
            } else {
                presenter.render_list(notes)
            }
        }
        Command::InitConfig => bail!("init-config does not use the notes database"),
    };

    Ok(output)
}
