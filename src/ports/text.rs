// src/ports/text.rs
use crate::constants::LIST_DESCRIPTION_WIDTH;
use crate::domain::Note;
use crate::util::text::{first_line, truncate};
use chrono::{DateTime, Local};
use tracing::instrument;

/// Plain-text rendering of notes for the terminal
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    fn format_timestamp(&self, timestamp: i64) -> String {
        DateTime::from_timestamp_millis(timestamp)
            .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    fn format_id(&self, note: &Note) -> String {
        note.id.map_or_else(|| "-".to_string(), |id| id.to_string())
    }

    /// One line per note: id, date, title and the start of the description
    #[instrument(level = "trace", skip_all, fields(count = notes.len()))]
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes yet".to_string();
        }

        let id_width = notes
            .iter()
            .map(|n| self.format_id(n).len())
            .max()
            .unwrap_or(1);

        notes
            .iter()
            .map(|note| {
                let line = format!(
                    "{:>id_width$}  {}  {}",
                    self.format_id(note),
                    self.format_timestamp(note.timestamp),
                    note.title,
                );
                let description = first_line(&note.description);
                if description.is_empty() {
                    line
                } else {
                    format!(
                        "{}  {}",
                        line,
                        truncate(description, LIST_DESCRIPTION_WIDTH)
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self, note: &Note) -> String {
        format!(
            "Id:          {}\nUpdated:     {}\nTitle:       {}\nDescription:\n{}",
            self.format_id(note),
            self.format_timestamp(note.timestamp),
            note.title,
            note.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, description: &str) -> Note {
        Note {
            id: Some(id),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn given_no_notes_when_rendering_list_then_shows_empty_message() {
        assert_eq!(TextPresenter::new().render_list(&[]), "No notes yet");
    }

    #[test]
    fn given_notes_when_rendering_list_then_one_line_per_note() {
        let presenter = TextPresenter::new();
        let notes = vec![note(1, "Milk", "buy\nfull fat"), note(12, "Eggs", "")];

        let output = presenter.render_list(&notes);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1  "));
        assert!(lines[0].ends_with("Milk  buy"));
        assert!(lines[1].starts_with("12  "));
        assert!(lines[1].ends_with("Eggs"));
    }

    #[test]
    fn given_long_description_when_rendering_list_then_truncates() {
        let presenter = TextPresenter::new();
        let description = "x".repeat(LIST_DESCRIPTION_WIDTH + 10);

        let output = presenter.render_list(&[note(1, "T", &description)]);

        let expected = format!("{}…", "x".repeat(LIST_DESCRIPTION_WIDTH - 1));
        assert!(output.ends_with(&expected));
    }

    #[test]
    fn given_note_when_rendering_then_includes_all_fields() {
        let output = TextPresenter::new().render(&note(3, "Title", "Line one\nLine two"));

        assert!(output.contains("Id:          3"));
        assert!(output.contains("Title:       Title"));
        assert!(output.contains("Line one\nLine two"));
    }
}
