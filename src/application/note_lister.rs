// src/application/note_lister.rs
use crate::domain::{Note, SortOption};
use std::cmp::Ordering;

/// Notes whose title or description contains `query`, ignoring case
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    notes.iter().filter(|n| n.matches(query)).cloned().collect()
}

/// Stable sort in place. Titles compare case-sensitively.
pub fn sort_notes(notes: &mut [Note], sort: SortOption) {
    let compare: fn(&Note, &Note) -> Ordering = match sort {
        SortOption::TitleAscending => |a, b| a.title.cmp(&b.title),
        SortOption::TitleDescending => |a, b| b.title.cmp(&a.title),
        SortOption::DateAscending => |a, b| a.timestamp.cmp(&b.timestamp),
        SortOption::DateDescending => |a, b| b.timestamp.cmp(&a.timestamp),
    };
    notes.sort_by(compare);
}

/// Filter then sort, producing the sequence to display
///
/// # Arguments
/// * `notes` - Current full set, left untouched
/// * `query` - Free text; empty keeps every note
/// * `sort` - Ordering applied to the filtered notes only
pub fn arrange_notes(notes: &[Note], query: &str, sort: SortOption) -> Vec<Note> {
    let mut filtered = filter_notes(notes, query);
    sort_notes(&mut filtered, sort);
    filtered
}

/// Search and sort state of a note list view.
///
/// Caches the filtered set per (notes, query) and the sorted output per sort
/// option, so repeated renders with unchanged inputs do no work.
#[derive(Debug, Default)]
pub struct NoteLister {
    query: String,
    sort: SortOption,
    filtered: Option<Filtered>,
    sorted: Option<(SortOption, Vec<Note>)>,
}

#[derive(Debug)]
struct Filtered {
    source: Vec<Note>,
    query: String,
    notes: Vec<Note>,
}

impl NoteLister {
    pub fn new(sort: SortOption) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    /// Notes to display for the current query and sort option
    pub fn view(&mut self, notes: &[Note]) -> &[Note] {
        let filter_stale = !matches!(
            &self.filtered,
            Some(f) if f.query == self.query && f.source.as_slice() == notes
        );
        if filter_stale {
            self.filtered = Some(Filtered {
                source: notes.to_vec(),
                query: self.query.clone(),
                notes: filter_notes(notes, &self.query),
            });
            self.sorted = None;
        }

        let sort_stale = !matches!(&self.sorted, Some((sort, _)) if *sort == self.sort);
        if sort_stale {
            let mut sorted = self
                .filtered
                .as_ref()
                .map(|f| f.notes.clone())
                .unwrap_or_default();
            sort_notes(&mut sorted, self.sort);
            self.sorted = Some((self.sort, sorted));
        }

        self.sorted.as_ref().map(|(_, n)| n.as_slice()).unwrap_or(&[])
    }
}
