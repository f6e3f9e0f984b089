//! # Effects
//!
//! An [`Effect`] is what a use case hands to the presentation layer: the
//! smallest description of what changed on screen. Effects carry view-models
//! ([`Row`], [`NoteView`]) rather than entities, so renderers never depend on
//! domain types.

use chrono::{DateTime, Utc};

use crate::model::{Note, Notebook};

/// One line of a list screen (a notebook in the library, a note in a notebook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub title: String,
    /// Number of notes, for notebook rows.
    pub count: Option<usize>,
    /// Tags, for note rows.
    pub tags: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Notebook> for Row {
    fn from(notebook: &Notebook) -> Self {
        Self {
            id: notebook.id().to_string(),
            title: notebook.name().to_string(),
            count: Some(notebook.len()),
            tags: Vec::new(),
            updated_at: None,
        }
    }
}

impl From<&Note> for Row {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            count: None,
            tags: note.all_tags().to_vec(),
            updated_at: Some(note.updated_at()),
        }
    }
}

/// Everything a note screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            content: note.content().to_string(),
            tags: note.all_tags().to_vec(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
        }
    }
}

/// A single field that changed on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    NotebookName(String),
    NoteTitle(String),
    NoteContent(String),
    NoteTags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A row appeared at `index`; `rows` is the full list afterwards.
    Insert { index: usize, rows: Vec<Row> },
    /// The row at `index` went away; `rows` is the full list afterwards.
    Remove { index: usize, rows: Vec<Row> },
    Replace(FieldChange),
    /// Redraw the whole list.
    Reload { rows: Vec<Row> },
    /// Redraw a note screen.
    Show(NoteView),
    /// The entity behind the current screen is gone.
    Dismiss,
    /// Nothing to render.
    None,
}

pub fn notebook_rows(notebooks: &[Notebook]) -> Vec<Row> {
    notebooks.iter().map(Row::from).collect()
}

pub fn note_rows(notes: &[Note]) -> Vec<Row> {
    notes.iter().map(Row::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn notebook_row_counts_notes() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let nb = Notebook::with_id("nb", "Work")
            .add_note(Note::with_id("a", "A", "", now))
            .unwrap();
        let row = Row::from(&nb);
        assert_eq!(row.title, "Work");
        assert_eq!(row.count, Some(1));
    }

    #[test]
    fn note_row_carries_tags_and_time() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let note = Note::with_id("a", "A", "body", now)
            .add_tag("x", now)
            .unwrap();
        let row = Row::from(&note);
        assert_eq!(row.tags, ["x"]);
        assert_eq!(row.updated_at, Some(now));
        assert_eq!(row.count, None);
    }
}
