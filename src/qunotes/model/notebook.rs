use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{unique_by_id, Note};
use crate::failure::NotebookFailure;

/// The persisted identity of a notebook, without its notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMeta {
    pub id: String,
    pub name: String,
}

/// A named, ordered collection of notes.
///
/// Notes are addressed by identifier; positions are only used for display and
/// are derived from insertion order when asked for.
#[derive(Debug, Clone)]
pub struct Notebook {
    id: String,
    name: String,
    notes: Vec<Note>,
}

impl PartialEq for Notebook {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Notebook {}

impl Notebook {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            notes: Vec::new(),
        }
    }

    /// Reassembles a notebook from its persisted parts. Later notes repeating
    /// an earlier identifier are dropped.
    pub fn from_meta(meta: NotebookMeta, notes: Vec<Note>) -> Self {
        Self {
            id: meta.id,
            name: meta.name,
            notes: unique_by_id(notes, |n| n.id()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> NotebookMeta {
        NotebookMeta {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Display position of the note with `id`.
    pub fn note_position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.id() == id)
    }

    /// Positional access, kept for callers that think in list rows.
    pub fn get_note(&self, index: usize) -> Result<&Note, NotebookFailure> {
        self.notes.get(index).ok_or(NotebookFailure::NoteNotExists)
    }

    /// Appends `note`. A note whose identifier is already present is rejected.
    pub fn add_note(self, note: Note) -> Result<Self, NotebookFailure> {
        if self.note(note.id()).is_some() {
            return Err(NotebookFailure::AddNote);
        }
        Ok(lens::notes().over(self, |mut notes| {
            notes.push(note);
            notes
        }))
    }

    /// Removes the note with `id`; absent identifiers leave the notebook as is.
    pub fn delete_note(self, id: &str) -> Self {
        lens::note(id).set(None, self)
    }

    /// Swaps in `note` at the position of the note sharing its identifier,
    /// appending it if there is none.
    pub fn replace_note(self, note: Note) -> Self {
        let id = note.id().to_string();
        lens::note(&id).set(Some(note), self)
    }

    pub fn update_name(self, name: &str) -> Result<Self, NotebookFailure> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NotebookFailure::UpdateNotebook);
        }
        Ok(lens::name().set(name.to_string(), self))
    }
}

/// Lenses into [`Notebook`].
pub mod lens {
    use super::Notebook;
    use crate::lens::Lens;
    use crate::model::Note;

    pub fn name() -> Lens<Notebook, String> {
        Lens::new(
            |nb: &Notebook| nb.name.clone(),
            |name, nb: Notebook| Notebook { name, ..nb },
        )
    }

    pub(crate) fn notes() -> Lens<Notebook, Vec<Note>> {
        Lens::new(
            |nb: &Notebook| nb.notes.clone(),
            |notes, nb: Notebook| Notebook { notes, ..nb },
        )
    }

    /// Focuses the note with identifier `id`.
    ///
    /// Setting `Some(note)` replaces the note in place (or appends it when
    /// missing); setting `None` removes it. A note carrying another identifier
    /// is ignored, so the notebook never ends up with two notes sharing one.
    pub fn note(id: &str) -> Lens<Notebook, Option<Note>> {
        let get_id = id.to_string();
        let set_id = id.to_string();
        Lens::new(
            move |nb: &Notebook| nb.note(&get_id).cloned(),
            move |part: Option<Note>, nb: Notebook| {
                if part.as_ref().is_some_and(|note| note.id() != set_id) {
                    return nb;
                }
                let position = nb.note_position(&set_id);
                notes().over(nb, |mut notes| {
                    match (position, part) {
                        (Some(i), Some(note)) => notes[i] = note,
                        (Some(i), None) => {
                            notes.remove(i);
                        }
                        (None, Some(note)) => notes.push(note),
                        (None, None) => {}
                    }
                    notes
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, title: &str) -> Note {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Note::with_id(id, title, "", now)
    }

    fn notebook_with_two() -> Notebook {
        Notebook::with_id("nb", "Work")
            .add_note(note("a", "First"))
            .and_then(|nb| nb.add_note(note("b", "Second")))
            .unwrap()
    }

    #[test]
    fn add_note_appends_in_order() {
        let nb = notebook_with_two();
        let titles: Vec<_> = nb.all_notes().iter().map(|n| n.title()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn add_duplicate_note_is_rejected() {
        let nb = notebook_with_two();
        assert_eq!(
            nb.add_note(note("a", "Again")).unwrap_err(),
            NotebookFailure::AddNote
        );
    }

    #[test]
    fn get_note_out_of_bounds_fails() {
        let nb = notebook_with_two();
        assert_eq!(nb.get_note(5).unwrap_err(), NotebookFailure::NoteNotExists);
        assert_eq!(nb.get_note(0).unwrap().title(), "First");
    }

    #[test]
    fn delete_note_by_identifier() {
        let nb = notebook_with_two().delete_note("a");
        assert_eq!(nb.len(), 1);
        assert!(nb.note("a").is_none());
        assert_eq!(nb.note_position("b"), Some(0));
    }

    #[test]
    fn deleting_absent_note_is_noop() {
        let before = notebook_with_two();
        let after = before.clone().delete_note("missing");
        assert_eq!(after.all_notes(), before.all_notes());
    }

    #[test]
    fn replace_note_keeps_position() {
        let nb = notebook_with_two().replace_note(note("a", "Renamed"));
        assert_eq!(nb.get_note(0).unwrap().title(), "Renamed");
        assert_eq!(nb.len(), 2);
    }

    #[test]
    fn update_name_rejects_blank() {
        let nb = Notebook::with_id("nb", "Work");
        assert_eq!(
            nb.clone().update_name("  ").unwrap_err(),
            NotebookFailure::UpdateNotebook
        );
        assert_eq!(nb.update_name("Home").unwrap().name(), "Home");
    }

    #[test]
    fn equality_is_identifier_based() {
        assert_eq!(
            Notebook::with_id("x", "One"),
            Notebook::with_id("x", "Two")
        );
    }

    #[test]
    fn note_lens_laws_for_matching_identifier() {
        let l = lens::note("b");
        let nb = notebook_with_two();

        let replacement = Some(note("b", "Replaced"));
        let got = l.get(&l.set(replacement, nb.clone())).unwrap();
        assert_eq!(got.title(), "Replaced");

        let round = l.set(l.get(&nb), nb.clone());
        let titles: Vec<_> = round.all_notes().iter().map(|n| n.title()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn from_meta_drops_repeated_note_identifiers() {
        let meta = NotebookMeta {
            id: "nb".into(),
            name: "Work".into(),
        };
        let nb = Notebook::from_meta(meta, vec![note("a", "First"), note("a", "Again")]);
        assert_eq!(nb.len(), 1);
        assert_eq!(nb.get_note(0).unwrap().title(), "First");
    }

    #[test]
    fn note_lens_ignores_foreign_identifier() {
        let nb = notebook_with_two();
        let after = lens::note("a").set(Some(note("b", "Intruder")), nb);
        let ids: Vec<_> = after.all_notes().iter().map(|n| n.id()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(after.note("b").unwrap().title(), "Second");
    }
}
