use crate::effect::{Effect, FieldChange, NoteView};
use crate::error::{StoreError, UseCaseError};
use crate::failure::NoteFailure;
use crate::model::Note;
use crate::store::DataStore;

use super::{load_target, Clock, Outcome};

pub type NoteResult = Result<Outcome<Note>, UseCaseError<NoteFailure>>;

/// Loads the note addressed by `(notebook_id, note_id)`; anything missing
/// rejects with `failure`.
fn load_note<S: DataStore>(
    store: &S,
    notebook_id: &str,
    note_id: &str,
    failure: NoteFailure,
) -> Result<Note, UseCaseError<NoteFailure>> {
    load_target(store, notebook_id, failure)?
        .note(note_id)
        .cloned()
        .ok_or(UseCaseError::Rejected(failure))
}

pub fn load<S: DataStore>(store: &S, notebook_id: &str, note_id: &str) -> NoteResult {
    let notebook = store.load_notebook(notebook_id)?;
    let note = notebook
        .note(note_id)
        .cloned()
        .ok_or_else(|| StoreError::NoteNotFound(note_id.to_string()))?;
    let view = NoteView::from(&note);
    Ok(Outcome::new(note, Effect::Show(view)))
}

pub fn update_title<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    notebook_id: &str,
    note_id: &str,
    title: &str,
) -> NoteResult {
    let note = load_note(store, notebook_id, note_id, NoteFailure::UpdateTitle)?;
    let note = note.update_title(title, clock.now());
    store.save_note(notebook_id, &note)?;

    let effect = Effect::Replace(FieldChange::NoteTitle(note.title().to_string()));
    Ok(Outcome::new(note, effect))
}

pub fn update_content<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    notebook_id: &str,
    note_id: &str,
    content: &str,
) -> NoteResult {
    let note = load_note(store, notebook_id, note_id, NoteFailure::UpdateContent)?;
    let note = note.update_content(content, clock.now());
    store.save_note(notebook_id, &note)?;

    let effect = Effect::Replace(FieldChange::NoteContent(note.content().to_string()));
    Ok(Outcome::new(note, effect))
}

/// Tags the note. A tag that is already present changes nothing and is not
/// persisted.
pub fn add_tag<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    notebook_id: &str,
    note_id: &str,
    tag: &str,
) -> NoteResult {
    let before = load_note(store, notebook_id, note_id, NoteFailure::AddTag)?;
    let note = before
        .clone()
        .add_tag(tag, clock.now())
        .map_err(UseCaseError::Rejected)?;
    if note.all_tags() == before.all_tags() {
        return Ok(Outcome::new(note, Effect::None));
    }
    store.save_note(notebook_id, &note)?;

    let effect = Effect::Replace(FieldChange::NoteTags(note.all_tags().to_vec()));
    Ok(Outcome::new(note, effect))
}

/// Untags the note. Removing a tag the note lacks is a no-op.
pub fn remove_tag<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    notebook_id: &str,
    note_id: &str,
    tag: &str,
) -> NoteResult {
    let before = load_note(store, notebook_id, note_id, NoteFailure::RemoveTag)?;
    let note = before.clone().remove_tag(tag, clock.now());
    if note.all_tags() == before.all_tags() {
        return Ok(Outcome::new(note, Effect::None));
    }
    store.save_note(notebook_id, &note)?;

    let effect = Effect::Replace(FieldChange::NoteTags(note.all_tags().to_vec()));
    Ok(Outcome::new(note, effect))
}

/// Deletes the note from its notebook. The returned state is the deleted
/// note.
pub fn delete<S: DataStore>(store: &mut S, notebook_id: &str, note_id: &str) -> NoteResult {
    let note = load_note(store, notebook_id, note_id, NoteFailure::DeleteNote)?;
    store.delete_note(notebook_id, note_id)?;
    Ok(Outcome::new(note, Effect::Dismiss))
}
