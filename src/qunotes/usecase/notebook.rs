use crate::effect::{note_rows, Effect, FieldChange};
use crate::error::{StoreError, UseCaseError};
use crate::failure::NotebookFailure;
use crate::model::{Note, Notebook};
use crate::store::DataStore;

use super::{load_target, Outcome};

pub type NotebookResult = Result<Outcome<Notebook>, UseCaseError<NotebookFailure>>;

pub fn load<S: DataStore>(store: &S, notebook_id: &str) -> NotebookResult {
    let notebook = store.load_notebook(notebook_id)?;
    let rows = note_rows(notebook.all_notes());
    Ok(Outcome::new(notebook, Effect::Reload { rows }))
}

pub fn add_note<S: DataStore>(store: &mut S, notebook_id: &str, note: Note) -> NotebookResult {
    let notebook = load_target(store, notebook_id, NotebookFailure::AddNote)?;
    let notebook = notebook
        .add_note(note.clone())
        .map_err(UseCaseError::Rejected)?;
    store.save_note(notebook_id, &note)?;

    let index = notebook.len() - 1;
    let rows = note_rows(notebook.all_notes());
    Ok(Outcome::new(notebook, Effect::Insert { index, rows }))
}

pub fn delete_note<S: DataStore>(
    store: &mut S,
    notebook_id: &str,
    note_id: &str,
) -> NotebookResult {
    let notebook = load_target(store, notebook_id, NotebookFailure::DeleteNote)?;
    let index = notebook
        .note_position(note_id)
        .ok_or(UseCaseError::Rejected(NotebookFailure::DeleteNote))?;
    let notebook = notebook.delete_note(note_id);
    store.delete_note(notebook_id, note_id)?;

    let rows = note_rows(notebook.all_notes());
    Ok(Outcome::new(notebook, Effect::Remove { index, rows }))
}

pub fn rename<S: DataStore>(store: &mut S, notebook_id: &str, name: &str) -> NotebookResult {
    let notebook = load_target(store, notebook_id, NotebookFailure::UpdateNotebook)?;
    let notebook = notebook.update_name(name).map_err(UseCaseError::Rejected)?;
    store.save_notebook(&notebook)?;

    let effect = Effect::Replace(FieldChange::NotebookName(notebook.name().to_string()));
    Ok(Outcome::new(notebook, effect))
}

/// Deletes the notebook itself. The returned state is the notebook as it was
/// just before deletion, so the caller can drop it from its library.
pub fn delete<S: DataStore>(store: &mut S, notebook_id: &str) -> NotebookResult {
    let notebook = load_target(store, notebook_id, NotebookFailure::DeleteNotebook)?;
    match store.delete_notebook(notebook_id) {
        Ok(()) => Ok(Outcome::new(notebook, Effect::Dismiss)),
        Err(StoreError::NotebookNotFound(_)) => {
            Err(UseCaseError::Rejected(NotebookFailure::DeleteNotebook))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rows whose title contains `query`, case-insensitively. An empty query
/// shows everything.
pub fn filter(notebook: &Notebook, query: &str) -> Effect {
    let query = query.trim().to_lowercase();
    let notes: Vec<Note> = notebook
        .all_notes()
        .iter()
        .filter(|n| query.is_empty() || n.title().to_lowercase().contains(&query))
        .cloned()
        .collect();
    Effect::Reload {
        rows: note_rows(&notes),
    }
}
