use crate::effect::{notebook_rows, Effect};
use crate::error::UseCaseError;
use crate::failure::LibraryFailure;
use crate::model::{Library, Notebook};
use crate::store::DataStore;

use super::Outcome;

pub type LibraryResult = Result<Outcome<Library>, UseCaseError<LibraryFailure>>;

pub fn load<S: DataStore>(store: &S) -> LibraryResult {
    let library = store.load_library()?;
    let rows = notebook_rows(library.all_notebooks());
    Ok(Outcome::new(library, Effect::Reload { rows }))
}

/// Adds `notebook` at the end of the library.
pub fn add_notebook<S: DataStore>(store: &mut S, notebook: Notebook) -> LibraryResult {
    let library = store.load_library()?;
    let library = library
        .add_notebook(notebook.clone())
        .map_err(UseCaseError::Rejected)?;
    store.save_notebook(&notebook)?;

    let index = library.len() - 1;
    let rows = notebook_rows(library.all_notebooks());
    Ok(Outcome::new(library, Effect::Insert { index, rows }))
}

pub fn delete_notebook<S: DataStore>(store: &mut S, id: &str) -> LibraryResult {
    let library = store.load_library()?;
    let index = library
        .notebook_position(id)
        .ok_or(UseCaseError::Rejected(LibraryFailure::DeleteNotebook))?;
    let library = library.remove_notebook(id);
    store.delete_notebook(id)?;

    let rows = notebook_rows(library.all_notebooks());
    Ok(Outcome::new(library, Effect::Remove { index, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn add_two_notebooks_in_order() {
        let mut store = InMemoryStore::new();
        add_notebook(&mut store, Notebook::with_id("n1", "Work")).unwrap();
        let out = add_notebook(&mut store, Notebook::with_id("n2", "Home")).unwrap();

        let names: Vec<_> = out
            .state
            .all_notebooks()
            .iter()
            .map(|nb| nb.name())
            .collect();
        assert_eq!(names, ["Work", "Home"]);
        match out.effect {
            Effect::Insert { index, rows } => {
                assert_eq!(index, 1);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].title, "Home");
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert_eq!(store.load_library().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_notebook_is_rejected_and_not_persisted() {
        let mut store = StoreFixture::new().with_notebook("n1", "Work").store;
        let err = add_notebook(&mut store, Notebook::with_id("n1", "Again")).unwrap_err();

        assert_eq!(err.failure(), Some(&LibraryFailure::AddNotebook));
        let lib = store.load_library().unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.all_notebooks()[0].name(), "Work");
    }

    #[test]
    fn delete_reports_removed_position() {
        let mut store = StoreFixture::new()
            .with_notebook("n1", "Work")
            .with_notebook("n2", "Home")
            .store;
        let out = delete_notebook(&mut store, "n1").unwrap();

        assert_eq!(
            out.effect,
            Effect::Remove {
                index: 0,
                rows: notebook_rows(out.state.all_notebooks()),
            }
        );
        assert!(store.load_library().unwrap().notebook("n1").is_none());
    }

    #[test]
    fn delete_missing_notebook_is_rejected() {
        let mut store = InMemoryStore::new();
        let err = delete_notebook(&mut store, "ghost").unwrap_err();
        assert_eq!(err.failure(), Some(&LibraryFailure::DeleteNotebook));
    }

    #[test]
    fn store_failure_propagates_unchanged() {
        let mut store = InMemoryStore::failing();
        let err = add_notebook(&mut store, Notebook::with_id("n1", "Work")).unwrap_err();
        assert!(matches!(err, UseCaseError::Store(_)));
        assert!(store.load_library().unwrap().is_empty());
    }

    #[test]
    fn load_reloads_every_row() {
        let store = StoreFixture::new()
            .with_notebook("n1", "Work")
            .with_note("n1", "a", "Plan")
            .store;
        let out = load(&store).unwrap();
        match out.effect {
            Effect::Reload { rows } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].count, Some(1));
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }
}
