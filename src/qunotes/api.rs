//! # API Facade
//!
//! The API layer is a thin facade over the use cases. It is the single entry
//! point for every qunotes operation, whichever UI drives it.
//!
//! The facade:
//! - **Resolves selectors**: turns what the user typed (a 1-based position or
//!   an id prefix) into entity ids
//! - **Supplies time**: new notes and edits are stamped through the [`Clock`]
//! - **Dispatches** to the matching function in [`crate::usecase`]
//!
//! It does no business logic and no I/O of its own beyond what the store
//! does; results come back as [`Outcome`]s for the caller to render.
//!
//! A selector that matches nothing is treated like a missing target: the
//! operation is rejected with its own failure kind. Read-only lookups
//! (`notebook`, `note`) report a [`StoreError`] not-found instead, since they
//! have no failure kind of their own.
//!
//! `QuNotesApi<S, C>` is generic over the storage backend and the clock:
//! `QuNotesApi<FileStore>` in production, `QuNotesApi<InMemoryStore, FixedClock>`
//! in tests.

use log::debug;

use crate::error::{StoreError, UseCaseError};
use crate::failure::{LibraryFailure, NoteFailure, NotebookFailure};
use crate::model::{Note, Notebook};
use crate::selector::Selector;
use crate::store::DataStore;
use crate::usecase::library::LibraryResult;
use crate::usecase::note::NoteResult;
use crate::usecase::notebook::NotebookResult;
use crate::usecase::{self, Clock, Outcome, SystemClock};

pub struct QuNotesApi<S: DataStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: DataStore> QuNotesApi<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: DataStore, C: Clock> QuNotesApi<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn library(&self) -> LibraryResult {
        usecase::library::load(&self.store)
    }

    pub fn create_notebook(&mut self, name: &str) -> LibraryResult {
        let name = name.trim();
        if name.is_empty() {
            return Err(UseCaseError::Rejected(LibraryFailure::AddNotebook));
        }
        let notebook = Notebook::new(name);
        debug!("event=create_notebook id={}", notebook.id());
        usecase::library::add_notebook(&mut self.store, notebook)
    }

    pub fn delete_notebook(&mut self, notebook: &Selector) -> LibraryResult {
        let id = self.require_notebook(notebook, LibraryFailure::DeleteNotebook)?;
        debug!("event=delete_notebook id={}", id);
        usecase::library::delete_notebook(&mut self.store, &id)
    }

    pub fn rename_notebook(&mut self, notebook: &Selector, name: &str) -> NotebookResult {
        let id = self.require_notebook(notebook, NotebookFailure::UpdateNotebook)?;
        debug!("event=rename_notebook id={}", id);
        usecase::notebook::rename(&mut self.store, &id, name)
    }

    pub fn notebook(&self, notebook: &Selector) -> NotebookResult {
        let id = self
            .find_notebook(notebook)?
            .ok_or_else(|| StoreError::NotebookNotFound(notebook.to_string()))?;
        usecase::notebook::load(&self.store, &id)
    }

    /// Loads the notebook and narrows its rows to titles containing `query`.
    pub fn filter_notes(&self, notebook: &Selector, query: &str) -> NotebookResult {
        let Outcome { state, .. } = self.notebook(notebook)?;
        let effect = usecase::notebook::filter(&state, query);
        Ok(Outcome::new(state, effect))
    }

    pub fn create_note(
        &mut self,
        notebook: &Selector,
        title: &str,
        content: &str,
    ) -> NotebookResult {
        let id = self.require_notebook(notebook, NotebookFailure::AddNote)?;
        let note = Note::new(title, content, self.clock.now());
        debug!("event=create_note notebook={} id={}", id, note.id());
        usecase::notebook::add_note(&mut self.store, &id, note)
    }

    pub fn delete_note(&mut self, notebook: &Selector, note: &Selector) -> NotebookResult {
        let (nb, id) = self.require_note(notebook, note, NotebookFailure::DeleteNote)?;
        debug!("event=delete_note notebook={} id={}", nb, id);
        usecase::notebook::delete_note(&mut self.store, &nb, &id)
    }

    pub fn note(&self, notebook: &Selector, note: &Selector) -> NoteResult {
        let nb = self
            .find_notebook(notebook)?
            .ok_or_else(|| StoreError::NotebookNotFound(notebook.to_string()))?;
        let id = self
            .find_note(&nb, note)?
            .ok_or_else(|| StoreError::NoteNotFound(note.to_string()))?;
        usecase::note::load(&self.store, &nb, &id)
    }

    pub fn retitle_note(
        &mut self,
        notebook: &Selector,
        note: &Selector,
        title: &str,
    ) -> NoteResult {
        let (nb, id) = self.require_note(notebook, note, NoteFailure::UpdateTitle)?;
        debug!("event=retitle_note notebook={} id={}", nb, id);
        usecase::note::update_title(&mut self.store, &self.clock, &nb, &id, title)
    }

    pub fn edit_note_content(
        &mut self,
        notebook: &Selector,
        note: &Selector,
        content: &str,
    ) -> NoteResult {
        let (nb, id) = self.require_note(notebook, note, NoteFailure::UpdateContent)?;
        debug!("event=edit_note notebook={} id={}", nb, id);
        usecase::note::update_content(&mut self.store, &self.clock, &nb, &id, content)
    }

    pub fn tag_note(&mut self, notebook: &Selector, note: &Selector, tag: &str) -> NoteResult {
        let (nb, id) = self.require_note(notebook, note, NoteFailure::AddTag)?;
        debug!("event=tag_note notebook={} id={} tag={}", nb, id, tag);
        usecase::note::add_tag(&mut self.store, &self.clock, &nb, &id, tag)
    }

    pub fn untag_note(&mut self, notebook: &Selector, note: &Selector, tag: &str) -> NoteResult {
        let (nb, id) = self.require_note(notebook, note, NoteFailure::RemoveTag)?;
        debug!("event=untag_note notebook={} id={} tag={}", nb, id, tag);
        usecase::note::remove_tag(&mut self.store, &self.clock, &nb, &id, tag)
    }

    fn find_notebook(&self, selector: &Selector) -> crate::error::Result<Option<String>> {
        let library = self.store.load_library()?;
        Ok(selector.resolve(library.all_notebooks().iter().map(|nb| nb.id())))
    }

    fn find_note(
        &self,
        notebook_id: &str,
        selector: &Selector,
    ) -> crate::error::Result<Option<String>> {
        let notebook = match self.store.load_notebook(notebook_id) {
            Ok(notebook) => notebook,
            Err(StoreError::NotebookNotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(selector.resolve(notebook.all_notes().iter().map(|n| n.id())))
    }

    fn require_notebook<F>(
        &self,
        selector: &Selector,
        failure: F,
    ) -> Result<String, UseCaseError<F>>
    where
        F: std::fmt::Debug + std::fmt::Display,
    {
        match self.find_notebook(selector)? {
            Some(id) => Ok(id),
            None => {
                debug!("event=resolve_notebook status=miss selector={}", selector);
                Err(UseCaseError::Rejected(failure))
            }
        }
    }

    fn require_note<F>(
        &self,
        notebook: &Selector,
        note: &Selector,
        failure: F,
    ) -> Result<(String, String), UseCaseError<F>>
    where
        F: std::fmt::Debug + std::fmt::Display + Copy,
    {
        let nb = self.require_notebook(notebook, failure)?;
        match self.find_note(&nb, note)? {
            Some(id) => Ok((nb, id)),
            None => {
                debug!("event=resolve_note status=miss selector={}", note);
                Err(UseCaseError::Rejected(failure))
            }
        }
    }
}
