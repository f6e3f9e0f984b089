use super::DataStore;
use crate::error::{Result, StoreError};
use crate::model::{library, notebook, Library, Note, Notebook};

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// A store built with [`InMemoryStore::failing`] refuses every write, which
/// is how tests drive the storage-error paths of the use cases.
#[derive(Default)]
pub struct InMemoryStore {
    library: Library,
    failing: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check_writable(&self) -> Result<()> {
        if self.failing {
            return Err(StoreError::Store("simulated write failure".to_string()));
        }
        Ok(())
    }

    fn existing(&self, id: &str) -> Result<&Notebook> {
        self.library
            .notebook(id)
            .ok_or_else(|| StoreError::NotebookNotFound(id.to_string()))
    }
}

impl DataStore for InMemoryStore {
    fn load_library(&self) -> Result<Library> {
        Ok(self.library.clone())
    }

    fn load_notebook(&self, id: &str) -> Result<Notebook> {
        self.existing(id).cloned()
    }

    fn save_notebook(&mut self, notebook: &Notebook) -> Result<()> {
        self.check_writable()?;
        let library = std::mem::take(&mut self.library);
        let stored = match library.notebook(notebook.id()) {
            Some(current) => {
                notebook::lens::name().set(notebook.name().to_string(), current.clone())
            }
            None => notebook.clone(),
        };
        self.library = library::lens::notebook(notebook.id()).set(Some(stored), library);
        Ok(())
    }

    fn delete_notebook(&mut self, id: &str) -> Result<()> {
        self.check_writable()?;
        self.existing(id)?;
        self.library = std::mem::take(&mut self.library).remove_notebook(id);
        Ok(())
    }

    fn save_note(&mut self, notebook_id: &str, note: &Note) -> Result<()> {
        self.check_writable()?;
        let updated = self.existing(notebook_id)?.clone().replace_note(note.clone());
        self.library = std::mem::take(&mut self.library).replace_notebook(updated);
        Ok(())
    }

    fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> Result<()> {
        self.check_writable()?;
        let current = self.existing(notebook_id)?;
        if current.note(note_id).is_none() {
            return Err(StoreError::NoteNotFound(note_id.to_string()));
        }
        let updated = current.clone().delete_note(note_id);
        self.library = std::mem::take(&mut self.library).replace_notebook(updated);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    /// A fixed instant used by fixture notes.
    pub fn fixture_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_notebook(mut self, id: &str, name: &str) -> Self {
            self.store
                .save_notebook(&Notebook::with_id(id, name))
                .unwrap();
            self
        }

        pub fn with_note(mut self, notebook_id: &str, note_id: &str, title: &str) -> Self {
            let content = format!("Content of {}", title);
            let note = Note::with_id(note_id, title, content, fixture_time());
            self.store.save_note(notebook_id, &note).unwrap();
            self
        }

        pub fn with_tagged_note(
            mut self,
            notebook_id: &str,
            note_id: &str,
            title: &str,
            tags: &[&str],
        ) -> Self {
            let mut note = Note::with_id(note_id, title, "", fixture_time());
            for tag in tags {
                note = note.add_tag(tag, fixture_time()).unwrap();
            }
            self.store.save_note(notebook_id, &note).unwrap();
            self
        }

        pub fn failing(mut self) -> Self {
            self.store.set_failing(true);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn saves_and_loads_notebooks_in_order() {
        let fx = StoreFixture::new()
            .with_notebook("a", "Work")
            .with_notebook("b", "Home");
        let lib = fx.store.load_library().unwrap();
        let names: Vec<_> = lib.all_notebooks().iter().map(|nb| nb.name()).collect();
        assert_eq!(names, ["Work", "Home"]);
    }

    #[test]
    fn saving_notebook_keeps_its_notes() {
        let mut fx = StoreFixture::new()
            .with_notebook("a", "Work")
            .with_note("a", "n1", "Todo");
        fx.store
            .save_notebook(&Notebook::with_id("a", "Office"))
            .unwrap();

        let nb = fx.store.load_notebook("a").unwrap();
        assert_eq!(nb.name(), "Office");
        assert_eq!(nb.len(), 1);
    }

    #[test]
    fn failing_store_rejects_writes_but_allows_reads() {
        let mut fx = StoreFixture::new().with_notebook("a", "Work").failing();
        assert!(fx.store.load_library().is_ok());
        assert!(matches!(
            fx.store.delete_notebook("a"),
            Err(StoreError::Store(_))
        ));
    }

    #[test]
    fn deleting_missing_note_errors() {
        let mut fx = StoreFixture::new().with_notebook("a", "Work");
        assert!(matches!(
            fx.store.delete_note("a", "ghost"),
            Err(StoreError::NoteNotFound(_))
        ));
    }
}
