use super::{unique_by_id, Notebook};
use crate::failure::LibraryFailure;

/// The ordered set of notebooks a user owns.
///
/// Identifiers are unique: adding a notebook whose identifier is already
/// present is rejected rather than silently merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    notebooks: Vec<Notebook>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from notebooks in display order. Later notebooks
    /// repeating an earlier identifier are dropped.
    pub fn from_notebooks(notebooks: Vec<Notebook>) -> Self {
        Self {
            notebooks: unique_by_id(notebooks, |nb| nb.id()),
        }
    }

    /// Notebooks in insertion order.
    pub fn all_notebooks(&self) -> &[Notebook] {
        &self.notebooks
    }

    pub fn len(&self) -> usize {
        self.notebooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notebooks.is_empty()
    }

    pub fn notebook(&self, id: &str) -> Option<&Notebook> {
        self.notebooks.iter().find(|nb| nb.id() == id)
    }

    pub fn notebook_position(&self, id: &str) -> Option<usize> {
        self.notebooks.iter().position(|nb| nb.id() == id)
    }

    pub fn add_notebook(self, notebook: Notebook) -> Result<Self, LibraryFailure> {
        if self.notebook(notebook.id()).is_some() {
            return Err(LibraryFailure::AddNotebook);
        }
        Ok(lens::notebooks().over(self, |mut notebooks| {
            notebooks.push(notebook);
            notebooks
        }))
    }

    pub fn remove_notebook(self, id: &str) -> Self {
        lens::notebook(id).set(None, self)
    }

    pub fn replace_notebook(self, notebook: Notebook) -> Self {
        let id = notebook.id().to_string();
        lens::notebook(&id).set(Some(notebook), self)
    }
}

/// Lenses into [`Library`].
pub mod lens {
    use super::Library;
    use crate::lens::Lens;
    use crate::model::Notebook;

    pub(crate) fn notebooks() -> Lens<Library, Vec<Notebook>> {
        Lens::new(
            |lib: &Library| lib.notebooks.clone(),
            |notebooks, _lib: Library| Library { notebooks },
        )
    }

    /// Focuses the notebook with identifier `id`; see
    /// [`crate::model::notebook::lens::note`] for the `Option` semantics.
    /// Setting a notebook with a different identifier leaves the library
    /// unchanged.
    pub fn notebook(id: &str) -> Lens<Library, Option<Notebook>> {
        let get_id = id.to_string();
        let set_id = id.to_string();
        Lens::new(
            move |lib: &Library| lib.notebook(&get_id).cloned(),
            move |part: Option<Notebook>, lib: Library| {
                if part.as_ref().is_some_and(|nb| nb.id() != set_id) {
                    return lib;
                }
                let position = lib.notebook_position(&set_id);
                notebooks().over(lib, |mut notebooks| {
                    match (position, part) {
                        (Some(i), Some(nb)) => notebooks[i] = nb,
                        (Some(i), None) => {
                            notebooks.remove(i);
                        }
                        (None, Some(nb)) => notebooks.push(nb),
                        (None, None) => {}
                    }
                    notebooks
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::notebook;

    fn names(lib: &Library) -> Vec<&str> {
        lib.all_notebooks().iter().map(|nb| nb.name()).collect()
    }

    #[test]
    fn notebooks_keep_insertion_order() {
        let lib = Library::new()
            .add_notebook(Notebook::with_id("n1", "Work"))
            .and_then(|lib| lib.add_notebook(Notebook::with_id("n2", "Home")))
            .unwrap();
        assert_eq!(names(&lib), ["Work", "Home"]);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let lib = Library::new()
            .add_notebook(Notebook::with_id("n1", "Work"))
            .unwrap();
        let err = lib
            .add_notebook(Notebook::with_id("n1", "Other"))
            .unwrap_err();
        assert_eq!(err, LibraryFailure::AddNotebook);
    }

    #[test]
    fn remove_notebook_by_identifier() {
        let lib = Library::from_notebooks(vec![
            Notebook::with_id("n1", "Work"),
            Notebook::with_id("n2", "Home"),
        ])
        .remove_notebook("n1");
        assert_eq!(names(&lib), ["Home"]);
    }

    #[test]
    fn removing_absent_notebook_is_noop() {
        let before = Library::from_notebooks(vec![Notebook::with_id("n1", "Work")]);
        let after = before.clone().remove_notebook("nope");
        assert_eq!(after, before);
        assert_eq!(names(&after), names(&before));
    }

    #[test]
    fn composed_lens_renames_nested_notebook() {
        let lib = Library::from_notebooks(vec![
            Notebook::with_id("n1", "Work"),
            Notebook::with_id("n2", "Home"),
        ]);
        let name_of_n2 = lens::notebook("n2").compose(&crate::lens::Lens::new(
            |nb: &Option<Notebook>| nb.as_ref().map(|nb| nb.name().to_string()),
            |name: Option<String>, nb: Option<Notebook>| {
                nb.map(|nb| match name {
                    Some(name) => notebook::lens::name().set(name, nb),
                    None => nb,
                })
            },
        ));

        let lib = name_of_n2.set(Some("House".into()), lib);
        assert_eq!(names(&lib), ["Work", "House"]);
        assert_eq!(name_of_n2.get(&lib).as_deref(), Some("House"));
    }

    #[test]
    fn from_notebooks_drops_repeated_identifiers() {
        let lib = Library::from_notebooks(vec![
            Notebook::with_id("n1", "Work"),
            Notebook::with_id("n2", "Home"),
            Notebook::with_id("n1", "Dup"),
        ]);
        assert_eq!(names(&lib), ["Work", "Home"]);
    }

    #[test]
    fn notebook_lens_ignores_foreign_identifier() {
        let lib = Library::from_notebooks(vec![
            Notebook::with_id("a", "A"),
            Notebook::with_id("b", "B"),
        ]);
        let after = lens::notebook("a").set(Some(Notebook::with_id("b", "Other")), lib.clone());
        let ids: Vec<_> = after.all_notebooks().iter().map(|nb| nb.id()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(names(&after), names(&lib));

        let appended = lens::notebook("c").set(Some(Notebook::with_id("b", "Other")), lib);
        assert_eq!(appended.len(), 2);
    }

    #[test]
    fn replace_notebook_swaps_in_place() {
        let lib = Library::from_notebooks(vec![
            Notebook::with_id("n1", "Work"),
            Notebook::with_id("n2", "Home"),
        ])
        .replace_notebook(Notebook::with_id("n1", "Office"));
        assert_eq!(names(&lib), ["Office", "Home"]);
    }
}
