//! # Domain failures
//!
//! Every way an entity transition or a use case can be *rejected* is named
//! here, one closed enum per entity. Failures carry no payload: the kind alone
//! decides the message shown to the user, looked up through
//! [`Localizable::localized_key`].
//!
//! These are expected, recoverable outcomes returned as values. Storage
//! problems are a different family, see [`crate::error`].

use thiserror::Error;

/// Something that maps to a message key in the localization tables.
pub trait Localizable {
    fn localized_key(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LibraryFailure {
    #[error("failed to add notebook")]
    AddNotebook,
    #[error("failed to delete notebook")]
    DeleteNotebook,
}

impl Localizable for LibraryFailure {
    fn localized_key(&self) -> &'static str {
        match self {
            LibraryFailure::AddNotebook => "library_adding_notebook_error",
            LibraryFailure::DeleteNotebook => "library_deleting_notebook_error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NotebookFailure {
    #[error("failed to add note")]
    AddNote,
    #[error("failed to delete note")]
    DeleteNote,
    #[error("failed to delete notebook")]
    DeleteNotebook,
    #[error("failed to update notebook")]
    UpdateNotebook,
    #[error("note does not exist")]
    NoteNotExists,
}

impl Localizable for NotebookFailure {
    fn localized_key(&self) -> &'static str {
        match self {
            NotebookFailure::AddNote => "notebook_adding_note_error",
            NotebookFailure::DeleteNote => "notebook_deleting_note_error",
            NotebookFailure::DeleteNotebook => "notebook_deleting_notebook_error",
            NotebookFailure::UpdateNotebook => "notebook_updating_notebook_error",
            NotebookFailure::NoteNotExists => "notebook_note_not_exists_error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NoteFailure {
    #[error("failed to add tag")]
    AddTag,
    #[error("failed to remove tag")]
    RemoveTag,
    #[error("failed to delete note")]
    DeleteNote,
    #[error("failed to update note's content")]
    UpdateContent,
    #[error("failed to update note's title")]
    UpdateTitle,
}

impl Localizable for NoteFailure {
    fn localized_key(&self) -> &'static str {
        match self {
            NoteFailure::AddTag => "note_adding_tag_error",
            NoteFailure::RemoveTag => "note_removing_tag_error",
            NoteFailure::DeleteNote => "note_deleting_note_error",
            NoteFailure::UpdateContent => "note_updating_content_error",
            NoteFailure::UpdateTitle => "note_updating_title_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn add_notebook_maps_to_library_key() {
        assert_eq!(
            LibraryFailure::AddNotebook.localized_key(),
            "library_adding_notebook_error"
        );
    }

    #[test]
    fn keys_are_unique_across_kinds() {
        let keys: Vec<&str> = vec![
            LibraryFailure::AddNotebook.localized_key(),
            LibraryFailure::DeleteNotebook.localized_key(),
            NotebookFailure::AddNote.localized_key(),
            NotebookFailure::DeleteNote.localized_key(),
            NotebookFailure::DeleteNotebook.localized_key(),
            NotebookFailure::UpdateNotebook.localized_key(),
            NotebookFailure::NoteNotExists.localized_key(),
            NoteFailure::AddTag.localized_key(),
            NoteFailure::RemoveTag.localized_key(),
            NoteFailure::DeleteNote.localized_key(),
            NoteFailure::UpdateContent.localized_key(),
            NoteFailure::UpdateTitle.localized_key(),
        ];
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
