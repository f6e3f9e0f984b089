use super::DataStore;
use crate::error::{Result, StoreError};
use crate::model::{Library, Note, Notebook, NotebookMeta};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const INDEX_FILE: &str = "library.json";
const META_FILE: &str = "meta.json";
const CONTENT_FILE: &str = "content.json";
const NOTEBOOK_EXT: &str = "qvnotebook";
const NOTE_EXT: &str = "qvnote";

#[derive(Debug, Serialize, Deserialize)]
struct NotebookRecord {
    id: String,
    name: String,
    /// Note identifiers in display order.
    #[serde(default)]
    notes: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NoteMetaRecord {
    id: String,
    title: String,
    #[serde(default)]
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NoteContentRecord {
    title: String,
    content: String,
}

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn notebook_dir(&self, id: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(format!("{}.{}", checked_id(id)?, NOTEBOOK_EXT)))
    }

    fn note_dir(&self, notebook_id: &str, note_id: &str) -> Result<PathBuf> {
        Ok(self
            .notebook_dir(notebook_id)?
            .join(format!("{}.{}", checked_id(note_id)?, NOTE_EXT)))
    }

    fn load_index(&self) -> Result<Vec<NotebookMeta>> {
        Ok(read_json(&self.root.join(INDEX_FILE))?.unwrap_or_default())
    }

    fn save_index(&self, index: &[NotebookMeta]) -> Result<()> {
        write_json(&self.root.join(INDEX_FILE), index)
    }

    fn load_record(&self, id: &str) -> Result<NotebookRecord> {
        let path = self.notebook_dir(id)?.join(META_FILE);
        read_json(&path)?.ok_or_else(|| StoreError::NotebookNotFound(id.to_string()))
    }

    fn save_record(&self, record: &NotebookRecord) -> Result<()> {
        let path = self.notebook_dir(&record.id)?.join(META_FILE);
        write_json(&path, record)
    }

    fn load_note(&self, notebook_id: &str, note_id: &str) -> Result<Option<Note>> {
        let dir = self.note_dir(notebook_id, note_id)?;
        let Some(meta) = read_json::<NoteMetaRecord>(&dir.join(META_FILE))? else {
            return Ok(None);
        };
        let content = read_json::<NoteContentRecord>(&dir.join(CONTENT_FILE))?
            .map(|c| c.content)
            .unwrap_or_default();

        Ok(Some(Note::restore(
            meta.id,
            meta.title,
            content,
            meta.tags,
            meta.created_at,
            meta.updated_at,
        )))
    }

    fn write_note_files(&self, notebook_id: &str, note: &Note) -> Result<()> {
        let dir = self.note_dir(notebook_id, note.id())?;
        write_json(
            &dir.join(META_FILE),
            &NoteMetaRecord {
                id: note.id().to_string(),
                title: note.title().to_string(),
                tags: note.all_tags().to_vec(),
                created_at: note.created_at(),
                updated_at: note.updated_at(),
            },
        )?;
        write_json(
            &dir.join(CONTENT_FILE),
            &NoteContentRecord {
                title: note.title().to_string(),
                content: note.content().to_string(),
            },
        )
    }
}

impl DataStore for FileStore {
    fn load_library(&self) -> Result<Library> {
        let mut notebooks = Vec::new();
        for meta in self.load_index()? {
            match self.load_notebook(&meta.id) {
                Ok(notebook) => notebooks.push(notebook),
                Err(StoreError::NotebookNotFound(id)) => {
                    warn!("event=load_library status=skipped reason=missing_notebook id={id}");
                }
                Err(e) => return Err(e),
            }
        }
        debug!("event=load_library status=ok notebooks={}", notebooks.len());
        Ok(Library::from_notebooks(notebooks))
    }

    fn load_notebook(&self, id: &str) -> Result<Notebook> {
        let record = self.load_record(id)?;
        let mut notes = Vec::with_capacity(record.notes.len());
        for note_id in &record.notes {
            match self.load_note(id, note_id)? {
                Some(note) => notes.push(note),
                None => warn!(
                    "event=load_notebook status=skipped reason=missing_note notebook={} note={}",
                    id, note_id
                ),
            }
        }
        let meta = NotebookMeta {
            id: record.id,
            name: record.name,
        };
        Ok(Notebook::from_meta(meta, notes))
    }

    fn save_notebook(&mut self, notebook: &Notebook) -> Result<()> {
        // Note order on disk is owned by save_note/delete_note.
        let notes = match self.load_record(notebook.id()) {
            Ok(existing) => existing.notes,
            Err(StoreError::NotebookNotFound(_)) => {
                for note in notebook.all_notes() {
                    self.write_note_files(notebook.id(), note)?;
                }
                notebook
                    .all_notes()
                    .iter()
                    .map(|n| n.id().to_string())
                    .collect()
            }
            Err(e) => return Err(e),
        };
        self.save_record(&NotebookRecord {
            id: notebook.id().to_string(),
            name: notebook.name().to_string(),
            notes,
        })?;

        let mut index = self.load_index()?;
        match index.iter_mut().find(|m| m.id == notebook.id()) {
            Some(meta) => meta.name = notebook.name().to_string(),
            None => index.push(notebook.meta()),
        }
        self.save_index(&index)?;

        debug!("event=save_notebook status=ok id={}", notebook.id());
        Ok(())
    }

    fn delete_notebook(&mut self, id: &str) -> Result<()> {
        let mut index = self.load_index()?;
        let before = index.len();
        index.retain(|m| m.id != id);
        if index.len() == before {
            return Err(StoreError::NotebookNotFound(id.to_string()));
        }
        self.save_index(&index)?;

        let dir = self.notebook_dir(id)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }

        debug!("event=delete_notebook status=ok id={id}");
        Ok(())
    }

    fn save_note(&mut self, notebook_id: &str, note: &Note) -> Result<()> {
        let mut record = self.load_record(notebook_id)?;
        self.write_note_files(notebook_id, note)?;
        if !record.notes.iter().any(|id| id == note.id()) {
            record.notes.push(note.id().to_string());
            self.save_record(&record)?;
        }

        debug!(
            "event=save_note status=ok notebook={notebook_id} note={}",
            note.id()
        );
        Ok(())
    }

    fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> Result<()> {
        let mut record = self.load_record(notebook_id)?;
        let position = record
            .notes
            .iter()
            .position(|id| id == note_id)
            .ok_or_else(|| StoreError::NoteNotFound(note_id.to_string()))?;
        record.notes.remove(position);
        self.save_record(&record)?;

        let dir = self.note_dir(notebook_id, note_id)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }

        debug!("event=delete_note status=ok notebook={notebook_id} note={note_id}");
        Ok(())
    }
}

/// Identifiers become path components, so they must stay inside the store.
fn checked_id(id: &str) -> Result<&str> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);
    if bad {
        return Err(StoreError::Store(format!("Invalid identifier: {id:?}")));
    }
    Ok(id)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| StoreError::Store(format!("No parent directory for {}", path.display())))?;
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let content = serde_json::to_string_pretty(value)?;

    // Atomic write
    let tmp = dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_identifiers_that_escape_the_root() {
        assert!(checked_id("../etc").is_err());
        assert!(checked_id("..").is_err());
        assert!(checked_id("").is_err());
        assert!(checked_id("a\\b").is_err());
        assert!(checked_id("5f0c6a3e-0000-4000-8000-000000000000").is_ok());
    }

    #[test]
    fn missing_notebook_is_reported_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        match store.load_notebook("nope") {
            Err(StoreError::NotebookNotFound(id)) => assert_eq!(id, "nope"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_directory_is_an_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert!(store.load_library().unwrap().is_empty());
    }
}
