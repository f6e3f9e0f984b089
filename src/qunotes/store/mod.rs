//! # Storage Layer
//!
//! The [`DataStore`] trait is the boundary between the pure core and whatever
//! keeps notes on disk. Use cases only ever talk to this trait.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in a data directory
//! - [`memory::InMemoryStore`]: in-memory storage for tests, with a failing
//!   mode to exercise error paths
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── library.json                      # Ordered notebook index
//! ├── config.json                       # See crate::config
//! └── <notebook-id>.qvnotebook/
//!     ├── meta.json                     # Notebook name and note order
//!     └── <note-id>.qvnote/
//!         ├── meta.json                 # Title, tags, timestamps
//!         └── content.json              # Title and body
//! ```
//!
//! ## Consistency
//!
//! Each call is a single all-or-nothing persist as far as callers can tell;
//! files are written to a temporary path and renamed into place. There is no
//! multi-writer coordination.

use crate::error::Result;
use crate::model::{Library, Note, Notebook};

pub mod fs;
pub mod memory;

/// Abstract interface for note storage. Keys are entity identifiers.
pub trait DataStore {
    /// Load every notebook, with notes, in library order.
    fn load_library(&self) -> Result<Library>;

    /// Load one notebook with its notes.
    fn load_notebook(&self, id: &str) -> Result<Notebook>;

    /// Save a notebook's metadata (create or update) and keep the library
    /// index in step. Notes are persisted through [`DataStore::save_note`].
    fn save_notebook(&mut self, notebook: &Notebook) -> Result<()>;

    /// Delete a notebook and every note in it.
    fn delete_notebook(&mut self, id: &str) -> Result<()>;

    /// Save a note (create or update) inside an existing notebook.
    fn save_note(&mut self, notebook_id: &str, note: &Note) -> Result<()>;

    /// Delete a note from a notebook.
    fn delete_note(&mut self, notebook_id: &str, note_id: &str) -> Result<()>;
}
