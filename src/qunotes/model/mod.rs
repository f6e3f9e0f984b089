//! # Entities
//!
//! [`Library`] owns [`Notebook`]s, a notebook owns [`Note`]s. All three are
//! immutable values: transitions take `self` and return the next value (or a
//! domain failure), and nothing outlives detachment from its owner.
//!
//! Equality on notes and notebooks is identifier-based. Two notebooks with the
//! same identifier are the same entity whatever their names.
//!
//! Each entity module carries a `lens` submodule with the field lenses used to
//! write nested updates.

pub mod library;
pub mod note;
pub mod notebook;

use std::collections::HashSet;

pub use library::Library;
pub use note::Note;
pub use notebook::{Notebook, NotebookMeta};

/// Keeps the first item for each identifier, preserving order.
pub(crate) fn unique_by_id<T, F>(items: Vec<T>, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(id_of(item).to_string()))
        .collect()
}
