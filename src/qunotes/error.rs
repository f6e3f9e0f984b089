use std::fmt;

use thiserror::Error;

use crate::failure::Localizable;

/// Infrastructure errors raised by a [`crate::store::DataStore`].
///
/// Opaque to the use cases: they pass these through untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Outcome of a rejected use case: either a domain failure of kind `F`, or a
/// storage error that prevented loading or saving.
#[derive(Error, Debug)]
pub enum UseCaseError<F>
where
    F: fmt::Debug + fmt::Display,
{
    #[error("{0}")]
    Rejected(F),

    #[error("could not save or load: {0}")]
    Store(#[from] StoreError),
}

impl<F> UseCaseError<F>
where
    F: fmt::Debug + fmt::Display,
{
    /// The domain failure, if this was one.
    pub fn failure(&self) -> Option<&F> {
        match self {
            UseCaseError::Rejected(f) => Some(f),
            UseCaseError::Store(_) => None,
        }
    }
}

impl<F> Localizable for UseCaseError<F>
where
    F: Localizable + fmt::Debug + fmt::Display,
{
    fn localized_key(&self) -> &'static str {
        match self {
            UseCaseError::Rejected(f) => f.localized_key(),
            UseCaseError::Store(_) => "store_access_error",
        }
    }
}
