//! # Use cases
//!
//! One module per screen of the application: [`library`], [`notebook`] and
//! [`note`]. Every operation follows the same steps:
//!
//! 1. load the current state from the [`DataStore`](crate::store::DataStore),
//! 2. apply a pure entity transition,
//! 3. on success persist the change and return an [`Outcome`]: the new state
//!    plus the [`Effect`] to render,
//! 4. on a domain failure return [`UseCaseError::Rejected`] without touching
//!    the store.
//!
//! Storage errors come back as [`UseCaseError::Store`], unchanged. Nothing
//! here retries, logs, or prints.
//!
//! When an operation targets an entity that does not exist, it is rejected
//! with the operation's own failure kind (renaming a missing note fails with
//! `NoteFailure::UpdateTitle`).

use chrono::{DateTime, Utc};

use crate::effect::Effect;
use crate::error::{StoreError, UseCaseError};
use crate::model::Notebook;
use crate::store::DataStore;

pub mod library;
pub mod note;
pub mod notebook;

/// New state and the effect that renders it.
#[derive(Debug, Clone)]
pub struct Outcome<S> {
    pub state: S,
    pub effect: Effect,
}

impl<S> Outcome<S> {
    pub fn new(state: S, effect: Effect) -> Self {
        Self { state, effect }
    }
}

/// Source of "now" for timestamped transitions.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reads the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Loads the notebook an operation targets. A missing notebook rejects the
/// operation with `failure`.
pub(crate) fn load_target<S, F>(
    store: &S,
    notebook_id: &str,
    failure: F,
) -> Result<Notebook, UseCaseError<F>>
where
    S: DataStore,
    F: std::fmt::Debug + std::fmt::Display,
{
    match store.load_notebook(notebook_id) {
        Ok(notebook) => Ok(notebook),
        Err(StoreError::NotebookNotFound(_)) => Err(UseCaseError::Rejected(failure)),
        Err(e) => Err(UseCaseError::Store(e)),
    }
}
