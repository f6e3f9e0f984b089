//! # QuNotes Architecture
//!
//! QuNotes is a notebook library: a [`model::Library`] of
//! [`model::Notebook`]s, each an ordered list of tagged [`model::Note`]s.
//! The core is UI-agnostic; the `qunotes` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders effects, localizes failures    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over use cases                               │
//! │  - Resolves selectors (positions, id prefixes) to ids       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Use Case Layer (usecase/*.rs)                              │
//! │  - load → pure transition → persist → (state, effect)       │
//! │  - Domain failures vs. store errors kept apart              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Entities (model/) and Storage (store/)                     │
//! │  - Immutable values with consuming transitions and lenses   │
//! │  - DataStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutable entities
//!
//! Entities are never mutated in place. Every transition consumes the value
//! and returns a new one (or a typed failure), and the [`lens`] module gives
//! composable get/set access to nested fields:
//!
//! ```
//! use chrono::Utc;
//! use qunotes::model::{note, Note};
//!
//! let draft = Note::with_id("n1", "Draft", "", Utc::now());
//! let renamed = note::lens::title().set("Final".to_string(), draft.clone());
//! assert_eq!(renamed.title(), "Final");
//! assert_eq!(draft.title(), "Draft");
//! ```
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It
//! never prints and never exits; failures carry a localization key
//! ([`failure::Localizable`]) and the presentation layer turns that into text
//! through a [`localization::Localizer`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`usecase`]: Screen-level operations returning state and [`effect::Effect`]
//! - [`model`]: `Library`, `Notebook`, `Note` and their lenses
//! - [`lens`]: Functional get/set pairs and composition
//! - [`failure`]: Domain failure kinds and their localization keys
//! - [`error`]: Store errors and the use-case error wrapper
//! - [`store`]: Storage abstraction and implementations
//! - [`selector`]: Positions and id prefixes typed by users
//! - [`localization`]: String tables and placeholder rules
//! - [`config`]: Configuration management
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod config;
pub mod effect;
pub mod error;
pub mod failure;
pub mod lens;
pub mod localization;
pub mod model;
pub mod selector;
pub mod store;
pub mod usecase;
