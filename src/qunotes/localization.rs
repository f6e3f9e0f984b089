//! # Localization
//!
//! Message keys (see [`crate::failure::Localizable`]) are turned into text by
//! a [`Localizer`] holding one string table per [`Language`].
//!
//! Lookups never fail. Two distinct placeholders make gaps obvious on screen:
//!
//! - `**key**`: the language has a table, but the key is missing from it
//! - `??key??`: there is no table at all for the language
//!
//! English and Russian tables are built in. Extra or overriding tables can be
//! loaded from a directory of `<code>.json` files, each a flat JSON object
//! mapping keys to messages.

use crate::error::{Result, StoreError};
use crate::failure::Localizable;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

type Table = HashMap<String, String>;

static BUILTIN_EN: Lazy<Table> = Lazy::new(|| {
    table(&[
        ("library_adding_notebook_error", "Failed to add notebook"),
        ("library_deleting_notebook_error", "Failed to delete notebook"),
        ("notebook_adding_note_error", "Failed to add note"),
        ("notebook_deleting_note_error", "Failed to delete note"),
        ("notebook_deleting_notebook_error", "Failed to delete notebook"),
        ("notebook_updating_notebook_error", "Failed to update notebook"),
        ("notebook_note_not_exists_error", "Note does not exist"),
        ("note_adding_tag_error", "Failed to add tag"),
        ("note_removing_tag_error", "Failed to remove tag"),
        ("note_deleting_note_error", "Failed to delete note"),
        ("note_updating_content_error", "Failed to update note's content"),
        ("note_updating_title_error", "Failed to update note's title"),
        ("store_access_error", "Could not save or load your notes"),
        ("library_empty", "No notebooks yet."),
        ("notebook_empty", "No notes in this notebook."),
        ("effect_updated", "Updated"),
        ("effect_deleted", "Deleted"),
        ("effect_unchanged", "Nothing changed"),
    ])
});

static BUILTIN_RU: Lazy<Table> = Lazy::new(|| {
    table(&[
        ("library_adding_notebook_error", "Не удалось добавить блокнот"),
        ("library_deleting_notebook_error", "Не удалось удалить блокнот"),
        ("notebook_adding_note_error", "Не удалось добавить заметку"),
        ("notebook_deleting_note_error", "Не удалось удалить заметку"),
        ("notebook_deleting_notebook_error", "Не удалось удалить блокнот"),
        ("notebook_updating_notebook_error", "Не удалось обновить блокнот"),
        ("notebook_note_not_exists_error", "Заметка не существует"),
        ("note_adding_tag_error", "Не удалось добавить тег"),
        ("note_removing_tag_error", "Не удалось удалить тег"),
        ("note_deleting_note_error", "Не удалось удалить заметку"),
        ("note_updating_content_error", "Не удалось обновить содержимое заметки"),
        ("note_updating_title_error", "Не удалось обновить заголовок заметки"),
        ("store_access_error", "Не удалось сохранить или загрузить заметки"),
        ("library_empty", "Блокнотов пока нет."),
        ("notebook_empty", "В этом блокноте нет заметок."),
        ("effect_updated", "Обновлено"),
        ("effect_deleted", "Удалено"),
        ("effect_unchanged", "Ничего не изменилось"),
    ])
});

fn table(entries: &[(&str, &str)]) -> Table {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ru];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// First supported language among locale identifiers such as `"ru-RU"`
    /// or `"en_GB.UTF-8"`, in preference order.
    pub fn from_locales<I, S>(locales: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        locales.into_iter().find_map(|locale| {
            let locale = locale.as_ref();
            let prefix: String = locale.chars().take(2).collect();
            prefix.parse().ok()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Localizer {
    language: Language,
    tables: HashMap<Language, Table>,
}

impl Localizer {
    /// A localizer with the built-in tables.
    pub fn new(language: Language) -> Self {
        let mut tables = HashMap::new();
        tables.insert(Language::En, BUILTIN_EN.clone());
        tables.insert(Language::Ru, BUILTIN_RU.clone());
        Self { language, tables }
    }

    /// A localizer with no tables at all; every lookup yields `??key??`.
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            tables: HashMap::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Merges `entries` into the table for `language`, creating it if needed.
    pub fn with_table(mut self, language: Language, entries: Table) -> Self {
        self.tables.entry(language).or_default().extend(entries);
        self
    }

    /// Merges every `<code>.json` table found in `dir`. Missing files are
    /// skipped.
    pub fn load_dir<P: AsRef<Path>>(mut self, dir: P) -> Result<Self> {
        for language in Language::ALL {
            let path = dir.as_ref().join(format!("{}.json", language.code()));
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(StoreError::Io)?;
            let entries: Table =
                serde_json::from_str(&content).map_err(StoreError::Serialization)?;
            debug!(
                "event=load_locale status=ok language={} entries={}",
                language,
                entries.len()
            );
            self = self.with_table(language, entries);
        }
        Ok(self)
    }

    pub fn localized(&self, key: &str) -> String {
        match self.tables.get(&self.language) {
            None => format!("??{}??", key),
            Some(table) => table
                .get(key)
                .cloned()
                .unwrap_or_else(|| format!("**{}**", key)),
        }
    }

    pub fn message_for<L: Localizable + ?Sized>(&self, item: &L) -> String {
        self.localized(item.localized_key())
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::{LibraryFailure, NoteFailure};

    #[test]
    fn add_notebook_failure_is_localized() {
        let l = Localizer::new(Language::En);
        assert_eq!(
            l.message_for(&LibraryFailure::AddNotebook),
            "Failed to add notebook"
        );
    }

    #[test]
    fn russian_table_is_used() {
        let l = Localizer::new(Language::Ru);
        assert_eq!(l.message_for(&NoteFailure::AddTag), "Не удалось добавить тег");
    }

    #[test]
    fn missing_key_uses_star_placeholder() {
        let l = Localizer::new(Language::En);
        assert_eq!(l.localized("no_such_key"), "**no_such_key**");
    }

    #[test]
    fn missing_table_uses_question_placeholder() {
        let l = Localizer::empty(Language::Ru);
        assert_eq!(l.localized("anything"), "??anything??");
    }

    #[test]
    fn with_table_overrides_entries() {
        let mut extra = HashMap::new();
        extra.insert("library_empty".to_string(), "Nothing here".to_string());
        let l = Localizer::new(Language::En).with_table(Language::En, extra);
        assert_eq!(l.localized("library_empty"), "Nothing here");
        assert_eq!(
            l.localized("library_adding_notebook_error"),
            "Failed to add notebook"
        );
    }

    #[test]
    fn load_dir_merges_json_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ru.json"), r#"{"greeting": "Привет"}"#).unwrap();

        let l = Localizer::empty(Language::Ru).load_dir(dir.path()).unwrap();
        assert_eq!(l.localized("greeting"), "Привет");
        assert_eq!(l.localized("other"), "**other**");
    }

    #[test]
    fn language_from_locales_picks_first_supported() {
        assert_eq!(
            Language::from_locales(["de-DE", "ru-RU", "en"]),
            Some(Language::Ru)
        );
        assert_eq!(Language::from_locales(["fr"]), None);
        assert_eq!(Language::from_locales(["EN_us"]), Some(Language::En));
    }
}
