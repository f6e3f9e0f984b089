use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::failure::NoteFailure;

/// A single note: title, free-form content and a list of tags.
///
/// Notes are values. Every transition consumes the note and returns the
/// updated one; `updated_at` is refreshed by every transition that changes
/// something and never drops below `created_at`.
///
/// Persisted notes come back through [`Note::restore`], which re-establishes
/// these invariants.
#[derive(Debug, Clone)]
pub struct Note {
    id: String,
    title: String,
    content: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Note {}

impl std::hash::Hash for Note {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, content, now)
    }

    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a note from persisted parts. `updated_at` is clamped to
    /// `created_at` if a record on disk violates the ordering, and tags are
    /// trimmed with blanks and repeats dropped.
    pub fn restore(
        id: String,
        title: String,
        content: String,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim();
            if !tag.is_empty() && !unique.iter().any(|t| t == tag) {
                unique.push(tag.to_string());
            }
        }
        Self {
            id,
            title,
            content,
            tags: unique,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Tags in the order they were added.
    pub fn all_tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends `tag`. Adding a tag the note already carries returns the note
    /// unchanged, timestamp included.
    pub fn add_tag(self, tag: &str, now: DateTime<Utc>) -> Result<Self, NoteFailure> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(NoteFailure::AddTag);
        }
        if self.has_tag(tag) {
            return Ok(self);
        }
        let tag = tag.to_string();
        let note = lens::tags().over(self, |mut tags| {
            tags.push(tag);
            tags
        });
        Ok(note.touched(now))
    }

    /// Removes `tag`. Removing a tag the note does not carry is a no-op.
    pub fn remove_tag(self, tag: &str, now: DateTime<Utc>) -> Self {
        if !self.has_tag(tag) {
            return self;
        }
        lens::tags()
            .over(self, |tags| tags.into_iter().filter(|t| t != tag).collect())
            .touched(now)
    }

    pub fn update_title(self, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        lens::title().set(title.into(), self).touched(now)
    }

    pub fn update_content(self, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        lens::content().set(content.into(), self).touched(now)
    }

    fn touched(self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now.max(self.updated_at),
            ..self
        }
    }
}

/// Field lenses for [`Note`].
///
/// There are no lenses for timestamps or the identifier; those are
/// maintained by the transitions above.
pub mod lens {
    use super::Note;
    use crate::lens::Lens;

    pub fn title() -> Lens<Note, String> {
        Lens::new(
            |note: &Note| note.title.clone(),
            |title, note: Note| Note { title, ..note },
        )
    }

    pub fn content() -> Lens<Note, String> {
        Lens::new(
            |note: &Note| note.content.clone(),
            |content, note: Note| Note { content, ..note },
        )
    }

    /// Crate-internal: tags change through [`Note::add_tag`] and
    /// [`Note::remove_tag`], which keep them unique.
    pub(crate) fn tags() -> Lens<Note, Vec<String>> {
        Lens::new(
            |note: &Note| note.tags.clone(),
            |tags, note: Note| Note { tags, ..note },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn note() -> Note {
        Note::with_id("n1", "Groceries", "milk", t0())
    }

    #[test]
    fn new_note_has_matching_timestamps() {
        let n = note();
        assert_eq!(n.created_at(), n.updated_at());
        assert!(n.all_tags().is_empty());
    }

    #[test]
    fn add_tag_appends_and_refreshes_timestamp() {
        let later = t0() + Duration::minutes(5);
        let n = note().add_tag("home", later).unwrap();
        assert_eq!(n.all_tags(), ["home"]);
        assert_eq!(n.updated_at(), later);
    }

    #[test]
    fn add_tag_twice_is_idempotent() {
        let later = t0() + Duration::minutes(5);
        let even_later = later + Duration::minutes(5);
        let once = note().add_tag("x", later).unwrap();
        let twice = once.clone().add_tag("x", even_later).unwrap();

        assert_eq!(twice.all_tags(), once.all_tags());
        assert_eq!(twice.updated_at(), once.updated_at());
    }

    #[test]
    fn add_blank_tag_is_rejected() {
        assert_eq!(note().add_tag("   ", t0()), Err(NoteFailure::AddTag));
    }

    #[test]
    fn add_tag_trims_whitespace() {
        let n = note().add_tag("  work ", t0()).unwrap();
        assert_eq!(n.all_tags(), ["work"]);
    }

    #[test]
    fn tag_scenario_keeps_remaining_tag() {
        let n = note()
            .add_tag("a", t0())
            .and_then(|n| n.add_tag("b", t0()))
            .unwrap()
            .remove_tag("a", t0());
        assert_eq!(n.all_tags(), ["b"]);
    }

    #[test]
    fn removing_absent_tag_is_noop() {
        let before = note().add_tag("a", t0()).unwrap();
        let after = before.clone().remove_tag("zzz", t0() + Duration::hours(1));
        assert_eq!(after.all_tags(), before.all_tags());
        assert_eq!(after.updated_at(), before.updated_at());
    }

    #[test]
    fn update_title_and_content() {
        let later = t0() + Duration::seconds(30);
        let n = note()
            .update_title("Shopping", later)
            .update_content("milk, eggs", later);
        assert_eq!(n.title(), "Shopping");
        assert_eq!(n.content(), "milk, eggs");
        assert_eq!(n.updated_at(), later);
        assert_eq!(n.created_at(), t0());
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let later = t0() + Duration::hours(2);
        let earlier = t0() - Duration::hours(2);
        let n = note().update_title("A", later).update_title("B", earlier);
        assert_eq!(n.updated_at(), later);
        assert!(n.updated_at() >= n.created_at());
    }

    #[test]
    fn restore_clamps_inverted_timestamps() {
        let n = Note::restore(
            "id".into(),
            "t".into(),
            "c".into(),
            vec![],
            t0(),
            t0() - Duration::days(1),
        );
        assert_eq!(n.updated_at(), t0());
    }

    #[test]
    fn restore_normalizes_tags() {
        let tags = ["a", " a ", "", "b", "a"].map(String::from).to_vec();
        let n = Note::restore("id".into(), "t".into(), "c".into(), tags, t0(), t0());
        assert_eq!(n.all_tags(), ["a", "b"]);
    }

    #[test]
    fn equality_is_identifier_based() {
        let a = Note::with_id("same", "One", "", t0());
        let b = Note::with_id("same", "Two", "other", t0() + Duration::days(1));
        assert_eq!(a, b);
        assert_ne!(a, Note::with_id("other", "One", "", t0()));
    }

    #[test]
    fn title_lens_obeys_laws() {
        let l = lens::title();
        let n = note();
        assert_eq!(l.get(&l.set("X".into(), n.clone())), "X");
        let round = l.set(l.get(&n), n.clone());
        assert_eq!(round.title(), n.title());
        assert_eq!(round.content(), n.content());
    }
}
