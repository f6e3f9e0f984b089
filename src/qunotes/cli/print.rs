use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use qunotes::config::Theme;
use qunotes::effect::{Effect, FieldChange, NoteView, Row};
use qunotes::localization::Localizer;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const INDEX_WIDTH: usize = 5;

/// Renders effects for the terminal using the configured theme and language.
pub(super) struct Printer {
    theme: Theme,
    localizer: Localizer,
}

impl Printer {
    pub(super) fn new(theme: Theme, localizer: Localizer) -> Self {
        Self { theme, localizer }
    }

    pub(super) fn print(&self, effect: &Effect, empty_key: &str) {
        println!("{}", self.render(effect, empty_key));
    }

    pub(super) fn print_failure(&self, message: &str) {
        eprintln!("{}", self.paint(message, &self.theme.failure));
    }

    pub(super) fn print_info(&self, message: &str) {
        println!("{}", message);
    }

    /// `empty_key` is the message shown when a list comes out empty.
    pub(super) fn render(&self, effect: &Effect, empty_key: &str) -> String {
        match effect {
            Effect::Insert { index, rows } => self.render_rows(rows, Some(*index), empty_key),
            Effect::Remove { index, rows } => {
                let deleted = self.localizer.localized("effect_deleted");
                let header = format!("{} #{}", deleted, index + 1);
                format!(
                    "{}\n{}",
                    self.paint(&header, &self.theme.success),
                    self.render_rows(rows, None, empty_key)
                )
            }
            Effect::Reload { rows } => self.render_rows(rows, None, empty_key),
            Effect::Replace(change) => {
                let (field, value) = match change {
                    FieldChange::NotebookName(name) => ("name", name.clone()),
                    FieldChange::NoteTitle(title) => ("title", title.clone()),
                    FieldChange::NoteContent(content) => ("content", content.clone()),
                    FieldChange::NoteTags(tags) => ("tags", format_tags(tags)),
                };
                format!(
                    "{} {}: {}",
                    self.paint(&self.localizer.localized("effect_updated"), &self.theme.success),
                    field,
                    value
                )
            }
            Effect::Show(view) => self.render_note(view),
            Effect::Dismiss => self
                .paint(&self.localizer.localized("effect_deleted"), &self.theme.success)
                .to_string(),
            Effect::None => self
                .paint(&self.localizer.localized("effect_unchanged"), &self.theme.muted)
                .to_string(),
        }
    }

    fn render_rows(&self, rows: &[Row], highlight: Option<usize>, empty_key: &str) -> String {
        if rows.is_empty() {
            return self
                .paint(&self.localizer.localized(empty_key), &self.theme.muted)
                .to_string();
        }
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.render_row(i, row, highlight == Some(i)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_row(&self, index: usize, row: &Row, highlight: bool) -> String {
        let idx = format!("{:>width$}. ", index + 1, width = INDEX_WIDTH - 2);

        let mut suffix = String::new();
        if let Some(count) = row.count {
            suffix.push_str(&format!(" ({})", count));
        }
        if !row.tags.is_empty() {
            suffix.push(' ');
            suffix.push_str(&format_tags(&row.tags));
        }
        let time = row.updated_at.map(format_time_ago).unwrap_or_default();

        let fixed = idx.width() + suffix.width() + time.width();
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&row.title, available);
        let padding = available.saturating_sub(title.width());

        let title = if highlight {
            self.paint(&title, &self.theme.success).bold()
        } else {
            title.normal()
        };

        format!(
            "{}{}{}{}{}",
            self.paint(&idx, &self.theme.accent),
            title,
            self.paint(&suffix, &self.theme.tag),
            " ".repeat(padding),
            self.paint(&time, &self.theme.muted)
        )
    }

    fn render_note(&self, view: &NoteView) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", view.title.bold()));
        out.push_str(&format!(
            "{}\n",
            self.paint(
                &format!(
                    "{}  created {}  updated {}",
                    view.id,
                    format_time_ago(view.created_at).trim(),
                    format_time_ago(view.updated_at).trim()
                ),
                &self.theme.muted
            )
        ));
        if !view.tags.is_empty() {
            out.push_str(&format!(
                "{}\n",
                self.paint(&format_tags(&view.tags), &self.theme.tag)
            ));
        }
        out.push_str("--------------------------------\n");
        out.push_str(&view.content);
        out
    }

    fn paint(&self, text: &str, color: &str) -> ColoredString {
        text.color(color)
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortens `s` to at most `max_width` columns, marking the cut with `…`.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let kept: String = s
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    kept + "…"
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
