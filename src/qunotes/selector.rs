//! User-facing addressing of notebooks and notes.
//!
//! Lists are shown with 1-based positions, so a user can type `2` for the
//! second row. Anything that is not a positive integer is taken as an id, or
//! as an unambiguous prefix of one (ids are UUIDs, nobody types them in full).
//!
//! Input made only of digits is always a position, even when some id starts
//! with those digits: `1234` is the 1234th row, never the id `1234abcd…`.
//! Add a non-digit character of the id to address it by prefix.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the displayed list. All-digit input always
    /// parses to this variant.
    Position(usize),
    /// Full id or unique id prefix.
    Id(String),
}

impl Selector {
    /// Returns the id this selector points at among `ids`, in display order.
    ///
    /// An exact id match wins over prefix matches. A prefix shared by more
    /// than one id resolves to nothing.
    pub fn resolve<'a, I>(&self, ids: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Selector::Position(pos) => ids
                .into_iter()
                .nth(pos.checked_sub(1)?)
                .map(str::to_string),
            Selector::Id(wanted) => {
                let mut matches = Vec::new();
                for id in ids {
                    if id == wanted {
                        return Some(id.to_string());
                    }
                    if id.starts_with(wanted.as_str()) {
                        matches.push(id);
                    }
                }
                match matches.as_slice() {
                    [only] => Some(only.to_string()),
                    _ => None,
                }
            }
        }
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty selector".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Positions start at 1".to_string()),
            Ok(pos) => Ok(Selector::Position(pos)),
            Err(_) => Ok(Selector::Id(s.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Position(pos) => write!(f, "{}", pos),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}
