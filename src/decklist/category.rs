use super::parse::DecklistError;
use serde::Serialize;

/// Categories kept in the decklist but left out of the deck size
pub const EXCLUDED_FROM_DECK: &[&str] = &["sideboard", "maybeboard", "commander"];

/// Key used for entries that appear before any `[HEADER]` line
pub const UNCATEGORIZED: &str = "no category";

/// Copies of a card on an entry line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryCount {
    Single(u32),
    /// The only integer token on the line does not fit a card count
    OutOfRange(u64),
    /// The line had zero or several integer tokens; they are kept as found
    Ambiguous(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    pub name: String,
    pub count: EntryCount,
}

impl CardEntry {
    /// Split an entry line into card name and count.
    ///
    /// Whitespace separated tokens made only of ASCII digits are integer
    /// tokens. With exactly one of them the other tokens form the name, in
    /// either order ("Forest 17" or "17 Forest"). Any other number of integer
    /// tokens leaves the whole line as the name and records every integer
    /// found as an ambiguous count. A single count too large for `u32` is
    /// kept as `OutOfRange`; integers past `u64::MAX` saturate.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let numbers: Vec<(usize, u64)> = line
            .split_whitespace()
            .enumerate()
            .filter(|(_, token)| token.chars().all(|c| c.is_ascii_digit()))
            .map(|(index, token)| (index, token.parse().unwrap_or(u64::MAX)))
            .collect();

        match numbers.as_slice() {
            [(count_index, count)] => {
                let name = line
                    .split_whitespace()
                    .enumerate()
                    .filter(|(index, _)| index != count_index)
                    .map(|(_, token)| token)
                    .collect::<Vec<_>>()
                    .join(" ");
                let count = match u32::try_from(*count) {
                    Ok(count) => EntryCount::Single(count),
                    Err(_) => EntryCount::OutOfRange(*count),
                };
                CardEntry { name, count }
            }
            _ => CardEntry {
                name: line.to_string(),
                count: EntryCount::Ambiguous(numbers.iter().map(|(_, n)| *n).collect()),
            },
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self.count, EntryCount::Ambiguous(_))
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.count, EntryCount::OutOfRange(_))
    }
}

/// A named bucket of decklist entries, e.g. `lands` or `cost 3`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCategory {
    key: String,
    entries: Vec<CardEntry>,
}

impl CardCategory {
    /// Create an empty category, normalizing the key the same way headers are
    pub fn new(key: &str) -> Self {
        CardCategory {
            key: normalize_key(key),
            entries: Vec::new(),
        }
    }

    /// Build a category from a `[Header]` line
    pub fn from_header(line: &str) -> Self {
        Self::new(line)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[CardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this category counts towards the deck size
    pub fn in_deck(&self) -> bool {
        !EXCLUDED_FROM_DECK.contains(&self.key.as_str())
    }

    /// Total number of cards in the category.
    ///
    /// Fails on the first ambiguous or oversized entry instead of guessing a
    /// count for it.
    pub fn size(&self) -> Result<u32, DecklistError> {
        self.entries.iter().try_fold(0u32, |total, entry| match &entry.count {
            EntryCount::Single(count) => Ok(total.saturating_add(*count)),
            EntryCount::OutOfRange(count) => Err(DecklistError::CountOutOfRange {
                category: self.key.clone(),
                line: entry.name.clone(),
                count: *count,
            }),
            EntryCount::Ambiguous(found) => Err(DecklistError::AmbiguousCount {
                category: self.key.clone(),
                line: entry.name.clone(),
                found: found.clone(),
            }),
        })
    }

    pub(crate) fn push(&mut self, entry: CardEntry) {
        self.entries.push(entry);
    }
}

/// Lowercase, drop the brackets, trim
pub fn normalize_key(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['[', ']'], "")
        .trim()
        .to_string()
}
