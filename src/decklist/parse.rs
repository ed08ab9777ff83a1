use super::category::{CardCategory, CardEntry, UNCATEGORIZED};
use crate::probability::SpecError;
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header that moves every following category into the mana curve section
pub const MANA_CURVE_HEADER: &str = "[MANA CURVE]";

#[derive(Error, Debug)]
pub enum DecklistError {
    #[error("Incorrect path to file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Decklist has no [{0}] category")]
    MissingCategory(String),
    #[error("Cannot count cards in [{category}]: '{line}' has {} numbers {found:?}, expected exactly one", .found.len())]
    AmbiguousCount {
        category: String,
        line: String,
        found: Vec<u64>,
    },
    #[error("Card count {count} for '{line}' in [{category}] is too large")]
    CountOutOfRange {
        category: String,
        line: String,
        count: u64,
    },
    #[error(transparent)]
    Spec(#[from] SpecError),
}

/// Categorized decklist.
///
/// `content` holds the card list the statistics run on. Categories that
/// follow a `[MANA CURVE]` header land in `mana_curve` instead; they often
/// reuse the same names as the card list and are kept apart for that reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decklist {
    content: Vec<CardCategory>,
    mana_curve: Vec<CardCategory>,
}

impl Decklist {
    /// Categorize decklist lines in a single pass.
    ///
    /// Blank lines and `#` comments are skipped, `[Name]` opens a category and
    /// anything else is an entry of the open category. Entries before the
    /// first header go to `no category`. Reopening a category appends to it.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut decklist = Decklist::default();
        let mut in_mana_curve = false;
        let mut current: Option<usize> = None;

        for (line_num, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                if line == MANA_CURVE_HEADER {
                    in_mana_curve = true;
                }
                let section = decklist.section_mut(in_mana_curve);
                current = Some(open_category(section, line));
                continue;
            }

            let entry = CardEntry::parse(line);
            if entry.is_ambiguous() {
                warn!(
                    "Line {}: expected exactly one card count in '{}'",
                    line_num + 1,
                    line
                );
            } else if entry.is_out_of_range() {
                warn!("Line {}: card count too large in '{}'", line_num + 1, line);
            }

            let section = decklist.section_mut(in_mana_curve);
            let index = match current {
                Some(index) => index,
                None => open_category(section, UNCATEGORIZED),
            };
            current = Some(index);
            section[index].push(entry);
        }

        decklist
    }

    pub fn categories(&self) -> &[CardCategory] {
        &self.content
    }

    pub fn mana_curve(&self) -> &[CardCategory] {
        &self.mana_curve
    }

    /// Look up a card list category by key (case-insensitive, brackets optional)
    pub fn category(&self, key: &str) -> Option<&CardCategory> {
        let key = super::category::normalize_key(key);
        self.content.iter().find(|c| c.key() == key)
    }

    /// Number of cards in the deck proper.
    ///
    /// Sideboard, maybeboard and commander are left out. Every card list
    /// category is sized, so an ambiguous entry anywhere fails here.
    pub fn deck_size(&self) -> Result<u32, DecklistError> {
        let mut total = 0u32;
        for category in &self.content {
            let size = category.size()?;
            if category.in_deck() {
                total = total.saturating_add(size);
            }
        }
        Ok(total)
    }

    fn section_mut(&mut self, mana_curve: bool) -> &mut Vec<CardCategory> {
        if mana_curve {
            &mut self.mana_curve
        } else {
            &mut self.content
        }
    }
}

/// Find or create the category for a header, returning its index
fn open_category(section: &mut Vec<CardCategory>, header: &str) -> usize {
    let category = CardCategory::from_header(header);
    if let Some(index) = section.iter().position(|c| c.key() == category.key()) {
        debug!("Reopening category [{}]", category.key());
        return index;
    }
    debug!("New category [{}]", category.key());
    section.push(category);
    section.len() - 1
}

/// Read a decklist file into lines
pub fn read_decklist(path: impl AsRef<Path>) -> Result<Vec<String>, DecklistError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DecklistError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DecklistError::NotAFile(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| DecklistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    info!("Read {} lines from {}", lines.len(), path.display());

    Ok(lines)
}

/// Read and categorize a decklist file
pub fn parse_decklist_file(path: impl AsRef<Path>) -> Result<Decklist, DecklistError> {
    let lines = read_decklist(path)?;
    Ok(Decklist::parse(&lines))
}
