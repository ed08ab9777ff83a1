pub mod analyze;
pub mod category;
pub mod parse;

pub use analyze::{analyze, CurveReport, TurnSeries};
pub use category::{CardCategory, CardEntry, EntryCount};
pub use parse::{parse_decklist_file, read_decklist, Decklist, DecklistError};
