pub mod cli;
pub mod decklist;
pub mod probability;
pub mod report;
