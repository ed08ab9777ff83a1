//! Per-turn land and curve statistics for a categorized decklist
//!
//! For turn `t` the model assumes `6 + t` cards seen: the opening seven plus
//! one draw per turn, minus the draw skipped on the play.

use super::category::CardCategory;
use super::parse::{Decklist, DecklistError};
use crate::probability::{cumulative_at_least, DrawSpec};
use log::{debug, info};
use serde::Serialize;

pub const FIRST_TURN: u32 = 1;
pub const LAST_TURN: u32 = 7;
/// Cards seen before the first turn's draw
pub const OPENING_DRAWS: u32 = 6;
pub const LANDS_KEY: &str = "lands";

const TURN_COUNT: usize = (LAST_TURN - FIRST_TURN + 1) as usize;

/// Probability for each of turns 1 through 7
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TurnSeries {
    values: [f64; TURN_COUNT],
}

impl TurnSeries {
    /// Build a series by evaluating `f` for every turn in order
    pub fn try_from_fn<F, E>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(u32) -> Result<f64, E>,
    {
        let mut values = [0.0; TURN_COUNT];
        for (slot, turn) in values.iter_mut().zip(FIRST_TURN..=LAST_TURN) {
            *slot = f(turn)?;
        }
        Ok(TurnSeries { values })
    }

    pub fn get(&self, turn: u32) -> Option<f64> {
        if !(FIRST_TURN..=LAST_TURN).contains(&turn) {
            return None;
        }
        self.values.get((turn - FIRST_TURN) as usize).copied()
    }

    /// `(turn, probability)` pairs in turn order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        (FIRST_TURN..=LAST_TURN).zip(self.values.iter().copied())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Turn by turn product with another series
    pub fn product(&self, other: &TurnSeries) -> TurnSeries {
        let mut values = self.values;
        for (value, factor) in values.iter_mut().zip(other.values.iter()) {
            *value *= factor;
        }
        TurnSeries { values }
    }
}

/// Result of analyzing one decklist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveReport {
    pub deck_size: u32,
    /// Chance of having drawn at least `t` lands by turn `t`
    pub land_streak: TurnSeries,
    /// Chance of having drawn a card costing `t` by turn `t`
    pub cost_curve: TurnSeries,
    /// `land_streak * cost_curve`. Treats the two as independent, which they
    /// are not when drawn from the same deck, so this is only an estimate.
    pub combined: TurnSeries,
}

/// Cards seen by the given turn
pub fn draws_by_turn(turn: u32) -> u32 {
    OPENING_DRAWS + turn
}

/// Compute the land streak, cost curve and combined series for a decklist
pub fn analyze(decklist: &Decklist) -> Result<CurveReport, DecklistError> {
    let lands = decklist
        .category(LANDS_KEY)
        .ok_or_else(|| DecklistError::MissingCategory(LANDS_KEY.to_string()))?;
    let deck_size = decklist.deck_size()?;
    let land_count = lands.size()?;
    info!("Deck size {} with {} lands", deck_size, land_count);
    // The deck has to cover the last turn's draws even when a category is empty
    DrawSpec::new(deck_size, deck_size, draws_by_turn(LAST_TURN), 1)?;

    let land_streak = TurnSeries::try_from_fn(|turn| {
        let p = at_least(deck_size, land_count, draws_by_turn(turn), turn)?;
        debug!("Turn {}: land streak {:.4}", turn, p);
        Ok::<_, DecklistError>(p)
    })?;

    let cost_curve = TurnSeries::try_from_fn(|turn| {
        let Some(category) = cost_category(decklist, turn) else {
            debug!("Turn {}: no cost {} category", turn, turn);
            return Ok(0.0);
        };
        let p = at_least(deck_size, category.size()?, draws_by_turn(turn), 1)?;
        debug!("Turn {}: [{}] {:.4}", turn, category.key(), p);
        Ok::<_, DecklistError>(p)
    })?;

    let combined = land_streak.product(&cost_curve);

    Ok(CurveReport {
        deck_size,
        land_streak,
        cost_curve,
        combined,
    })
}

/// `cost t`, falling back to the aggregated `cost t+` bucket
fn cost_category(decklist: &Decklist, turn: u32) -> Option<&CardCategory> {
    decklist
        .category(&format!("cost {}", turn))
        .or_else(|| decklist.category(&format!("cost {}+", turn)))
}

/// Cumulative probability where an empty category simply can't be drawn
fn at_least(
    deck_size: u32,
    desired: u32,
    draws: u32,
    threshold: u32,
) -> Result<f64, DecklistError> {
    if desired == 0 {
        return Ok(0.0);
    }
    let spec = DrawSpec::new(deck_size, desired, draws, threshold)?;
    Ok(cumulative_at_least(&spec))
}
