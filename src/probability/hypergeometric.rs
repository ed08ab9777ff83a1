//! Hypergeometric draw probabilities
//!
//! Everything here works on `f64` and never builds full factorials. Single
//! outcome probabilities are formed in log space, so decks of thousands of
//! cards never overflow an intermediate binomial coefficient.

use super::draw::{DrawSpec, SpecError};

/// Number of `k`-element subsets of an `n`-element set.
///
/// Returns 0 when `k > n`, which is what the hypergeometric terms need when a
/// draw asks for more "other" cards than the deck holds.
pub fn combination_count(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    // C(n, k) == C(n, n - k); the shorter product loses less precision
    let k = k.min(n - k);
    let base = (n - k) as f64;

    (1..=k).fold(1.0, |acc, i| acc * (base + i as f64) / i as f64)
}

/// Natural log of [`combination_count`]; `None` when `k > n`.
fn ln_combination_count(n: u32, k: u32) -> Option<f64> {
    if k > n {
        return None;
    }
    let k = k.min(n - k);
    let base = (n - k) as f64;

    // ln((base + i) / i) summed over the same terms as the product
    Some((1..=k).map(|i| (base / i as f64).ln_1p()).sum())
}

/// Probability of drawing exactly `successes` desired cards.
///
/// Impossible outcomes (more successes than desired cards or draws, or more
/// failures than non-desired cards) come out as 0.
pub fn exact_probability(spec: &DrawSpec, successes: u32) -> f64 {
    if successes > spec.max_successes() {
        return 0.0;
    }
    let others_in_deck = spec.deck_size() - spec.desired_in_deck();
    let others_drawn = spec.draws() - successes;

    let (Some(hits), Some(misses), Some(all)) = (
        ln_combination_count(spec.desired_in_deck(), successes),
        ln_combination_count(others_in_deck, others_drawn),
        ln_combination_count(spec.deck_size(), spec.draws()),
    ) else {
        return 0.0;
    };

    (hits + misses - all).exp().clamp(0.0, 1.0)
}

/// Probability of drawing at least `spec.success_threshold()` desired cards.
pub fn cumulative_at_least(spec: &DrawSpec) -> f64 {
    let below: f64 = (0..spec.success_threshold())
        .map(|successes| exact_probability(spec, successes))
        .sum();

    (1.0 - below).clamp(0.0, 1.0)
}

/// Desired card count needed to see at least one of them within
/// `after_draws` draws with probability `target`.
///
/// This treats each draw as independent (drawing with replacement), so it is
/// an approximation of the inverse of [`cumulative_at_least`] with a
/// threshold of 1, and it overestimates slightly. It is not an inverse for
/// higher thresholds; use [`minimum_count_exact`] for those.
pub fn minimum_count_for_target_probability(
    target: f64,
    deck_size: u32,
    after_draws: u32,
) -> Result<u32, SpecError> {
    validate_target(target)?;
    if deck_size == 0 {
        return Err(SpecError::ZeroValue {
            field: "Number of cards in deck",
        });
    }
    if after_draws == 0 {
        return Err(SpecError::ZeroValue {
            field: "Number of draws",
        });
    }

    // Chance that a single draw misses, such that all draws miss with 1 - target
    let miss_per_draw = (1.0 - target).powf(1.0 / after_draws as f64);
    let count = (deck_size as f64 * (1.0 - miss_per_draw)).ceil();

    Ok((count.max(0.0) as u32).min(deck_size))
}

/// Smallest desired card count whose [`cumulative_at_least`] reaches `target`.
///
/// Returns `Ok(None)` when even a deck made only of desired cards falls short.
pub fn minimum_count_exact(
    target: f64,
    deck_size: u32,
    draws: u32,
    success_threshold: u32,
) -> Result<Option<u32>, SpecError> {
    validate_target(target)?;
    // Validates deck size, draws and threshold up front
    DrawSpec::new(deck_size, deck_size, draws, success_threshold)?;

    if target <= 0.0 {
        return Ok(Some(0));
    }
    let reaches = |desired: u32| -> Result<bool, SpecError> {
        let spec = DrawSpec::new(deck_size, desired, draws, success_threshold)?;
        Ok(cumulative_at_least(&spec) >= target)
    };
    if !reaches(deck_size)? {
        return Ok(None);
    }

    // The cumulative probability never drops as desired cards are added,
    // so bisect for the first count that reaches the target
    let (mut low, mut high) = (1u32, deck_size);
    while low < high {
        let mid = low + (high - low) / 2;
        if reaches(mid)? {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    Ok(Some(low))
}

fn validate_target(target: f64) -> Result<(), SpecError> {
    if (0.0..=1.0).contains(&target) {
        Ok(())
    } else {
        Err(SpecError::InvalidProbability(target))
    }
}
