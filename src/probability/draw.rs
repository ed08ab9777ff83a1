use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("{field} has to be a positive integer")]
    ZeroValue { field: &'static str },
    #[error("Number of desired cards ({desired}) cannot exceed deck size ({deck_size})")]
    DesiredExceedsDeck { desired: u32, deck_size: u32 },
    #[error("Number of draws ({draws}) cannot exceed deck size ({deck_size})")]
    DrawsExceedDeck { draws: u32, deck_size: u32 },
    #[error("Success threshold ({threshold}) cannot exceed number of draws ({draws})")]
    ThresholdExceedsDraws { threshold: u32, draws: u32 },
    #[error("Probability has to be between 0 and 1, got {0}")]
    InvalidProbability(f64),
}

/// Parameters of a single draw: population, successes in it, sample size and
/// how many successes count as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawSpec {
    deck_size: u32,
    desired_in_deck: u32,
    draws: u32,
    success_threshold: u32,
}

impl DrawSpec {
    /// Validate and build a draw specification.
    ///
    /// The threshold is bounded by the number of draws only. A threshold
    /// above `desired_in_deck` is allowed and simply can't be reached.
    pub fn new(
        deck_size: u32,
        desired_in_deck: u32,
        draws: u32,
        success_threshold: u32,
    ) -> Result<Self, SpecError> {
        for (field, value) in [
            ("Number of cards in deck", deck_size),
            ("Number of desired cards in deck", desired_in_deck),
            ("Number of draws", draws),
            ("Success threshold", success_threshold),
        ] {
            if value == 0 {
                return Err(SpecError::ZeroValue { field });
            }
        }
        if desired_in_deck > deck_size {
            return Err(SpecError::DesiredExceedsDeck {
                desired: desired_in_deck,
                deck_size,
            });
        }
        if draws > deck_size {
            return Err(SpecError::DrawsExceedDeck { draws, deck_size });
        }
        if success_threshold > draws {
            return Err(SpecError::ThresholdExceedsDraws {
                threshold: success_threshold,
                draws,
            });
        }

        Ok(DrawSpec {
            deck_size,
            desired_in_deck,
            draws,
            success_threshold,
        })
    }

    pub fn deck_size(&self) -> u32 {
        self.deck_size
    }

    pub fn desired_in_deck(&self) -> u32 {
        self.desired_in_deck
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn success_threshold(&self) -> u32 {
        self.success_threshold
    }

    /// Largest number of successes a draw can actually contain
    pub fn max_successes(&self) -> u32 {
        self.desired_in_deck.min(self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spec() {
        let spec = DrawSpec::new(60, 24, 7, 2).expect("spec should be valid");
        assert_eq!(spec.deck_size(), 60);
        assert_eq!(spec.desired_in_deck(), 24);
        assert_eq!(spec.draws(), 7);
        assert_eq!(spec.success_threshold(), 2);
        assert_eq!(spec.max_successes(), 7);
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(matches!(
            DrawSpec::new(0, 1, 1, 1),
            Err(SpecError::ZeroValue { .. })
        ));
        assert!(matches!(
            DrawSpec::new(60, 0, 7, 1),
            Err(SpecError::ZeroValue { .. })
        ));
        assert!(matches!(
            DrawSpec::new(60, 10, 0, 1),
            Err(SpecError::ZeroValue { .. })
        ));
        assert!(matches!(
            DrawSpec::new(60, 10, 7, 0),
            Err(SpecError::ZeroValue { .. })
        ));
    }

    #[test]
    fn test_bounds_rejected() {
        assert_eq!(
            DrawSpec::new(40, 41, 7, 1),
            Err(SpecError::DesiredExceedsDeck {
                desired: 41,
                deck_size: 40
            })
        );
        assert_eq!(
            DrawSpec::new(10, 4, 11, 1),
            Err(SpecError::DrawsExceedDeck {
                draws: 11,
                deck_size: 10
            })
        );
        assert_eq!(
            DrawSpec::new(60, 24, 7, 8),
            Err(SpecError::ThresholdExceedsDraws {
                threshold: 8,
                draws: 7
            })
        );
    }

    #[test]
    fn test_threshold_above_desired_is_allowed() {
        let spec = DrawSpec::new(60, 3, 10, 4).expect("threshold only bounded by draws");
        assert_eq!(spec.max_successes(), 3);
    }

    #[test]
    fn test_error_messages() {
        let err = DrawSpec::new(60, 0, 7, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Number of desired cards in deck has to be a positive integer"
        );
    }
}
