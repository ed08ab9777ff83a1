use crate::decklist::{analyze, parse_decklist_file, DecklistError};
use crate::probability::{
    cumulative_at_least, minimum_count_exact, minimum_count_for_target_probability, DrawSpec,
    SpecError,
};
use crate::report::{self, DirectResult, TargetResult};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Missing required option {0}")]
    MissingParameter(&'static str),
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Decklist(#[from] DecklistError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mtg-prob")]
#[command(about = "Hypergeometric draw probabilities for MTG decks", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Number of cards in deck
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub cards: Option<u32>,

    /// Number of cards in deck which are desired
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub desired: Option<u32>,

    /// Number of draws
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub draws: Option<u32>,

    /// Number of desired cards drawn to achieve success
    #[arg(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub success: Option<u32>,

    /// Path to file with deck list
    #[arg(
        short = 'f',
        long,
        conflicts_with_all = ["cards", "desired", "draws", "success", "probability"]
    )]
    pub file: Option<PathBuf>,

    /// Target probability (0 to 1); prints how many desired cards the deck needs
    #[arg(short = 'p', long, conflicts_with = "desired")]
    pub probability: Option<f64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// What a single run computes
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Probability for explicit deck parameters
    Direct(DrawSpec),
    /// Per-turn statistics for a decklist file
    Decklist(PathBuf),
    /// Desired card count for a target probability
    TargetCount {
        target: f64,
        deck_size: u32,
        draws: u32,
        success_threshold: u32,
    },
}

impl Cli {
    /// Resolve the flags into exactly one request
    pub fn into_request(self) -> Result<Request, CliError> {
        if let Some(path) = self.file {
            return Ok(Request::Decklist(path));
        }

        let cards = self.cards.ok_or(CliError::MissingParameter("-c <cards>"))?;
        let draws = self.draws.ok_or(CliError::MissingParameter("-d <draws>"))?;

        if let Some(target) = self.probability {
            let request = Request::TargetCount {
                target,
                deck_size: cards,
                draws,
                success_threshold: self.success.unwrap_or(1),
            };
            return Ok(request);
        }

        let desired = self.desired.ok_or(CliError::MissingParameter("-n <desired>"))?;
        let success = self.success.ok_or(CliError::MissingParameter("-s <success>"))?;
        Ok(Request::Direct(DrawSpec::new(cards, desired, draws, success)?))
    }
}

/// Compute a request and render the output text
pub fn execute(request: &Request, json: bool) -> Result<String, CliError> {
    match request {
        Request::Direct(spec) => {
            let result = DirectResult {
                spec: *spec,
                probability: cumulative_at_least(spec),
            };
            if json {
                Ok(report::to_json(&result)?)
            } else {
                Ok(report::render_direct(&result))
            }
        }
        Request::Decklist(path) => {
            info!("Analyzing decklist {}", path.display());
            let decklist = parse_decklist_file(path)?;
            let curve = analyze(&decklist)?;
            if json {
                Ok(report::to_json(&curve)?)
            } else {
                Ok(report::render_curve(&curve))
            }
        }
        Request::TargetCount {
            target,
            deck_size,
            draws,
            success_threshold,
        } => {
            let result = TargetResult {
                target: *target,
                deck_size: *deck_size,
                draws: *draws,
                success_threshold: *success_threshold,
                approximate: minimum_count_for_target_probability(*target, *deck_size, *draws)?,
                exact: minimum_count_exact(*target, *deck_size, *draws, *success_threshold)?,
            };
            if json {
                Ok(report::to_json(&result)?)
            } else {
                Ok(report::render_target(&result))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mtg-prob").chain(args.iter().copied()))
    }

    #[test]
    fn test_direct_request() {
        let cli = parse(&["-c", "40", "-n", "10", "-d", "7", "-s", "1"]).expect("valid flags");
        let request = cli.into_request().expect("complete request");
        assert_eq!(request, Request::Direct(DrawSpec::new(40, 10, 7, 1).unwrap()));
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&["--cards", "60", "--desired", "24", "--draws", "8", "--success", "2", "--json"])
            .expect("valid flags");
        assert!(cli.json);
        assert!(matches!(cli.into_request(), Ok(Request::Direct(_))));
    }

    #[test]
    fn test_decklist_request() {
        let cli = parse(&["-f", "decks/sample.txt"]).expect("valid flags");
        assert_eq!(
            cli.into_request().expect("complete request"),
            Request::Decklist(PathBuf::from("decks/sample.txt"))
        );
    }

    #[test]
    fn test_target_request_defaults_threshold() {
        let cli = parse(&["-p", "0.9", "-c", "40", "-d", "7"]).expect("valid flags");
        match cli.into_request().expect("complete request") {
            Request::TargetCount {
                success_threshold, ..
            } => assert_eq!(success_threshold, 1),
            other => panic!("expected TargetCount, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parameter() {
        let cli = parse(&["-c", "40", "-n", "10", "-d", "7"]).expect("valid flags");
        assert!(matches!(
            cli.into_request(),
            Err(CliError::MissingParameter("-s <success>"))
        ));
    }

    #[test]
    fn test_zero_and_non_numeric_rejected() {
        assert!(parse(&["-c", "0", "-n", "1", "-d", "1", "-s", "1"]).is_err());
        assert!(parse(&["-c", "forty", "-n", "1", "-d", "1", "-s", "1"]).is_err());
        assert!(parse(&["-c", "-5", "-n", "1", "-d", "1", "-s", "1"]).is_err());
    }

    #[test]
    fn test_file_conflicts_with_direct_flags() {
        assert!(parse(&["-f", "deck.txt", "-c", "40"]).is_err());
    }

    #[test]
    fn test_no_arguments_shows_help() {
        let err = parse(&[]).expect_err("help expected");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_invalid_spec_surfaces() {
        let cli = parse(&["-c", "40", "-n", "41", "-d", "7", "-s", "1"]).expect("valid flags");
        assert!(matches!(
            cli.into_request(),
            Err(CliError::Spec(SpecError::DesiredExceedsDeck { .. }))
        ));
    }

    #[test]
    fn test_execute_direct() {
        let request = Request::Direct(DrawSpec::new(40, 10, 7, 1).unwrap());
        let text = execute(&request, false).expect("direct run succeeds");
        assert!(text.ends_with("89.08%"));
    }

    #[test]
    fn test_execute_target() {
        let request = Request::TargetCount {
            target: 0.9,
            deck_size: 40,
            draws: 7,
            success_threshold: 1,
        };
        let text = execute(&request, false).expect("target run succeeds");
        assert!(text.contains("Exact minimum for at least 1 hit(s): 11"));
    }

    #[test]
    fn test_execute_bad_target() {
        let request = Request::TargetCount {
            target: 2.0,
            deck_size: 40,
            draws: 7,
            success_threshold: 1,
        };
        assert!(matches!(
            execute(&request, false),
            Err(CliError::Spec(SpecError::InvalidProbability(_)))
        ));
    }

    #[test]
    fn test_execute_missing_file() {
        let request = Request::Decklist(PathBuf::from("decks/missing.txt"));
        assert!(matches!(
            execute(&request, false),
            Err(CliError::Decklist(DecklistError::NotFound(_)))
        ));
    }
}
