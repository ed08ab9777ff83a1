//! Console and JSON rendering of computed results

use crate::decklist::{CurveReport, TurnSeries};
use crate::probability::DrawSpec;
use serde::Serialize;

const COLUMN_WIDTH: usize = 16;

/// Single probability computed from direct parameters
#[derive(Debug, Clone, Serialize)]
pub struct DirectResult {
    #[serde(flatten)]
    pub spec: DrawSpec,
    pub probability: f64,
}

/// Desired card count needed to reach a target probability
#[derive(Debug, Clone, Serialize)]
pub struct TargetResult {
    pub target: f64,
    pub deck_size: u32,
    pub draws: u32,
    pub success_threshold: u32,
    /// With-replacement estimate, at least one success
    pub approximate: u32,
    /// Smallest count that actually reaches the target, if any
    pub exact: Option<u32>,
}

pub fn render_direct(result: &DirectResult) -> String {
    let spec = &result.spec;
    let draws = spec.draws() as i64;
    format!(
        "Number of cards in deck: {}\n\
         Number of draws (starting player turn {}, other's turn {}): {}\n\
         Number of cards in deck which are desired: {}\n\
         Minimum number of desired cards drew to achieve success: {}\n\
         Possibility of achieving that: {:.2}%",
        spec.deck_size(),
        draws - 6,
        draws - 7,
        spec.draws(),
        spec.desired_in_deck(),
        spec.success_threshold(),
        result.probability * 100.0
    )
}

pub fn render_curve(report: &CurveReport) -> String {
    let mut out = format!("Cards in deck: {}\n\n", report.deck_size);

    out.push_str(&" ".repeat(COLUMN_WIDTH));
    for (turn, _) in report.land_streak.iter() {
        out.push_str(&format!("{:<w$}", format!("{} TURN", ordinal(turn)), w = COLUMN_WIDTH));
    }
    out.push('\n');

    for (label, series) in [
        ("LAND STREAK", &report.land_streak),
        ("CMC = TURN", &report.cost_curve),
        ("STREAK BOTH", &report.combined),
    ] {
        render_row(&mut out, label, series);
    }

    out.trim_end().to_string()
}

pub fn render_target(result: &TargetResult) -> String {
    let mut out = format!(
        "Number of cards in deck: {}\n\
         Number of draws: {}\n\
         Target probability: {:.2}%\n\
         Estimated desired cards for at least one hit: {}\n",
        result.deck_size,
        result.draws,
        result.target * 100.0,
        result.approximate
    );
    let last_line = match result.exact {
        Some(count) => format!(
            "Exact minimum for at least {} hit(s): {}",
            result.success_threshold, count
        ),
        None => format!(
            "No number of desired cards reaches {:.2}% with at least {} hit(s)",
            result.target * 100.0,
            result.success_threshold
        ),
    };
    out.push_str(&last_line);
    out
}

/// Pretty-printed JSON for any result
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn render_row(out: &mut String, label: &str, series: &TurnSeries) {
    out.push_str(&format!("{:<w$}", label, w = COLUMN_WIDTH));
    let cells: Vec<String> = series
        .iter()
        .map(|(_, probability)| format!("{:<w$.2}", probability, w = COLUMN_WIDTH))
        .collect();
    out.push_str(&cells.concat());
    out.push('\n');
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "TH",
        (1, _) => "ST",
        (2, _) => "ND",
        (3, _) => "RD",
        _ => "TH",
    };
    format!("{}{}", n, suffix)
}
