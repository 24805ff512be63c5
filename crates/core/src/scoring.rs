//! Scoring module - star rewards for a resolved turn
//!
//! Stars come from cascades only: one star per run in every cascade round.
//! Fulfilling an order is its own reward and earns no star.

use std::collections::HashSet;

use crate::types::{CascadeRound, MatchResult, Position};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub stars: u32,
    /// Cascade rounds that ran after the player's clear.
    pub rounds: u32,
    /// Runs cleared across all cascade rounds.
    pub runs: u32,
    /// Distinct cells emptied, the player's run included.
    pub tiles_cleared: u32,
}

/// Stars earned by a sequence of cascade rounds
pub fn cascade_stars(rounds: &[CascadeRound]) -> u32 {
    rounds.iter().map(CascadeRound::stars).sum()
}

/// Cells emptied by one round; crossing runs share a cell and count it once
fn round_tiles(round: &CascadeRound) -> u32 {
    let unique: HashSet<Position> = round
        .runs
        .iter()
        .flat_map(|run| run.positions.iter().copied())
        .collect();
    unique.len() as u32
}

pub fn calculate_score(result: &MatchResult) -> ScoreResult {
    let runs = result.cascades.iter().map(|r| r.runs.len() as u32).sum();
    let cascade_tiles: u32 = result.cascades.iter().map(round_tiles).sum();

    ScoreResult {
        stars: cascade_stars(&result.cascades),
        rounds: result.cascades.len() as u32,
        runs,
        tiles_cleared: result.cleared.len() as u32 + cascade_tiles,
    }
}
