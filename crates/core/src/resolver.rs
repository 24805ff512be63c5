//! Match resolver - turns one line selection into a fully settled board
//!
//! A turn runs in three phases:
//!
//! 1. **Candidate selection**: every run on the selected line (any length) is
//!    tested against the order book. Runs containing the cursor are tried
//!    first, then the rest in line order. The first exact hit wins.
//! 2. **Player clear**: the fulfilled demand is removed, the chosen run is
//!    cleared, gravity refills the board, and one new demand is added if
//!    the book has room.
//! 3. **Cascades**: while the board has runs of `cascade_min_run` or more,
//!    all of them are cleared together and gravity runs once per round.
//!
//! The whole sequence is computed eagerly; presentation replays it later.

use log::{debug, error};

use crate::config::{EngineConfig, MIN_CASCADE_RUN};
use crate::grid::Grid;
use crate::orders::OrderBook;
use crate::rng::RandomSource;
use crate::types::{CascadeRound, Demand, Ingredient, MatchResult, Position, Run};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResolver {
    cascade_min_run: usize,
    max_cascade_rounds: u32,
}

impl MatchResolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cascade_min_run: config.cascade_min_run.max(MIN_CASCADE_RUN),
            max_cascade_rounds: config.max_cascade_rounds.max(1),
        }
    }

    pub fn cascade_min_run(&self) -> usize {
        self.cascade_min_run
    }

    pub fn max_cascade_rounds(&self) -> u32 {
        self.max_cascade_rounds
    }

    /// Runs on `line` in the order they are tried against the order book
    ///
    /// Runs containing `cursor` come first; a cursor off the line gives no
    /// preference.
    pub fn candidate_runs(&self, grid: &Grid, line: &[Position], cursor: Position) -> Vec<Run> {
        let (mut ordered, rest): (Vec<Run>, Vec<Run>) = grid
            .scan_line(line, 1)
            .into_iter()
            .partition(|run| run.contains(cursor));
        ordered.extend(rest);
        ordered
    }

    /// The run to clear and the demand it fulfils, without touching anything
    pub fn choose_match(
        &self,
        grid: &Grid,
        orders: &OrderBook,
        line: &[Position],
        cursor: Position,
    ) -> Option<(Run, Demand)> {
        self.candidate_runs(grid, line, cursor)
            .into_iter()
            .find_map(|run| orders.fulfill(&run).map(|demand| (run, demand)))
    }

    /// Resolve a player selection
    ///
    /// Returns `None` (and changes nothing) when no run on the line fulfils
    /// a demand.
    pub fn resolve<R: RandomSource>(
        &self,
        grid: &mut Grid,
        orders: &mut OrderBook,
        pool: &[Ingredient],
        line: &[Position],
        cursor: Position,
        rng: &mut R,
    ) -> Option<MatchResult> {
        let (run, demand) = self.choose_match(grid, orders, line, cursor)?;

        orders.remove_demand(&demand);
        let initial_drops = grid.clear_and_apply_gravity(std::slice::from_ref(&run), pool, rng);
        if let Some(added) = orders.replenish(pool, rng) {
            debug!("order book replenished with {:?} x{}", added.ingredient, added.quantity);
        }

        let cascades = self.resolve_cascades(grid, pool, rng);
        debug!(
            "matched {:?} x{} at {}; {} cascade round(s)",
            run.ingredient,
            run.len(),
            run.positions.first().copied().unwrap_or(cursor),
            cascades.len()
        );

        Some(MatchResult {
            cleared: run.positions,
            ingredient: run.ingredient,
            fulfilled: demand,
            initial_drops,
            cascades,
        })
    }

    /// Clear board-wide runs until the board is stable
    ///
    /// Stops after `max_cascade_rounds` rounds. Reaching that cap means
    /// gravity kept rebuilding runs forever: debug builds panic, release
    /// builds log and return what was resolved so far.
    pub fn resolve_cascades<R: RandomSource>(
        &self,
        grid: &mut Grid,
        pool: &[Ingredient],
        rng: &mut R,
    ) -> Vec<CascadeRound> {
        let mut rounds = Vec::new();
        loop {
            let runs = grid.find_all_matches(self.cascade_min_run);
            if runs.is_empty() {
                break;
            }
            if rounds.len() as u32 >= self.max_cascade_rounds {
                error!(
                    "cascade limit of {} rounds reached with {} run(s) still on the board",
                    self.max_cascade_rounds,
                    runs.len()
                );
                debug_assert!(false, "cascade limit reached: board never settled");
                break;
            }

            let drops = grid.clear_and_apply_gravity(&runs, pool, rng);
            debug!(
                "cascade round {}: {} run(s), {} drop(s)",
                rounds.len() + 1,
                runs.len(),
                drops.len()
            );
            rounds.push(CascadeRound { runs, drops });
        }
        rounds
    }
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
