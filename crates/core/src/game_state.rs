//! Game state module - one player session
//!
//! Ties together the grid, the order book, the resolver and the random
//! source, and owns the player-facing counters (level, stars) plus the
//! cursor used by the action surface.
//!
//! Every mutation bumps [`GameState::state_version`], so a presentation
//! layer can poll it instead of being wired into the engine.

use log::{debug, warn};

use crate::config::EngineConfig;
use crate::grid::Grid;
use crate::orders::OrderBook;
use crate::progression;
use crate::resolver::MatchResolver;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::calculate_score;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete session state
///
/// Generic over the random source so tests can script every draw; the
/// default is the seeded [`SimpleRng`].
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: EngineConfig,
    grid: Grid,
    orders: OrderBook,
    resolver: MatchResolver,
    rng: R,
    /// Copy of the source as handed in; restart replays from here.
    initial_rng: R,
    pool: Vec<Ingredient>,
    cursor: Position,
    orientation: Orientation,
    level: u32,
    stars: u32,
    /// Kept for persistence layers; nothing awards coins.
    coins: u32,
    last_stars_earned: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for line selections (hits and misses).
    turn_id: u32,
    state_version: u64,
    /// Last turn outcome (consumed by observers).
    last_event: Option<TurnEvent>,
    started: bool,
}

impl GameState<SimpleRng> {
    /// Create a session seeded from `config.seed`
    ///
    /// Out-of-range config values are clamped.
    pub fn new(config: EngineConfig) -> Self {
        let config = config.clamped();
        Self::with_rng(config, SimpleRng::new(config.seed))
    }

    /// Seed of the session's random source
    pub fn seed(&self) -> u32 {
        self.initial_rng.state()
    }
}

impl<R: RandomSource + Clone> GameState<R> {
    /// Create a session drawing from `rng`
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let config = config.clamped();
        Self {
            config,
            grid: Grid::new(config.grid_size),
            orders: OrderBook::new(config.order_capacity),
            resolver: MatchResolver::new(&config),
            initial_rng: rng.clone(),
            rng,
            pool: Vec::new(),
            cursor: Position::new(0, 0),
            orientation: Orientation::default(),
            level: STARTING_LEVEL,
            stars: 0,
            coins: 0,
            last_stars_earned: 0,
            episode_id: 0,
            turn_id: 0,
            state_version: 0,
            last_event: None,
            started: false,
        }
    }

    /// Initialize the session at level 1
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.start_level(STARTING_LEVEL);
    }

    /// Reset demands, grid fill and preview queues for `level`
    ///
    /// Stars carry over; the cursor returns to the top-left corner.
    pub fn start_level(&mut self, level: u32) {
        self.started = true;
        self.level = level;
        self.pool = progression::session_pool(level);
        if self.pool.is_empty() {
            warn!("level {} has an empty ingredient pool; board left empty", level);
        }

        self.grid.reset();
        self.orders.clear();
        self.orders
            .generate_demands(&self.pool, self.config.order_capacity, &mut self.rng);
        self.grid.fill_all(&self.pool, &mut self.rng);
        self.grid
            .initialize_preview_queues(&self.pool, self.config.queue_size, &mut self.rng);

        self.cursor = Position::new(0, 0);
        self.orientation = Orientation::default();
        self.last_stars_earned = 0;
        self.last_event = None;
        self.bump_version();

        debug!(
            "level {} started: pool of {}, {} demand(s)",
            level,
            self.pool.len(),
            self.orders.len()
        );
    }

    pub fn advance_level(&mut self) {
        self.start_level(self.level.saturating_add(1));
    }

    /// Start over at level 1, replaying the initial random source
    pub fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let next_version = self.state_version;
        *self = Self::with_rng(self.config, self.initial_rng.clone());
        self.episode_id = next_episode;
        self.state_version = next_version;
        self.start();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        self.bump_version();
        &mut self.grid
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut OrderBook {
        self.bump_version();
        &mut self.orders
    }

    pub fn demands(&self) -> &[Demand] {
        self.orders.demands()
    }

    pub fn pool(&self) -> &[Ingredient] {
        &self.pool
    }

    pub fn resolver(&self) -> &MatchResolver {
        &self.resolver
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn previews(&self) -> Vec<Option<Ingredient>> {
        self.grid.previews()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Stars earned by the most recent successful selection
    pub fn last_stars_earned(&self) -> u32 {
        self.last_stars_earned
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn turn_id(&self) -> u32 {
        self.turn_id
    }

    pub fn state_version(&self) -> u64 {
        self.state_version
    }

    pub fn started(&self) -> bool {
        self.started
    }

    fn bump_version(&mut self) {
        self.state_version = self.state_version.wrapping_add(1);
    }

    /// Resolve a player selection of `line`, with `cursor` as tie-break hint
    ///
    /// On a hit the selection is dropped and stars are added. On a miss the
    /// line stays selected until [`GameState::clear_selection`].
    pub fn select_line(&mut self, line: &[Position], cursor: Position) -> Option<MatchResult> {
        self.grid.deselect_all();
        for &pos in line {
            self.grid.select(pos);
        }
        self.turn_id = self.turn_id.wrapping_add(1);

        let result = self.resolver.resolve(
            &mut self.grid,
            &mut self.orders,
            &self.pool,
            line,
            cursor,
            &mut self.rng,
        );

        match &result {
            Some(matched) => {
                self.grid.deselect_all();
                let score = calculate_score(matched);
                self.stars = self.stars.saturating_add(score.stars);
                self.last_stars_earned = score.stars;
                self.last_event = Some(TurnEvent {
                    turn_id: self.turn_id,
                    matched: true,
                    fulfilled: Some(matched.fulfilled),
                    tiles_cleared: score.tiles_cleared,
                    cascade_rounds: score.rounds,
                    stars_earned: score.stars,
                });
            }
            None => {
                debug!("turn {}: no run on the line fulfils a demand", self.turn_id);
                self.last_event = Some(TurnEvent {
                    turn_id: self.turn_id,
                    matched: false,
                    fulfilled: None,
                    tiles_cleared: 0,
                    cascade_rounds: 0,
                    stars_earned: 0,
                });
            }
        }

        self.bump_version();
        result
    }

    /// Select the line under the cursor
    pub fn select_cursor_line(&mut self) -> Option<MatchResult> {
        let line = self.cursor_line();
        self.select_line(&line, self.cursor)
    }

    /// Drop the selection highlight; false if nothing was selected
    pub fn clear_selection(&mut self) -> bool {
        if self.grid.selected_positions().is_empty() {
            return false;
        }
        self.grid.deselect_all();
        self.bump_version();
        true
    }

    /// Full row or column through the cursor, depending on orientation
    pub fn cursor_line(&self) -> Vec<Position> {
        match self.orientation {
            Orientation::Horizontal => self.grid.row_positions(self.cursor.row as usize),
            Orientation::Vertical => self.grid.column_positions(self.cursor.column as usize),
        }
    }

    /// Move the cursor one cell; false at the grid edge
    pub fn move_cursor(&mut self, direction: CursorDirection) -> bool {
        let (dr, dc) = match direction {
            CursorDirection::Up => (-1, 0),
            CursorDirection::Down => (1, 0),
            CursorDirection::Left => (0, -1),
            CursorDirection::Right => (0, 1),
        };
        let next = Position::new(self.cursor.row + dr, self.cursor.column + dc);
        if !next.is_valid(self.grid.size()) {
            return false;
        }
        self.cursor = next;
        self.bump_version();
        true
    }

    pub fn rotate_cursor(&mut self) {
        self.orientation = self.orientation.toggle();
        self.bump_version();
    }

    /// Take and clear the last turn event.
    pub fn take_last_event(&mut self) -> Option<TurnEvent> {
        self.last_event.take()
    }

    /// Apply a game action; returns whether it changed anything
    ///
    /// Board actions are ignored until the session has started.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !self.started && action != GameAction::Restart {
            return false;
        }
        match action {
            GameAction::MoveUp => self.move_cursor(CursorDirection::Up),
            GameAction::MoveDown => self.move_cursor(CursorDirection::Down),
            GameAction::MoveLeft => self.move_cursor(CursorDirection::Left),
            GameAction::MoveRight => self.move_cursor(CursorDirection::Right),
            GameAction::Rotate => {
                self.rotate_cursor();
                true
            }
            GameAction::Select => {
                // A miss still selects the line and records a turn
                self.select_cursor_line();
                true
            }
            GameAction::ClearSelection => self.clear_selection(),
            GameAction::AdvanceLevel => {
                self.advance_level();
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid_size = self.grid.size();
        out.cells.clear();
        out.cells
            .extend(self.grid.cells().chunks(self.grid.size()).map(|row| row.to_vec()));
        out.queues.clear();
        out.queues.extend((0..self.grid.size()).map(|c| {
            self.grid
                .queue(c)
                .map(|q| q.iter().copied().collect())
                .unwrap_or_default()
        }));
        out.demands.clear();
        out.demands.extend_from_slice(self.orders.demands());
        out.pool.clear();
        out.pool.extend_from_slice(&self.pool);
        out.cursor = self.cursor;
        out.orientation = self.orientation;
        out.level = self.level;
        out.stars = self.stars;
        out.coins = self.coins;
        out.last_stars_earned = self.last_stars_earned;
        out.episode_id = self.episode_id;
        out.turn_id = self.turn_id;
        out.state_version = self.state_version;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Rebuild a session from a snapshot
    ///
    /// The grid size comes from the snapshot; every other engine parameter
    /// comes from `config`. The random source is not part of a snapshot, so
    /// play continues from `rng`.
    pub fn restore(config: EngineConfig, snapshot: &GameSnapshot, rng: R) -> Self {
        let config = EngineConfig {
            grid_size: snapshot.grid_size,
            ..config
        };
        let mut state = Self::with_rng(config, rng);

        let size = state.grid.size();
        for (r, row) in snapshot.cells.iter().take(size).enumerate() {
            for (c, cell) in row.iter().take(size).enumerate() {
                let pos = Position::new(r as i8, c as i8);
                if let Some(kind) = cell.ingredient {
                    state.grid.set_ingredient(kind, pos);
                }
                if cell.selected {
                    state.grid.select(pos);
                }
            }
        }
        for (column, queue) in snapshot.queues.iter().enumerate() {
            state.grid.set_queue(column, queue.iter().copied());
        }
        for &demand in &snapshot.demands {
            state.orders.add_demand(demand);
        }

        state.pool = snapshot.pool.clone();
        if snapshot.cursor.is_valid(state.grid.size()) {
            state.cursor = snapshot.cursor;
        }
        state.orientation = snapshot.orientation;
        state.level = snapshot.level;
        state.stars = snapshot.stars;
        state.coins = snapshot.coins;
        state.last_stars_earned = snapshot.last_stars_earned;
        state.episode_id = snapshot.episode_id;
        state.turn_id = snapshot.turn_id;
        state.state_version = snapshot.state_version;
        state.started = snapshot.started;
        state
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
