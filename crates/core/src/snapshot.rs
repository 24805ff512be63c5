use serde::{Deserialize, Serialize};

use crate::types::{Cell, Demand, Ingredient, Orientation, Position, DEFAULT_GRID_SIZE};

/// Everything needed to redraw or resume a session
///
/// Produced by `GameState::snapshot`/`snapshot_into`, consumed by
/// `GameState::restore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid_size: usize,
    /// Rows top to bottom
    pub cells: Vec<Vec<Cell>>,
    /// Preview queue per column, next to fall first
    pub queues: Vec<Vec<Ingredient>>,
    pub demands: Vec<Demand>,
    pub pool: Vec<Ingredient>,
    pub cursor: Position,
    pub orientation: Orientation,
    pub level: u32,
    pub stars: u32,
    pub coins: u32,
    pub last_stars_earned: u32,
    pub episode_id: u32,
    pub turn_id: u32,
    pub state_version: u64,
    pub started: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid_size = DEFAULT_GRID_SIZE;
        self.cells.clear();
        self.queues.clear();
        self.demands.clear();
        self.pool.clear();
        self.cursor = Position::new(0, 0);
        self.orientation = Orientation::Horizontal;
        self.level = 0;
        self.stars = 0;
        self.coins = 0;
        self.last_stars_earned = 0;
        self.episode_id = 0;
        self.turn_id = 0;
        self.state_version = 0;
        self.started = false;
    }

    /// Head of every column's preview queue
    pub fn preview_heads(&self) -> Vec<Option<Ingredient>> {
        self.queues.iter().map(|q| q.first().copied()).collect()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.pool.is_empty()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid_size: DEFAULT_GRID_SIZE,
            cells: Vec::new(),
            queues: Vec::new(),
            demands: Vec::new(),
            pool: Vec::new(),
            cursor: Position::new(0, 0),
            orientation: Orientation::Horizontal,
            level: 0,
            stars: 0,
            coins: 0,
            last_stars_earned: 0,
            episode_id: 0,
            turn_id: 0,
            state_version: 0,
            started: false,
        };
        s.clear();
        s
    }
}
