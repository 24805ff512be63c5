//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules of the tile-matching engine: the grid
//! and its preview queues, the order book, turn resolution with cascades,
//! and the session state that ties them together.
//! The gameplay modules have **zero dependencies** on rendering, input
//! devices, or I/O; only [`config`] reads the process environment. That makes
//! the engine:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every random draw goes through an injectable source
//! - **Portable**: Embeds in any presentation layer (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: square board, line scanning, gravity refill from preview queues
//! - [`orders`]: bounded list of demands and exact-length matching
//! - [`resolver`]: one player selection to a fully settled board
//! - [`game_state`]: session lifecycle, cursor, counters and action surface
//! - [`catalog`] / [`progression`]: ingredient table and level unlocks
//! - [`scoring`]: stars earned per turn
//! - [`config`]: engine parameters and environment overrides
//! - [`rng`]: seedable random sources
//! - [`snapshot`]: serializable session state
//!
//! # Game Rules
//!
//! - The player selects a whole row or column. Every run of equal
//!   ingredients on that line is tried against the order book, runs under
//!   the cursor first; a run must match a demand's quantity exactly.
//! - The matched run is cleared, columns settle, and the gaps are refilled
//!   from each column's preview queue.
//! - Any run of four or more anywhere on the board then clears
//!   automatically, one round at a time, until the board is stable.
//! - Each run cleared by a cascade awards one star.
//!
//! # Example
//!
//! ```
//! use ramen_rush_core::{EngineConfig, GameState};
//! use ramen_rush_types::GameAction;
//!
//! // Create and start a session
//! let mut game = GameState::new(EngineConfig::default());
//! game.start();
//! assert_eq!(game.level(), 1);
//! assert_eq!(game.demands().len(), 4);
//!
//! // Move the cursor and try the line under it
//! game.apply_action(GameAction::MoveRight);
//! assert_eq!(game.cursor().column, 1);
//! assert!(game.apply_action(GameAction::Select));
//! ```

pub mod catalog;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod orders;
pub mod progression;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use ramen_rush_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use game_state::GameState;
pub use grid::Grid;
pub use orders::OrderBook;
pub use resolver::MatchResolver;
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
