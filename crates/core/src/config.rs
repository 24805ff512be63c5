//! Engine configuration
//!
//! All engine parameters live in [`EngineConfig`]. Defaults reproduce the
//! shipped 4x4 game; environment variables can override any of them:
//!
//! - `RAMEN_RUSH_GRID_SIZE`: grid edge length (default: 4)
//! - `RAMEN_RUSH_QUEUE_SIZE`: preview queue length per column (default: 4)
//! - `RAMEN_RUSH_ORDER_CAPACITY`: active demand slots (default: 4)
//! - `RAMEN_RUSH_MIN_RUN`: run length that cascades (default: 4)
//! - `RAMEN_RUSH_MAX_CASCADES`: cascade rounds allowed per turn (default: 64)
//! - `RAMEN_RUSH_SEED`: random source seed (default: 1)

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    CASCADE_MIN_RUN, DEFAULT_GRID_SIZE, DEFAULT_MAX_CASCADE_ROUNDS, DEFAULT_QUEUE_SIZE,
    DEFAULT_SEED, MAX_DEMANDS, MAX_GRID_SIZE, MAX_QUEUE_SIZE,
};

pub const ENV_GRID_SIZE: &str = "RAMEN_RUSH_GRID_SIZE";
pub const ENV_QUEUE_SIZE: &str = "RAMEN_RUSH_QUEUE_SIZE";
pub const ENV_ORDER_CAPACITY: &str = "RAMEN_RUSH_ORDER_CAPACITY";
pub const ENV_MIN_RUN: &str = "RAMEN_RUSH_MIN_RUN";
pub const ENV_MAX_CASCADES: &str = "RAMEN_RUSH_MAX_CASCADES";
pub const ENV_SEED: &str = "RAMEN_RUSH_SEED";

/// Shortest run that may cascade. A run of one would match every filled cell.
pub const MIN_CASCADE_RUN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside 1..={max}", max = MAX_GRID_SIZE)]
    InvalidGridSize(usize),
    #[error("preview queue size {0} exceeds {max}", max = MAX_QUEUE_SIZE)]
    InvalidQueueSize(usize),
    #[error("order capacity {0} is outside 1..={max}", max = MAX_DEMANDS)]
    InvalidOrderCapacity(usize),
    #[error("minimum cascade run length {0} is below {min}", min = MIN_CASCADE_RUN)]
    InvalidMinRunLength(usize),
    #[error("cascade round limit must be at least 1")]
    InvalidCascadeLimit,
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub queue_size: usize,
    pub order_capacity: usize,
    pub cascade_min_run: usize,
    pub max_cascade_rounds: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            queue_size: DEFAULT_QUEUE_SIZE,
            order_capacity: MAX_DEMANDS,
            cascade_min_run: CASCADE_MIN_RUN,
            max_cascade_rounds: DEFAULT_MAX_CASCADE_ROUNDS,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `RAMEN_RUSH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            grid_size: parse_key(&lookup, ENV_GRID_SIZE, defaults.grid_size)?,
            queue_size: parse_key(&lookup, ENV_QUEUE_SIZE, defaults.queue_size)?,
            order_capacity: parse_key(&lookup, ENV_ORDER_CAPACITY, defaults.order_capacity)?,
            cascade_min_run: parse_key(&lookup, ENV_MIN_RUN, defaults.cascade_min_run)?,
            max_cascade_rounds: parse_key(&lookup, ENV_MAX_CASCADES, defaults.max_cascade_rounds)?,
            seed: parse_key(&lookup, ENV_SEED, defaults.seed)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if self.queue_size > MAX_QUEUE_SIZE {
            return Err(ConfigError::InvalidQueueSize(self.queue_size));
        }
        if self.order_capacity == 0 || self.order_capacity > MAX_DEMANDS {
            return Err(ConfigError::InvalidOrderCapacity(self.order_capacity));
        }
        if self.cascade_min_run < MIN_CASCADE_RUN {
            return Err(ConfigError::InvalidMinRunLength(self.cascade_min_run));
        }
        if self.max_cascade_rounds == 0 {
            return Err(ConfigError::InvalidCascadeLimit);
        }
        Ok(())
    }

    /// Copy with every field forced into its valid range.
    pub fn clamped(&self) -> Self {
        Self {
            grid_size: self.grid_size.clamp(1, MAX_GRID_SIZE),
            queue_size: self.queue_size.min(MAX_QUEUE_SIZE),
            order_capacity: self.order_capacity.clamp(1, MAX_DEMANDS),
            cascade_min_run: self.cascade_min_run.max(MIN_CASCADE_RUN),
            max_cascade_rounds: self.max_cascade_rounds.max(1),
            seed: self.seed,
        }
    }
}

fn parse_key<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
    }
}
