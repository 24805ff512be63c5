//! Ramen Rush (workspace facade crate).
//!
//! Exposes the engine as `ramen_rush::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use ramen_rush_core as core;
pub use ramen_rush_types as types;
