//! Progression module - which ingredients a level plays with

use std::collections::BTreeMap;

use crate::catalog::{self, CATALOG};
use crate::types::{Category, Ingredient, STARTING_LEVEL};

/// Pool used on the first level: four basics, one fewer than the level-0 unlocks
pub const STARTER_POOL: [Ingredient; 4] = [
    Ingredient::Ramen,
    Ingredient::Chashu,
    Ingredient::SoftBoiledEgg,
    Ingredient::GreenOnions,
];

/// All ingredients unlocked at `level`, in catalog order
pub fn unlocked_ingredients(level: u32) -> Vec<Ingredient> {
    CATALOG
        .iter()
        .filter(|e| e.unlock_level <= level)
        .map(|e| e.kind)
        .collect()
}

/// The next ingredient to unlock after `level`, if any remain
pub fn next_unlock(level: u32) -> Option<Ingredient> {
    CATALOG
        .iter()
        .filter(|e| e.unlock_level > level)
        .min_by_key(|e| e.unlock_level)
        .map(|e| e.kind)
}

/// `(current, needed)` levels toward the next unlock
pub fn progress_to_next_unlock(level: u32) -> Option<(u32, u32)> {
    next_unlock(level).map(|kind| (level, catalog::unlock_level(kind)))
}

pub fn is_unlocked(kind: Ingredient, level: u32) -> bool {
    catalog::is_unlocked(kind, level)
}

pub fn unlocked_by_category(level: u32) -> BTreeMap<Category, Vec<Ingredient>> {
    let mut grouped: BTreeMap<Category, Vec<Ingredient>> = BTreeMap::new();
    for kind in unlocked_ingredients(level) {
        grouped.entry(catalog::category(kind)).or_default().push(kind);
    }
    grouped
}

/// The ingredient pool a session draws from on `level`
pub fn session_pool(level: u32) -> Vec<Ingredient> {
    if level == STARTING_LEVEL {
        STARTER_POOL.to_vec()
    } else {
        unlocked_ingredients(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_by_key_keeps_catalog_order_on_ties() {
        // Level 0 unlocks five kinds at once; the first locked one is Udon at 3.
        assert_eq!(next_unlock(0), Some(Ingredient::Udon));
    }

    #[test]
    fn test_session_pool_levels() {
        assert_eq!(session_pool(1), STARTER_POOL.to_vec());
        assert_eq!(session_pool(0).len(), 5);
        assert!(session_pool(3).contains(&Ingredient::Udon));
        assert_eq!(session_pool(2), unlocked_ingredients(2));
    }
}
