//! Ingredient catalog - static lookup table for every ingredient kind
//!
//! Entries are stored in [`Ingredient::ALL`] order so lookups are a plain
//! index. Placeholder colours are for presentation layers that have no art yet.

use crate::types::{Category, Ingredient};

/// Static facts about one ingredient kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientInfo {
    pub kind: Ingredient,
    pub category: Category,
    /// Level at which the ingredient enters the pool
    pub unlock_level: u32,
    pub display_name: &'static str,
    /// `#RRGGBB`
    pub placeholder_hex: &'static str,
}

const fn entry(
    kind: Ingredient,
    category: Category,
    unlock_level: u32,
    display_name: &'static str,
    placeholder_hex: &'static str,
) -> IngredientInfo {
    IngredientInfo {
        kind,
        category,
        unlock_level,
        display_name,
        placeholder_hex,
    }
}

pub const CATALOG: [IngredientInfo; 16] = [
    // Noodles
    entry(Ingredient::Ramen, Category::Noodles, 0, "Ramen", "#FFD93D"),
    entry(Ingredient::Udon, Category::Noodles, 3, "Udon", "#FFFEF7"),
    entry(Ingredient::Soba, Category::Noodles, 6, "Soba", "#A67C52"),
    entry(Ingredient::RiceNoodles, Category::Noodles, 9, "Rice Noodles", "#FFEFD5"),
    // Proteins
    entry(Ingredient::Chashu, Category::Proteins, 0, "Chashu Pork", "#E8B4A4"),
    entry(Ingredient::SoftBoiledEgg, Category::Proteins, 0, "Soft-Boiled Egg", "#FFB800"),
    entry(Ingredient::Tofu, Category::Proteins, 4, "Tofu", "#F5E6D3"),
    entry(Ingredient::TempuraShrimp, Category::Proteins, 7, "Tempura Shrimp", "#FF6B35"),
    // Vegetables
    entry(Ingredient::GreenOnions, Category::Vegetables, 0, "Green Onions", "#A8E6A1"),
    entry(Ingredient::Nori, Category::Vegetables, 5, "Nori", "#1A1A1A"),
    entry(Ingredient::BambooShoots, Category::Vegetables, 8, "Bamboo Shoots", "#E8DCA0"),
    entry(Ingredient::BokChoy, Category::Vegetables, 10, "Bok Choy", "#7CB342"),
    // Bowls
    entry(Ingredient::RamenBowl, Category::Bowls, 0, "Ramen Bowl", "#FFFFFF"),
    entry(Ingredient::DonburiBowl, Category::Bowls, 11, "Donburi Bowl", "#1976D2"),
    entry(Ingredient::BentoBox, Category::Bowls, 13, "Bento Box", "#8B4513"),
    entry(Ingredient::SushiPlate, Category::Bowls, 15, "Sushi Plate", "#FFFFFF"),
];

pub fn info(kind: Ingredient) -> &'static IngredientInfo {
    &CATALOG[kind as usize]
}

pub fn category(kind: Ingredient) -> Category {
    info(kind).category
}

pub fn unlock_level(kind: Ingredient) -> u32 {
    info(kind).unlock_level
}

pub fn display_name(kind: Ingredient) -> &'static str {
    info(kind).display_name
}

pub fn placeholder_hex(kind: Ingredient) -> &'static str {
    info(kind).placeholder_hex
}

pub fn is_unlocked(kind: Ingredient, level: u32) -> bool {
    unlock_level(kind) <= level
}

/// Look up an entry by its camelCase name (case-insensitive)
pub fn by_name(name: &str) -> Option<&'static IngredientInfo> {
    Ingredient::from_str(name).map(info)
}
