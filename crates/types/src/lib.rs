//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond small helpers, so they can be
//! handed to any collaborator (rendering, input mapping, persistence) unchanged.
//! Every type derives `serde` traits so a persistence layer can store it as-is.
//!
//! # Grid Coordinates
//!
//! - **Rows** grow downward: row 0 is the top of the grid.
//! - **Columns** grow to the right: column 0 is the leftmost column.
//! - Gravity pulls ingredients toward higher rows. New ingredients enter from
//!   above the grid, so a drop's source row can be negative.
//!
//! # Engine Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 4 | Rows and columns of the square grid |
//! | `DEFAULT_QUEUE_SIZE` | 4 | Preview queue length per column |
//! | `MAX_DEMANDS` | 4 | Order book capacity |
//! | `CASCADE_MIN_RUN` | 4 | Run length that triggers an automatic clear |
//! | `DEFAULT_MAX_CASCADE_ROUNDS` | 64 | Safety cap on cascade rounds per turn |
//!
//! # Examples
//!
//! ```
//! use ramen_rush_types::{Demand, GameAction, Ingredient, Position, Run};
//!
//! // Parse ingredient names (case-insensitive)
//! let kind = Ingredient::from_str("softboiledegg").unwrap();
//! assert_eq!(kind, Ingredient::SoftBoiledEgg);
//! assert_eq!(kind.as_str(), "softBoiledEgg");
//!
//! // Demands match runs of exactly the same length
//! let demand = Demand::new(Ingredient::Ramen, 2);
//! let run = Run::new(vec![Position::new(0, 0), Position::new(0, 1)], Ingredient::Ramen);
//! assert!(demand.matches(&run));
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("select"), Some(GameAction::Select));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default grid edge length (4x4)
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Largest supported grid edge length
pub const MAX_GRID_SIZE: usize = 16;

/// Default number of upcoming ingredients held per column
pub const DEFAULT_QUEUE_SIZE: usize = 4;

/// Largest supported preview queue length
pub const MAX_QUEUE_SIZE: usize = 16;

/// Maximum number of active demands in the order book
pub const MAX_DEMANDS: usize = 4;

/// Minimum run length that clears automatically during a cascade
pub const CASCADE_MIN_RUN: usize = 4;

/// Smallest quantity a demand can ask for
pub const MIN_DEMAND_QUANTITY: u8 = 1;

/// Largest quantity a demand can ask for
pub const MAX_DEMAND_QUANTITY: u8 = 3;

/// Level a fresh session starts on
pub const STARTING_LEVEL: u32 = 1;

/// Cascade rounds allowed per turn before the resolver gives up
pub const DEFAULT_MAX_CASCADE_ROUNDS: u32 = 64;

/// Default seed for the session random source
pub const DEFAULT_SEED: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults() {
        assert_eq!(DEFAULT_GRID_SIZE, 4);
        assert_eq!(DEFAULT_QUEUE_SIZE, 4);
        assert_eq!(MAX_DEMANDS, 4);
        assert_eq!(CASCADE_MIN_RUN, 4);
        assert_eq!((MIN_DEMAND_QUANTITY, MAX_DEMAND_QUANTITY), (1, 3));
        assert_eq!(STARTING_LEVEL, 1);
    }

    #[test]
    fn demand_quantity_is_clamped() {
        assert_eq!(Demand::new(Ingredient::Tofu, 0).quantity, 1);
        assert_eq!(Demand::new(Ingredient::Tofu, 2).quantity, 2);
        assert_eq!(Demand::new(Ingredient::Tofu, 9).quantity, 3);
    }

    #[test]
    fn demand_requires_exact_length() {
        let demand = Demand::new(Ingredient::Ramen, 2);
        let two = Run::new(
            vec![Position::new(0, 0), Position::new(0, 1)],
            Ingredient::Ramen,
        );
        let three = Run::new(
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
            Ingredient::Ramen,
        );
        let other = Run::new(
            vec![Position::new(2, 0), Position::new(2, 1)],
            Ingredient::Nori,
        );

        assert!(demand.matches(&two));
        assert!(!demand.matches(&three));
        assert!(!demand.matches(&other));
    }

    #[test]
    fn adjacent_wraps_at_coordinate_limits() {
        let inner = Position::new(1, 1);
        assert_eq!(
            inner.adjacent(),
            [
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );

        let low = Position::new(i8::MIN, i8::MIN).adjacent();
        assert_eq!(low[0], Position::new(i8::MAX, i8::MIN));
        assert_eq!(low[2], Position::new(i8::MIN, i8::MAX));
        let high = Position::new(i8::MAX, i8::MAX).adjacent();
        assert_eq!(high[1], Position::new(i8::MIN, i8::MAX));
        assert!(!high[3].is_valid(4));
    }

    #[test]
    fn drop_distance_and_preview_flag() {
        let from_preview = IngredientDrop {
            ingredient: Ingredient::Ramen,
            from: Position::new(-1, 0),
            to: Position::new(0, 0),
        };
        assert_eq!(from_preview.distance(), 1);
        assert!(from_preview.is_from_preview());

        let inside = IngredientDrop {
            ingredient: Ingredient::Chashu,
            from: Position::new(1, 0),
            to: Position::new(3, 0),
        };
        assert_eq!(inside.distance(), 2);
        assert!(!inside.is_from_preview());
    }

    #[test]
    fn position_lines_stay_on_grid() {
        let start = Position::new(1, 0);
        assert_eq!(start.horizontal_line(4, 4).len(), 4);
        assert!(Position::new(1, 1).horizontal_line(4, 4).is_empty());
        assert_eq!(
            Position::new(0, 2).vertical_line(4, 4),
            vec![
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 2)
            ]
        );
        assert!(Position::new(2, 0).vertical_line(4, 4).is_empty());
    }

    #[test]
    fn ingredient_names_round_trip() {
        for kind in Ingredient::ALL {
            assert_eq!(Ingredient::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(Ingredient::from_str("RICENOODLES"), Some(Ingredient::RiceNoodles));
        assert_eq!(Ingredient::from_str("pizza"), None);
    }
}

/// A cell coordinate on the grid
///
/// Coordinates are signed so drops can describe ingredients that start
/// above the grid (negative rows). A position is only addressable when
/// [`Position::is_valid`] holds for the grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    /// Check if the position lies inside a `size x size` grid
    pub fn is_valid(&self, size: usize) -> bool {
        self.row >= 0
            && self.column >= 0
            && (self.row as usize) < size
            && (self.column as usize) < size
    }

    /// Neighbours in up, down, left, right order (may be off-grid)
    ///
    /// Coordinates wrap at the `i8` limits.
    pub fn adjacent(&self) -> [Position; 4] {
        [
            Position::new(self.row.wrapping_sub(1), self.column),
            Position::new(self.row.wrapping_add(1), self.column),
            Position::new(self.row, self.column.wrapping_sub(1)),
            Position::new(self.row, self.column.wrapping_add(1)),
        ]
    }

    /// `length` positions going right from this one
    ///
    /// Returns an empty vector if the line would leave the grid.
    pub fn horizontal_line(&self, length: usize, size: usize) -> Vec<Position> {
        if !self.is_valid(size) || self.column as usize + length > size {
            return Vec::new();
        }
        (0..length)
            .map(|i| Position::new(self.row, self.column + i as i8))
            .collect()
    }

    /// `length` positions going down from this one
    ///
    /// Returns an empty vector if the line would leave the grid.
    pub fn vertical_line(&self, length: usize, size: usize) -> Vec<Position> {
        if !self.is_valid(size) || self.row as usize + length > size {
            return Vec::new();
        }
        (0..length)
            .map(|i| Position::new(self.row + i as i8, self.column))
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Ingredient families used for grouping in menus and unlock screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Noodles,
    Proteins,
    Vegetables,
    Bowls,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Noodles,
        Category::Proteins,
        Category::Vegetables,
        Category::Bowls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Noodles => "noodles",
            Category::Proteins => "proteins",
            Category::Vegetables => "vegetables",
            Category::Bowls => "bowls",
        }
    }
}

/// The sixteen ingredient kinds a cell can hold
///
/// Declaration order is catalog order; unlock order lives in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ingredient {
    // Noodles
    Ramen,
    Udon,
    Soba,
    RiceNoodles,
    // Proteins
    Chashu,
    SoftBoiledEgg,
    Tofu,
    TempuraShrimp,
    // Vegetables
    GreenOnions,
    Nori,
    BambooShoots,
    BokChoy,
    // Bowls
    RamenBowl,
    DonburiBowl,
    BentoBox,
    SushiPlate,
}

impl Ingredient {
    pub const ALL: [Ingredient; 16] = [
        Ingredient::Ramen,
        Ingredient::Udon,
        Ingredient::Soba,
        Ingredient::RiceNoodles,
        Ingredient::Chashu,
        Ingredient::SoftBoiledEgg,
        Ingredient::Tofu,
        Ingredient::TempuraShrimp,
        Ingredient::GreenOnions,
        Ingredient::Nori,
        Ingredient::BambooShoots,
        Ingredient::BokChoy,
        Ingredient::RamenBowl,
        Ingredient::DonburiBowl,
        Ingredient::BentoBox,
        Ingredient::SushiPlate,
    ];

    /// Parse ingredient from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ramen_rush_types::Ingredient;
    ///
    /// assert_eq!(Ingredient::from_str("ramen"), Some(Ingredient::Ramen));
    /// assert_eq!(Ingredient::from_str("BokChoy"), Some(Ingredient::BokChoy));
    /// assert_eq!(Ingredient::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == lower)
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Ramen => "ramen",
            Ingredient::Udon => "udon",
            Ingredient::Soba => "soba",
            Ingredient::RiceNoodles => "riceNoodles",
            Ingredient::Chashu => "chashu",
            Ingredient::SoftBoiledEgg => "softBoiledEgg",
            Ingredient::Tofu => "tofu",
            Ingredient::TempuraShrimp => "tempuraShrimp",
            Ingredient::GreenOnions => "greenOnions",
            Ingredient::Nori => "nori",
            Ingredient::BambooShoots => "bambooShoots",
            Ingredient::BokChoy => "bokChoy",
            Ingredient::RamenBowl => "ramenBowl",
            Ingredient::DonburiBowl => "donburiBowl",
            Ingredient::BentoBox => "bentoBox",
            Ingredient::SushiPlate => "sushiPlate",
        }
    }
}

/// A single grid cell
///
/// - `ingredient: None` is an empty cell
/// - `selected` marks cells in the player's current line selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub ingredient: Option<Ingredient>,
    pub selected: bool,
}

impl Cell {
    pub fn filled(ingredient: Ingredient) -> Self {
        Self {
            ingredient: Some(ingredient),
            selected: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredient.is_none()
    }

    /// Empty the cell and drop its selection
    pub fn clear(&mut self) {
        self.ingredient = None;
        self.selected = false;
    }
}

/// An order card: one ingredient kind and an exact quantity (1-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Demand {
    pub ingredient: Ingredient,
    pub quantity: u8,
}

impl Demand {
    /// Create a demand, clamping the quantity into `1..=3`
    pub fn new(ingredient: Ingredient, quantity: u8) -> Self {
        Self {
            ingredient,
            quantity: quantity.clamp(MIN_DEMAND_QUANTITY, MAX_DEMAND_QUANTITY),
        }
    }

    /// True if the run has this ingredient and exactly this length
    pub fn matches(&self, run: &Run) -> bool {
        run.ingredient == self.ingredient && run.len() == self.quantity as usize
    }
}

/// A maximal contiguous same-ingredient sequence along one line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub positions: Vec<Position>,
    pub ingredient: Ingredient,
}

impl Run {
    pub fn new(positions: Vec<Position>, ingredient: Ingredient) -> Self {
        Self {
            positions,
            ingredient,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

/// One ingredient's vertical move during gravity resolution
///
/// `from.row` is negative for ingredients entering from the preview queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientDrop {
    pub ingredient: Ingredient,
    pub from: Position,
    pub to: Position,
}

impl IngredientDrop {
    /// Rows travelled (never negative)
    pub fn distance(&self) -> u8 {
        (self.to.row as i16 - self.from.row as i16).max(0) as u8
    }

    /// True if the ingredient came from above the grid
    pub fn is_from_preview(&self) -> bool {
        self.from.row < 0
    }
}

/// One pass of automatic clears: every run found together, then one gravity step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CascadeRound {
    pub runs: Vec<Run>,
    pub drops: Vec<IngredientDrop>,
}

impl CascadeRound {
    /// Stars awarded for this round (one per run)
    pub fn stars(&self) -> u32 {
        self.runs.len() as u32
    }
}

/// Everything that happened during one successful player action
///
/// The presentation layer replays this at its own pace: first the cleared
/// positions and `initial_drops`, then each cascade round in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub cleared: Vec<Position>,
    pub ingredient: Ingredient,
    pub fulfilled: Demand,
    pub initial_drops: Vec<IngredientDrop>,
    pub cascades: Vec<CascadeRound>,
}

impl MatchResult {
    /// Stars earned across all cascade rounds (the player's own match earns none)
    pub fn total_stars(&self) -> u32 {
        self.cascades.iter().map(CascadeRound::stars).sum()
    }
}

/// Cursor orientation: which line a selection covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Whole row through the cursor
    #[default]
    Horizontal,
    /// Whole column through the cursor
    Vertical,
}

impl Orientation {
    pub fn toggle(&self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Cursor movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Commands the presentation layer can send to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move cursor one row up
    MoveUp,
    /// Move cursor one row down
    MoveDown,
    /// Move cursor one column left
    MoveLeft,
    /// Move cursor one column right
    MoveRight,
    /// Switch between row and column selection
    Rotate,
    /// Select the cursor line and resolve it
    Select,
    /// Drop the current selection highlight
    ClearSelection,
    /// Move on to the next level
    AdvanceLevel,
    /// Restart the session at level 1
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ramen_rush_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "select" => Some(GameAction::Select),
            "clearselection" => Some(GameAction::ClearSelection),
            "advancelevel" => Some(GameAction::AdvanceLevel),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::Select => "select",
            GameAction::ClearSelection => "clearSelection",
            GameAction::AdvanceLevel => "advanceLevel",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side event emitted after each line selection.
///
/// Observers poll it with `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn_id: u32,
    pub matched: bool,
    pub fulfilled: Option<Demand>,
    pub tiles_cleared: u32,
    pub cascade_rounds: u32,
    pub stars_earned: u32,
}
