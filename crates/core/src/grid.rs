//! Grid module - board state, line scanning and gravity refill
//!
//! The grid is a square of `size x size` cells stored as a flat row-major
//! vector, plus one FIFO preview queue per column holding the ingredients
//! that will fall in next.
//! Coordinates: (row, column), row 0 is the top. Gravity pulls toward higher rows.
//!
//! Every accessor is bounds-safe: reads outside the grid return `None`,
//! writes outside the grid return `false` and change nothing.

use std::collections::VecDeque;

use log::trace;

use crate::rng::RandomSource;
use crate::types::{Cell, Ingredient, IngredientDrop, Position, Run, MAX_GRID_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + column)
    cells: Vec<Cell>,
    /// Upcoming ingredients per column, front is next to fall
    queues: Vec<VecDeque<Ingredient>>,
}

impl Grid {
    /// Create an empty grid; `size` is clamped into `1..=MAX_GRID_SIZE`
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![Cell::default(); size * size],
            queues: vec![VecDeque::new(); size],
        }
    }

    /// Build a grid from rows of ingredients (top row first)
    ///
    /// The grid is as large as the number of rows; short rows are padded with
    /// empty cells and long rows are truncated.
    pub fn from_rows(rows: &[Vec<Option<Ingredient>>]) -> Self {
        let mut grid = Self::new(rows.len());
        for (r, row) in rows.iter().enumerate().take(grid.size) {
            for (c, cell) in row.iter().enumerate().take(grid.size) {
                grid.cells[r * grid.size + c].ingredient = *cell;
            }
        }
        grid
    }

    /// Rows of ingredients, top row first
    pub fn to_rows(&self) -> Vec<Vec<Option<Ingredient>>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|cell| cell.ingredient).collect())
            .collect()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !pos.is_valid(self.size) {
            return None;
        }
        Some(pos.row as usize * self.size + pos.column as usize)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at position, `None` if out of bounds
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Ingredient at position, `None` if empty or out of bounds
    pub fn ingredient_at(&self, pos: Position) -> Option<Ingredient> {
        self.cell_at(pos).and_then(|cell| cell.ingredient)
    }

    /// Put an ingredient at position
    /// Returns false if out of bounds
    pub fn set_ingredient(&mut self, kind: Ingredient, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx].ingredient = Some(kind);
                true
            }
            None => false,
        }
    }

    /// Empty the cell at position (also drops its selection)
    /// Returns false if out of bounds
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx].clear();
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, pos: Position) -> bool {
        self.set_selected(pos, true)
    }

    pub fn deselect(&mut self, pos: Position) -> bool {
        self.set_selected(pos, false)
    }

    fn set_selected(&mut self, pos: Position, selected: bool) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx].selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn deselect_all(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
        }
    }

    pub fn is_selected(&self, pos: Position) -> bool {
        self.cell_at(pos).map_or(false, |cell| cell.selected)
    }

    pub fn selected_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.is_selected(pos))
            .collect()
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size).map(move |c| Position::new(r as i8, c as i8))
        })
    }

    /// Positions of a full row, left to right; empty if out of bounds
    pub fn row_positions(&self, row: usize) -> Vec<Position> {
        if row >= self.size {
            return Vec::new();
        }
        (0..self.size)
            .map(|c| Position::new(row as i8, c as i8))
            .collect()
    }

    /// Positions of a full column, top to bottom; empty if out of bounds
    pub fn column_positions(&self, column: usize) -> Vec<Position> {
        if column >= self.size {
            return Vec::new();
        }
        (0..self.size)
            .map(|r| Position::new(r as i8, column as i8))
            .collect()
    }

    /// All positions holding `kind`, row-major
    pub fn positions_with(&self, kind: Ingredient) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.ingredient_at(pos) == Some(kind))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// True if no column has an empty cell below a filled one
    pub fn is_settled(&self) -> bool {
        (0..self.size).all(|c| {
            let mut seen_filled = false;
            for r in 0..self.size {
                let filled = !self.cells[r * self.size + c].is_empty();
                if seen_filled && !filled {
                    return false;
                }
                seen_filled |= filled;
            }
            true
        })
    }

    /// Group consecutive equal ingredients along `positions` into runs
    ///
    /// A run breaks on an empty (or off-grid) cell or a change of ingredient.
    /// Only runs of at least `min_run_length` cells are returned (a minimum of
    /// 0 is treated as 1).
    pub fn scan_line(&self, positions: &[Position], min_run_length: usize) -> Vec<Run> {
        let min_len = min_run_length.max(1);
        let mut runs = Vec::new();
        let mut current: Vec<Position> = Vec::new();
        let mut current_kind: Option<Ingredient> = None;

        for &pos in positions {
            let here = self.ingredient_at(pos);
            if here.is_some() && here == current_kind {
                current.push(pos);
                continue;
            }

            flush_run(&mut runs, &mut current, current_kind, min_len);
            current_kind = here;
            if here.is_some() {
                current.push(pos);
            }
        }
        flush_run(&mut runs, &mut current, current_kind, min_len);

        runs
    }

    /// Runs of at least `min_run_length` across the whole board
    ///
    /// Order: every row top to bottom, then every column left to right.
    pub fn find_all_matches(&self, min_run_length: usize) -> Vec<Run> {
        let mut runs = Vec::new();
        for row in 0..self.size {
            runs.extend(self.scan_line(&self.row_positions(row), min_run_length));
        }
        for column in 0..self.size {
            runs.extend(self.scan_line(&self.column_positions(column), min_run_length));
        }
        runs
    }

    /// Empty every position of every run (overlaps are harmless)
    pub fn clear_runs(&mut self, runs: &[Run]) {
        for run in runs {
            for &pos in &run.positions {
                self.clear_cell(pos);
            }
        }
    }

    /// Settle every column and refill it from its preview queue
    ///
    /// Per column: surviving ingredients slide down keeping their order, and
    /// the gap left at the top is filled with ingredients taken from the
    /// column's queue (each one replaced by a fresh draw from `pool`). The
    /// first ingredient taken lands lowest. A full column produces no drops.
    ///
    /// With an empty `pool` nothing moves and no drops are returned.
    pub fn apply_gravity<R: RandomSource>(
        &mut self,
        pool: &[Ingredient],
        rng: &mut R,
    ) -> Vec<IngredientDrop> {
        if pool.is_empty() {
            return Vec::new();
        }

        let mut drops = Vec::new();
        for column in 0..self.size {
            let col = column as i8;
            let survivors: Vec<(i8, Ingredient)> = (0..self.size)
                .filter_map(|row| {
                    self.cells[row * self.size + column]
                        .ingredient
                        .map(|kind| (row as i8, kind))
                })
                .collect();

            let empty = self.size - survivors.len();
            if empty == 0 {
                continue;
            }

            // Non-empty pool and one queue per column: every draw succeeds
            let fresh: Vec<Ingredient> = (0..empty)
                .filter_map(|_| self.draw_for_column(column, pool, rng))
                .collect();
            debug_assert_eq!(fresh.len(), empty);

            for (i, &kind) in fresh.iter().enumerate() {
                let row = (empty - 1 - i) as i8;
                self.cells[row as usize * self.size + column] = Cell::filled(kind);
                drops.push(IngredientDrop {
                    ingredient: kind,
                    from: Position::new(row - empty as i8, col),
                    to: Position::new(row, col),
                });
            }

            for (offset, &(from_row, kind)) in survivors.iter().enumerate() {
                let row = (empty + offset) as i8;
                self.cells[row as usize * self.size + column] = Cell::filled(kind);
                if row != from_row {
                    drops.push(IngredientDrop {
                        ingredient: kind,
                        from: Position::new(from_row, col),
                        to: Position::new(row, col),
                    });
                }
            }

            trace!(
                "gravity: column {} refilled {} cell(s), {} survivor(s)",
                column,
                empty,
                survivors.len()
            );
        }

        drops
    }

    /// Clear `runs` then apply gravity as one step
    pub fn clear_and_apply_gravity<R: RandomSource>(
        &mut self,
        runs: &[Run],
        pool: &[Ingredient],
        rng: &mut R,
    ) -> Vec<IngredientDrop> {
        self.clear_runs(runs);
        self.apply_gravity(pool, rng)
    }

    /// Take the next ingredient for `column`
    ///
    /// Pops the queue head and tops the queue back up with one pool draw; an
    /// empty queue draws straight from the pool.
    fn draw_for_column<R: RandomSource>(
        &mut self,
        column: usize,
        pool: &[Ingredient],
        rng: &mut R,
    ) -> Option<Ingredient> {
        let queue = self.queues.get_mut(column)?;
        match queue.pop_front() {
            Some(next) => {
                if let Some(refill) = rng.choose(pool) {
                    queue.push_back(refill);
                }
                Some(next)
            }
            None => rng.choose(pool),
        }
    }

    /// Fill every column's preview queue with `queue_size` pool draws
    ///
    /// No-op with an empty pool.
    pub fn initialize_preview_queues<R: RandomSource>(
        &mut self,
        pool: &[Ingredient],
        queue_size: usize,
        rng: &mut R,
    ) {
        if pool.is_empty() {
            return;
        }
        for queue in &mut self.queues {
            queue.clear();
            for _ in 0..queue_size {
                if let Some(kind) = rng.choose(pool) {
                    queue.push_back(kind);
                }
            }
        }
    }

    /// Next ingredient to fall into `column`, without consuming it
    pub fn preview(&self, column: usize) -> Option<Ingredient> {
        self.queues.get(column).and_then(|q| q.front().copied())
    }

    /// Queue heads for every column, left to right
    pub fn previews(&self) -> Vec<Option<Ingredient>> {
        (0..self.size).map(|c| self.preview(c)).collect()
    }

    pub fn queue(&self, column: usize) -> Option<&VecDeque<Ingredient>> {
        self.queues.get(column)
    }

    /// Replace a column's queue; false if the column is out of bounds
    pub fn set_queue<I>(&mut self, column: usize, items: I) -> bool
    where
        I: IntoIterator<Item = Ingredient>,
    {
        match self.queues.get_mut(column) {
            Some(queue) => {
                queue.clear();
                queue.extend(items);
                true
            }
            None => false,
        }
    }

    /// Put a random pool ingredient into every empty cell (row-major)
    /// Returns the number of cells filled
    pub fn fill_empty_cells<R: RandomSource>(&mut self, pool: &[Ingredient], rng: &mut R) -> usize {
        let mut filled = 0;
        for cell in &mut self.cells {
            if !cell.is_empty() {
                continue;
            }
            if let Some(kind) = rng.choose(pool) {
                cell.ingredient = Some(kind);
                filled += 1;
            }
        }
        filled
    }

    /// Replace every cell with a random pool ingredient (no-op on empty pool)
    pub fn fill_all<R: RandomSource>(&mut self, pool: &[Ingredient], rng: &mut R) {
        if pool.is_empty() {
            return;
        }
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
        self.fill_empty_cells(pool, rng);
    }

    /// Clear every cell and every preview queue
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
        for queue in &mut self.queues {
            queue.clear();
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_GRID_SIZE)
    }
}

fn flush_run(
    runs: &mut Vec<Run>,
    current: &mut Vec<Position>,
    kind: Option<Ingredient>,
    min_len: usize,
) {
    match kind {
        Some(kind) if current.len() >= min_len => {
            runs.push(Run::new(std::mem::take(current), kind));
        }
        _ => current.clear(),
    }
}
