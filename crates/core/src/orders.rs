//! Order book - the active demands a player can fulfil
//!
//! Demands are kept in insertion order (for display). Matching walks that
//! order and requires an exact `(ingredient, length)` hit.

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::types::{Demand, Ingredient, Run, MAX_DEMANDS, MAX_DEMAND_QUANTITY, MIN_DEMAND_QUANTITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    demands: ArrayVec<Demand, MAX_DEMANDS>,
    capacity: usize,
}

impl OrderBook {
    /// Empty book holding at most `capacity` demands (clamped to `1..=MAX_DEMANDS`)
    pub fn new(capacity: usize) -> Self {
        Self {
            demands: ArrayVec::new(),
            capacity: capacity.clamp(1, MAX_DEMANDS),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn len(&self) -> usize {
        self.demands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demands.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.demands.len() >= self.capacity
    }

    pub fn contains(&self, demand: &Demand) -> bool {
        self.demands.contains(demand)
    }

    /// Append a demand; ignored (returns false) when the book is full
    pub fn add_demand(&mut self, demand: Demand) -> bool {
        if self.is_full() {
            return false;
        }
        self.demands.try_push(demand).is_ok()
    }

    /// Remove the first entry equal to `demand`
    pub fn remove_demand(&mut self, demand: &Demand) -> bool {
        match self.demands.iter().position(|d| d == demand) {
            Some(index) => {
                self.demands.remove(index);
                true
            }
            None => false,
        }
    }

    /// First demand (in book order) that `run` satisfies exactly
    ///
    /// Does not modify the book.
    pub fn fulfill(&self, run: &Run) -> Option<Demand> {
        self.demands.iter().find(|d| d.matches(run)).copied()
    }

    /// Replace the book with `count` random demands (capped at capacity)
    ///
    /// Returns the number generated. An empty pool leaves the book untouched.
    pub fn generate_demands<R: RandomSource>(
        &mut self,
        pool: &[Ingredient],
        count: usize,
        rng: &mut R,
    ) -> usize {
        if pool.is_empty() {
            return 0;
        }
        self.demands.clear();
        for _ in 0..count.min(self.capacity) {
            match random_demand(pool, rng) {
                Some(demand) => {
                    self.add_demand(demand);
                }
                None => break,
            }
        }
        self.demands.len()
    }

    /// Append one fresh random demand if there is room
    pub fn replenish<R: RandomSource>(&mut self, pool: &[Ingredient], rng: &mut R) -> Option<Demand> {
        if self.is_full() {
            return None;
        }
        let demand = random_demand(pool, rng)?;
        self.add_demand(demand).then_some(demand)
    }

    pub fn clear(&mut self) {
        self.demands.clear();
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(MAX_DEMANDS)
    }
}

/// Uniform pool ingredient with a uniform quantity in `1..=3`
pub fn random_demand<R: RandomSource>(pool: &[Ingredient], rng: &mut R) -> Option<Demand> {
    let ingredient = rng.choose(pool)?;
    let span = (MAX_DEMAND_QUANTITY - MIN_DEMAND_QUANTITY + 1) as u32;
    let quantity = MIN_DEMAND_QUANTITY + rng.next_range(span) as u8;
    Some(Demand::new(ingredient, quantity))
}
