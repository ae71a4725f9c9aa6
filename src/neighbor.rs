//! Candidate tour generation.
//!
//! A [`NeighborGenerator`] proposes a candidate from the incumbent without
//! touching it, so the loop can compare energies before committing.
//!
//! # Move kinds
//!
//! - [`MoveKind::Swap`]: exchange two distinct positions, O(1)
//! - [`MoveKind::Insert`]: remove a city and reinsert it elsewhere, O(n)
//! - [`MoveKind::Reverse`]: reverse a random segment (2-opt move), O(n)
//!
//! [`Perturbation`] applies one or more of these moves per candidate. The
//! count grows with temperature, so hot phases jump further.

use rand::Rng;

use crate::error::{Error, Result};
use crate::tour::Tour;

/// Produces candidate tours from an incumbent.
///
/// Implementations must return a permutation of the same cities and must
/// be reproducible for a given RNG state.
pub trait NeighborGenerator {
    /// Returns a perturbed copy of `tour`.
    fn neighbor<R: Rng>(&self, tour: &Tour, temperature: f64, rng: &mut R) -> Tour;
}

/// Elementary permutation-preserving move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    /// Exchange the cities at two distinct positions.
    #[default]
    Swap,
    /// Move one city to another position, shifting those in between.
    Insert,
    /// Reverse the order of a contiguous segment.
    Reverse,
}

/// Settings for [`Perturbation`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborConfig {
    /// Which elementary move to apply.
    pub kind: MoveKind,

    /// Temperature that buys one extra move per candidate.
    pub temperature_per_move: f64,

    /// Upper bound on moves per candidate. `1` disables temperature scaling.
    pub max_moves: usize,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            kind: MoveKind::Swap,
            temperature_per_move: 10.0,
            max_moves: 1,
        }
    }
}

impl NeighborConfig {
    pub fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_temperature_scaling(mut self, temperature_per_move: f64, max_moves: usize) -> Self {
        self.temperature_per_move = temperature_per_move;
        self.max_moves = max_moves;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_moves == 0 {
            return Err(Error::invalid_config("max_moves must be at least 1"));
        }
        if !self.temperature_per_move.is_finite() || self.temperature_per_move <= 0.0 {
            return Err(Error::invalid_config(format!(
                "temperature_per_move must be positive and finite, got {}",
                self.temperature_per_move
            )));
        }
        Ok(())
    }
}

/// Applies `1 + floor(T / temperature_per_move)` moves (capped) per candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perturbation {
    config: NeighborConfig,
}

impl Perturbation {
    pub fn new(config: NeighborConfig) -> Self {
        Self { config }
    }

    /// Number of elementary moves applied at `temperature`.
    pub fn moves_at(&self, temperature: f64) -> usize {
        if self.config.max_moves <= 1 || temperature.is_nan() || temperature <= 0.0 {
            return 1;
        }
        let extra = (temperature / self.config.temperature_per_move).floor();
        if extra >= (self.config.max_moves - 1) as f64 {
            self.config.max_moves
        } else {
            1 + extra as usize
        }
    }
}

impl NeighborGenerator for Perturbation {
    fn neighbor<R: Rng>(&self, tour: &Tour, temperature: f64, rng: &mut R) -> Tour {
        let mut order = tour.as_slice().to_vec();
        for _ in 0..self.moves_at(temperature) {
            apply_move(self.config.kind, &mut order, rng);
        }
        // Consecutive moves can cancel out. A single move on the unchanged
        // order always changes it.
        if order.as_slice() == tour.as_slice() {
            apply_move(self.config.kind, &mut order, rng);
        }
        Tour::from_order_unchecked(order)
    }
}

/// Applies one move of `kind` to `order` in place. No-op for fewer than 2 cities.
pub fn apply_move<R: Rng>(kind: MoveKind, order: &mut Vec<usize>, rng: &mut R) {
    match kind {
        MoveKind::Swap => swap_move(order, rng),
        MoveKind::Insert => insert_move(order, rng),
        MoveKind::Reverse => reverse_move(order, rng),
    }
}

/// Exchanges two distinct random positions.
pub fn swap_move<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let (i, j) = distinct_pair(n, rng);
    order.swap(i, j);
}

/// Removes a city and reinserts it at a different position.
pub fn insert_move<R: Rng>(order: &mut Vec<usize>, rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let (from, to) = distinct_pair(n, rng);
    let city = order.remove(from);
    order.insert(to, city);
}

/// Reverses the segment between two distinct random positions (inclusive).
pub fn reverse_move<R: Rng>(order: &mut [usize], rng: &mut R) {
    let n = order.len();
    if n < 2 {
        return;
    }
    let (a, b) = distinct_pair(n, rng);
    let (start, end) = if a < b { (a, b) } else { (b, a) };
    order[start..=end].reverse();
}

/// Two different indices in `0..n`. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
