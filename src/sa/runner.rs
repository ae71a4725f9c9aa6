//! Annealing loop.
//!
//! # Algorithm
//!
//! 1. Validate config, cities and the initial tour
//! 2. Start at `T = initial_temperature` with the initial tour as incumbent
//! 3. At each iteration:
//!    a. Generate a candidate from the incumbent
//!    b. Accept or reject it (Metropolis or strict improvement)
//!    c. Cool the temperature
//! 4. Stop when the temperature reaches the minimum, the iteration cap is
//!    hit, or the cancel flag is raised

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::Rng;

use super::config::{Acceptance, AnnealConfig};
use super::progress::{NoopReporter, ProgressReporter};
use super::schedule::{CoolingSchedule, Termination};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::neighbor::{NeighborGenerator, Perturbation};
use crate::random::rng_from_seed;
use crate::tour::{energy, validate_permutation, Tour};

/// Incumbent energy is sampled into the history at this interval.
const HISTORY_INTERVAL: usize = 100;

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// Incumbent tour when the run stopped.
    pub tour: Tour,

    /// Energy of [`tour`](Self::tour).
    pub energy: f64,

    /// Lowest-energy tour seen during the run.
    ///
    /// Equal to `tour` under [`Acceptance::StrictImprovement`].
    pub best_tour: Tour,

    /// Energy of [`best_tour`](Self::best_tour).
    pub best_energy: f64,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted candidates (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving candidates.
    pub improving_moves: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Incumbent energy sampled every 100 iterations, plus the final value.
    pub energy_history: Vec<f64>,
}

/// Executes simulated annealing over a fixed set of cities.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals `initial` over `points` with the built-in perturbation
    /// generator and no progress reporting.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_anneal::geometry::Point;
    /// use tsp_anneal::sa::{AnnealConfig, AnnealRunner};
    /// use tsp_anneal::tour::Tour;
    ///
    /// let points = vec![
    ///     Point::new(0.0, 0.0),
    ///     Point::new(1.0, 1.0),
    ///     Point::new(0.0, 1.0),
    ///     Point::new(1.0, 0.0),
    /// ];
    /// let config = AnnealConfig::default().with_seed(7);
    /// let result = AnnealRunner::run(Tour::identity(4), &points, &config).unwrap();
    /// assert!(result.best_energy <= 2.0 + 2.0 * 2f64.sqrt() + 1e-9);
    /// ```
    pub fn run(initial: Tour, points: &[Point], config: &AnnealConfig) -> Result<AnnealResult> {
        Self::run_with_cancel(initial, points, config, None)
    }

    /// Like [`run`](Self::run), stopping early once `cancel` is set.
    pub fn run_with_cancel(
        initial: Tour,
        points: &[Point],
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult> {
        let generator = Perturbation::new(config.neighbor);
        Self::run_with(initial, points, config, &generator, &mut NoopReporter, cancel)
    }

    /// Runs with a caller-supplied neighbor generator and progress reporter.
    pub fn run_with<G, P>(
        initial: Tour,
        points: &[Point],
        config: &AnnealConfig,
        generator: &G,
        reporter: &mut P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult>
    where
        G: NeighborGenerator,
        P: ProgressReporter + ?Sized,
    {
        config.validate()?;
        validate_cities(points)?;
        validate_permutation(initial.as_slice(), points.len())?;

        let mut rng = rng_from_seed(config.seed);
        let schedule = CoolingSchedule::new(config);

        // The incumbent is only ever replaced, never mutated, so its energy
        // stays in sync with it.
        let mut current = initial;
        let mut current_energy = energy(&current, points);
        let mut best = current.clone();
        let mut best_energy = current_energy;

        let mut temperature = schedule.initialize();
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut energy_history = vec![current_energy];

        info!(
            "annealing {} cities: initial temperature={temperature} initial energy={current_energy:.6}",
            points.len()
        );

        let termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }

            reporter.report(iterations, temperature, current_energy);

            let candidate = generator.neighbor(&current, temperature, &mut rng);
            debug_assert!(
                candidate.is_permutation_of(points.len()),
                "neighbor generator broke the permutation: {candidate:?}"
            );
            let candidate_energy = energy(&candidate, points);
            let delta = candidate_energy - current_energy;

            if delta < 0.0 {
                improving_moves += 1;
            }
            if accept(config.acceptance, delta, temperature, &mut rng) {
                if delta < 0.0 {
                    debug!("improvement: {:.6} decrease", -delta);
                }
                current = candidate;
                current_energy = candidate_energy;
                accepted_moves += 1;

                if current_energy < best_energy {
                    best = current.clone();
                    best_energy = current_energy;
                }
            }

            temperature = schedule.update(temperature);
            iterations += 1;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                energy_history.push(current_energy);
            }

            if let Some(reason) = schedule.termination(temperature, iterations) {
                break reason;
            }
        };

        if energy_history
            .last()
            .is_none_or(|&last| (last - current_energy).abs() > 1e-15)
        {
            energy_history.push(current_energy);
        }

        info!(
            "annealing stopped ({termination:?}) after {iterations} iterations: \
             energy={current_energy:.6} best={best_energy:.6} temperature={temperature:.6}"
        );

        Ok(AnnealResult {
            tour: current,
            energy: current_energy,
            best_tour: best,
            best_energy,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            termination,
            energy_history,
        })
    }
}

/// Decides whether a candidate `delta` above the incumbent is taken.
fn accept<R: Rng>(acceptance: Acceptance, delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta < 0.0 {
        return true;
    }
    match acceptance {
        Acceptance::StrictImprovement => false,
        Acceptance::Metropolis => {
            if temperature > 0.0 {
                let probability = (-delta / temperature).exp();
                rng.random_range(0.0..1.0) < probability
            } else {
                false
            }
        }
    }
}

fn validate_cities(points: &[Point]) -> Result<()> {
    if points.len() < 2 {
        return Err(Error::invalid_input(format!(
            "need at least 2 cities, got {}",
            points.len()
        )));
    }
    if let Some(i) = points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(Error::invalid_input(format!(
            "city {i} has a non-finite coordinate: {}",
            points[i]
        )));
    }
    Ok(())
}
