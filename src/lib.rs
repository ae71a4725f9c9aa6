//! Simulated annealing for the Euclidean traveling-salesman problem.
//!
//! Given a fixed set of 2-D cities and a starting tour, the annealer
//! repeatedly perturbs the incumbent tour, accepts or rejects the candidate,
//! and cools the temperature until it falls below a threshold or an
//! iteration cap is hit. The result is a short (not necessarily optimal)
//! closed tour.
//!
//! - [`geometry`]: points, Euclidean distance, random coordinate source
//! - [`tour`]: permutation-checked tours and tour energy (closed length)
//! - [`neighbor`]: candidate generation (swap, insert, 2-opt reverse)
//! - [`sa`]: cooling schedule, acceptance, and the annealing loop
//!
//! # Example
//!
//! ```
//! use tsp_anneal::geometry::random_points;
//! use tsp_anneal::random::create_rng;
//! use tsp_anneal::sa::{AnnealConfig, AnnealRunner};
//! use tsp_anneal::tour::Tour;
//!
//! let mut rng = create_rng(42);
//! let cities = random_points(20, 100.0, &mut rng);
//! let initial = Tour::random(cities.len(), &mut rng);
//!
//! let config = AnnealConfig::default()
//!     .with_initial_temperature(100.0)
//!     .with_decay_factor(0.999)
//!     .with_min_temperature(0.01)
//!     .with_seed(42);
//! let result = AnnealRunner::run(initial, &cities, &config).unwrap();
//! assert!(result.tour.is_permutation_of(20));
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod error;
pub mod geometry;
pub mod neighbor;
pub mod random;
pub mod sa;
pub mod tour;

pub use error::{Error, Result};
