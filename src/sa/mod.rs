//! Simulated Annealing (SA) for the traveling-salesman problem.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Worsening tours are accepted with a probability that
//! shrinks as the temperature cools, letting the search escape local
//! optima before it settles.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod progress;
mod runner;
mod schedule;

pub use config::{Acceptance, AnnealConfig, Cooling};
pub use progress::{LogReporter, NoopReporter, ProgressReporter};
pub use runner::{AnnealResult, AnnealRunner};
pub use schedule::{is_cooling, CoolingSchedule, Termination};
