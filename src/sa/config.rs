//! Annealing configuration, cooling rules and acceptance policies.

use crate::error::{Error, Result};
use crate::neighbor::{MoveKind, NeighborConfig};

/// Temperature decay rule.
///
/// Every variant is monotonically non-increasing and tends to zero.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed decrement per step, clamped at zero
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cooling {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.99.
    Geometric {
        /// Decay factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_{k+1} = max(T_k - step, 0)`.
    Linear {
        /// Amount subtracted per iteration. Must be positive.
        step: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Geometric { alpha: 0.95 }
    }
}

/// Rule deciding whether a candidate replaces the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance {
    /// Metropolis criterion: always accept improvements, accept a worsening
    /// move of size `delta` with probability `exp(-delta / T)`.
    #[default]
    Metropolis,

    /// Accept only strict improvements (greedy descent). The incumbent
    /// energy never increases.
    StrictImprovement,
}

/// Configuration for an annealing run.
///
/// # Examples
///
/// ```
/// use tsp_anneal::sa::{Acceptance, AnnealConfig};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_decay_factor(0.95)
///     .with_min_temperature(0.01)
///     .with_max_iterations(10_000)
///     .with_acceptance(Acceptance::Metropolis)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature. Higher values explore more broadly.
    pub initial_temperature: f64,

    /// Cooling rule applied once per iteration.
    pub cooling: Cooling,

    /// The run stops once the temperature is at or below this value.
    pub min_temperature: f64,

    /// Hard iteration cap. The run always stops after this many iterations.
    pub max_iterations: usize,

    /// Acceptance rule for candidates.
    pub acceptance: Acceptance,

    /// Candidate generation settings.
    pub neighbor: NeighborConfig,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling: Cooling::default(),
            min_temperature: 0.01,
            max_iterations: 100_000,
            acceptance: Acceptance::default(),
            neighbor: NeighborConfig::default(),
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Selects geometric cooling with the given decay factor.
    pub fn with_decay_factor(mut self, alpha: f64) -> Self {
        self.cooling = Cooling::Geometric { alpha };
        self
    }

    pub fn with_cooling(mut self, cooling: Cooling) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_neighbor(mut self, neighbor: NeighborConfig) -> Self {
        self.neighbor = neighbor;
        self
    }

    pub fn with_move_kind(mut self, kind: MoveKind) -> Self {
        self.neighbor.kind = kind;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(Error::invalid_config(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if self.min_temperature.is_nan() || self.min_temperature < 0.0 {
            return Err(Error::invalid_config(format!(
                "min_temperature must be non-negative, got {}",
                self.min_temperature
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid_config("max_iterations must be at least 1"));
        }
        match self.cooling {
            Cooling::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return Err(Error::invalid_config(format!(
                        "decay factor must be in (0, 1), got {alpha}"
                    )));
                }
            }
            Cooling::Linear { step } => {
                if !step.is_finite() || step <= 0.0 {
                    return Err(Error::invalid_config(format!(
                        "linear step must be positive, got {step}"
                    )));
                }
            }
            Cooling::LundyMees { beta } => {
                if !beta.is_finite() || beta <= 0.0 {
                    return Err(Error::invalid_config(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
            }
        }
        self.neighbor.validate()
    }
}
