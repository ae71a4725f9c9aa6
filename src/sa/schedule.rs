//! Temperature state: initial value, per-iteration decay, and the stop rule.

use super::config::{AnnealConfig, Cooling};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Temperature reached the configured minimum.
    Temperature,
    /// The iteration cap was reached first.
    IterationCap,
    /// The caller raised the cancellation flag.
    Cancelled,
}

/// Cooling schedule derived from an [`AnnealConfig`].
///
/// Stateless apart from its parameters: the current temperature is owned by
/// the caller and threaded through [`update`](Self::update).
#[derive(Debug, Clone, Copy)]
pub struct CoolingSchedule {
    initial_temperature: f64,
    min_temperature: f64,
    max_iterations: usize,
    cooling: Cooling,
}

impl CoolingSchedule {
    /// Builds a schedule from an already validated config.
    pub fn new(config: &AnnealConfig) -> Self {
        Self {
            initial_temperature: config.initial_temperature,
            min_temperature: config.min_temperature,
            max_iterations: config.max_iterations,
            cooling: config.cooling,
        }
    }

    /// Starting temperature.
    pub fn initialize(&self) -> f64 {
        self.initial_temperature
    }

    /// Next temperature. Never greater than `temperature`.
    pub fn update(&self, temperature: f64) -> f64 {
        let next = match self.cooling {
            Cooling::Geometric { alpha } => temperature * alpha,
            Cooling::Linear { step } => (temperature - step).max(0.0),
            Cooling::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        };
        debug_assert!(is_cooling(temperature, next));
        next
    }

    /// Whether the run must stop after `iteration` completed iterations.
    pub fn should_terminate(&self, temperature: f64, iteration: usize) -> bool {
        self.termination(temperature, iteration).is_some()
    }

    /// The reason to stop, if any. Temperature takes precedence when both
    /// conditions hold on the same iteration.
    pub fn termination(&self, temperature: f64, iteration: usize) -> Option<Termination> {
        if temperature <= self.min_temperature {
            Some(Termination::Temperature)
        } else if iteration >= self.max_iterations {
            Some(Termination::IterationCap)
        } else {
            None
        }
    }
}

/// Whether `next` is a legal successor of `previous` (no reheating).
#[inline]
pub fn is_cooling(previous: f64, next: f64) -> bool {
    next <= previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn iterations_until_stop(schedule: &CoolingSchedule) -> (usize, Termination) {
        let mut t = schedule.initialize();
        let mut iteration = 0;
        loop {
            t = schedule.update(t);
            iteration += 1;
            if let Some(reason) = schedule.termination(t, iteration) {
                return (iteration, reason);
            }
        }
    }

    #[test]
    fn test_geometric_stops_by_temperature() {
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_decay_factor(0.95)
            .with_min_temperature(0.01)
            .with_max_iterations(1_000);
        let (iterations, reason) = iterations_until_stop(&CoolingSchedule::new(&config));
        assert_eq!(iterations, 180);
        assert_eq!(reason, Termination::Temperature);
    }

    #[test]
    fn test_geometric_stops_by_cap() {
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_decay_factor(0.95)
            .with_min_temperature(0.01)
            .with_max_iterations(50);
        let (iterations, reason) = iterations_until_stop(&CoolingSchedule::new(&config));
        assert_eq!(iterations, 50);
        assert_eq!(reason, Termination::IterationCap);
    }

    #[test]
    fn test_initialize_returns_initial_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(42.0);
        assert_eq!(CoolingSchedule::new(&config).initialize(), 42.0);
    }

    #[test]
    fn test_linear_clamps_at_zero() {
        let config = AnnealConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling(Cooling::Linear { step: 0.3 });
        let schedule = CoolingSchedule::new(&config);
        let mut t = schedule.initialize();
        for _ in 0..10 {
            t = schedule.update(t);
        }
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_lundy_mees_decreases() {
        let config = AnnealConfig::default().with_cooling(Cooling::LundyMees { beta: 0.01 });
        let schedule = CoolingSchedule::new(&config);
        let next = schedule.update(100.0);
        assert!((next - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_min_temperature_relies_on_cap() {
        let config = AnnealConfig::default()
            .with_decay_factor(0.999)
            .with_min_temperature(0.0)
            .with_max_iterations(300);
        let (iterations, reason) = iterations_until_stop(&CoolingSchedule::new(&config));
        assert_eq!(iterations, 300);
        assert_eq!(reason, Termination::IterationCap);
    }

    #[test]
    fn test_should_terminate_at_cap_and_threshold() {
        let config = AnnealConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(0.01)
            .with_max_iterations(50);
        let schedule = CoolingSchedule::new(&config);
        assert!(!schedule.should_terminate(100.0, 49));
        assert!(schedule.should_terminate(100.0, 50));
        assert!(schedule.should_terminate(0.01, 0));
        assert!(schedule.should_terminate(0.005, 0));
        assert!(!schedule.should_terminate(0.0100001, 0));
    }

    #[test]
    fn test_is_cooling() {
        assert!(is_cooling(2.0, 1.0));
        assert!(is_cooling(1.0, 1.0));
        assert!(!is_cooling(1.0, 1.5));
    }

    fn cooling_strategy() -> impl Strategy<Value = Cooling> {
        prop_oneof![
            (0.01f64..0.999).prop_map(|alpha| Cooling::Geometric { alpha }),
            (1e-6f64..50.0).prop_map(|step| Cooling::Linear { step }),
            (1e-9f64..1.0).prop_map(|beta| Cooling::LundyMees { beta }),
        ]
    }

    proptest! {
        #[test]
        fn prop_update_never_increases(cooling in cooling_strategy(), t in 0.0f64..1e6) {
            let config = AnnealConfig::default().with_cooling(cooling);
            let schedule = CoolingSchedule::new(&config);
            let next = schedule.update(t);
            prop_assert!(next <= t);
            prop_assert!(next >= 0.0);
        }

        #[test]
        fn prop_terminates_within_cap(
            cooling in cooling_strategy(),
            t0 in 1e-3f64..1e6,
            t_min in 0.0f64..1.0,
            cap in 1usize..2_000,
        ) {
            let config = AnnealConfig::default()
                .with_initial_temperature(t0)
                .with_cooling(cooling)
                .with_min_temperature(t_min)
                .with_max_iterations(cap);
            let schedule = CoolingSchedule::new(&config);
            let mut t = schedule.initialize();
            let mut iteration = 0;
            while !schedule.should_terminate(t, iteration) {
                t = schedule.update(t);
                iteration += 1;
                prop_assert!(iteration <= cap);
            }
            prop_assert!(iteration <= cap);
        }
    }
}
