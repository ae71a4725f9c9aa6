//! Per-iteration progress reporting.

/// Observer invoked once per iteration.
///
/// Reporting never influences the search: a run with [`NoopReporter`]
/// produces the same result as one with any other reporter.
pub trait ProgressReporter {
    /// Called before iteration `iteration` (0-based) runs at `temperature`
    /// with the incumbent at `energy`.
    fn report(&mut self, iteration: usize, temperature: f64, energy: f64);
}

impl<F: FnMut(usize, f64, f64)> ProgressReporter for F {
    fn report(&mut self, iteration: usize, temperature: f64, energy: f64) {
        self(iteration, temperature, energy)
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&mut self, _iteration: usize, _temperature: f64, _energy: f64) {}
}

/// Emits a `trace!` line every `every` iterations.
#[derive(Debug, Clone, Copy)]
pub struct LogReporter {
    every: usize,
}

impl LogReporter {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ProgressReporter for LogReporter {
    fn report(&mut self, iteration: usize, temperature: f64, energy: f64) {
        if iteration.is_multiple_of(self.every) {
            log::trace!("epoch {iteration}: temperature={temperature:.6} energy={energy:.6}");
        }
    }
}
