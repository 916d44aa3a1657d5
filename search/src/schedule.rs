//! Cooling schedules for simulated annealing.

/// Maps a discrete time step to a temperature.
///
/// A temperature of exactly `0.0` ends the annealing run. Schedules should be
/// non-increasing in `step`; negative or NaN temperatures are rejected by the
/// search as [`SearchError::InvalidSchedule`](crate::error::SearchError::InvalidSchedule).
pub trait Schedule {
    fn temperature(&self, step: u64) -> f64;
}

impl<F> Schedule for F
where
    F: Fn(u64) -> f64,
{
    fn temperature(&self, step: u64) -> f64 {
        self(step)
    }
}

/// Exponential decay `k * exp(-lambda * t)` for `t < limit`, then zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpSchedule {
    /// Initial temperature.
    pub k: f64,
    /// Decay rate.
    pub lambda: f64,
    /// First step at which the temperature is zero.
    pub limit: u64,
}

impl ExpSchedule {
    #[must_use]
    pub fn new(k: f64, lambda: f64, limit: u64) -> Self {
        Self { k, lambda, limit }
    }
}

impl Default for ExpSchedule {
    fn default() -> Self {
        Self {
            k: 20.0,
            lambda: 0.005,
            limit: 100,
        }
    }
}

impl Schedule for ExpSchedule {
    #[allow(clippy::cast_precision_loss)]
    fn temperature(&self, step: u64) -> f64 {
        if step < self.limit {
            self.k * (-self.lambda * step as f64).exp()
        } else {
            0.0
        }
    }
}
