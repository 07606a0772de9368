//! Sampling metrics
//!
//! Counters collected while trials run. Clamped draws are the uniform values
//! that fell outside the discrete CDF's range and were resolved to a boundary
//! point instead of being dropped.

use serde::{Deserialize, Serialize};

use crate::sampler::{Boundary, Located};

/// Metrics collected during a sampling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingMetrics {
    /// Completed trials
    pub trials: u64,
    /// Samples drawn across all trials
    pub samples: u64,
    /// Draws below the first CDF value
    pub clamped_below: u64,
    /// Draws above the last CDF value
    pub clamped_above: u64,
}

impl SamplingMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one located sample
    pub fn record_sample(&mut self, located: &Located) {
        self.samples += 1;
        match located.clamped {
            Some(Boundary::Below) => self.clamped_below += 1,
            Some(Boundary::Above) => self.clamped_above += 1,
            None => {}
        }
    }

    pub fn record_trial(&mut self) {
        self.trials += 1;
    }

    /// Fold another set of counters into this one
    pub fn merge(&mut self, other: &SamplingMetrics) {
        self.trials += other.trials;
        self.samples += other.samples;
        self.clamped_below += other.clamped_below;
        self.clamped_above += other.clamped_above;
    }

    #[must_use]
    pub fn clamped(&self) -> u64 {
        self.clamped_below + self.clamped_above
    }

    /// Fraction of samples that were clamped
    #[must_use]
    pub fn clamp_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.clamped() as f64 / self.samples as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(clamped: Option<Boundary>) -> Located {
        Located {
            index: 0,
            x: 0.0,
            clamped,
        }
    }

    #[test]
    fn test_metrics_basic() {
        let mut metrics = SamplingMetrics::new();
        metrics.record_sample(&located(None));
        metrics.record_sample(&located(Some(Boundary::Below)));
        metrics.record_sample(&located(Some(Boundary::Above)));
        metrics.record_sample(&located(Some(Boundary::Above)));
        metrics.record_trial();

        assert_eq!(metrics.trials, 1);
        assert_eq!(metrics.samples, 4);
        assert_eq!(metrics.clamped_below, 1);
        assert_eq!(metrics.clamped_above, 2);
        assert_eq!(metrics.clamped(), 3);
        assert!((metrics.clamp_rate() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_merge_and_empty_rate() {
        assert_eq!(SamplingMetrics::new().clamp_rate(), 0.0);

        let mut total = SamplingMetrics::new();
        let part = SamplingMetrics {
            trials: 2,
            samples: 20,
            clamped_below: 1,
            clamped_above: 3,
        };
        total.merge(&part);
        total.merge(&part);
        assert_eq!(total.trials, 4);
        assert_eq!(total.samples, 40);
        assert_eq!(total.clamped(), 8);
    }
}
