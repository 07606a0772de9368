//! Fixed-width histogram of a value sequence
//!
//! Bins are half-open `[lo + i*w, lo + (i+1)*w)`; values below `lo` count as
//! underflow and values at or above `hi` as overflow.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    lo: f64,
    hi: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl Histogram {
    /// Empty histogram with `bins` bins over `[lo, hi)`.
    ///
    /// Returns `None` unless `bins > 0` and `lo < hi` are finite.
    #[must_use]
    pub fn new(bins: usize, lo: f64, hi: f64) -> Option<Self> {
        if bins == 0 || !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return None;
        }
        Some(Self {
            lo,
            hi,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
        })
    }

    pub fn fill(&mut self, value: f64) {
        if value < self.lo {
            self.underflow += 1;
        } else if value >= self.hi || value.is_nan() {
            self.overflow += 1;
        } else {
            let bins = self.counts.len();
            let index = ((value - self.lo) / self.bin_width()) as usize;
            // Rounding can push a value just under `hi` one past the last bin
            self.counts[index.min(bins - 1)] += 1;
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        (self.hi - self.lo) / self.counts.len() as f64
    }

    #[must_use]
    pub fn bin_center(&self, index: usize) -> f64 {
        self.lo + (index as f64 + 0.5) * self.bin_width()
    }

    #[must_use]
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    #[must_use]
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Values that landed inside the range
    #[must_use]
    pub fn entries(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Index of the fullest bin, first one on ties
    #[must_use]
    pub fn mode_bin(&self) -> Option<usize> {
        let max = *self.counts.iter().max()?;
        if max == 0 {
            return None;
        }
        self.counts.iter().position(|&c| c == max)
    }
}
