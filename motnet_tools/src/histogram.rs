//! Fixed-bin histogram of `u64` samples.
//!
//! `nsteps` bins of width `step` start at `min`. Samples below `min` go to
//! `below`, samples past the last bin go to `beyond`. A layout may hold at
//! most [`MAX_BINS`] bins.

use serde::{Deserialize, Serialize};

use crate::ToolsError;

/// Largest number of bins a [`Histogram`] allocates.
pub const MAX_BINS: u64 = 1 << 16;

/// Bin layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Start of the first bin.
    pub min: u64,
    /// Upper limit of the binned range (exclusive).
    pub max: u64,
    /// Bin width.
    pub step: u32,
}

impl HistogramConfig {
    pub const fn new(min: u64, max: u64, step: u32) -> Self {
        Self { min, max, step }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.step != 0 && self.min < self.max && self.nsteps() <= MAX_BINS
    }

    #[inline]
    pub const fn range(&self) -> u64 {
        self.max.saturating_sub(self.min)
    }

    /// Number of bins, rounding the last partial bin up.
    #[inline]
    pub const fn nsteps(&self) -> u64 {
        if self.step == 0 {
            return 0;
        }
        self.range().div_ceil(self.step as u64)
    }
}

/// Counters. `total == below + Σ inside + beyond`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistogramValues {
    pub total: u64,
    pub below: u64,
    pub beyond: u64,
    /// `inside[i]` counts samples in `[min + i·step, min + (i+1)·step)`.
    pub inside: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct Histogram {
    config: HistogramConfig,
    values: HistogramValues,
}

impl Histogram {
    /// # Errors
    ///
    /// [`ToolsError::InvalidHistogram`] if `config` is not valid, including
    /// layouts with more than [`MAX_BINS`] bins.
    pub fn new(config: HistogramConfig) -> Result<Self, ToolsError> {
        let invalid = ToolsError::InvalidHistogram {
            min: config.min,
            max: config.max,
            step: config.step,
        };
        if !config.is_valid() {
            return Err(invalid);
        }
        let bins = usize::try_from(config.nsteps()).map_err(|_| invalid)?;
        Ok(Self {
            config,
            values: HistogramValues {
                inside: vec![0; bins],
                ..Default::default()
            },
        })
    }

    #[inline]
    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    #[inline]
    pub fn values(&self) -> &HistogramValues {
        &self.values
    }

    pub fn add(&mut self, value: u64) {
        self.values.total += 1;
        if value < self.config.min {
            self.values.below += 1;
            return;
        }
        let bin = (value - self.config.min) / self.config.step as u64;
        match usize::try_from(bin).ok().and_then(|b| self.values.inside.get_mut(b)) {
            Some(count) => *count += 1,
            None => self.values.beyond += 1,
        }
    }

    /// Zero every counter, keeping the bins.
    pub fn reset(&mut self) {
        self.values.total = 0;
        self.values.below = 0;
        self.values.beyond = 0;
        self.values.inside.fill(0);
    }

    /// `[below, inside.., beyond]`.
    fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(self.values.below)
            .chain(self.values.inside.iter().copied())
            .chain(std::iter::once(self.values.beyond))
    }

    /// Probability of each bin scaled to `scale`, length `nsteps + 2`.
    ///
    /// Position 0 is below `min`, the last position is past the last bin.
    /// All zeros while no sample was added.
    pub fn pdf_scaled(&self, scale: u32) -> Vec<u32> {
        let total = self.values.total;
        self.counts()
            .map(|n| {
                if total == 0 {
                    0
                } else {
                    (n as u128 * scale as u128 / total as u128) as u32
                }
            })
            .collect()
    }

    /// Probability of each bin, length `nsteps + 2`.
    pub fn pdf(&self) -> Vec<f64> {
        let total = self.values.total;
        self.counts()
            .map(|n| if total == 0 { 0.0 } else { n as f64 / total as f64 })
            .collect()
    }
}
