//! motnet Timing Tools
//!
//! Statistics for periodic board tasks.
//!
//! # Module Structure
//!
//! - [`histogram`] - Fixed-bin histogram with probability density output
//! - [`period_validator`] - Activation period checker with alerting and reports

use thiserror::Error;

pub mod histogram;
pub mod period_validator;

pub use histogram::{Histogram, HistogramConfig, HistogramValues, MAX_BINS};
pub use period_validator::{PeriodValidator, PeriodValidatorConfig};

/// Errors from invalid tool configurations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ToolsError {
    #[error("Invalid histogram: min {min}, max {max}, step {step}")]
    InvalidHistogram { min: u64, max: u64, step: u32 },

    #[error("Invalid period: {period} us must be non-zero and below alert value {alert_value} us")]
    InvalidPeriod { period: u64, alert_value: u64 },
}
