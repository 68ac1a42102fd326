//! Tuning constants of the estimation.
//!
//! The values are empirical. Defaults live in `config/default.toml` and
//! [EstimationParams::default] and can be overridden per run.
use serde::Deserialize;

use crate::error::{SamplingError, SamplingResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimationParams {
    /// Datasets with at most this many partitions use the logarithmic rule.
    pub small_dataset_limit: usize,
    pub log_base: f64,
    pub linear_offset: f64,
    pub linear_scale: f64,
    pub linear_slope: f64,
    /// Starting fraction of the fraction search.
    pub seed_fraction: f64,
    /// The projected sample must have at least this many decimal digits.
    pub min_sample_digits: usize,
    pub max_search_steps: usize,
    pub max_draw_attempts: usize,
}

impl Default for EstimationParams {
    fn default() -> Self {
        Self {
            small_dataset_limit: 100,
            log_base: 3.0,
            linear_offset: 3.0,
            linear_scale: 100.0,
            linear_slope: 2.0,
            seed_fraction: 0.00001,
            min_sample_digits: 3,
            max_search_steps: 64,
            max_draw_attempts: 1_000_000,
        }
    }
}

impl EstimationParams {
    /// Number of partitions to sample out of `partition_count`.
    ///
    /// Small datasets grow logarithmically, `ceil(ln(n + 1) / ln(log_base))`,
    /// large ones linearly, `ceil(linear_offset + (n / linear_scale) * linear_slope - 1)`.
    /// The result is not clamped to `partition_count`.
    pub fn sample_size(&self, partition_count: usize) -> usize {
        let n = partition_count as f64;
        let size = if partition_count <= self.small_dataset_limit {
            ((n + 1.0).ln() / self.log_base.ln()).ceil()
        } else {
            (self.linear_offset + ((n / self.linear_scale) * self.linear_slope - 1.0)).ceil()
        };

        size.max(0.0) as usize
    }

    pub fn validate(&self) -> SamplingResult<()> {
        if !(self.log_base > 1.0) {
            return Err(SamplingError::configuration(format!(
                "log_base must be greater than 1, got {}",
                self.log_base
            )));
        }
        if !(self.linear_scale > 0.0) {
            return Err(SamplingError::configuration(format!(
                "linear_scale must be positive, got {}",
                self.linear_scale
            )));
        }
        if !(self.linear_offset.is_finite() && self.linear_slope.is_finite()) {
            return Err(SamplingError::configuration(
                "linear_offset and linear_slope must be finite",
            ));
        }
        if !(self.seed_fraction > 0.0 && self.seed_fraction <= 1.0) {
            return Err(SamplingError::configuration(format!(
                "seed_fraction must be in (0, 1], got {}",
                self.seed_fraction
            )));
        }
        if self.min_sample_digits == 0 {
            return Err(SamplingError::configuration(
                "min_sample_digits must be positive",
            ));
        }
        if self.max_search_steps == 0 || self.max_draw_attempts == 0 {
            return Err(SamplingError::configuration(
                "max_search_steps and max_draw_attempts must be positive",
            ));
        }

        Ok(())
    }
}
