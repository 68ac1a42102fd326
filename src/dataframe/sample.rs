use std::sync::Arc;

use datafusion::{
    error::DataFusionError,
    logical_expr::{Extension, LogicalPlan},
    prelude::DataFrame,
};

use crate::logical::sample_extension::Sample;

pub trait DataFrameExt {
    fn sample(self, fraction: f64, seed: Option<i64>) -> datafusion::error::Result<DataFrame>;
}

/// Returns a new `DataFrame` keeping each row of the original `DataFrame`
/// with probability `fraction`.
///
/// # Arguments
///
/// * `fraction` - Per-row retention probability, must be in the range (0.0, 1.0].
/// * `seed` - An optional seed for the random number generator to ensure reproducibility.
///
/// # Errors
///
/// Returns a `DataFusionError::Configuration` if `fraction` is not within the valid range
/// or `seed` is negative.
///
impl DataFrameExt for DataFrame {
    fn sample(self, fraction: f64, seed: Option<i64>) -> datafusion::error::Result<DataFrame> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            Err(DataFusionError::Configuration(format!(
                "fraction should be in (0, 1] range, got {fraction}"
            )))?
        }

        if seed.unwrap_or(0) < 0 {
            Err(DataFusionError::Configuration(
                "seed should be positive number".to_string(),
            ))?
        }

        let (state, input) = self.into_parts();

        let node = Arc::new(Sample::new(fraction, seed, input));
        let plan = LogicalPlan::Extension(Extension { node });

        Ok(DataFrame::new(state, plan))
    }
}
