use crate::error::{SamplingError, SamplingResult};

use super::params::EstimationParams;

/// Finds the sampling fraction for a dataset of `assumed_total` rows.
///
/// Starting at `seed_fraction` the fraction grows tenfold until
/// `round(fraction * assumed_total)` has at least `params.min_sample_digits`
/// decimal digits. A dataset too small to ever reach that size is read in
/// full, so the result is always in `(0, 1]`.
pub fn solve_fraction(
    seed_fraction: f64,
    assumed_total: f64,
    params: &EstimationParams,
) -> SamplingResult<f64> {
    if !(assumed_total.is_finite() && assumed_total > 0.0) {
        return Err(SamplingError::degenerate(format!(
            "can't derive a sampling fraction from an assumed total of {assumed_total} rows"
        )));
    }
    if !(seed_fraction.is_finite() && seed_fraction > 0.0) {
        return Err(SamplingError::degenerate(format!(
            "seed fraction must be positive, got {seed_fraction}"
        )));
    }

    let mut fraction = seed_fraction;
    for _ in 0..params.max_search_steps {
        if fraction >= 1.0 {
            log::info!(
                "assumed total of {assumed_total} rows is below the target sample size, reading everything"
            );
            return Ok(1.0);
        }

        let projected = (fraction * assumed_total).round() as u64;
        if decimal_digits(projected) >= params.min_sample_digits {
            log::info!("fraction {fraction} projects a sample of {projected} rows");
            return Ok(fraction);
        }

        log::debug!("fraction {fraction} projects only {projected} rows");
        fraction *= 10.0;
    }

    Err(SamplingError::degenerate(format!(
        "no fraction found within {} steps from {seed_fraction} for {assumed_total} rows",
        params.max_search_steps
    )))
}

fn decimal_digits(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}
