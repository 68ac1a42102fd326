use rand::Rng;

use crate::error::{SamplingError, SamplingResult};

use super::params::EstimationParams;

/// Draws distinct partition indices in `[0, partition_count)`.
///
/// The number of indices is `min(params.sample_size(n), n)`. Indices are kept
/// in draw order, so a seeded `rng` always yields the same sequence.
pub fn select_sample_indices<R: Rng + ?Sized>(
    partition_count: usize,
    params: &EstimationParams,
    rng: &mut R,
) -> SamplingResult<Vec<usize>> {
    if partition_count == 0 {
        return Err(SamplingError::degenerate(
            "no partitions found, nothing to sample",
        ));
    }

    let target = params.sample_size(partition_count).min(partition_count);
    let mut indices = Vec::with_capacity(target);
    let mut attempts = 0;

    while indices.len() < target {
        if attempts == params.max_draw_attempts {
            return Err(SamplingError::degenerate(format!(
                "drew only {} of {target} distinct partitions out of {partition_count} in {attempts} attempts",
                indices.len()
            )));
        }
        attempts += 1;

        let index = rng.random_range(0..partition_count);
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    log::debug!(
        "selected {} of {partition_count} partitions in {attempts} draws: {indices:?}",
        indices.len()
    );

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use rand::{RngCore, SeedableRng, rngs::StdRng};

    use super::select_sample_indices;
    use crate::{error::SamplingError, estimation::params::EstimationParams};

    /// Always yields the same value, so every draw lands on index 0.
    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn should_select_distinct_indices_in_range() {
        let params = EstimationParams::default();
        let mut rng = StdRng::seed_from_u64(7);

        for n in [1, 2, 3, 10, 27, 100, 101, 250, 1000] {
            let indices = select_sample_indices(n, &params, &mut rng).unwrap();
            let expected = params.sample_size(n).min(n);

            assert_eq!(expected, indices.len(), "partition count {n}");
            assert!(indices.iter().all(|i| *i < n));

            let mut distinct = indices.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(indices.len(), distinct.len());
        }
    }

    #[test]
    fn should_sample_single_partition() {
        let params = EstimationParams::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            vec![0],
            select_sample_indices(1, &params, &mut rng).unwrap()
        );
    }

    #[test]
    fn should_not_exceed_partition_count() {
        // a size rule asking for more partitions than exist
        let params = EstimationParams {
            log_base: 1.01,
            ..Default::default()
        };
        assert!(params.sample_size(4) > 4);

        let mut rng = StdRng::seed_from_u64(3);
        let mut indices = select_sample_indices(4, &params, &mut rng).unwrap();
        indices.sort();

        assert_eq!(vec![0, 1, 2, 3], indices);
    }

    #[test]
    fn should_be_repeatable_with_same_seed() {
        let params = EstimationParams::default();
        let first = select_sample_indices(500, &params, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = select_sample_indices(500, &params, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn should_reject_zero_partitions() {
        let params = EstimationParams::default();
        let result = select_sample_indices(0, &params, &mut StdRng::seed_from_u64(0));

        assert!(matches!(result, Err(SamplingError::DegenerateInput(_))));
    }

    #[test]
    fn should_stop_after_max_draw_attempts() {
        let params = EstimationParams {
            max_draw_attempts: 100,
            ..Default::default()
        };
        let result = select_sample_indices(3, &params, &mut StuckRng);

        assert!(matches!(result, Err(SamplingError::DegenerateInput(_))));
    }
}
