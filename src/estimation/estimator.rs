//! Extrapolates the row count of a whole dataset from a few partitions.
//!
//! The average row count of the sampled partitions is multiplied by the total
//! number of partitions. This assumes partitions are roughly equal in size;
//! the result is an approximation, not a bound.
use async_trait::async_trait;
use datafusion::prelude::{ParquetReadOptions, SessionContext};

use crate::{
    error::{SamplingError, SamplingResult},
    storage::partition::Partition,
};

/// Returned when there is nothing to average.
pub const NO_ESTIMATE: f64 = -1.0;

/// Exact row count of a single partition.
#[async_trait]
pub trait RowCounter: Send + Sync {
    async fn count_rows(&self, partition: &Partition) -> datafusion::error::Result<usize>;
}

/// Counts rows by reading the partition as parquet through a DataFusion session.
#[derive(Clone)]
pub struct DataFrameRowCounter {
    ctx: SessionContext,
    file_extension: String,
}

impl DataFrameRowCounter {
    pub fn new(ctx: SessionContext, file_extension: impl Into<String>) -> Self {
        Self {
            ctx,
            file_extension: file_extension.into(),
        }
    }
}

#[async_trait]
impl RowCounter for DataFrameRowCounter {
    async fn count_rows(&self, partition: &Partition) -> datafusion::error::Result<usize> {
        let options = ParquetReadOptions {
            file_extension: &self.file_extension,
            ..Default::default()
        };

        self.ctx
            .read_parquet(partition.locator(), options)
            .await?
            .count()
            .await
    }
}

/// Estimates the dataset row count from the partitions at `sample_indices`.
///
/// Partitions are counted one at a time in index order. Returns
/// [NO_ESTIMATE] when `sample_indices` is empty.
pub async fn estimate_total_count(
    partitions: &[Partition],
    sample_indices: &[usize],
    counter: &dyn RowCounter,
) -> SamplingResult<f64> {
    if sample_indices.is_empty() {
        log::warn!("no partitions sampled, row count can't be estimated");
        return Ok(NO_ESTIMATE);
    }

    let mut sampled_rows: u64 = 0;
    for &index in sample_indices {
        let partition = partitions.get(index).ok_or_else(|| {
            SamplingError::degenerate(format!(
                "sample index {index} is out of range for {} partitions",
                partitions.len()
            ))
        })?;

        let rows = counter
            .count_rows(partition)
            .await
            .map_err(|source| SamplingError::RowCount {
                index,
                locator: partition.locator(),
                source,
            })?;

        log::debug!("partition #{index} ({}) has {rows} rows", partition.locator());
        sampled_rows += rows as u64;
    }

    let average = sampled_rows as f64 / sample_indices.len() as f64;
    let assumed_total = average * partitions.len() as f64;

    log::info!(
        "average of {} sampled partitions is {average} rows, assumed total is {assumed_total} rows",
        sample_indices.len()
    );

    Ok(assumed_total)
}
