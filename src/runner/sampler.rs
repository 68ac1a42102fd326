//! One sampling run, start to finish.
//!
//! Partitions are listed once, a few of them are counted, the count is
//! extrapolated to the whole dataset and turned into a sampling fraction,
//! and finally the whole partition set is read through the `Sample` operator.
//! Each stage only consumes the result of the previous one.
use std::sync::Arc;

use datafusion::prelude::{DataFrame, ParquetReadOptions, SessionContext};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::settings::SamplingConfig,
    dataframe::sample::DataFrameExt,
    error::{SamplingError, SamplingResult},
    estimation::{
        estimator::{DataFrameRowCounter, RowCounter, estimate_total_count},
        params::EstimationParams,
        selector::select_sample_indices,
        solver::solve_fraction,
    },
    storage::{
        lister::{ObjectStorePartitionLister, PartitionLister},
        partition::PartitionSet,
        store::create_object_store,
    },
};

use super::session::create_session;

/// Outcome of the estimation stages.
#[derive(Debug, Clone)]
pub struct SamplingPlan {
    pub partitions: PartitionSet,
    /// Indices into `partitions`, in draw order.
    pub sample_indices: Vec<usize>,
    pub assumed_total: f64,
    pub fraction: f64,
}

pub struct Sampler {
    lister: Arc<dyn PartitionLister>,
    counter: Arc<dyn RowCounter>,
    params: EstimationParams,
}

impl Sampler {
    pub fn new(
        lister: Arc<dyn PartitionLister>,
        counter: Arc<dyn RowCounter>,
        params: EstimationParams,
    ) -> Self {
        Self {
            lister,
            counter,
            params,
        }
    }

    /// Lists partitions, samples a few of them and solves the fraction.
    pub async fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> SamplingResult<SamplingPlan> {
        let partitions = self.lister.list_partitions().await?;
        let sample_indices = select_sample_indices(partitions.len(), &self.params, rng)?;

        let assumed_total = estimate_total_count(
            partitions.as_slice(),
            &sample_indices,
            self.counter.as_ref(),
        )
        .await?;

        let fraction = solve_fraction(self.params.seed_fraction, assumed_total, &self.params)?;

        Ok(SamplingPlan {
            partitions,
            sample_indices,
            assumed_total,
            fraction,
        })
    }
}

/// Reads every partition of `plan` keeping rows with probability `plan.fraction`.
pub async fn sample_dataset(
    ctx: &SessionContext,
    plan: &SamplingPlan,
    file_extension: &str,
    seed: Option<i64>,
) -> SamplingResult<DataFrame> {
    let options = ParquetReadOptions {
        file_extension,
        ..Default::default()
    };

    ctx.read_parquet(plan.partitions.locators(), options)
        .await
        .and_then(|df| df.sample(plan.fraction, seed))
        .map_err(SamplingError::SampledRead)
}

/// Runs the whole pipeline described by `config` and returns the sampled,
/// not yet executed, dataframe.
pub async fn run(config: &SamplingConfig) -> SamplingResult<(SamplingPlan, DataFrame)> {
    let location = config.location()?;
    let store = create_object_store(&location, config)?;
    let ctx = create_session(config, &location, store.clone()).await?;

    log::info!("estimating row count of {}", location.url());

    let lister = ObjectStorePartitionLister::new(store, location, config.partition_filter());
    let counter = DataFrameRowCounter::new(ctx.clone(), config.file_extension.clone());
    let sampler = Sampler::new(
        Arc::new(lister),
        Arc::new(counter),
        config.estimation.clone(),
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let plan = sampler.plan(&mut rng).await?;

    log::info!(
        "sampling {} partitions with fraction {} (assumed total {} rows)",
        plan.partitions.len(),
        plan.fraction,
        plan.assumed_total
    );

    let sample = sample_dataset(&ctx, &plan, &config.file_extension, config.sample_seed()?).await?;

    Ok((plan, sample))
}
