//! `SampleExec` physical plan node.
//!
//! Filters each input batch with a Bernoulli mask: every row is kept with
//! probability `fraction`. Each engine partition draws from its own random
//! generator; with a seed the generator of partition `p` is seeded with
//! `seed + p`, which makes the output reproducible for a fixed partitioning.

use datafusion::arrow::{array::BooleanArray, compute::filter_record_batch};
use datafusion::error::DataFusionError;
use datafusion::physical_plan::{
    DisplayAs, DisplayFormatType, ExecutionPlan, stream::RecordBatchReceiverStreamBuilder,
};
use futures_util::stream::StreamExt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct SampleExec {
    pub fraction: f64,
    pub seed: Option<i64>,
    pub input: Arc<dyn ExecutionPlan>,
}

impl SampleExec {
    pub fn new(fraction: f64, seed: Option<i64>, input: Arc<dyn ExecutionPlan>) -> Self {
        Self {
            fraction,
            seed,
            input,
        }
    }

    fn rng(&self, partition: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64((seed as u64).wrapping_add(partition as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

impl DisplayAs for SampleExec {
    fn fmt_as(&self, _t: DisplayFormatType, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: fraction={}, seed={:?}",
            self.name(),
            self.fraction,
            self.seed
        )
    }
}

impl ExecutionPlan for SampleExec {
    fn name(&self) -> &str {
        "SampleExec"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn properties(&self) -> &datafusion::physical_plan::PlanProperties {
        self.input.properties()
    }

    fn children(&self) -> Vec<&Arc<dyn ExecutionPlan>> {
        vec![&self.input]
    }

    fn with_new_children(
        self: Arc<Self>,
        children: Vec<Arc<dyn ExecutionPlan>>,
    ) -> datafusion::error::Result<Arc<dyn ExecutionPlan>> {
        let input = children
            .into_iter()
            .next()
            .ok_or(DataFusionError::Internal(
                "SampleExec expects a single input".to_string(),
            ))?;

        Ok(Arc::new(Self::new(self.fraction, self.seed, input)))
    }

    fn execute(
        &self,
        partition: usize,
        context: Arc<datafusion::execution::TaskContext>,
    ) -> datafusion::error::Result<datafusion::execution::SendableRecordBatchStream> {
        let mut stream = self.input.execute(partition, context)?;
        let mut downstream = RecordBatchReceiverStreamBuilder::new(stream.schema(), 4);

        let tx = downstream.tx();
        let fraction = self.fraction;
        let mut rng = self.rng(partition);

        downstream.spawn(async move {
            while let Some(batch) = stream.next().await {
                let result = batch.and_then(|b| {
                    let mask: BooleanArray = (0..b.num_rows())
                        .map(|_| Some(rng.random::<f64>() < fraction))
                        .collect();

                    filter_record_batch(&b, &mask)
                        .map_err(|e| DataFusionError::ArrowError(e, None))
                });

                // receiver is gone, nobody needs more rows
                if tx.send(result).await.is_err() {
                    break;
                }
            }
            Ok(())
        });

        Ok(downstream.build())
    }
}
