//! Query planner which knows how to turn the `Sample` logical node into `SampleExec`.
//!
//! `QueryPlannerWithExtensions` wraps the default DataFusion physical planner and
//! registers `SamplePlannerExtension`. Sessions which execute sampled reads, the
//! local one and the Ballista scheduler, must be built with this planner.
use std::sync::Arc;

use async_trait::async_trait;
use datafusion::{
    error::DataFusionError,
    execution::{SessionState, context::QueryPlanner},
    logical_expr::{LogicalPlan, UserDefinedLogicalNode},
    physical_plan::ExecutionPlan,
    physical_planner::{DefaultPhysicalPlanner, ExtensionPlanner, PhysicalPlanner},
};

use crate::{logical::sample_extension::Sample, physical::sample_exec::SampleExec};

pub struct QueryPlannerWithExtensions {
    inner: DefaultPhysicalPlanner,
}

impl std::fmt::Debug for QueryPlannerWithExtensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPlannerWithExtensions").finish()
    }
}

impl Default for QueryPlannerWithExtensions {
    fn default() -> Self {
        let planner = DefaultPhysicalPlanner::with_extension_planners(vec![Arc::new(
            SamplePlannerExtension::default(),
        )]);

        Self { inner: planner }
    }
}

#[async_trait]
impl QueryPlanner for QueryPlannerWithExtensions {
    async fn create_physical_plan(
        &self,
        logical_plan: &LogicalPlan,
        session_state: &SessionState,
    ) -> datafusion::common::Result<Arc<dyn ExecutionPlan>> {
        self.inner
            .create_physical_plan(logical_plan, session_state)
            .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct SamplePlannerExtension {}

#[async_trait]
impl ExtensionPlanner for SamplePlannerExtension {
    async fn plan_extension(
        &self,
        _planner: &dyn PhysicalPlanner,
        node: &dyn UserDefinedLogicalNode,
        _logical_inputs: &[&LogicalPlan],
        physical_inputs: &[Arc<dyn ExecutionPlan>],
        _session_state: &SessionState,
    ) -> datafusion::error::Result<Option<Arc<dyn ExecutionPlan>>> {
        let Some(Sample { fraction, seed, .. }) = node.as_any().downcast_ref::<Sample>() else {
            return Ok(None);
        };

        let input = physical_inputs
            .first()
            .ok_or(DataFusionError::Plan("Sample expects a single input".to_string()))?
            .clone();

        log::debug!("planning SampleExec with fraction {fraction}, seed {seed:?}");

        Ok(Some(Arc::new(SampleExec::new(*fraction, *seed, input))))
    }
}
