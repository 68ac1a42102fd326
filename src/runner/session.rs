use std::sync::Arc;

use ballista::prelude::{SessionConfigExt, SessionContextExt};
use datafusion::{
    execution::SessionStateBuilder,
    prelude::{SessionConfig, SessionContext},
};
use object_store::ObjectStore;

use crate::{
    codec::extension::{ExtendedBallistaLogicalCodec, ExtendedBallistaPhysicalCodec},
    config::settings::SamplingConfig,
    error::{SamplingError, SamplingResult},
    planner::extension_planner::QueryPlannerWithExtensions,
    storage::location::StorageLocation,
};

/// Creates the session used to count partitions and read the sample.
///
/// Runs in process unless a Ballista scheduler is configured. In both cases
/// `store` is registered for the dataset location.
pub async fn create_session(
    config: &SamplingConfig,
    location: &StorageLocation,
    store: Arc<dyn ObjectStore>,
) -> SamplingResult<SessionContext> {
    let ctx = match &config.scheduler {
        Some(scheduler) => remote_session(scheduler).await?,
        None => local_session(),
    };

    ctx.register_object_store(&location.store_url()?, store);

    Ok(ctx)
}

pub fn local_session() -> SessionContext {
    let query_planner = Arc::new(QueryPlannerWithExtensions::default());

    let state = SessionStateBuilder::new()
        .with_query_planner(query_planner)
        .with_default_features()
        .build();

    SessionContext::new_with_state(state)
}

/// The scheduler has to plan `Sample` nodes, see the `sampling_scheduler` binary.
pub async fn remote_session(scheduler: &str) -> SamplingResult<SessionContext> {
    log::info!("connecting to ballista scheduler at {scheduler}");

    let config = SessionConfig::new_with_ballista()
        .with_ballista_logical_extension_codec(Arc::new(ExtendedBallistaLogicalCodec::default()))
        .with_ballista_physical_extension_codec(Arc::new(ExtendedBallistaPhysicalCodec::default()));

    let state = SessionStateBuilder::new()
        .with_config(config)
        .with_default_features()
        .build();

    SessionContext::remote_with_state(scheduler, state)
        .await
        .map_err(SamplingError::Session)
}
