use ballista_core::error::BallistaError;
use ballista_scheduler::cluster::BallistaCluster;
use ballista_scheduler::config::SchedulerConfig;
use ballista_scheduler::scheduler_process::start_server;
use datafusion::execution::{SessionState, SessionStateBuilder};
use datafusion::prelude::SessionConfig;
use partition_sampler::codec::extension::{
    ExtendedBallistaLogicalCodec, ExtendedBallistaPhysicalCodec,
};
use partition_sampler::planner::extension_planner::QueryPlannerWithExtensions;
use std::net::AddrParseError;
use std::sync::Arc;

///
/// Ballista scheduler able to plan sampled reads.
///
/// Point `SAMPLING_SCHEDULER` at this process to run the final read
/// on a cluster.
///
#[tokio::main]
async fn main() -> ballista_core::error::Result<()> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let config: SchedulerConfig = SchedulerConfig {
        override_logical_codec: Some(Arc::new(ExtendedBallistaLogicalCodec::default())),
        override_physical_codec: Some(Arc::new(ExtendedBallistaPhysicalCodec::default())),
        override_session_builder: Some(Arc::new(sampling_state_producer)),
        ..Default::default()
    };

    let address = format!("{}:{}", config.bind_host, config.bind_port);
    let address = address
        .parse()
        .map_err(|e: AddrParseError| BallistaError::Configuration(e.to_string()))?;

    log::info!("starting sampling scheduler on {address}");

    let cluster = BallistaCluster::new_from_config(&config).await?;
    start_server(cluster, address, Arc::new(config)).await?;

    Ok(())
}

fn sampling_state_producer(config: SessionConfig) -> datafusion::error::Result<SessionState> {
    let state = SessionStateBuilder::new()
        .with_config(config)
        .with_query_planner(Arc::new(QueryPlannerWithExtensions::default()))
        .with_default_features()
        .build();

    Ok(state)
}
