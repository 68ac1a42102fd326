use ballista_executor::executor_process::{ExecutorProcessConfig, start_executor_process};
use partition_sampler::codec::extension::{
    ExtendedBallistaLogicalCodec, ExtendedBallistaPhysicalCodec,
};
use std::sync::Arc;

///
/// Ballista executor able to run `SampleExec`.
///
#[tokio::main]
async fn main() -> ballista_core::error::Result<()> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let config = ExecutorProcessConfig {
        override_logical_codec: Some(Arc::new(ExtendedBallistaLogicalCodec::default())),
        override_physical_codec: Some(Arc::new(ExtendedBallistaPhysicalCodec::default())),
        ..Default::default()
    };

    start_executor_process(Arc::new(config)).await
}
