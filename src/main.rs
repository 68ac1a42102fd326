use std::process::ExitCode;

use partition_sampler::{config::settings::SamplingConfig, error::SamplingError, runner::sampler};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SamplingError> {
    let config = SamplingConfig::load()?;
    let (_, sample) = sampler::run(&config).await?;

    sample
        .show_limit(config.show_limit)
        .await
        .map_err(SamplingError::SampledRead)
}
